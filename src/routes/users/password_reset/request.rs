use actix_web::{
    http::header,
    post,
    web::{Data, Json},
    HttpResponse,
};
use sea_orm::DbConn;

use crate::routes::utils::{response_404, response_500};
use crate::services::user as user_service;
use crate::settings::Settings;
use crate::types::{SuccessResponse, TokenPurpose};
use crate::utils::emails::send_confirmation_link_email;

#[derive(serde::Deserialize, Debug)]
pub struct UserEmail {
    email: String,
}

#[tracing::instrument(name = "Requesting a password reset", skip(db, body, settings), fields(user_email = %body.email))]
#[post("/password-reset/")]
pub async fn request_password_reset(
    db: Data<DbConn>,
    body: Json<UserEmail>,
    settings: Data<Settings>,
) -> HttpResponse {
    match user_service::Query::find_active_by_email(&db, body.email.clone()).await {
        Ok(Some(user)) => {
            if let Err(e) =
                send_confirmation_link_email(&user, TokenPurpose::PasswordReset, &settings)
            {
                return response_500(e);
            }
            tracing::event!(target: "backend", tracing::Level::INFO, "Password reset email sent.");
            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/password-reset/done/"))
                .json(SuccessResponse {
                    message:
                        "Password reset instructions have been sent to your email address."
                            .to_string(),
                })
        }
        Ok(None) => response_404("An active user with this email does not exist."),
        Err(e) => response_500(e),
    }
}
