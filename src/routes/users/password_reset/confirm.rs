use actix_web::{
    get,
    web::{Data, Path},
    HttpResponse,
};
use sea_orm::DbConn;

use crate::routes::utils::{response_404, response_500};
use crate::services::user as user_service;
use crate::settings::Settings;
use crate::types::{SuccessResponse, TokenPurpose};
use crate::utils::auth::tokens::verify_confirmation_token;
use crate::utils::uid::decode_user_id;

fn invalid_link() -> HttpResponse {
    response_404("Password reset link is invalid")
}

#[tracing::instrument(name = "Confirming a password reset link", skip(db, path, settings))]
#[get("/password-reset/confirm/{uidb64}/{token}/")]
pub async fn confirm_password_reset(
    db: Data<DbConn>,
    path: Path<(String, String)>,
    settings: Data<Settings>,
) -> HttpResponse {
    let (uidb64, token) = path.into_inner();
    let user_id = match decode_user_id(&uidb64) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::event!(target: "backend", tracing::Level::ERROR, "{}", e);
            return invalid_link();
        }
    };
    let user = match user_service::Query::find_by_id(&db, user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return invalid_link(),
        Err(e) => return response_500(e),
    };

    match verify_confirmation_token(&token, &user, TokenPurpose::PasswordReset, &settings) {
        Ok(_) => HttpResponse::Ok().json(SuccessResponse {
            message: "The link is valid. Submit your new password.".to_string(),
        }),
        Err(e) => {
            tracing::event!(target: "backend", tracing::Level::ERROR, "{}", e);
            invalid_link()
        }
    }
}
