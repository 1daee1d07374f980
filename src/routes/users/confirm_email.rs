use actix_web::{
    get,
    http::header,
    web::{Data, Path},
    HttpResponse,
};
use sea_orm::DbConn;

use crate::routes::utils::{response_404, response_500};
use crate::services::user as user_service;
use crate::settings::Settings;
use crate::types::{SuccessResponse, TokenPurpose};
use crate::utils::auth::{session::get_user_id, tokens::verify_confirmation_token};
use crate::utils::uid::decode_user_id;

// One opaque answer for every bad link: undecodable id, unknown user,
// expired, tampered, or already spent.
fn invalid_link() -> HttpResponse {
    response_404("Activation link is invalid")
}

#[tracing::instrument(name = "Activating a new user", skip(db, path, session, settings))]
#[get("/confirm_email/{uidb64}/{token}/")]
pub async fn confirm_email(
    db: Data<DbConn>,
    path: Path<(String, String)>,
    session: actix_session::Session,
    settings: Data<Settings>,
) -> HttpResponse {
    // An authenticated requester is sent home without consuming the token.
    if get_user_id(&session).await.is_ok() {
        return HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/"))
            .json(SuccessResponse {
                message: "You are already logged in.".to_string(),
            });
    }

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

    if let Err(e) =
        verify_confirmation_token(&token, &user, TokenPurpose::EmailConfirmation, &settings)
    {
        tracing::event!(target: "backend", tracing::Level::ERROR, "{}", e);
        return invalid_link();
    }

    match user_service::Mutation::activate(&db, user).await {
        Ok(_) => {
            tracing::event!(target: "backend", tracing::Level::INFO, "New user was activated successfully.");
            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/login/"))
                .json(SuccessResponse {
                    message: "Your email address has been confirmed.".to_string(),
                })
        }
        Err(e) => response_500(e),
    }
}
