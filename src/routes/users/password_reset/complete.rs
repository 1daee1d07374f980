use actix_web::{
    post,
    web::{Data, Json},
    HttpResponse,
};
use sea_orm::DbConn;

use crate::routes::utils::{response_404, response_500};
use crate::services::user as user_service;
use crate::settings::Settings;
use crate::types::{FormErrors, SuccessResponse, TokenPurpose};
use crate::utils::auth::{password, tokens::verify_confirmation_token};
use crate::utils::uid::decode_user_id;
use crate::utils::validation::password_policy_errors;

fn invalid_link() -> HttpResponse {
    response_404("Password reset link is invalid")
}

#[derive(serde::Deserialize, Debug)]
struct RequestBody {
    uidb64: String,
    token: String,
    new_password: String,
    confirm_password: String,
}

#[tracing::instrument(name = "Completing a password reset", skip(db, body, settings))]
#[post("/password-reset/complete/")]
pub async fn complete_password_reset(
    db: Data<DbConn>,
    body: Json<RequestBody>,
    settings: Data<Settings>,
) -> HttpResponse {
    let body = body.into_inner();
    let user_id = match decode_user_id(&body.uidb64) {
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

    // The token is bound to the current hash, so completing the reset
    // invalidates the link for any further attempt.
    if let Err(e) =
        verify_confirmation_token(&body.token, &user, TokenPurpose::PasswordReset, &settings)
    {
        tracing::event!(target: "backend", tracing::Level::ERROR, "{}", e);
        return invalid_link();
    }

    if body.new_password != body.confirm_password {
        return response_404("Passwords do not match");
    }
    let policy_errors = password_policy_errors(&body.new_password);
    if !policy_errors.is_empty() {
        let mut errors = FormErrors::default();
        for message in policy_errors {
            errors.add("new_password", message);
        }
        return HttpResponse::BadRequest().json(errors);
    }

    let hashed_password = password::hash(body.new_password.as_bytes()).await;
    match user_service::Mutation::update_user_password(&db, user.id, hashed_password).await {
        Ok(_) => {
            tracing::event!(target: "backend", tracing::Level::INFO, "User password was reset successfully.");
            HttpResponse::Ok().json(SuccessResponse {
                message:
                    "Your password has been changed successfully. Kindly login with the new password."
                        .to_string(),
            })
        }
        Err(e) => response_500(e),
    }
}
