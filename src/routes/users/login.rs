use actix_session::SessionInsertError;
use actix_web::{
    http::header,
    post,
    rt::task,
    web::{Data, Json},
    HttpResponse,
};
use sea_orm::DbConn;

use crate::routes::utils::response_500;
use crate::services::user as user_service;
use crate::types::{ErrorResponse, UserVisible, USER_EMAIL_KEY, USER_ID_KEY};
use crate::utils::auth::password::verify_password;

// One message for unknown email, wrong password and inactive account alike,
// so responses cannot be used to enumerate accounts.
const LOGIN_FAILED_MESSAGE: &str = "Email or password is incorrect.";

#[derive(serde::Deserialize, Debug, serde::Serialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

#[tracing::instrument(name = "Logging a user in", skip(db, req_user, session), fields(user_email = %req_user.email))]
#[post("/login/")]
pub async fn login(
    db: Data<DbConn>,
    req_user: Json<LoginUser>,
    session: actix_session::Session,
) -> HttpResponse {
    // Inactive accounts are invisible to this lookup, so a pending user
    // fails exactly like a wrong password.
    let user = match user_service::Query::find_active_by_email(&db, req_user.email.clone()).await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::event!(target: "backend", tracing::Level::WARN, "No active user with this email.");
            return HttpResponse::Unauthorized().json(ErrorResponse {
                error: LOGIN_FAILED_MESSAGE.to_string(),
            });
        }
        Err(e) => return response_500(e),
    };

    let hash = user.password.clone();
    let password = req_user.password.clone();
    match task::spawn_blocking(move || verify_password(&hash, password.as_bytes()))
        .await
        .expect("Unable to join the password verification task.")
    {
        Ok(_) => {
            tracing::event!(target: "backend", tracing::Level::INFO, "User logged in successfully.");
            match renew_session(&session, user.id, user.email.clone()) {
                Ok(_) => HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, "/"))
                    .json(UserVisible::from(&user)),
                Err(e) => response_500(e),
            }
        }
        Err(e) => {
            tracing::event!(target: "argon2", tracing::Level::WARN, "Failed to authenticate user: {:#?}", e);
            HttpResponse::Unauthorized().json(ErrorResponse {
                error: LOGIN_FAILED_MESSAGE.to_string(),
            })
        }
    }
}

fn renew_session(
    session: &actix_session::Session,
    id: uuid::Uuid,
    email: String,
) -> Result<(), SessionInsertError> {
    session.renew();
    session.insert(USER_ID_KEY, id)?;
    session.insert(USER_EMAIL_KEY, email)?;
    Ok(())
}
