use actix_web::{http::header, post, HttpResponse};

use crate::types::SuccessResponse;
use crate::utils::auth::session::get_user_id;

#[tracing::instrument(name = "Log out user", skip(session))]
#[post("/logout/")]
pub async fn logout(session: actix_session::Session) -> HttpResponse {
    match get_user_id(&session).await {
        Ok(_) => {
            tracing::event!(target: "backend", tracing::Level::INFO, "User_id retrieved from the session.");
            session.purge();
        }
        // Idempotent: logging out without a session is still a logout.
        Err(_) => {
            tracing::event!(target: "backend", tracing::Level::DEBUG, "Logout requested without an authenticated session.");
        }
    }
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .json(SuccessResponse {
            message: "You have successfully logged out.".to_string(),
        })
}
