use actix_web::{get, web::Data, HttpResponse};
use sea_orm::DbConn;

use crate::routes::utils::{response_401, response_500};
use crate::services::user as user_service;
use crate::types::UserVisible;
use crate::utils::auth::session::get_user_id;

// Simple administrative inspection: any authenticated user may view, there
// is no pagination and no staff gate.
#[tracing::instrument(name = "Listing all users", skip(db, session))]
#[get("/list_users/")]
pub async fn list_users(db: Data<DbConn>, session: actix_session::Session) -> HttpResponse {
    if get_user_id(&session).await.is_err() {
        return response_401();
    }
    match user_service::Query::all(&db).await {
        Ok(users) => {
            HttpResponse::Ok().json(users.iter().map(UserVisible::from).collect::<Vec<_>>())
        }
        Err(e) => response_500(e),
    }
}
