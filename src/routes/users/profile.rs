use actix_web::{get, web::Data, HttpResponse};
use sea_orm::DbConn;

use crate::routes::utils::{response_401, response_404, response_500};
use crate::services::user as user_service;
use crate::types::UserVisible;
use crate::utils::auth::session::get_user_id;

#[tracing::instrument(name = "Viewing own profile", skip(db, session))]
#[get("/profile/")]
pub async fn profile(db: Data<DbConn>, session: actix_session::Session) -> HttpResponse {
    let user_id = match get_user_id(&session).await {
        Ok(user_id) => user_id,
        Err(_) => return response_401(),
    };
    match user_service::Query::find_by_id(&db, user_id).await {
        Ok(Some(user)) => HttpResponse::Ok().json(UserVisible::from(&user)),
        Ok(None) => response_404("We could not find the user."),
        Err(e) => response_500(e),
    }
}
