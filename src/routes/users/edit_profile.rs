use actix_session::SessionInsertError;
use actix_web::{
    http::header,
    post,
    rt::task,
    web::{Data, Json},
    HttpResponse,
};
use sea_orm::DbConn;

use crate::routes::utils::{response_401, response_404, response_500};
use crate::services::user::{self as user_service, ProfileChanges};
use crate::types::{FormErrors, SuccessResponse, USER_EMAIL_KEY, USER_ID_KEY};
use crate::utils::auth::password::{self, verify_password};
use crate::utils::auth::session::get_user_id;
use crate::utils::validation::is_valid_email;

/// Empty fields mean "leave as is", matching an HTML form posting every
/// input whether or not the user filled it in.
#[derive(serde::Deserialize, Debug, serde::Serialize, Default)]
struct RequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    old_password: String,
    #[serde(default)]
    new_password: String,
    #[serde(default)]
    confirm_password: String,
}

#[tracing::instrument(name = "Editing own profile", skip(db, body, session))]
#[post("/edit_profile/")]
pub async fn edit_profile(
    db: Data<DbConn>,
    body: Json<RequestBody>,
    session: actix_session::Session,
) -> HttpResponse {
    let user_id = match get_user_id(&session).await {
        Ok(user_id) => user_id,
        Err(_) => return response_401(),
    };
    let user = match user_service::Query::find_by_id(&db, user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return response_404("We could not find the user."),
        Err(e) => return response_500(e),
    };

    let body = body.into_inner();
    let mut changes = ProfileChanges::default();
    if !body.username.is_empty() {
        changes.username = Some(body.username);
    }
    if !body.email.is_empty() {
        if !is_valid_email(&body.email) {
            let mut errors = FormErrors::default();
            errors.add("email", "Enter a valid email address.");
            return HttpResponse::BadRequest().json(errors);
        }
        // TODO: a changed email is neither re-confirmed nor checked for
        // uniqueness here; only the DB constraint stops a duplicate.
        changes.email = Some(body.email);
    }

    // The password change is only attempted when the whole triple is there.
    if !body.old_password.is_empty()
        && !body.new_password.is_empty()
        && !body.confirm_password.is_empty()
    {
        let hash = user.password.clone();
        let old_password = body.old_password.clone();
        if task::spawn_blocking(move || verify_password(&hash, old_password.as_bytes()))
            .await
            .expect("Unable to join the password verification task.")
            .is_err()
        {
            // Nothing at all is persisted on a failed password change.
            return response_404("Old password is incorrect");
        }
        if body.new_password != body.confirm_password {
            return response_404("Passwords do not match");
        }
        changes.password = Some(password::hash(body.new_password.as_bytes()).await);
    }

    match user_service::Mutation::update_profile(&db, user, changes).await {
        Ok(updated) => {
            // Rebind the session so it survives the credential change.
            if let Err(e) = renew_session(&session, updated.id, updated.email.clone()) {
                return response_500(e);
            }
            tracing::event!(target: "backend", tracing::Level::INFO, "User profile updated successfully.");
            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/"))
                .json(SuccessResponse {
                    message: "Profile successfully updated".to_string(),
                })
        }
        Err(e) => response_500(e),
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
