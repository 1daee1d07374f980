use actix_web::{
    http::header,
    post,
    web::{Data, Json},
    HttpResponse,
};
use sea_orm::{DbConn, SqlErr};

use crate::routes::utils::response_500;
use crate::services::user::{self as user_service, NewUser};
use crate::settings::Settings;
use crate::types::{FormErrors, SuccessResponse, TokenPurpose};
use crate::utils::auth::{password, session::get_user_id};
use crate::utils::emails::send_confirmation_link_email;
use crate::utils::validation::{is_valid_email, password_policy_errors};

#[derive(serde::Deserialize, Debug, serde::Serialize)]
struct RequestBody {
    email: String,
    username: String,
    password: String,
    password_confirmation: String,
}

#[tracing::instrument(name = "Registering a new user",
skip(db, body, session, settings),
fields(
    new_user_email = %body.email,
    new_user_username = %body.username
))]
#[post("/register/")]
pub async fn register(
    db: Data<DbConn>,
    body: Json<RequestBody>,
    session: actix_session::Session,
    settings: Data<Settings>,
) -> HttpResponse {
    // An authenticated session implies no new registration is needed.
    if get_user_id(&session).await.is_ok() {
        return HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/"))
            .json(SuccessResponse {
                message: "You are already logged in.".to_string(),
            });
    }

    let body = body.into_inner();
    let mut errors = FormErrors::default();
    if !is_valid_email(&body.email) {
        errors.add("email", "Enter a valid email address.");
    }
    if body.username.is_empty() {
        errors.add("username", "This field is required.");
    }
    for message in password_policy_errors(&body.password) {
        errors.add("password", message);
    }
    if body.password != body.password_confirmation {
        errors.add(
            "password_confirmation",
            "The two password fields didn't match.",
        );
    }
    if !errors.errors.contains_key("email") {
        match user_service::Query::find_by_email(&db, body.email.clone()).await {
            Ok(Some(_)) => errors.add("email", "A user with this email already exists."),
            Ok(None) => (),
            Err(e) => return response_500(e),
        }
    }
    if !errors.is_empty() {
        return HttpResponse::BadRequest().json(errors);
    }

    let hashed_password = password::hash(body.password.as_bytes()).await;
    let user = match user_service::Mutation::create_user(
        &db,
        NewUser {
            email: body.email,
            username: body.username,
            password: hashed_password,
        },
    )
    .await
    {
        Ok(user) => user,
        // Concurrent registrations with the same email serialize on the
        // unique constraint; the loser gets the same field error.
        Err(e) => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                let mut errors = FormErrors::default();
                errors.add("email", "A user with this email already exists.");
                return HttpResponse::BadRequest().json(errors);
            }
            _ => return response_500(e),
        },
    };

    if let Err(e) = send_confirmation_link_email(&user, TokenPurpose::EmailConfirmation, &settings)
    {
        return response_500(e);
    }

    tracing::event!(target: "backend", tracing::Level::INFO, "User created successfully.");
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .json(SuccessResponse {
            message: "Confirm your email address to complete registration.".to_string(),
        })
}
