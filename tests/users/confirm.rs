use actix_web::{http, test};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait};

use accounts_backend::entities::user;
use accounts_backend::test_utils::factory::{self, UserFactory as _};
use accounts_backend::types::TokenPurpose;
use accounts_backend::utils::auth::tokens::issue_confirmation_token;
use accounts_backend::utils::uid::encode_user_id;

use crate::utils::{init_app, login, HASHED_PASSWORD, PASSWORD};

fn confirm_uri(uidb64: &str, token: &str) -> String {
    format!("/confirm_email/{}/{}/", uidb64, token)
}

#[actix_web::test]
async fn valid_link_activates_the_account_exactly_once() -> Result<(), DbErr> {
    let (app, db, settings) = init_app().await?;
    let pending = factory::user().is_active(false).insert(&db).await?;
    let token = issue_confirmation_token(&pending, TokenPurpose::EmailConfirmation, &settings);
    let uri = confirm_uri(&encode_user_id(pending.id), &token);

    let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get("location").unwrap(), "/login/");

    let activated = user::Entity::find_by_id(pending.id).one(&db).await?.unwrap();
    assert!(activated.is_active);

    // The same link is dead after activation.
    let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
    let still_active = user::Entity::find_by_id(pending.id).one(&db).await?.unwrap();
    assert!(still_active.is_active);

    Ok(())
}

#[actix_web::test]
async fn token_issued_for_one_user_never_validates_for_another() -> Result<(), DbErr> {
    let (app, db, settings) = init_app().await?;
    let user_a = factory::user().is_active(false).insert(&db).await?;
    let user_b = factory::user().is_active(false).insert(&db).await?;

    let token_a = issue_confirmation_token(&user_a, TokenPurpose::EmailConfirmation, &settings);
    let uri = confirm_uri(&encode_user_id(user_b.id), &token_a);

    let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);

    let untouched = user::Entity::find_by_id(user_b.id).one(&db).await?.unwrap();
    assert!(!untouched.is_active);

    Ok(())
}

#[actix_web::test]
async fn undecodable_or_unknown_ids_are_an_invalid_link() -> Result<(), DbErr> {
    let (app, _db, settings) = init_app().await?;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&confirm_uri("%21%21%21", "sometoken"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);

    // Well-formed uid of a user that does not exist.
    let now = chrono::Utc::now();
    let ghost = user::Model {
        id: uuid::Uuid::new_v4(),
        email: "ghost@test.com".to_string(),
        username: "ghost".to_string(),
        password: "hash".to_string(),
        is_active: false,
        is_staff: false,
        is_superuser: false,
        created_at: now.into(),
        updated_at: now.into(),
    };
    let token = issue_confirmation_token(&ghost, TokenPurpose::EmailConfirmation, &settings);
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&confirm_uri(&encode_user_id(ghost.id), &token))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);

    Ok(())
}

#[actix_web::test]
async fn authenticated_requester_short_circuits_without_consuming_the_token() -> Result<(), DbErr>
{
    let (app, db, settings) = init_app().await?;
    let active = factory::user().password(HASHED_PASSWORD).insert(&db).await?;
    let pending = factory::user().is_active(false).insert(&db).await?;
    let token = issue_confirmation_token(&pending, TokenPurpose::EmailConfirmation, &settings);
    let uri = confirm_uri(&encode_user_id(pending.id), &token);

    let cookie = login(&app, &active.email, PASSWORD).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri(&uri).cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get("location").unwrap(), "/");
    let untouched = user::Entity::find_by_id(pending.id).one(&db).await?.unwrap();
    assert!(!untouched.is_active);

    // The link still works once the requester is anonymous again.
    let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    let confirmed = user::Entity::find_by_id(pending.id).one(&db).await?.unwrap();
    assert!(confirmed.is_active);

    Ok(())
}
