use actix_web::{http, test};
use sea_orm::{ActiveModelTrait, DbErr};
use serde_json::json;

use accounts_backend::test_utils::factory::{self, UserFactory as _};

use crate::utils::{init_app, login, session_cookie, HASHED_PASSWORD, PASSWORD};

#[actix_web::test]
async fn inactive_account_never_logs_in_even_with_the_right_password() -> Result<(), DbErr> {
    let (app, db, _) = init_app().await?;
    let pending = factory::user()
        .is_active(false)
        .password(HASHED_PASSWORD)
        .insert(&db)
        .await?;

    let req = test::TestRequest::post()
        .uri("/login/")
        .set_json(json!({ "email": pending.email, "password": PASSWORD }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), http::StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&res).is_none());

    Ok(())
}

#[actix_web::test]
async fn unknown_email_gets_the_same_generic_error() -> Result<(), DbErr> {
    let (app, _db, _) = init_app().await?;

    let req = test::TestRequest::post()
        .uri("/login/")
        .set_json(json!({ "email": "nobody@example.com", "password": "whatever" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), http::StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Email or password is incorrect.");
    Ok(())
}

#[actix_web::test]
async fn wrong_password_gets_the_same_generic_error() -> Result<(), DbErr> {
    let (app, db, _) = init_app().await?;
    let user = factory::user().password(HASHED_PASSWORD).insert(&db).await?;

    let req = test::TestRequest::post()
        .uri("/login/")
        .set_json(json!({ "email": user.email, "password": "not-the-password" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), http::StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Email or password is incorrect.");
    Ok(())
}

#[actix_web::test]
async fn login_then_logout_invalidates_the_session() -> Result<(), DbErr> {
    let (app, db, _) = init_app().await?;
    let user = factory::user().password(HASHED_PASSWORD).insert(&db).await?;

    let cookie = login(&app, &user.email, PASSWORD).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/profile/")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), http::StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/logout/")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get("location").unwrap(), "/");
    // The logout response rewrites the cookie; a browser would send the
    // emptied one from here on.
    let cleared = session_cookie(&res).expect("logout did not rewrite the session cookie");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/profile/")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), http::StatusCode::UNAUTHORIZED);

    Ok(())
}

#[actix_web::test]
async fn logout_is_idempotent_without_a_session() -> Result<(), DbErr> {
    let (app, _db, _) = init_app().await?;

    let res =
        test::call_service(&app, test::TestRequest::post().uri("/logout/").to_request()).await;

    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get("location").unwrap(), "/");
    Ok(())
}
