use actix_web::{http, test};
use sea_orm::{ActiveModelTrait, DbErr};

use accounts_backend::test_utils::factory::{self, UserFactory as _};

use crate::utils::{init_app, login, HASHED_PASSWORD, PASSWORD};

#[actix_web::test]
async fn listing_requires_authentication() -> Result<(), DbErr> {
    let (app, _db, _) = init_app().await?;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/list_users/").to_request(),
    )
    .await;

    assert_eq!(res.status(), http::StatusCode::UNAUTHORIZED);
    Ok(())
}

#[actix_web::test]
async fn any_authenticated_user_sees_everyone() -> Result<(), DbErr> {
    let (app, db, _) = init_app().await?;
    let viewer = factory::user().password(HASHED_PASSWORD).insert(&db).await?;
    factory::user().is_active(false).insert(&db).await?;
    factory::user().insert(&db).await?;

    let cookie = login(&app, &viewer.email, PASSWORD).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/list_users/")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), http::StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(res).await;
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert!(users
        .iter()
        .any(|u| u["status"] == "pending" && u["is_active"] == false));
    assert!(users.iter().all(|u| u.get("password").is_none()));

    Ok(())
}
