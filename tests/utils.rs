use actix_http::Request;
use actix_session::{config::PersistentSession, storage::CookieSessionStore, SessionMiddleware};
use actix_web::{
    cookie::{self, Cookie},
    dev::{Service, ServiceResponse},
    http, test,
    web::Data,
    App,
};
use sea_orm::{DbConn, DbErr};
use serde_json::json;

use accounts_backend::{routes, settings::Settings, test_utils};

/// Password behind [`HASHED_PASSWORD`].
pub const PASSWORD: &str = "password";
pub const HASHED_PASSWORD: &str = "$argon2id$v=19$m=19456,t=2,p=1$r07vWFCaKrbNPrSgUrG/+Q$/2lBaeRWeox6ROMu6qAwOYmttdGXA3o4Uw2YHC/fvfY";

pub async fn init_app() -> Result<
    (
        impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
        DbConn,
        Settings,
    ),
    DbErr,
> {
    let db = test_utils::init_db().await?;
    let settings = test_utils::get_test_settings();
    let secret_key = cookie::Key::from(settings.secret.hmac_secret.as_bytes());
    // Tests run against a cookie-backed session store so no Redis is needed;
    // the middleware configuration mirrors startup.rs otherwise.
    let app = test::init_service(
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key)
                    .session_lifecycle(
                        PersistentSession::default().session_ttl(cookie::time::Duration::days(7)),
                    )
                    .cookie_name("sessionId".to_string())
                    .cookie_secure(false)
                    .build(),
            )
            .service(routes::home)
            .service(routes::health_check)
            .configure(routes::account_routes_config)
            .app_data(Data::new(db.clone()))
            .app_data(Data::new(settings.clone())),
    )
    .await;
    Ok((app, db, settings))
}

/// Pulls the `sessionId` cookie out of a response, the way a browser would.
pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    let headers = res.headers();
    let mut set_cookie_header = headers.get_all("set-cookie");
    let session_set_cookie =
        set_cookie_header.find(|sc| sc.to_str().unwrap().starts_with("sessionId="))?;
    let decoded = urlencoding::decode(session_set_cookie.to_str().unwrap())
        .unwrap()
        .into_owned();
    Some(Cookie::parse(decoded).unwrap())
}

pub async fn login(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> Cookie<'static> {
    let req = test::TestRequest::post()
        .uri("/login/")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    session_cookie(&res).expect("login did not set a session cookie")
}
