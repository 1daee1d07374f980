use actix_session::{config::PersistentSession, storage, SessionMiddleware};
use actix_web::{cookie, dev::Server, web::Data, App, HttpServer};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::env;

use crate::settings::Settings;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(settings: Settings) -> Result<Self, std::io::Error> {
        let db = get_database_connection().await;
        Migrator::up(&db, None).await.expect("Failed to run migrations.");
        let address = format!(
            "{}:{}",
            settings.application.host, settings.application.port
        );

        let listener = std::net::TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, db, settings).await?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub async fn get_database_connection() -> DatabaseConnection {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    Database::connect(&database_url)
        .await
        .expect("Failed to open DB connection.")
}

async fn run(
    listener: std::net::TcpListener,
    db: DatabaseConnection,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let redis_url = env::var("REDIS_URL").expect("REDIS_URL must be set");
    let secret_key = cookie::Key::from(settings.secret.hmac_secret.as_bytes());
    let redis_store = storage::RedisSessionStore::new(redis_url)
        .await
        .expect("Cannot connect to the redis session store.");

    let server = HttpServer::new(move || {
        App::new()
            .wrap(if settings.debug {
                SessionMiddleware::builder(redis_store.clone(), secret_key.clone())
                    .session_lifecycle(
                        PersistentSession::default().session_ttl(cookie::time::Duration::days(7)),
                    )
                    .cookie_name("sessionId".to_string())
                    .cookie_same_site(cookie::SameSite::None)
                    .cookie_secure(false)
                    .build()
            } else {
                SessionMiddleware::builder(redis_store.clone(), secret_key.clone())
                    .session_lifecycle(
                        PersistentSession::default().session_ttl(cookie::time::Duration::days(7)),
                    )
                    .cookie_name("sessionId".to_string())
                    .build()
            })
            .service(crate::routes::home)
            .service(crate::routes::health_check)
            .configure(crate::routes::account_routes_config)
            .app_data(Data::new(db.clone()))
            .app_data(Data::new(settings.clone()))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
