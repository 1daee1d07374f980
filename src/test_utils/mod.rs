//! Shared helpers for unit and integration tests.

pub mod factory;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

use crate::settings::{
    ApplicationSettings, EmailBackend, EmailSettings, SecretSettings, Settings,
};

pub async fn init_db() -> Result<DbConn, DbErr> {
    // A single connection, or every pooled connection would get its own
    // empty in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);
    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn get_test_settings() -> Settings {
    Settings {
        application: ApplicationSettings {
            port: 5000,
            host: "127.0.0.1".to_string(),
            base_url: "http://127.0.0.1".to_string(),
            protocol: "http".to_string(),
        },
        secret: SecretSettings {
            secret_key: "supersecretkeyyoushouldnotcommit".to_string(),
            hmac_secret: "averylongrandomhmacsecretthatmustbeatleastsixtyfourbyteslong!!!!"
                .to_string(),
            token_expiration: 30,
        },
        email: EmailSettings {
            backend: EmailBackend::Console,
            host: "localhost".to_string(),
            host_user: "tester".to_string(),
            host_user_password: "password".to_string(),
            sender: "Accounts <no-reply@accounts.test>".to_string(),
        },
        debug: true,
    }
}
