use chrono::Utc;
use sea_orm::Set;

use crate::entities::user;

pub fn user() -> user::ActiveModel {
    let now = Utc::now();
    user::ActiveModel {
        id: Set(uuid::Uuid::new_v4()),
        email: Set(format!("{}@test.com", uuid::Uuid::new_v4())),
        username: Set("alice".to_string()),
        password: Set("password".to_string()),
        is_active: Set(true),
        is_staff: Set(false),
        is_superuser: Set(false),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
}

pub trait UserFactory {
    fn is_active(self, is_active: bool) -> user::ActiveModel;
    fn email(self, email: &str) -> user::ActiveModel;
    fn username(self, username: &str) -> user::ActiveModel;
    fn password(self, hashed_password: &str) -> user::ActiveModel;
}

impl UserFactory for user::ActiveModel {
    fn is_active(mut self, is_active: bool) -> user::ActiveModel {
        self.is_active = Set(is_active);
        self
    }

    fn email(mut self, email: &str) -> user::ActiveModel {
        self.email = Set(email.to_string());
        self
    }

    fn username(mut self, username: &str) -> user::ActiveModel {
        self.username = Set(username.to_string());
        self
    }

    fn password(mut self, hashed_password: &str) -> user::ActiveModel {
        self.password = Set(hashed_password.to_string());
        self
    }
}
