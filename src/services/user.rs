use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::user;

#[derive(serde::Deserialize, Debug, serde::Serialize, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    /// Already hashed; this layer never sees a clear-text password.
    pub password: String,
}

/// Accepted profile changes, applied as one update.
#[derive(Debug, Default, Clone)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

pub struct Mutation;

impl Mutation {
    pub async fn create_user(db: &DbConn, form_data: NewUser) -> Result<user::Model, DbErr> {
        let now = Utc::now();
        user::ActiveModel {
            id: Set(uuid::Uuid::new_v4()),
            email: Set(form_data.email),
            username: Set(form_data.username),
            password: Set(form_data.password),
            is_active: Set(false),
            is_staff: Set(false),
            is_superuser: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(db)
        .await
    }

    pub async fn activate(db: &DbConn, user: user::Model) -> Result<user::Model, DbErr> {
        let mut user: user::ActiveModel = user.into();
        user.is_active = Set(true);
        user.updated_at = Set(Utc::now().into());
        user.update(db).await
    }

    pub async fn update_profile(
        db: &DbConn,
        user: user::Model,
        changes: ProfileChanges,
    ) -> Result<user::Model, DbErr> {
        let mut user: user::ActiveModel = user.into();
        if let Some(email) = changes.email {
            user.email = Set(email);
        }
        if let Some(username) = changes.username {
            user.username = Set(username);
        }
        if let Some(password) = changes.password {
            user.password = Set(password);
        }
        user.updated_at = Set(Utc::now().into());
        user.update(db).await
    }

    pub async fn update_user_password(
        db: &DbConn,
        id: uuid::Uuid,
        password: String,
    ) -> Result<user::Model, DbErr> {
        match Query::find_by_id(db, id).await? {
            Some(user) => {
                let mut user: user::ActiveModel = user.into();
                user.password = Set(password);
                user.updated_at = Set(Utc::now().into());
                user.update(db).await
            }
            None => Err(DbErr::RecordNotFound(format!("user {} not found", id))),
        }
    }
}

pub struct Query;

impl Query {
    pub async fn find_by_id(db: &DbConn, id: uuid::Uuid) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_email(
        db: &DbConn,
        email: String,
    ) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(db)
            .await
    }

    pub async fn find_active_by_email(
        db: &DbConn,
        email: String,
    ) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::IsActive.eq(true))
            .one(db)
            .await
    }

    pub async fn all(db: &DbConn) -> Result<Vec<user::Model>, DbErr> {
        user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(db)
            .await
    }
}
