use serde::{Deserialize, Serialize};

use crate::entities::user;

/// Account lifecycle: `Pending` until the email confirmation handler flips
/// `is_active`, then `Active`. There is no transition back.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Pending,
    Active,
}

impl From<&user::Model> for AccountStatus {
    fn from(user: &user::Model) -> Self {
        if user.is_active {
            AccountStatus::Active
        } else {
            AccountStatus::Pending
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct UserVisible {
    pub id: uuid::Uuid,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub status: AccountStatus,
}

impl From<&user::Model> for UserVisible {
    fn from(user: &user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            is_active: user.is_active,
            status: user.into(),
        }
    }
}
