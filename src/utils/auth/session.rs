use crate::types::USER_ID_KEY;

/// Request-scoped current-user lookup. Every authenticated handler goes
/// through this instead of holding any ambient authentication state.
pub async fn get_user_id(session: &actix_session::Session) -> Result<uuid::Uuid, String> {
    match session.get(USER_ID_KEY) {
        Ok(user_id) => match user_id {
            None => Err("You are not authenticated".to_string()),
            Some(id) => Ok(id),
        },
        Err(e) => Err(e.to_string()),
    }
}
