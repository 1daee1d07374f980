use pasetors::claims::{Claims, ClaimsValidationRules};
use pasetors::keys::SymmetricKey;
use pasetors::token::UntrustedToken;
use pasetors::version4::V4;
use pasetors::{local, Local};

use crate::entities::user;
use crate::settings::Settings;
use crate::types::{ConfirmationToken, TokenPurpose};

/// Implicit assertion for v4.local tokens. It is authenticated but never
/// transmitted, and it folds in the user's mutable state: activating the
/// account or changing the password makes every outstanding token
/// undecryptable, so a link can only ever be spent once, and a token issued
/// for one user can never verify for another.
fn state_assertion(user: &user::Model, settings: &Settings) -> String {
    format!(
        "{}:{}:{}:{}",
        settings.secret.hmac_secret, user.id, user.password, user.is_active
    )
}

fn validity_window(purpose: TokenPurpose, settings: &Settings) -> chrono::Duration {
    match purpose {
        TokenPurpose::EmailConfirmation => {
            chrono::Duration::minutes(settings.secret.token_expiration)
        }
        TokenPurpose::PasswordReset => chrono::Duration::hours(1),
    }
}

#[tracing::instrument(name = "Issue confirmation token", skip(user, settings), fields(user_id = %user.id))]
pub fn issue_confirmation_token(
    user: &user::Model,
    purpose: TokenPurpose,
    settings: &Settings,
) -> String {
    let dt = chrono::Local::now() + validity_window(purpose, settings);

    let mut claims = Claims::new().unwrap();
    claims.expiration(&dt.to_rfc3339()).unwrap();
    claims
        .add_additional("user_id", serde_json::json!(user.id))
        .unwrap();
    claims
        .add_additional("purpose", serde_json::json!(purpose.as_str()))
        .unwrap();

    let sk = SymmetricKey::<V4>::from(settings.secret.secret_key.as_bytes()).unwrap();
    local::encrypt(
        &sk,
        &claims,
        None,
        Some(state_assertion(user, settings).as_bytes()),
    )
    .unwrap()
}

/// Checks a token against the user's *current* row. Malformed, expired,
/// tampered, reused-after-activation and issued-for-someone-else all come
/// back as the same opaque error.
#[tracing::instrument(name = "Verify confirmation token", skip(token, user, settings), fields(user_id = %user.id))]
pub fn verify_confirmation_token(
    token: &str,
    user: &user::Model,
    purpose: TokenPurpose,
    settings: &Settings,
) -> Result<ConfirmationToken, String> {
    let sk = SymmetricKey::<V4>::from(settings.secret.secret_key.as_bytes())
        .map_err(|e| format!("Unable to build token key: {}", e))?;

    let validation_rules = ClaimsValidationRules::new();
    let untrusted = UntrustedToken::<Local, V4>::try_from(token)
        .map_err(|e| format!("TokenValidation: {}", e))?;
    let trusted = local::decrypt(
        &sk,
        &untrusted,
        &validation_rules,
        None,
        Some(state_assertion(user, settings).as_bytes()),
    )
    .map_err(|e| format!("Pasetor: {}", e))?;

    let claims = trusted
        .payload_claims()
        .ok_or_else(|| "Decrypted token carries no claims".to_string())?;

    match claims.get_claim("purpose") {
        Some(value) if value.as_str() == Some(purpose.as_str()) => (),
        _ => return Err("Token purpose mismatch".to_string()),
    }

    let user_id = claims
        .get_claim("user_id")
        .cloned()
        .and_then(|value| serde_json::from_value::<uuid::Uuid>(value).ok())
        .ok_or_else(|| "Token carries no user id".to_string())?;
    if user_id != user.id {
        return Err("Token was issued for another user".to_string());
    }

    Ok(ConfirmationToken { user_id })
}
