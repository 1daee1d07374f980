use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

/// URL-safe, unpadded base64 of the user id's string form, used as the
/// `uidb64` segment of confirmation and reset links.
pub fn encode_user_id(id: uuid::Uuid) -> String {
    URL_SAFE_NO_PAD.encode(id.to_string().as_bytes())
}

pub fn decode_user_id(uidb64: &str) -> Result<uuid::Uuid, String> {
    let bytes = URL_SAFE_NO_PAD
        .decode(uidb64)
        .map_err(|e| format!("Invalid base64 user id: {}", e))?;
    let raw = String::from_utf8(bytes).map_err(|e| format!("Invalid user id bytes: {}", e))?;
    uuid::Uuid::parse_str(&raw).map_err(|e| format!("Invalid user id: {}", e))
}
