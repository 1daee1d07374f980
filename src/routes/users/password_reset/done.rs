use actix_web::{get, HttpResponse};

use crate::types::SuccessResponse;

#[get("/password-reset/done/")]
pub async fn password_reset_done() -> HttpResponse {
    HttpResponse::Ok().json(SuccessResponse {
        message:
            "Password reset instructions have been sent to your email address. Kindly take action before the link expires."
                .to_string(),
    })
}
