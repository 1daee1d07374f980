use actix_web::{get, HttpResponse};

use crate::types::SuccessResponse;

#[get("/")]
pub async fn home() -> HttpResponse {
    HttpResponse::Ok().json(SuccessResponse {
        message: "Welcome to the accounts service.".to_string(),
    })
}

#[get("/health-check")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json("Application is safe and healthy.")
}
