use actix_web::{HttpResponse, Responder};
use serde::{Deserialize, Serialize};

pub const BANNER: &str = "Tourist places server is running";

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Static banner", body = String))
)]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(BANNER)
}

#[utoipa::path(
    get,
    path = "/test",
    tag = "Health",
    responses((status = 200, description = "Fixed test message", body = MessageResponse))
)]
pub async fn test_message() -> impl Responder {
    HttpResponse::Ok().json(MessageResponse {
        success: true,
        message: "This is test message".to_string(),
    })
}
