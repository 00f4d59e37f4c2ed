use actix_web::{web, HttpResponse};

use crate::database::TourStore;
use crate::models::{Country, InsertAck};
use crate::utils::{AppError, ErrorBody};

#[utoipa::path(
    post,
    path = "/country",
    tag = "Countries",
    request_body(content = Object, description = "Country document, stored as sent"),
    responses(
        (status = 200, description = "Insert acknowledgment", body = InsertAck),
        (status = 400, description = "Body is not a JSON object", body = ErrorBody)
    )
)]
pub async fn create_country(
    store: web::Data<dyn TourStore>,
    body: web::Json<Country>,
) -> Result<HttpResponse, AppError> {
    let mut country = body.into_inner();
    country.id = None;

    let ack = store.insert_country(country).await?;
    log::info!("✅ Country created: {}", ack.inserted_id);
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    get,
    path = "/country",
    tag = "Countries",
    responses(
        (status = 200, description = "All countries in store order")
    )
)]
pub async fn list_countries(store: web::Data<dyn TourStore>) -> Result<HttpResponse, AppError> {
    let countries = store.list_countries().await?;
    Ok(HttpResponse::Ok().json(countries))
}
