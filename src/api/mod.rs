pub mod countries;
pub mod health;
pub mod metrics;
pub mod places;
pub mod root;
pub mod swagger;
pub mod users;

use actix_web::web;

use crate::utils::AppError;

/// Registra todas as rotas do serviço. O store (`web::Data<dyn TourStore>`)
/// é injetado por quem monta o `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .route("/", web::get().to(root::index))
        .route("/test", web::get().to(root::test_message))
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        // ==================== PLACES ====================
        .route("/places", web::get().to(places::list_places))
        .route("/places", web::post().to(places::create_place))
        .route("/places/{_id}", web::put().to(places::upsert_place))
        .route("/places/{_id}", web::delete().to(places::delete_place))
        .route("/home-places", web::get().to(places::home_places))
        .route("/details/{id}", web::get().to(places::place_details))
        .route("/places-email/{email}", web::get().to(places::places_by_email))
        .route("/places-country/{country}", web::get().to(places::places_by_country))
        // ==================== USERS ====================
        .route("/users", web::get().to(users::get_user))
        .route("/users", web::post().to(users::create_user))
        .route("/users", web::patch().to(users::touch_user))
        // ==================== COUNTRIES ====================
        .route("/country", web::post().to(countries::create_country))
        .route("/country", web::get().to(countries::list_countries));
}

/// Corpo JSON inválido vira 400 com `{success:false, message}`
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into())
}
