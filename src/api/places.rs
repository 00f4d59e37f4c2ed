use actix_web::{web, HttpResponse};
use mongodb::bson::oid::ObjectId;

use crate::database::{TourStore, RECENT_PLACES_LIMIT};
use crate::models::{
    sort_by_average_cost, DeleteAck, InsertAck, Place, PlaceFields, PlacesQuery, UpdateAck,
};
use crate::utils::{AppError, ErrorBody};

fn parse_place_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| AppError::InvalidRequest(format!("Invalid place id '{}'", raw)))
}

/// GET /places - Lista todos os lugares, opcionalmente ordenados por custo
#[utoipa::path(
    get,
    path = "/places",
    tag = "Places",
    params(PlacesQuery),
    responses(
        (status = 200, description = "All places; `high`/`low` sort by averageCost", body = [PlaceFields]),
        (status = 400, description = "Unknown sort mode", body = ErrorBody)
    )
)]
pub async fn list_places(
    store: web::Data<dyn TourStore>,
    query: web::Query<PlacesQuery>,
) -> Result<HttpResponse, AppError> {
    let mode = query.sort.unwrap_or_default();
    let mut places = store.list_places().await?;
    sort_by_average_cost(&mut places, mode);

    log::debug!("📋 GET /places - {} places (sort: {:?})", places.len(), mode);
    Ok(HttpResponse::Ok().json(places))
}

/// GET /home-places - Os 6 lugares mais recentes
#[utoipa::path(
    get,
    path = "/home-places",
    tag = "Places",
    responses(
        (status = 200, description = "Most recently added places, newest first", body = [PlaceFields])
    )
)]
pub async fn home_places(store: web::Data<dyn TourStore>) -> Result<HttpResponse, AppError> {
    let places = store.recent_places(RECENT_PLACES_LIMIT).await?;
    Ok(HttpResponse::Ok().json(places))
}

/// GET /details/{id} - Um lugar ou null (id inválido também dá null)
#[utoipa::path(
    get,
    path = "/details/{id}",
    tag = "Places",
    params(("id" = String, Path, description = "Place ObjectId (hex)")),
    responses(
        (status = 200, description = "The place, or null when the id is malformed or unknown", body = PlaceFields)
    )
)]
pub async fn place_details(
    store: web::Data<dyn TourStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let raw_id = path.into_inner();

    let place: Option<Place> = match ObjectId::parse_str(raw_id.trim()) {
        Ok(id) => store.find_place(id).await?,
        Err(_) => {
            log::debug!("GET /details/{} - malformed id", raw_id);
            None
        }
    };

    Ok(HttpResponse::Ok().json(place))
}

/// GET /places-email/{email} - Lugares cadastrados por um usuário
#[utoipa::path(
    get,
    path = "/places-email/{email}",
    tag = "Places",
    params(("email" = String, Path, description = "Owner email, exact match")),
    responses(
        (status = 200, description = "Places whose userEmail equals the given email", body = [PlaceFields])
    )
)]
pub async fn places_by_email(
    store: web::Data<dyn TourStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    let places = store.places_by_email(&email).await?;
    Ok(HttpResponse::Ok().json(places))
}

/// GET /places-country/{country} - Filtro por país, sem diferenciar maiúsculas
#[utoipa::path(
    get,
    path = "/places-country/{country}",
    tag = "Places",
    params(("country" = String, Path, description = "Country name, case-insensitive exact match")),
    responses(
        (status = 200, description = "Places in the given country", body = [PlaceFields])
    )
)]
pub async fn places_by_country(
    store: web::Data<dyn TourStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let country = path.into_inner();
    let places = store.places_by_country(&country).await?;
    Ok(HttpResponse::Ok().json(places))
}

/// POST /places - Insere o documento como veio
#[utoipa::path(
    post,
    path = "/places",
    tag = "Places",
    request_body = PlaceFields,
    responses(
        (status = 200, description = "Insert acknowledgment", body = InsertAck),
        (status = 400, description = "Body is not a JSON object, or a fixed field is not a string/number", body = ErrorBody)
    )
)]
pub async fn create_place(
    store: web::Data<dyn TourStore>,
    body: web::Json<Place>,
) -> Result<HttpResponse, AppError> {
    let mut place = body.into_inner();
    // _id é sempre gerado pelo banco
    place.id = None;

    let ack = store.insert_place(place).await?;
    log::info!("✅ Place created: {}", ack.inserted_id);
    Ok(HttpResponse::Ok().json(ack))
}

/// PUT /places/{_id} - Sobrescreve o conjunto fixo de campos (upsert).
/// Campos fora do conjunto são descartados.
#[utoipa::path(
    put,
    path = "/places/{_id}",
    tag = "Places",
    params(("_id" = String, Path, description = "Place ObjectId (hex)")),
    request_body = PlaceFields,
    responses(
        (status = 200, description = "Update acknowledgment; upsertedId is set when a new place was created", body = UpdateAck),
        (status = 400, description = "Malformed id or body", body = ErrorBody)
    )
)]
pub async fn upsert_place(
    store: web::Data<dyn TourStore>,
    path: web::Path<String>,
    body: web::Json<PlaceFields>,
) -> Result<HttpResponse, AppError> {
    let id = parse_place_id(&path)?;
    let fields = body.into_inner();

    log::info!("🔧 PUT /places/{} - {:?}", id, fields);

    let ack = store.upsert_place(id, fields).await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// DELETE /places/{_id}
#[utoipa::path(
    delete,
    path = "/places/{_id}",
    tag = "Places",
    params(("_id" = String, Path, description = "Place ObjectId (hex)")),
    responses(
        (status = 200, description = "Delete acknowledgment; deletedCount is 0 when nothing matched", body = DeleteAck),
        (status = 400, description = "Malformed id", body = ErrorBody)
    )
)]
pub async fn delete_place(
    store: web::Data<dyn TourStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_place_id(&path)?;
    let ack = store.delete_place(id).await?;

    log::info!("🗑️  DELETE /places/{} - deleted {}", id, ack.deleted_count);
    Ok(HttpResponse::Ok().json(ack))
}
