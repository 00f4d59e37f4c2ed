use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tourist Places API",
        version = "1.0.0",
        description = "CRUD endpoints for tourist places, users and countries.\n\n**Notes:**\n- `PUT /places/{_id}` writes only the fixed place field set and creates the place when the id is unknown\n- `GET /places?sort=high|low` sorts by averageCost; non-numeric costs count as the lowest value"
    ),
    paths(
        // Places
        crate::api::places::list_places,
        crate::api::places::home_places,
        crate::api::places::place_details,
        crate::api::places::places_by_email,
        crate::api::places::places_by_country,
        crate::api::places::create_place,
        crate::api::places::upsert_place,
        crate::api::places::delete_place,

        // Users
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::touch_user,

        // Countries
        crate::api::countries::create_country,
        crate::api::countries::list_countries,

        // Health & Metrics
        crate::api::root::index,
        crate::api::root::test_message,
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::PlaceFields,
            crate::models::TextOrNumber,
            crate::models::SortMode,
            crate::models::TouchUserRequest,
            crate::models::InsertAck,
            crate::models::UpdateAck,
            crate::models::DeleteAck,
            crate::utils::ErrorBody,
            crate::api::root::MessageResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Places", description = "Tourist place listing, filtering and mutation."),
        (name = "Users", description = "User lookup and sign-in tracking."),
        (name = "Countries", description = "Country registry."),
        (name = "Health", description = "Banner, test message, health check and metrics."),
    )
)]
pub struct ApiDoc;
