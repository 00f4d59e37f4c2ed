use actix_web::{web, HttpResponse};

use crate::database::TourStore;
use crate::models::{required_email, InsertAck, TouchUserRequest, UpdateAck, User, UserQuery};
use crate::utils::{AppError, ErrorBody};

const EMAIL_REQUIRED: &str = "Email is required!";

/// GET /users?email= - Busca usuário pelo email.
/// Sem email responde `{success:false}` com 200, sem consultar o banco.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(UserQuery),
    responses(
        (status = 200, description = "The user, null when unknown, or `{success:false, message}` when email is missing")
    )
)]
pub async fn get_user(
    store: web::Data<dyn TourStore>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse, AppError> {
    let Some(email) = required_email(query.email.as_deref()) else {
        return Ok(HttpResponse::Ok().json(ErrorBody {
            success: false,
            message: EMAIL_REQUIRED.to_string(),
        }));
    };

    let user: Option<User> = store.find_user(email).await?;
    log::debug!("👤 GET /users - {} found: {}", email, user.is_some());

    Ok(HttpResponse::Ok().json(user))
}

/// POST /users - Registra usuário no primeiro login
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body(content = Object, description = "User document, stored as sent"),
    responses(
        (status = 200, description = "Insert acknowledgment", body = InsertAck),
        (status = 400, description = "Body is not a JSON object", body = ErrorBody)
    )
)]
pub async fn create_user(
    store: web::Data<dyn TourStore>,
    body: web::Json<User>,
) -> Result<HttpResponse, AppError> {
    let mut user = body.into_inner();
    user.id = None;

    let ack = store.insert_user(user).await?;
    log::info!("✅ User created: {}", ack.inserted_id);
    Ok(HttpResponse::Ok().json(ack))
}

/// PATCH /users - Atualiza apenas lastLoggedAt
#[utoipa::path(
    patch,
    path = "/users",
    tag = "Users",
    request_body = TouchUserRequest,
    responses(
        (status = 200, description = "Update acknowledgment; matchedCount is 0 for unknown emails", body = UpdateAck),
        (status = 400, description = "Email missing from body", body = ErrorBody)
    )
)]
pub async fn touch_user(
    store: web::Data<dyn TourStore>,
    body: web::Json<TouchUserRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let email = required_email(request.email.as_deref())
        .ok_or_else(|| AppError::InvalidRequest(EMAIL_REQUIRED.to_string()))?;

    let ack = store.touch_user(email, request.last_logged_at).await?;
    log::info!("🔑 PATCH /users - {} matched {}", email, ack.matched_count);
    Ok(HttpResponse::Ok().json(ack))
}
