use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use super::common::{deserialize_object_id_lenient, serialize_object_id_hex, TextOrNumber};

/// Usuário registrado no primeiro login (collection `userData`)
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id_hex",
        deserialize_with = "deserialize_object_id_lenient"
    )]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_logged_at: Option<TextOrNumber>,
    #[serde(flatten)]
    pub extra: Document,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    pub email: Option<String>,
}

/// Corpo do PATCH /users
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TouchUserRequest {
    pub email: Option<String>,
    pub last_logged_at: Option<TextOrNumber>,
}

/// Email vazio conta como ausente
pub fn required_email(email: Option<&str>) -> Option<&str> {
    email.map(str::trim).filter(|e| !e.is_empty())
}
