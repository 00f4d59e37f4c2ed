use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use super::common::{deserialize_object_id_lenient, serialize_object_id_hex};

/// País cadastrado pelo painel (collection `countryData`)
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id_hex",
        deserialize_with = "deserialize_object_id_lenient"
    )]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}
