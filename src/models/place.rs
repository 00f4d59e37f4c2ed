use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

use super::common::{deserialize_object_id_lenient, serialize_object_id_hex, TextOrNumber};

/// Conjunto fixo de campos que o PUT /places/{id} grava.
/// Qualquer outro campo do corpo é descartado.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cost: Option<TextOrNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_time: Option<TextOrNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_visitor: Option<TextOrNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl PlaceFields {
    /// Documento `$set` com todos os campos do conjunto fixo.
    /// Campos ausentes viram null (sobrescrita campo a campo).
    pub fn to_set_document(&self) -> Document {
        doc! {
            "spotName": self.spot_name.clone(),
            "countryName": self.country_name.clone(),
            "averageCost": self.average_cost.clone(),
            "travelTime": self.travel_time.clone(),
            "totalVisitor": self.total_visitor.clone(),
            "userName": self.user_name.clone(),
            "userEmail": self.user_email.clone(),
            "location": self.location.clone(),
            "description": self.description.clone(),
            "season": self.season.clone(),
            "photo": self.photo.clone(),
        }
    }
}

/// Ponto turístico (collection `touristsPlace`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id_hex",
        deserialize_with = "deserialize_object_id_lenient"
    )]
    pub id: Option<ObjectId>,

    #[serde(flatten)]
    pub fields: PlaceFields,

    /// Campos extras enviados pelo cliente, preservados como vieram
    #[serde(flatten)]
    pub extra: Document,
}

impl Place {
    pub fn average_cost(&self) -> Option<f64> {
        self.fields.average_cost.as_ref().and_then(TextOrNumber::as_f64)
    }
}

/// Modo de ordenação do GET /places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Default,
    High,
    Low,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PlacesQuery {
    /// `high`, `low` ou vazio (ordem do banco)
    #[serde(default, deserialize_with = "deserialize_sort_mode")]
    pub sort: Option<SortMode>,
}

/// `?sort=` vazio conta como ausente
fn deserialize_sort_mode<'de, D>(deserializer: D) -> Result<Option<SortMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            SortMode::deserialize(IntoDeserializer::<D::Error>::into_deserializer(value)).map(Some)
        }
    }
}

/// Custo sem valor numérico conta como o menor possível
fn compare_cost(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Ordena em memória pelo averageCost. `Default` mantém a ordem do banco.
pub fn sort_by_average_cost(places: &mut [Place], mode: SortMode) {
    match mode {
        SortMode::Default => {}
        SortMode::High => {
            places.sort_by(|a, b| compare_cost(b.average_cost(), a.average_cost()))
        }
        SortMode::Low => {
            places.sort_by(|a, b| compare_cost(a.average_cost(), b.average_cost()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    fn place(name: &str, cost: Option<TextOrNumber>) -> Place {
        Place {
            fields: PlaceFields {
                spot_name: Some(name.to_string()),
                average_cost: cost,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn names(places: &[Place]) -> Vec<&str> {
        places
            .iter()
            .map(|p| p.fields.spot_name.as_deref().unwrap_or_default())
            .collect()
    }

    fn sample() -> Vec<Place> {
        vec![
            place("a", Some("50".into())),
            place("b", Some("unknown".into())),
            place("c", Some(1200.0.into())),
            place("d", None),
            place("e", Some(" 7.5".into())),
        ]
    }

    #[test]
    fn high_sorts_descending_with_unparseable_last() {
        let mut places = sample();
        sort_by_average_cost(&mut places, SortMode::High);
        assert_eq!(names(&places), vec!["c", "a", "e", "b", "d"]);
    }

    #[test]
    fn low_sorts_ascending_with_unparseable_first() {
        let mut places = sample();
        sort_by_average_cost(&mut places, SortMode::Low);
        assert_eq!(names(&places), vec!["b", "d", "e", "a", "c"]);
    }

    #[test]
    fn default_keeps_store_order() {
        let mut places = sample();
        sort_by_average_cost(&mut places, SortMode::Default);
        assert_eq!(names(&places), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn keeps_unknown_fields_and_renders_id_as_hex() {
        let json = serde_json::json!({
            "spotName": "Beach",
            "countryName": "Thailand",
            "averageCost": "50",
            "rating": 4
        });
        let mut place: Place = serde_json::from_value(json).unwrap();
        assert_eq!(place.fields.spot_name.as_deref(), Some("Beach"));
        assert_eq!(place.average_cost(), Some(50.0));
        assert!(matches!(
            place.extra.get("rating"),
            Some(Bson::Int32(4)) | Some(Bson::Int64(4))
        ));

        let oid = ObjectId::new();
        place.id = Some(oid);
        let out = serde_json::to_value(&place).unwrap();
        assert_eq!(out["_id"], oid.to_hex());
        assert_eq!(out["rating"], 4);
        assert!(out.get("photo").is_none());
    }

    #[test]
    fn set_document_covers_the_fixed_field_set_only() {
        let fields: PlaceFields = serde_json::from_value(serde_json::json!({
            "spotName": "Fuji",
            "averageCost": 900,
            "owner": "someone"
        }))
        .unwrap();

        let set = fields.to_set_document();
        assert_eq!(set.len(), 11);
        assert_eq!(set.get_str("spotName").unwrap(), "Fuji");
        assert_eq!(set.get_i64("averageCost").unwrap(), 900);
        assert_eq!(set.get("photo"), Some(&Bson::Null));
        assert!(set.get("owner").is_none());
    }

    #[test]
    fn sort_mode_parses_lowercase_names() {
        let q: PlacesQuery = serde_json::from_value(serde_json::json!({"sort": "high"})).unwrap();
        assert_eq!(q.sort, Some(SortMode::High));
        assert!(serde_json::from_value::<PlacesQuery>(serde_json::json!({"sort": "cheap"})).is_err());
    }

    #[test]
    fn blank_sort_means_store_order() {
        let empty: PlacesQuery = serde_json::from_value(serde_json::json!({"sort": ""})).unwrap();
        let spaces: PlacesQuery = serde_json::from_value(serde_json::json!({"sort": "  "})).unwrap();
        let missing: PlacesQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(empty.sort, None);
        assert_eq!(spaces.sort, None);
        assert_eq!(missing.sort, None);
    }

    #[test]
    fn client_id_that_is_not_an_object_id_is_dropped() {
        let place: Place = serde_json::from_value(serde_json::json!({
            "_id": "my-id",
            "spotName": "Bali"
        }))
        .unwrap();
        assert_eq!(place.id, None);
        assert!(place.extra.get("_id").is_none());
        assert_eq!(place.fields.spot_name.as_deref(), Some("Bali"));
    }

    #[test]
    fn stored_object_id_survives_bson_round_trip() {
        let oid = ObjectId::new();
        let stored = doc! { "_id": oid, "spotName": "Petra", "averageCost": 40_i64 };
        let place: Place = mongodb::bson::from_document(stored).unwrap();
        assert_eq!(place.id, Some(oid));
        assert_eq!(place.fields.average_cost, Some(TextOrNumber::Integer(40)));
    }

    #[test]
    fn fixed_field_with_wrong_json_type_is_rejected() {
        let result = serde_json::from_value::<Place>(serde_json::json!({
            "spotName": "Alps",
            "location": { "lat": 46.5, "lng": 8.0 }
        }));
        assert!(result.is_err());
    }
}
