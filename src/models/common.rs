use mongodb::bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Campo que o frontend envia ora como texto, ora como número
/// (ex.: averageCost chega como "50" ou 50)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum TextOrNumber {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl TextOrNumber {
    /// Valor numérico; `None` para texto vazio, não numérico ou NaN
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            TextOrNumber::Integer(n) => *n as f64,
            TextOrNumber::Number(n) => *n,
            TextOrNumber::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        if value.is_nan() {
            None
        } else {
            Some(value)
        }
    }
}

impl From<&str> for TextOrNumber {
    fn from(value: &str) -> Self {
        TextOrNumber::Text(value.to_string())
    }
}

impl From<f64> for TextOrNumber {
    fn from(value: f64) -> Self {
        TextOrNumber::Number(value)
    }
}

impl From<TextOrNumber> for Bson {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Integer(n) => Bson::Int64(n),
            TextOrNumber::Number(n) => Bson::Double(n),
            TextOrNumber::Text(s) => Bson::String(s),
        }
    }
}

/// Serializa `_id` como hex de 24 caracteres na resposta JSON
pub fn serialize_object_id_hex<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(oid) => serializer.serialize_str(&oid.to_hex()),
        None => serializer.serialize_none(),
    }
}

/// Lê `_id` aceitando qualquer valor; só um ObjectId é mantido.
/// Ids vindos do cliente ("my-id", números...) são descartados.
pub fn deserialize_object_id_lenient<'de, D>(deserializer: D) -> Result<Option<ObjectId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Bson>::deserialize(deserializer)? {
        Some(Bson::ObjectId(oid)) => Ok(Some(oid)),
        _ => Ok(None),
    }
}

/// Converte o `_id` retornado pelo driver em string
pub fn bson_id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_text_and_numbers() {
        assert_eq!(TextOrNumber::from("50").as_f64(), Some(50.0));
        assert_eq!(TextOrNumber::from(" 12.5 ").as_f64(), Some(12.5));
        assert_eq!(TextOrNumber::from(300.0).as_f64(), Some(300.0));
    }

    #[test]
    fn unparseable_values_have_no_number() {
        assert_eq!(TextOrNumber::from("cheap").as_f64(), None);
        assert_eq!(TextOrNumber::from("").as_f64(), None);
        assert_eq!(TextOrNumber::from("NaN").as_f64(), None);
        assert_eq!(TextOrNumber::Number(f64::NAN).as_f64(), None);
    }

    #[test]
    fn accepts_string_or_number_from_json() {
        let text: TextOrNumber = serde_json::from_str("\"50\"").unwrap();
        let integer: TextOrNumber = serde_json::from_str("50").unwrap();
        let float: TextOrNumber = serde_json::from_str("7.5").unwrap();
        assert_eq!(text, TextOrNumber::Text("50".into()));
        assert_eq!(integer, TextOrNumber::Integer(50));
        assert_eq!(float, TextOrNumber::Number(7.5));
    }

    #[test]
    fn integers_keep_precision_and_type() {
        let visitors: TextOrNumber = serde_json::from_str("9007199254740993").unwrap();
        assert_eq!(visitors, TextOrNumber::Integer(9_007_199_254_740_993));
        assert_eq!(Bson::from(visitors.clone()), Bson::Int64(9_007_199_254_740_993));
        assert_eq!(serde_json::to_string(&visitors).unwrap(), "9007199254740993");
        assert_eq!(TextOrNumber::Integer(50).as_f64(), Some(50.0));
    }

    #[test]
    fn object_ids_render_as_hex() {
        let oid = ObjectId::new();
        assert_eq!(bson_id_to_string(&Bson::ObjectId(oid)), oid.to_hex());
        assert_eq!(bson_id_to_string(&Bson::String("abc".into())), "abc");
    }
}
