use serde::{Deserialize, Deserializer};

/// Program and enrollment primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Clients are keyed by an application-generated UUID.
pub type ClientId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date without time zone.
pub type Date = chrono::NaiveDate;

/// Parse a client id from its textual form.
///
/// Returns `None` for anything that is not a UUID; callers treat that the
/// same as an id that does not exist.
pub fn parse_client_id(raw: &str) -> Option<ClientId> {
    uuid::Uuid::parse_str(raw.trim()).ok()
}

/// Parse an integer id, tolerating surrounding whitespace.
pub fn parse_db_id(raw: &str) -> Option<DbId> {
    raw.trim().parse().ok()
}

/// An integer id that may arrive as a JSON number or a numeric string.
///
/// HTML form selects submit `"3"` rather than `3`; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LooseId {
    Valid(DbId),
    /// The raw value could not be read as an integer.
    Invalid(String),
}

impl<'de> Deserialize<'de> for LooseId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(DbId),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(id) => LooseId::Valid(id),
            Raw::Text(s) => match parse_db_id(&s) {
                Some(id) => LooseId::Valid(id),
                None => LooseId::Invalid(s),
            },
        })
    }
}

/// A text value that may arrive as any JSON scalar.
///
/// Numbers and booleans are kept in their JSON text form, so `5` becomes
/// `"5"`. Objects and arrays are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LooseText(pub String);

impl LooseText {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for LooseText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de;

        struct LooseTextVisitor;

        impl de::Visitor<'_> for LooseTextVisitor {
            type Value = LooseText;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(LooseText(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(LooseText(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(LooseText(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(LooseText(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(LooseText(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(LooseText(v.to_string()))
            }
        }

        deserializer.deserialize_any(LooseTextVisitor)
    }
}
