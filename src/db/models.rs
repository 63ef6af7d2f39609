use serde::{Deserialize, Deserializer, Serialize};

/// A row of the `medicines` table as the remote service returns it.
///
/// `id` and `created_at` are assigned by the service on insert and are only
/// ever observed afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Medicine {
    #[serde(deserialize_with = "id_from_text_or_number")]
    pub id: String,
    pub name: String,
    pub location: String,
    pub is_in_stock: bool,
    pub created_at: String,
}

// Tables keyed by `bigint` come back with numeric ids, `uuid` ones with strings.
fn id_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// The caller-supplied part of a medicine, sent on insert.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewMedicine {
    pub name: String,
    pub location: String,
    pub is_in_stock: bool,
}

impl NewMedicine {
    pub fn new(name: impl Into<String>, location: impl Into<String>, is_in_stock: bool) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            is_in_stock,
        }
    }
}
