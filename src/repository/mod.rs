pub mod adalo;
pub mod order;
pub mod user;

use serde::Deserialize;

/// Adalo delivers record ids as integers in some collections and strings in
/// others. Everything downstream works with strings.
#[derive(Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Number(i64),
}

impl RecordId {
    pub fn into_string(self) -> String {
        match self {
            Self::Text(id) => id,
            Self::Number(id) => id.to_string(),
        }
    }
}

/// A relationship field: a single id or a (usually single-element) list of
/// ids, depending on how the collection was configured.
#[derive(Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum RecordRef {
    One(RecordId),
    Many(Vec<RecordId>),
}

impl RecordRef {
    pub fn first(self) -> Option<String> {
        match self {
            Self::One(id) => Some(id.into_string()),
            Self::Many(ids) => ids.into_iter().next().map(RecordId::into_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ref_normalizes_to_first_id_or_none() {
        let single: RecordRef = serde_json::from_str("42").unwrap();
        assert_eq!(single.first(), Some("42".to_string()));

        let list: RecordRef = serde_json::from_str(r#"["abc", "def"]"#).unwrap();
        assert_eq!(list.first(), Some("abc".to_string()));

        let empty: RecordRef = serde_json::from_str("[]").unwrap();
        assert_eq!(empty.first(), None);
    }
}
