use serde::{Deserialize, Serialize};

/// List responses come back either as a bare array or wrapped in the
/// standard `{ "message": ..., "data": [...] }` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(default)]
        message: Option<String>,
        #[serde(default = "Vec::new")]
        data: Vec<T>,
    },
}

impl<T> ListPayload<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Bare(items) => items,
            ListPayload::Wrapped { data, .. } => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array() {
        let payload: ListPayload<i64> = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(payload.into_items(), vec![1, 2, 3]);
    }

    #[test]
    fn test_wrapped_envelope() {
        let payload: ListPayload<i64> =
            serde_json::from_str(r#"{"message": "Success", "data": [5]}"#).unwrap();
        assert_eq!(payload.into_items(), vec![5]);
    }

    #[test]
    fn test_envelope_without_data_is_empty() {
        let payload: ListPayload<i64> = serde_json::from_str(r#"{"message": "Success"}"#).unwrap();
        assert!(payload.into_items().is_empty());
    }
}
