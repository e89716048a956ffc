use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored file or folder. Zero-valued fields are left out of the
/// document and decode back to their zero value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct File {
    #[serde(rename = "_id", default, skip_serializing_if = "Uuid::is_nil")]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(rename = "isFolder", default, skip_serializing_if = "is_false")]
    pub is_folder: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl File {
    pub fn new(owner: &str, name: &str, path: &str, is_folder: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            is_folder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_assigns_unique_ids() {
        let a = File::new("alice", "report.pdf", "/docs", false);
        let b = File::new("alice", "report.pdf", "/docs", false);

        assert!(!a.id.is_nil());
        assert_ne!(a.id, b.id);
        assert_eq!(a.owner, "alice");
        assert_eq!(a.name, "report.pdf");
        assert_eq!(a.path, "/docs");
        assert!(!a.is_folder);
    }

    #[test]
    fn zero_values_are_omitted() {
        let file = File::new("", "photos", "", true);
        let doc = serde_json::to_value(&file).unwrap();

        assert_eq!(
            doc,
            json!({ "_id": file.id.to_string(), "name": "photos", "isFolder": true })
        );

        let empty = serde_json::to_value(File::default()).unwrap();
        assert_eq!(empty, json!({}));
    }

    #[test]
    fn missing_keys_decode_to_zero_values() {
        let file: File = serde_json::from_value(json!({ "name": "notes.txt" })).unwrap();
        assert!(file.id.is_nil());
        assert_eq!(file.owner, "");
        assert_eq!(file.name, "notes.txt");
        assert!(!file.is_folder);
    }
}
