use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::file::File;

/// Field mask for a partial update. `None` leaves the stored field alone;
/// `Some` writes it, and writing a zero value (empty string, `false`)
/// removes the key from the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpdate {
    pub owner: Option<String>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub is_folder: Option<bool>,
}

/// What happens to one document key.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Set(Value),
    Unset,
}

impl FileUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(mut self, owner: &str) -> Self {
        self.owner = Some(owner.to_string());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    pub fn is_folder(mut self, is_folder: bool) -> Self {
        self.is_folder = Some(is_folder);
        self
    }

    /// Mask holding every non-empty field of `file`. Empty strings and a
    /// `false` folder flag are treated as "not set".
    pub fn from_non_empty(file: &File) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            owner: non_empty(&file.owner),
            name: non_empty(&file.name),
            path: non_empty(&file.path),
            is_folder: file.is_folder.then_some(true),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }

    /// Document-level changes keyed by document field name.
    pub fn changes(&self) -> Vec<(&'static str, FieldChange)> {
        let mut changes = Vec::new();
        let text_fields = [
            ("owner", &self.owner),
            ("name", &self.name),
            ("path", &self.path),
        ];
        for (key, value) in text_fields {
            match value.as_deref() {
                Some("") => changes.push((key, FieldChange::Unset)),
                Some(v) => changes.push((key, FieldChange::Set(Value::from(v)))),
                None => {}
            }
        }
        match self.is_folder {
            Some(true) => changes.push(("isFolder", FieldChange::Set(Value::Bool(true)))),
            Some(false) => changes.push(("isFolder", FieldChange::Unset)),
            None => {}
        }
        changes
    }
}
