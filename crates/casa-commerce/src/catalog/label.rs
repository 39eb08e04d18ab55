//! Label types.

use crate::ids::LabelId;
use casa_db::Record;
use serde::{Deserialize, Serialize};

/// A classification label books are filed under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Label {
    /// Unique label identifier.
    pub id: LabelId,
    /// Display name.
    pub name: String,
    /// Machine value used for filtering.
    pub value: String,
    /// Optional description.
    pub description: Option<String>,
}

impl Record for Label {
    const TABLE: &'static str = "label";

    fn key(&self) -> String {
        self.id.as_str().to_string()
    }
}
