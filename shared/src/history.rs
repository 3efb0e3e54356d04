use serde::{Deserialize, Serialize};

/// One row of the prediction history returned by `GET /predictions`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub modality: String,
    pub file_name: String,
    pub probability: f64,
    pub class_value: i64,
    pub class_label: String,
    /// ISO datetime string, displayed as sent.
    pub timestamp: String,
}
