use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Modality;

/// Single probability/class entry returned by a model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub probability: f64,
    #[serde(rename = "class")]
    pub class_value: i64,
    pub class_label: String,
    /// 1-based image index emitted for multi-image ultrasound batches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<u32>,
}

/// Prediction output of one model for one modality. The service also sends a
/// `quality_weight` used only for server-side fusion; unknown fields are
/// ignored here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModalityResult {
    #[serde(default)]
    pub model_name: Option<String>,
    pub results: Vec<PredictionResult>,
}

/// Aggregate payload of a combined prediction. Either field may be absent;
/// presence of at least one is checked before decoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombinedResponse {
    #[serde(default)]
    pub individual_results: BTreeMap<String, ModalityResult>,
    #[serde(default)]
    pub combined_result: Option<PredictionResult>,
}

/// Validation/processing error reported by the service, possibly batched.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceError {
    /// One message per reported error entry.
    pub messages: Vec<String>,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join("; "))
    }
}

/// Outcome of the single shape-discrimination pass over a service payload.
/// Nothing on the wire tags the payload kind, so the tag is derived here
/// once and every downstream decision keys off it.
#[derive(Clone, Debug, PartialEq)]
pub enum Classified {
    Error(ServiceError),
    Combined(CombinedResponse),
    PerModality(BTreeMap<String, ModalityResult>),
    Malformed,
}

const ERROR_FIELDS: [&str; 5] = ["type", "loc", "msg", "input", "detail"];

fn is_error_entry(value: &Value) -> bool {
    match value.as_object() {
        Some(map) => ERROR_FIELDS.iter().any(|field| map.contains_key(*field)),
        None => false,
    }
}

fn is_error_shaped(value: &Value) -> bool {
    match value {
        Value::Object(_) => is_error_entry(value),
        Value::Array(entries) => !entries.is_empty() && entries.iter().all(is_error_entry),
        _ => false,
    }
}

fn entry_message(entry: &Value) -> String {
    if let Some(map) = entry.as_object() {
        if let Some(Value::String(msg)) = map.get("msg") {
            return msg.clone();
        }
        if let Some(Value::String(detail)) = map.get("detail") {
            return detail.clone();
        }
    }
    entry.to_string()
}

/// Extracts display messages from an error-shaped payload: explicit `detail`
/// first (string, or one message per batched entry), then `msg`, then the
/// `.msg` of each entry of an error sequence, then the raw payload.
fn error_messages(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => match map.get("detail") {
            Some(Value::String(detail)) => vec![detail.clone()],
            Some(Value::Array(entries)) => entries.iter().map(entry_message).collect(),
            Some(other) => vec![other.to_string()],
            None => match map.get("msg") {
                Some(Value::String(msg)) => vec![msg.clone()],
                _ => vec![value.to_string()],
            },
        },
        Value::Array(entries) => entries.iter().map(entry_message).collect(),
        _ => vec![value.to_string()],
    }
}

/// Discriminates a raw service payload. Error shapes win over success shapes
/// regardless of HTTP status; anything matching neither is `Malformed`.
pub fn classify(modality: Modality, payload: &Value) -> Classified {
    if is_error_shaped(payload) {
        return Classified::Error(ServiceError {
            messages: error_messages(payload),
        });
    }

    let Some(map) = payload.as_object() else {
        return Classified::Malformed;
    };

    if modality == Modality::Combined {
        if map.contains_key("individual_results") || map.contains_key("combined_result") {
            if let Ok(combined) = serde_json::from_value::<CombinedResponse>(payload.clone()) {
                return Classified::Combined(combined);
            }
        }
        return Classified::Malformed;
    }

    if map.is_empty() {
        return Classified::Malformed;
    }
    match serde_json::from_value::<BTreeMap<String, ModalityResult>>(payload.clone()) {
        Ok(results) => Classified::PerModality(results),
        Err(_) => Classified::Malformed,
    }
}

/// One renderable block of prediction output.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultBlock {
    pub title: String,
    pub lines: Vec<String>,
    /// Marks the fused block appended to combined predictions.
    pub combined: bool,
}

fn result_line(result: &PredictionResult) -> String {
    format!(
        "Probability = {:.6}, Class = {} ({})",
        result.probability, result.class_value, result.class_label
    )
}

fn modality_block(key: &str, result: &ModalityResult) -> ResultBlock {
    let title = match &result.model_name {
        Some(name) => format!("{name} Results"),
        None => format!("{} Results", key.replace('_', " ").to_uppercase()),
    };

    let lines = result
        .results
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let line = result_line(entry);
            if key.starts_with("ultrasound") {
                let image = entry.image.unwrap_or(idx as u32 + 1);
                format!("Image {image}: {line}")
            } else {
                line
            }
        })
        .collect();

    ResultBlock {
        title,
        lines,
        combined: false,
    }
}

/// Reduces a successfully classified payload to display blocks: one block per
/// modality entry, plus the fused block for combined predictions. Error and
/// malformed payloads have no rendering and yield an empty list.
pub fn result_blocks(classified: &Classified) -> Vec<ResultBlock> {
    match classified {
        Classified::Combined(combined) => {
            let mut blocks: Vec<ResultBlock> = combined
                .individual_results
                .iter()
                .map(|(key, result)| modality_block(key, result))
                .collect();
            if let Some(result) = &combined.combined_result {
                blocks.push(ResultBlock {
                    title: "Combined Result".to_string(),
                    lines: vec![result_line(result)],
                    combined: true,
                });
            }
            blocks
        }
        Classified::PerModality(results) => results
            .iter()
            .map(|(key, result)| modality_block(key, result))
            .collect(),
        Classified::Error(_) | Classified::Malformed => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn single_modality_response_renders_one_block() {
        let payload = json!({
            "ultrasound": {
                "model_name": "M",
                "results": [{"probability": 0.8, "class": 1, "class_label": "malignant"}]
            }
        });

        let classified = classify(Modality::Ultrasound, &payload);
        let blocks = result_blocks(&classified);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "M Results");
        assert_eq!(
            blocks[0].lines,
            vec!["Image 1: Probability = 0.800000, Class = 1 (malignant)"]
        );
        assert!(!blocks[0].combined);
    }

    #[test]
    fn non_ultrasound_lines_carry_no_image_prefix() {
        let payload = json!({
            "mammogram": {
                "model_name": "Mammogram",
                "results": [{"probability": 0.25, "class": 0, "class_label": "Benign"}]
            }
        });

        let blocks = result_blocks(&classify(Modality::Mammogram, &payload));
        assert_eq!(blocks[0].lines, vec!["Probability = 0.250000, Class = 0 (Benign)"]);
    }

    #[test]
    fn missing_model_name_falls_back_to_formatted_key() {
        let payload = json!({
            "ultrasound_cnn": {
                "results": [{"probability": 0.5, "class": 0, "class_label": "Benign"}]
            }
        });

        let blocks = result_blocks(&classify(Modality::Ultrasound, &payload));
        assert_eq!(blocks[0].title, "ULTRASOUND CNN Results");
    }

    #[test]
    fn explicit_image_index_wins_over_position() {
        let payload = json!({
            "ultrasound": {
                "model_name": "CNN Model",
                "results": [
                    {"probability": 0.9, "class": 1, "class_label": "Malignant", "image": 3},
                    {"probability": 0.1, "class": 0, "class_label": "Benign"}
                ]
            }
        });

        let blocks = result_blocks(&classify(Modality::Ultrasound, &payload));
        assert!(blocks[0].lines[0].starts_with("Image 3: "));
        assert!(blocks[0].lines[1].starts_with("Image 2: "));
    }

    #[test]
    fn detail_string_classifies_as_error() {
        let payload = json!({"detail": "invalid file"});

        for modality in [Modality::Ultrasound, Modality::Mammogram, Modality::Mri, Modality::Combined] {
            let classified = classify(modality, &payload);
            assert_eq!(
                classified,
                Classified::Error(ServiceError {
                    messages: vec!["invalid file".to_string()]
                })
            );
        }
    }

    #[test]
    fn batched_detail_yields_one_message_per_entry() {
        let payload = json!({
            "detail": [
                {"type": "missing", "loc": ["body", "image"], "msg": "Field required"},
                {"type": "missing", "loc": ["body", "breast_mask"], "msg": "Field required"}
            ]
        });

        let Classified::Error(error) = classify(Modality::Mammogram, &payload) else {
            panic!("expected error classification");
        };
        assert_eq!(error.messages, vec!["Field required", "Field required"]);
        assert_eq!(error.to_string(), "Field required; Field required");
    }

    #[test]
    fn error_sequence_joins_entry_messages() {
        let payload = json!([
            {"msg": "bad image", "loc": ["body"]},
            {"msg": "bad mask", "loc": ["body"]}
        ]);

        let Classified::Error(error) = classify(Modality::Mri, &payload) else {
            panic!("expected error classification");
        };
        assert_eq!(error.to_string(), "bad image; bad mask");
    }

    #[test]
    fn msg_field_is_used_when_detail_is_absent() {
        let payload = json!({"msg": "field missing", "loc": ["body", "file"]});

        let Classified::Error(error) = classify(Modality::Ultrasound, &payload) else {
            panic!("expected error classification");
        };
        assert_eq!(error.messages, vec!["field missing"]);
    }

    #[test]
    fn empty_object_is_malformed_for_separate_modalities() {
        assert_eq!(classify(Modality::Ultrasound, &json!({})), Classified::Malformed);
        assert_eq!(classify(Modality::Mri, &json!({})), Classified::Malformed);
    }

    #[test]
    fn non_object_payloads_are_malformed() {
        assert_eq!(classify(Modality::Ultrasound, &json!(null)), Classified::Malformed);
        assert_eq!(classify(Modality::Combined, &json!("done")), Classified::Malformed);
        assert_eq!(classify(Modality::Ultrasound, &json!([])), Classified::Malformed);
    }

    #[test]
    fn mapping_value_without_results_is_malformed() {
        let payload = json!({"ultrasound": {"model_name": "M"}});
        assert_eq!(classify(Modality::Ultrasound, &payload), Classified::Malformed);
    }

    #[test]
    fn combined_payload_without_marker_keys_is_malformed() {
        // The service answers an empty combined submission with a bare note.
        let payload = json!({"message": "No valid inputs provided"});
        assert_eq!(classify(Modality::Combined, &payload), Classified::Malformed);
    }

    #[test]
    fn combined_response_appends_fused_block() {
        let payload = json!({
            "individual_results": {
                "ultrasound_cnn": {
                    "model_name": "CNN Model",
                    "quality_weight": 0.15,
                    "results": [{"probability": 0.7, "class": 1, "class_label": "Malignant", "image": 1}]
                },
                "mri": {
                    "model_name": "MRI",
                    "quality_weight": 0.4,
                    "results": [{"probability": 0.4, "class": 0, "class_label": "Benign"}]
                }
            },
            "combined_result": {"probability": 0.5, "class": 0, "class_label": "benign"}
        });

        let blocks = result_blocks(&classify(Modality::Combined, &payload));

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].title, "MRI Results");
        assert_eq!(blocks[1].title, "CNN Model Results");
        assert_eq!(blocks[1].lines, vec!["Image 1: Probability = 0.700000, Class = 1 (Malignant)"]);
        assert_eq!(blocks[2].title, "Combined Result");
        assert_eq!(blocks[2].lines, vec!["Probability = 0.500000, Class = 0 (benign)"]);
        assert!(blocks[2].combined);
    }

    #[test]
    fn combined_result_alone_is_a_valid_combined_response() {
        let payload = json!({
            "combined_result": {"probability": 0.91, "class": 1, "class_label": "Malignant"}
        });

        let blocks = result_blocks(&classify(Modality::Combined, &payload));
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].combined);
    }
}
