use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;

use crate::domain::errors::ApiError;

// Result of one face analysis. The backend mixes camelCase and snake_case keys,
// so both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(alias = "faceShape")]
    pub face_shape: String,
    #[serde(default, alias = "faceShapeConfidence", alias = "face_shape_confidence")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub gender: Option<String>,
    // Named metric -> score in 0..1.
    #[serde(default, alias = "skinScores")]
    pub skin_scores: BTreeMap<String, f64>,
    #[serde(default, alias = "colorAnalysis")]
    pub color_analysis: Option<ColorAnalysis>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default, alias = "annotatedImageUrl")]
    pub annotated_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorAnalysis {
    #[serde(default)]
    pub dominant_color: Vec<u8>,
    #[serde(default)]
    pub undertone: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
}

impl AnalysisResult {
    pub fn confidence_percent(&self) -> Option<String> {
        self.confidence.map(percent)
    }

    // Scores in display order with their percent labels.
    pub fn score_percents(&self) -> Vec<(String, String)> {
        self.skin_scores
            .iter()
            .map(|(name, value)| (name.clone(), percent(*value)))
            .collect()
    }
}

// 0.9 -> "90%".
pub fn percent(value: f64) -> String {
    format!("{}%", (value * 100.0).round() as i64)
}

// Unwrap the several shapes `/analyze` answers with:
// `{success, data}`, a flat result, `{success: false, message}` or `{error}`.
pub fn parse_analysis_response(body: Value) -> Result<AnalysisResult, ApiError> {
    let Value::Object(mut map) = body else {
        return Err(ApiError::Decode(
            "analysis response is not a JSON object".to_string(),
        ));
    };

    if let Some(error) = map.get("error").and_then(Value::as_str) {
        return Err(ApiError::Rejected(error.to_string()));
    }

    if map.get("success").and_then(Value::as_bool) == Some(false) {
        let reason = map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Analysis failed")
            .to_string();
        return Err(ApiError::Rejected(reason));
    }

    let payload = match map.remove("data") {
        Some(data @ Value::Object(_)) => data,
        _ => Value::Object(map),
    };

    serde_json::from_value(payload).map_err(|err| ApiError::Decode(err.to_string()))
}

// Server-persisted past analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

// `/history` has been seen both as a bare array and wrapped in `{data: [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HistoryPayload {
    Entries(Vec<HistoryEntry>),
    Envelope { data: Vec<HistoryEntry> },
}

impl HistoryPayload {
    pub fn into_entries(self) -> Vec<HistoryEntry> {
        match self {
            HistoryPayload::Entries(entries) => entries,
            HistoryPayload::Envelope { data } => data,
        }
    }
}

// Image picked by the user for analysis.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "image/jpeg",
    }
}

#[async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn analyze(
        &self,
        image: ImageUpload,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult, ApiError>;

    async fn history(&self, cancel: &CancellationToken) -> Result<Vec<HistoryEntry>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn when_response_is_enveloped_then_inner_data_is_parsed() {
        let body = json!({
            "success": true,
            "data": {
                "face_shape": "Oval",
                "confidence": 0.9,
                "skin_scores": { "acne": 0.15 },
                "recommendations": ["Long layers"]
            }
        });

        let result = parse_analysis_response(body).expect("expected a result");

        assert_eq!(result.face_shape, "Oval");
        assert_eq!(result.confidence_percent().as_deref(), Some("90%"));
        assert_eq!(result.recommendations, vec!["Long layers".to_string()]);
    }

    #[test]
    fn when_response_is_flat_camel_case_then_aliases_are_accepted() {
        let body = json!({
            "faceShape": "Round",
            "skinScores": { "acne": 0.25, "dryness": 0.2 },
            "recommendations": []
        });

        let result = parse_analysis_response(body).expect("expected a result");

        assert_eq!(result.face_shape, "Round");
        assert_eq!(result.confidence, None);
        assert_eq!(
            result.score_percents(),
            vec![
                ("acne".to_string(), "25%".to_string()),
                ("dryness".to_string(), "20%".to_string())
            ]
        );
    }

    #[test]
    fn when_response_carries_error_then_it_is_rejected() {
        let body = json!({ "error": "No face detected. Please upload a clear face image." });

        let result = parse_analysis_response(body);

        assert_eq!(
            result,
            Err(ApiError::Rejected(
                "No face detected. Please upload a clear face image.".to_string()
            ))
        );
    }

    #[test]
    fn when_success_is_false_then_message_is_reported() {
        let result = parse_analysis_response(json!({ "success": false, "message": "Image too dark" }));

        assert_eq!(result, Err(ApiError::Rejected("Image too dark".to_string())));
    }

    #[test]
    fn when_history_is_bare_or_enveloped_then_both_yield_entries() {
        let entry = json!({ "face_shape": "Heart", "skin_scores": { "acne": 0.1 } });

        let bare: HistoryPayload =
            serde_json::from_value(json!([entry.clone()])).expect("bare array");
        let wrapped: HistoryPayload =
            serde_json::from_value(json!({ "data": [entry] })).expect("envelope");

        assert_eq!(bare.into_entries().len(), 1);
        let entries = wrapped.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].result.face_shape, "Heart");
    }

    #[test]
    fn when_file_has_png_extension_then_content_type_is_png() {
        assert_eq!(ImageUpload::new("face.PNG", vec![]).content_type, "image/png");
        assert_eq!(ImageUpload::new("live", vec![]).content_type, "image/jpeg");
    }
}
