//! Wire types for the classification HTTP API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::risk::{LabelError, RiskCategory, map_risk};

/// Body of `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

/// Successful classification result.
///
/// Invariant: `risk_level == predicted_index + 1`, and `probabilities` has
/// one entry per class, keyed by the string form of the class index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResponse {
    pub text: String,
    pub predicted_index: usize,
    pub risk_level: u8,
    pub risk_category: RiskCategory,
    pub probabilities: BTreeMap<String, f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClassificationResponse {
    /// Assemble a response from a predicted class index and its probability
    /// vector, deriving the risk rating from the fixed table.
    pub fn from_prediction(
        text: String,
        predicted_index: usize,
        probabilities: &[f32],
    ) -> Result<Self, LabelError> {
        let rating = map_risk(predicted_index)?;
        let probabilities = probabilities
            .iter()
            .enumerate()
            .map(|(i, &p)| (i.to_string(), p))
            .collect();

        Ok(Self {
            text,
            predicted_index,
            risk_level: rating.level,
            risk_category: rating.category,
            probabilities,
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_prediction_derives_rating() {
        let probs = [0.05, 0.1, 0.6, 0.2, 0.05];
        let resp =
            ClassificationResponse::from_prediction("sugar".into(), 2, &probs).unwrap();

        assert_eq!(resp.risk_level, 3);
        assert_eq!(resp.risk_category, RiskCategory::Moderate);
        assert_eq!(resp.probabilities.len(), 5);
        assert_eq!(resp.probabilities["2"], 0.6);
        assert!(resp.error.is_none());
    }

    #[test]
    fn from_prediction_rejects_bad_index() {
        let probs = [0.2; 5];
        assert!(ClassificationResponse::from_prediction("x".into(), 7, &probs).is_err());
    }

    #[test]
    fn response_json_roundtrip() {
        let probs = [0.1, 0.2, 0.3, 0.3, 0.1];
        let resp =
            ClassificationResponse::from_prediction("palm oil".into(), 3, &probs).unwrap();

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"risk_category\":\"Concerning\""));
        assert!(!json.contains("\"error\""), "absent error is omitted");

        let parsed: ClassificationResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.predicted_index, 3);
        assert_eq!(parsed.risk_level, 4);
        assert_eq!(parsed.probabilities["0"], 0.1);
    }

    #[test]
    fn probability_keys_are_stable() {
        let probs = [0.2; 5];
        let resp = ClassificationResponse::from_prediction("x".into(), 0, &probs).unwrap();
        let keys: Vec<&str> = resp.probabilities.keys().map(String::as_str).collect();
        assert_eq!(keys, ["0", "1", "2", "3", "4"]);
    }
}
