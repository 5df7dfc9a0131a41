//! Risk-level mapping for the 5-class ingredient classifier.
//!
//! The model emits class indices 0–4; each maps to a risk level 1–5 and a
//! fixed human-readable category.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of output classes in the classification head.
pub const NUM_RISK_CLASSES: usize = 5;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("no risk level for predicted index {0}")]
    InvalidIndex(usize),
}

/// Human-readable safety category, fixed per risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(rename = "Very Safe")]
    VerySafe,
    Safe,
    Moderate,
    Concerning,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VerySafe => "Very Safe",
            Self::Safe => "Safe",
            Self::Moderate => "Moderate",
            Self::Concerning => "Concerning",
            Self::HighRisk => "High Risk",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk level plus its category, derived from a predicted class index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskRating {
    /// Severity 1 (very safe) to 5 (high risk).
    pub level: u8,
    pub category: RiskCategory,
}

/// Map a predicted class index to its risk rating.
///
/// An out-of-range index is an invariant breach in the model head, not a
/// recoverable condition, so it fails loudly instead of defaulting.
pub fn map_risk(predicted_index: usize) -> Result<RiskRating, LabelError> {
    let category = match predicted_index {
        0 => RiskCategory::VerySafe,
        1 => RiskCategory::Safe,
        2 => RiskCategory::Moderate,
        3 => RiskCategory::Concerning,
        4 => RiskCategory::HighRisk,
        _ => return Err(LabelError::InvalidIndex(predicted_index)),
    };
    Ok(RiskRating {
        level: predicted_index as u8 + 1,
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_all_valid_indices() {
        let expected = [
            (1, "Very Safe"),
            (2, "Safe"),
            (3, "Moderate"),
            (4, "Concerning"),
            (5, "High Risk"),
        ];
        for (index, (level, category)) in expected.iter().enumerate() {
            let rating = map_risk(index).unwrap();
            assert_eq!(rating.level, *level, "level for index {index}");
            assert_eq!(rating.category.as_str(), *category);
            assert_eq!(rating.level as usize, index + 1);
        }
    }

    #[test]
    fn out_of_range_index_fails() {
        let err = map_risk(5).unwrap_err();
        assert!(matches!(err, LabelError::InvalidIndex(5)));
        assert!(map_risk(usize::MAX).is_err());
    }

    #[test]
    fn category_serializes_with_wire_names() {
        let json = serde_json::to_string(&RiskCategory::VerySafe).unwrap();
        assert_eq!(json, "\"Very Safe\"");
        let parsed: RiskCategory = serde_json::from_str("\"High Risk\"").unwrap();
        assert_eq!(parsed, RiskCategory::HighRisk);
    }
}
