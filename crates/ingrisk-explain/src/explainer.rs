//! Per-ingredient safety explanations via the hosted LLM.
//!
//! The explanation is advisory, not critical-path: every failure mode folds
//! into [`Explanation`] rather than propagating, so classification results
//! stay usable when the LLM is unreachable.

use ingrisk_core::{ClassificationResponse, split_ingredients};
use tracing::{error, info};

use crate::groq::{ExplainerInitError, GroqClient};

/// Upper bound on generated tokens per explanation.
pub const MAX_EXPLANATION_TOKENS: u32 = 600;
/// Low temperature for consistent, focused responses.
pub const EXPLANATION_TEMPERATURE: f32 = 0.3;
/// Prefix used when rendering a failed explanation as plain text.
pub const FAILURE_PREFIX: &str = "Could not generate explanation: ";
/// Rendered when no classification result was supplied.
pub const NO_CLASSIFICATION_MESSAGE: &str = "No classification data available for explanation.";

/// Outcome of an explanation attempt.
///
/// Callers branch on the variant; the legacy string-with-sentinel-prefix
/// form exists only at the display boundary via
/// [`Explanation::into_display_string`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Explanation {
    Generated(String),
    /// No classification result was supplied; the LLM was never called.
    NoClassification,
    /// The LLM call failed, with the underlying reason.
    Unavailable(String),
}

impl Explanation {
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Generated(_))
    }

    /// Render as the plain string the original UI contract expects.
    pub fn into_display_string(self) -> String {
        match self {
            Self::Generated(text) => text,
            Self::NoClassification => NO_CLASSIFICATION_MESSAGE.to_string(),
            Self::Unavailable(reason) => format!("{FAILURE_PREFIX}{reason}"),
        }
    }
}

/// Generates concise per-ingredient safety summaries.
pub struct IngredientExplainer {
    llm: GroqClient,
}

impl IngredientExplainer {
    /// Build an explainer from the environment, failing fast if the API key
    /// is missing.
    pub fn from_env() -> Result<Self, ExplainerInitError> {
        let llm = GroqClient::from_env()?;
        info!("ingredient explainer initialized");
        Ok(Self { llm })
    }

    pub fn new(llm: GroqClient) -> Self {
        Self { llm }
    }

    /// Explain an ingredient list in light of its classification.
    ///
    /// With no classification, returns [`Explanation::NoClassification`]
    /// without any network call.
    pub async fn explain(
        &self,
        ingredient_text: &str,
        classification: Option<&ClassificationResponse>,
    ) -> Explanation {
        let Some(classification) = classification else {
            return Explanation::NoClassification;
        };

        let ingredients = split_ingredients(ingredient_text);
        let prompt = build_prompt(
            &ingredients,
            classification.risk_level,
            classification.risk_category.as_str(),
        );

        match self
            .llm
            .generate(&prompt, MAX_EXPLANATION_TOKENS, EXPLANATION_TEMPERATURE)
            .await
        {
            Ok(text) => {
                info!("explanation generated");
                Explanation::Generated(text)
            }
            Err(err) => {
                error!(error = %err, "explanation generation failed");
                Explanation::Unavailable(err.to_string())
            }
        }
    }
}

/// Word budget per ingredient. Steers prompt phrasing only; nothing enforces
/// it mechanically.
fn words_per_ingredient(ingredient_count: usize) -> usize {
    (400 / ingredient_count.max(1)).clamp(20, 50)
}

fn build_prompt(ingredients: &[String], risk_level: u8, risk_category: &str) -> String {
    let budget = words_per_ingredient(ingredients.len());
    format!(
        "Food safety expert: Briefly explain these ingredients ({}) at risk level {} ({}). \
         For each ingredient: name, purpose, concern, safer option if any. \
         Keep to roughly {} words per ingredient. Be concise.",
        ingredients.join(", "),
        risk_level,
        risk_category,
        budget,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingrisk_core::ClassificationResponse;

    fn test_explainer() -> IngredientExplainer {
        IngredientExplainer::new(GroqClient::new("test-key".into()).unwrap())
    }

    #[tokio::test]
    async fn no_classification_skips_the_llm() {
        // The key is fake and no server is running; reaching the network
        // would fail, so a clean NoClassification proves it was never tried.
        let explainer = test_explainer();
        let outcome = explainer.explain("sugar, salt", None).await;
        assert_eq!(outcome, Explanation::NoClassification);
    }

    #[test]
    fn word_budget_clamps() {
        assert_eq!(words_per_ingredient(1), 50);
        assert_eq!(words_per_ingredient(8), 50);
        assert_eq!(words_per_ingredient(10), 40);
        assert_eq!(words_per_ingredient(20), 20);
        assert_eq!(words_per_ingredient(100), 20);
        // Zero ingredients must not divide by zero.
        assert_eq!(words_per_ingredient(0), 50);
    }

    #[test]
    fn prompt_references_rating_and_ingredients() {
        let ingredients = vec!["sugar".to_string(), "palm oil".to_string()];
        let prompt = build_prompt(&ingredients, 4, "Concerning");
        assert!(prompt.contains("sugar, palm oil"));
        assert!(prompt.contains("risk level 4"));
        assert!(prompt.contains("Concerning"));
    }

    #[test]
    fn display_string_uses_sentinels() {
        assert_eq!(
            Explanation::Generated("All good.".into()).into_display_string(),
            "All good."
        );
        assert_eq!(
            Explanation::NoClassification.into_display_string(),
            "No classification data available for explanation."
        );
        let failed = Explanation::Unavailable("timeout".into()).into_display_string();
        assert!(failed.starts_with("Could not generate explanation: "));
        assert!(failed.ends_with("timeout"));
    }

    #[test]
    fn failure_variants() {
        assert!(!Explanation::Generated("x".into()).is_failure());
        assert!(Explanation::NoClassification.is_failure());
        assert!(Explanation::Unavailable("x".into()).is_failure());
    }

    #[tokio::test]
    async fn unreachable_llm_degrades_to_unavailable() {
        // Nothing listens on this port; the call must fold the connection
        // error into Unavailable instead of propagating.
        let explainer = IngredientExplainer::new(
            GroqClient::new("test-key".into())
                .unwrap()
                .with_base_url("http://127.0.0.1:1"),
        );
        let classification = ClassificationResponse::from_prediction(
            "sugar, salt".into(),
            2,
            &[0.1, 0.2, 0.4, 0.2, 0.1],
        )
        .unwrap();

        let outcome = explainer
            .explain("sugar, salt", Some(&classification))
            .await;
        match outcome {
            Explanation::Unavailable(reason) => assert!(!reason.is_empty()),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }
}
