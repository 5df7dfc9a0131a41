//! Explanation pipeline: Groq LLM client, prompt construction, and
//! session-scoped state.

mod explainer;
mod groq;
mod session;

pub use explainer::{
    EXPLANATION_TEMPERATURE, Explanation, FAILURE_PREFIX, IngredientExplainer,
    MAX_EXPLANATION_TOKENS, NO_CLASSIFICATION_MESSAGE,
};
pub use groq::{GROQ_API_KEY_VAR, GenerateError, GroqClient, ExplainerInitError};
pub use session::{ChatHistoryEntry, SessionContext};
