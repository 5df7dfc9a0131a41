//! Session-scoped state for one interactive analysis session.
//!
//! Created on first interaction and dropped with the session; nothing here
//! is process-wide or shared across users.

use ingrisk_core::ClassificationResponse;

use crate::explainer::IngredientExplainer;
use crate::groq::ExplainerInitError;

/// One message in the session's chat history, insertion-ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatHistoryEntry {
    pub role: String,
    pub content: String,
}

/// Per-session context: chat history, the latest classification, and the
/// lazily constructed, cached explainer.
#[derive(Default)]
pub struct SessionContext {
    history: Vec<ChatHistoryEntry>,
    classification: Option<ClassificationResponse>,
    explainer: Option<IngredientExplainer>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the chat history.
    pub fn record(&mut self, role: impl Into<String>, content: impl Into<String>) {
        self.history.push(ChatHistoryEntry {
            role: role.into(),
            content: content.into(),
        });
    }

    pub fn history(&self) -> &[ChatHistoryEntry] {
        &self.history
    }

    pub fn set_classification(&mut self, classification: ClassificationResponse) {
        self.classification = Some(classification);
    }

    pub fn classification(&self) -> Option<&ClassificationResponse> {
        self.classification.as_ref()
    }

    /// The session's explainer, built from the environment on first use.
    ///
    /// Init failure is returned every time rather than cached, so a session
    /// recovers once the key is supplied.
    pub fn explainer(&mut self) -> Result<&IngredientExplainer, ExplainerInitError> {
        if self.explainer.is_none() {
            self.explainer = Some(IngredientExplainer::from_env()?);
        }
        Ok(self.explainer.as_ref().expect("explainer initialized above"))
    }
}
