//! The analyze flow: classify over HTTP, render, then explain.

use std::time::Duration;

use tracing::warn;

use ingrisk_core::{ClassificationResponse, PredictRequest};
use ingrisk_explain::{Explanation, SessionContext};

use crate::display;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Classify `text` against the service at `api_url`, render the result,
/// then run the explanation pipeline unless `skip_explain` is set.
///
/// Classification failures abort the flow with distinct messages per
/// failure class; explanation failures degrade to a warning and leave the
/// classification output visible.
pub async fn run(api_url: &str, text: &str, skip_explain: bool) -> anyhow::Result<()> {
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("please enter some ingredients");
    }

    let classification = classify(api_url, text).await?;

    let mut session = SessionContext::new();
    session.record("user", text);
    display::print_classification(&classification);
    session.set_classification(classification);

    if skip_explain {
        return Ok(());
    }
    explain(&mut session, text).await;
    Ok(())
}

async fn classify(api_url: &str, text: &str) -> anyhow::Result<ClassificationResponse> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let url = format!("{}/predict", api_url.trim_end_matches('/'));

    println!("🔄 Analyzing ingredients...");
    let request = PredictRequest {
        text: text.to_string(),
    };
    let response = match client.post(&url).json(&request).send().await {
        Ok(response) => response,
        Err(err) if err.is_connect() => {
            anyhow::bail!("cannot connect to the API; is ingrisk-server running at {api_url}?")
        }
        Err(err) if err.is_timeout() => {
            anyhow::bail!(
                "API request timed out after {}s; please try again",
                REQUEST_TIMEOUT.as_secs()
            )
        }
        Err(err) => anyhow::bail!("unexpected error calling the API: {err}"),
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("API error {status}: {body}");
    }

    let classification: ClassificationResponse = response.json().await?;
    if let Some(error) = &classification.error {
        anyhow::bail!("classification error: {error}");
    }
    Ok(classification)
}

async fn explain(session: &mut SessionContext, text: &str) {
    println!("✨ Generating detailed explanation...");

    // The prompt needs the classification while the explainer holds the
    // session borrow, so take a copy first.
    let classification = session.classification().cloned();
    let outcome = match session.explainer() {
        Ok(explainer) => explainer.explain(text, classification.as_ref()).await,
        Err(err) => {
            warn!(error = %err, "explainer initialization failed");
            println!("⚠ Explanation unavailable ({err}). Showing classification only.");
            return;
        }
    };

    match outcome {
        Explanation::Generated(explanation) => {
            println!("=== Concise Ingredient Analysis ===");
            println!("{explanation}");
            session.record("assistant", explanation);
        }
        failure => {
            println!("⚠ {}", failure.into_display_string());
        }
    }
}
