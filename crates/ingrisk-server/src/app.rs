//! Router, shared state, and request handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info};

use ingrisk_ai::{ClassifyError, RiskClassifier};
use ingrisk_core::{ClassificationResponse, PredictRequest};

/// Shared application state: the classifier loaded once at startup.
///
/// The ort session takes `&mut self` per call, so concurrent requests
/// serialize through an async mutex; the model itself is never mutated.
#[derive(Clone)]
pub struct AppState {
    classifier: Arc<Mutex<RiskClassifier>>,
}

impl AppState {
    pub fn new(classifier: RiskClassifier) -> Self {
        Self {
            classifier: Arc::new(Mutex::new(classifier)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .with_state(state)
}

/// Request failure, rendered as `{"detail": …}` with the matching status.
///
/// Errors are status-coded; a 200 never carries an embedded error.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<ClassifyError> for ApiError {
    fn from(err: ClassifyError) -> Self {
        match err {
            ClassifyError::EmptyInput => Self::BadRequest("Empty input text".to_string()),
            ClassifyError::Prediction(_) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            Self::Internal(detail) => (StatusCode::INTERNAL_SERVER_ERROR, detail),
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub health: &'static str,
    pub predict: &'static str,
}

async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Ingredient Risk Classifier API",
        version: env!("CARGO_PKG_VERSION"),
        health: "/health",
        predict: "/predict",
    })
}

async fn health() -> Json<HealthResponse> {
    // Startup fails fast if the model cannot load, so a serving process
    // always has it.
    Json(HealthResponse {
        status: "healthy",
        model_loaded: true,
    })
}

async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<ClassificationResponse>, ApiError> {
    let text = request.text.trim().to_string();

    let prediction = state
        .classifier
        .lock()
        .await
        .classify(&text)
        .map_err(|err| {
            error!(error = %err, "classification failed");
            ApiError::from(err)
        })?;

    let response = ClassificationResponse::from_prediction(
        text,
        prediction.predicted_index,
        &prediction.probabilities,
    )
    .map_err(|err| {
        error!(error = %err, "predicted index outside the label table");
        ApiError::Internal(err.to_string())
    })?;

    info!(risk_level = response.risk_level, "classified ingredient list");
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn empty_input_maps_to_bad_request() {
        let err = ApiError::from(ClassifyError::EmptyInput);
        assert!(matches!(&err, ApiError::BadRequest(d) if d == "Empty input text"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn prediction_fault_maps_to_internal() {
        let err = ApiError::from(ClassifyError::Prediction("tensor shape mismatch".into()));
        match &err {
            ApiError::Internal(detail) => assert!(detail.contains("tensor shape mismatch")),
            other => panic!("expected Internal, got {other:?}"),
        }
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn health_reports_model_loaded() {
        let Json(body) = health().await;
        assert_eq!(body.status, "healthy");
        assert!(body.model_loaded);

        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"status":"healthy","model_loaded":true}"#);
    }

    #[tokio::test]
    async fn root_links_to_endpoints() {
        let Json(info) = root().await;
        assert_eq!(info.message, "Ingredient Risk Classifier API");
        assert_eq!(info.health, "/health");
        assert_eq!(info.predict, "/predict");
        assert!(!info.version.is_empty());
    }

    #[test]
    fn predict_request_parses() {
        let request: PredictRequest =
            serde_json::from_str(r#"{"text": "sugar, salt"}"#).unwrap();
        assert_eq!(request.text, "sugar, salt");
    }

    fn model_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("models")
            .join("deberta-v3-base-ingredients")
    }

    /// Full handler pass; only runs when the model has been downloaded.
    #[tokio::test]
    async fn predict_handler_classifies() {
        let dir = model_dir();
        if !dir.join("model.onnx").exists() {
            eprintln!("model.onnx not present in {dir:?}, skipping");
            return;
        }
        let state = AppState::new(RiskClassifier::load(&dir).unwrap());

        let request = PredictRequest {
            text: "refined wheat flour, sugar, edible vegetable oil (palmolein), \
                   emulsifier (322)"
                .into(),
        };
        let Json(response) = predict(State(state.clone()), Json(request)).await.unwrap();

        assert!((1..=5).contains(&response.risk_level));
        assert!(!response.risk_category.as_str().is_empty());
        assert_eq!(response.probabilities.len(), 5);
        let sum: f32 = response.probabilities.values().sum();
        assert!((sum - 1.0).abs() < 1e-4);

        let empty = PredictRequest { text: "   ".into() };
        let err = predict(State(state), Json(empty)).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
