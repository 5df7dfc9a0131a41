pub mod api;
pub mod ingredients;
pub mod risk;

pub use api::{ClassificationResponse, PredictRequest};
pub use ingredients::split_ingredients;
pub use risk::{LabelError, NUM_RISK_CLASSES, RiskCategory, RiskRating, map_risk};
