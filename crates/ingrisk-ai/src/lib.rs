//! AI inference layer: ONNX Runtime sequence classification for ingredient risk.

mod predict;
pub use predict::{ClassifyError, Prediction, argmax, softmax};

#[cfg(feature = "onnx")]
mod classifier;
#[cfg(feature = "onnx")]
pub use classifier::RiskClassifier;
