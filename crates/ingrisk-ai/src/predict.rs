//! Prediction output type and the score post-processing shared by the
//! classification pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Input was empty after trimming; the model is never invoked.
    #[error("empty input text")]
    EmptyInput,
    /// Tokenization or inference failed, with the underlying message.
    #[error("prediction failed: {0}")]
    Prediction(String),
}

/// Raw model output: the arg-max class and the full softmax distribution.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub predicted_index: usize,
    /// One probability per class, in class-index order, summing to 1.
    pub probabilities: Vec<f32>,
}

/// Softmax over a logit vector.
///
/// Shifts by the maximum logit before exponentiating so large logits do not
/// overflow.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index of the largest probability.
pub fn argmax(probabilities: &[f32]) -> usize {
    let mut best = 0;
    for (i, &p) in probabilities.iter().enumerate() {
        if p > probabilities[best] {
            best = i;
        }
    }
    best
}
