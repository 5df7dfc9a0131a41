//! ONNX Runtime classification pipeline for ingredient risk.
//!
//! Wraps a pretrained 5-class sequence-classification model (a DeBERTa-v3
//! fine-tune exported to ONNX). The model directory must contain
//! `model.onnx` and `tokenizer.json`.

use std::path::Path;

use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::info;

use ingrisk_core::NUM_RISK_CLASSES;

use crate::predict::{ClassifyError, Prediction, argmax, softmax};

/// Inputs are truncated to the model's maximum sequence length.
const MAX_INPUT_TOKENS: usize = 512;

/// Ingredient risk classifier backed by ONNX Runtime.
///
/// Loaded once at process start and shared for the process lifetime. The
/// session API takes `&mut self`, so concurrent callers serialize through
/// whatever lock the owner wraps it in.
pub struct RiskClassifier {
    session: Session,
    tokenizer: Tokenizer,
}

impl RiskClassifier {
    /// Load the model from a directory containing `model.onnx` and `tokenizer.json`.
    pub fn load(model_dir: &Path) -> anyhow::Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        anyhow::ensure!(model_path.exists(), "model.onnx not found in {model_dir:?}");
        anyhow::ensure!(
            tokenizer_path.exists(),
            "tokenizer.json not found in {model_dir:?}"
        );

        let session = Session::builder()?.commit_from_file(&model_path)?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("load tokenizer: {e}"))?;

        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_INPUT_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("set truncation: {e}"))?;

        tokenizer.with_padding(Some(tokenizers::PaddingParams {
            ..Default::default()
        }));

        info!(model = %model_path.display(), "loaded classification model");
        Ok(Self { session, tokenizer })
    }

    /// Classify an ingredient list, returning the predicted class and the
    /// full softmax distribution.
    ///
    /// Empty input (after trimming) fails without invoking the model. Any
    /// tokenizer or runtime fault is surfaced as
    /// [`ClassifyError::Prediction`] with the underlying message.
    pub fn classify(&mut self, text: &str) -> Result<Prediction, ClassifyError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ClassifyError::EmptyInput);
        }

        self.forward(text)
            .map_err(|e| ClassifyError::Prediction(e.to_string()))
    }

    fn forward(&mut self, text: &str) -> anyhow::Result<Prediction> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow::anyhow!("tokenize: {e}"))?;

        let seq_len = encoding.get_ids().len();
        anyhow::ensure!(seq_len > 0, "tokenizer produced no tokens");

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let token_type_ids: Vec<i64> = encoding
            .get_type_ids()
            .iter()
            .map(|&t| t as i64)
            .collect();

        let shape = [1i64, seq_len as i64];

        let ids_tensor = Tensor::from_array((shape, input_ids.into_boxed_slice()))?;
        let mask_tensor = Tensor::from_array((shape, attention_mask.into_boxed_slice()))?;
        let type_tensor = Tensor::from_array((shape, token_type_ids.into_boxed_slice()))?;

        let outputs = self.session.run(ort::inputs![
            "input_ids" => ids_tensor,
            "attention_mask" => mask_tensor,
            "token_type_ids" => type_tensor,
        ])?;

        // Logits: [1, NUM_RISK_CLASSES].
        let (output_shape, logits) = outputs[0].try_extract_tensor::<f32>()?;
        let dims: &[i64] = output_shape;
        anyhow::ensure!(
            dims.len() == 2 && dims[0] == 1 && dims[1] as usize == NUM_RISK_CLASSES,
            "unexpected logit shape: {dims:?}, expected [1, {NUM_RISK_CLASSES}]"
        );

        let probabilities = softmax(&logits[..NUM_RISK_CLASSES]);
        let predicted_index = argmax(&probabilities);

        Ok(Prediction {
            predicted_index,
            probabilities,
        })
    }
}
