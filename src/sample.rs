//! @ai:module:intent Sample pair types fed into the metrics
//! @ai:module:layer domain
//! @ai:module:public_api Recognition, pair_up
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent One recognized (or ground-truth) text with its confidence
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    pub text: String,
    /// Carried alongside the text; never scored.
    #[serde(default)]
    pub confidence: f32,
}

impl Recognition {
    /// @ai:intent Create a recognition from text and confidence
    /// @ai:effects pure
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

impl<S: Into<String>> From<(S, f32)> for Recognition {
    fn from((text, confidence): (S, f32)) -> Self {
        Self::new(text, confidence)
    }
}

/// @ai:intent Pair predictions with labels by position, dropping any excess
/// @ai:effects pure
pub fn pair_up<'a>(
    predictions: &'a [Recognition],
    labels: &'a [Recognition],
) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    predictions
        .iter()
        .zip(labels.iter())
        .map(|(pred, label)| (pred.text.as_str(), label.text.as_str()))
}
