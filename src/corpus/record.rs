//! @ai:module:intent One prediction/label record from an evaluation file
//! @ai:module:layer domain
//! @ai:module:public_api EvalRecord
//! @ai:module:stateless true

use crate::sample::Recognition;
use serde::{Deserialize, Serialize};

/// @ai:intent A predicted text paired with its ground-truth label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalRecord {
    pub prediction: String,
    pub label: String,
    #[serde(default)]
    pub confidence: f32,
}

impl EvalRecord {
    /// @ai:intent Split into the prediction and label sides of a sample pair
    /// @ai:effects pure
    pub fn into_pair(self) -> (Recognition, Recognition) {
        (
            Recognition::new(self.prediction, self.confidence),
            Recognition::new(self.label, 1.0),
        )
    }
}

/// @ai:intent Split records into parallel prediction and label sequences
/// @ai:effects pure
pub fn unzip_records(records: &[EvalRecord]) -> (Vec<Recognition>, Vec<Recognition>) {
    records.iter().cloned().map(EvalRecord::into_pair).unzip()
}
