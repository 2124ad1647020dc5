//! @ai:module:intent Evaluation record loading
//! @ai:module:layer infrastructure
//! @ai:module:public_api PairLoader, PairLoaderTrait, EvalRecord

pub mod loader;
pub mod record;

pub use loader::{PairLoader, PairLoaderTrait};
pub use record::EvalRecord;
