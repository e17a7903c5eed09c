//! Line codec and ingestion validation

mod line_codec;
mod validation;

pub use line_codec::{parse_member_key, LineCodec};
pub use validation::RecordValidator;
