//! Access path domain types

mod path;
mod segment;

pub use path::AccessPath;
pub use segment::AccessPathSegment;
