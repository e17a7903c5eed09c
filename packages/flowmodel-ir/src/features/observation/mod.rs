// Observation: per-implementation flow observations
//
// - entry: one implementer's observed flows (or neutrality) for a member
// - store: concurrent store keyed by interface member, with collection barrier
// - error: rejection reasons for inconsistent observations

mod entry;
mod error;
mod store;

pub use entry::{Observation, ObservationEntry};
pub use error::StoreError;
pub use store::{CollectionStatus, ObservationStore};
