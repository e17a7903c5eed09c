//! Feature modules
//!
//! Leaves first: access paths, flow model records, the observation store,
//! the class-hierarchy port, neutral classification and lifting.

pub mod access_path;
pub mod flow_model;
pub mod hierarchy;
pub mod lifting;
pub mod neutral;
pub mod observation;
