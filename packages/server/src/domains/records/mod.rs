//! The record numbering and routing engine.
//!
//! Sequence allocation, digital-number synthesis, the two deliberately
//! asymmetric department-change paths (direct edit vs. transfer), and the
//! append-only history trail all live here.

pub mod actions;
pub mod models;
pub mod numbering;
pub mod status;

pub use models::{Note, Record, RecordFilter, RecordHistory};
pub use status::RecordStatus;
