// Expedientes - Municipal Record Tracking Service
//
// Backend for tracking municipal case files ("expedientes") as they are
// created, routed between departments, annotated, and printed. The record
// numbering and routing engine lives in domains/records; everything else
// is plumbing around it.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
