//! Node Twin - synthetic node telemetry and per-node failure-risk scoring
//!
//! - `logic::synth` generates the dataset
//! - `logic::dataset` stores it as one CSV file per run
//! - `logic::model` scores a node's latest record
//! - `api` is what a viewer calls

pub mod api;
pub mod constants;
pub mod logic;

pub use logic::error::{TwinError, TwinResult};
