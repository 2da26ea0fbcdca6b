//! API Module
//!
//! Function surface consumed by the presentation layer.
//!
//! Usage:
//! - `api::list_nodes(&dataset)` - node selector
//! - `api::get_node_snapshot(&dataset, "NODE-1000")` - headline row + risk badge
//! - `api::get_metric_trend(&dataset, "NODE-1000", Metric::CpuUsage)` - charts

pub mod commands;

#[cfg(test)]
mod tests;

pub use commands::*;
