//! Logic Module - Synthesizer, Store & Scorer
//!
//! - `telemetry/` - record / series data model + failure rule
//! - `synth/` - telemetry synthesizer
//! - `dataset/` - CSV store
//! - `features/` - feature engineering
//! - `model/` - random forest + risk tiers

pub mod config;
pub mod error;

pub mod dataset;
pub mod features;
pub mod model;
pub mod synth;
pub mod telemetry;
