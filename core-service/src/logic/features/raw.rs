//! Raw measurement features

use super::layout::{
    IDX_CPU_USAGE, IDX_ERROR_RATE, IDX_LATENCY, IDX_PACKET_LOSS, IDX_TEMPERATURE, IDX_THROUGHPUT,
};
use super::vector::{FeatureExtractor, FeatureVector};
use crate::logic::telemetry::Measurements;

impl FeatureExtractor for Measurements {
    fn extract(&self, vector: &mut FeatureVector) {
        vector.values[IDX_CPU_USAGE] = self.cpu_usage;
        vector.values[IDX_LATENCY] = self.latency;
        vector.values[IDX_THROUGHPUT] = self.throughput;
        vector.values[IDX_PACKET_LOSS] = self.packet_loss;
        vector.values[IDX_TEMPERATURE] = self.temperature;
        vector.values[IDX_ERROR_RATE] = self.error_rate;
    }
}
