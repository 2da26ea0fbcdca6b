//! Measurement distributions
//!
//! Each measurement stream is drawn independently per observation.
//! No autocorrelation, no cross-node correlation, no clamping.

use rand::Rng;
use rand_distr::{Distribution, Exp, Normal, Uniform};
use serde::{Deserialize, Serialize};

use crate::logic::error::{TwinError, TwinResult};
use crate::logic::telemetry::{
    Measurements, CPU_FAILURE_THRESHOLD, ERROR_RATE_FAILURE_THRESHOLD,
    PACKET_LOSS_FAILURE_THRESHOLD, TEMPERATURE_FAILURE_THRESHOLD,
};

/// Parameters of the generative model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionParams {
    pub cpu_mean: f64,
    pub cpu_std: f64,
    pub latency_mean: f64,
    pub latency_std: f64,
    pub throughput_mean: f64,
    pub throughput_std: f64,
    pub packet_loss_low: f64,
    pub packet_loss_high: f64,
    pub temperature_mean: f64,
    pub temperature_std: f64,
    /// Mean of the exponential; rate is `1 / error_rate_mean`
    pub error_rate_mean: f64,
}

impl Default for DistributionParams {
    fn default() -> Self {
        Self {
            cpu_mean: 30.0,
            cpu_std: 10.0,
            latency_mean: 20.0,
            latency_std: 5.0,
            throughput_mean: 100.0,
            throughput_std: 20.0,
            packet_loss_low: 0.0,
            packet_loss_high: 5.0,
            temperature_mean: 60.0,
            temperature_std: 5.0,
            error_rate_mean: 0.5,
        }
    }
}

impl DistributionParams {
    /// Analytic probability that one observation breaches at least one threshold
    pub fn failure_probability(&self) -> f64 {
        let cpu_ok = normal_cdf(CPU_FAILURE_THRESHOLD, self.cpu_mean, self.cpu_std);
        let temp_ok = normal_cdf(TEMPERATURE_FAILURE_THRESHOLD, self.temperature_mean, self.temperature_std);
        let loss_ok = ((PACKET_LOSS_FAILURE_THRESHOLD - self.packet_loss_low)
            / (self.packet_loss_high - self.packet_loss_low))
            .clamp(0.0, 1.0);
        let err_ok = 1.0 - (-ERROR_RATE_FAILURE_THRESHOLD / self.error_rate_mean).exp();

        1.0 - cpu_ok * temp_ok * loss_ok * err_ok
    }
}

fn normal_cdf(x: f64, mean: f64, std: f64) -> f64 {
    0.5 * libm::erfc(-(x - mean) / (std * std::f64::consts::SQRT_2))
}

/// Sampler for one full set of measurements
#[derive(Debug, Clone)]
pub struct MeasurementModel {
    cpu: Normal<f64>,
    latency: Normal<f64>,
    throughput: Normal<f64>,
    packet_loss: Uniform<f64>,
    temperature: Normal<f64>,
    error_rate: Exp<f64>,
}

impl MeasurementModel {
    pub fn new(params: &DistributionParams) -> TwinResult<Self> {
        let normal = |name: &str, mean: f64, std: f64| {
            Normal::new(mean, std)
                .map_err(|e| TwinError::InvalidConfig(format!("{} distribution: {}", name, e)))
        };

        if !(params.packet_loss_low < params.packet_loss_high) {
            return Err(TwinError::InvalidConfig(format!(
                "packet_loss range [{}, {}) is empty",
                params.packet_loss_low, params.packet_loss_high
            )));
        }
        if !(params.error_rate_mean > 0.0) {
            return Err(TwinError::InvalidConfig("error_rate_mean must be positive".into()));
        }

        Ok(Self {
            cpu: normal("cpu_usage", params.cpu_mean, params.cpu_std)?,
            latency: normal("latency", params.latency_mean, params.latency_std)?,
            throughput: normal("throughput", params.throughput_mean, params.throughput_std)?,
            packet_loss: Uniform::new(params.packet_loss_low, params.packet_loss_high),
            temperature: normal("temperature", params.temperature_mean, params.temperature_std)?,
            error_rate: Exp::new(1.0 / params.error_rate_mean)
                .map_err(|e| TwinError::InvalidConfig(format!("error_rate distribution: {}", e)))?,
        })
    }

    /// Draw one observation
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Measurements {
        Measurements {
            cpu_usage: self.cpu.sample(rng),
            latency: self.latency.sample(rng),
            throughput: self.throughput.sample(rng),
            packet_loss: self.packet_loss.sample(rng),
            temperature: self.temperature.sample(rng),
            error_rate: self.error_rate.sample(rng),
        }
    }
}
