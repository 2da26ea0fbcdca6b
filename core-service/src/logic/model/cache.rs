//! Assessment Cache - opt-in memoization of risk assessments
//!
//! Keyed by the series digest plus the ensemble config. A hit returns the
//! same value a fresh `assess_with` would, because scoring is deterministic.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::forest::ForestConfig;
use super::scorer::{assess_with, RiskAssessment};
use crate::logic::error::TwinResult;
use crate::logic::telemetry::TelemetrySeries;

const DEFAULT_CAPACITY: usize = 256;

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, RiskAssessment>,
    /// Insertion order, oldest first
    order: VecDeque<String>,
}

pub struct AssessmentCache {
    state: Mutex<CacheState>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

impl AssessmentCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            capacity: capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get_or_assess(
        &self,
        series: &TelemetrySeries,
        config: &ForestConfig,
    ) -> TwinResult<RiskAssessment> {
        let key = format!("{}:{}", series.digest(), config.cache_key());

        if let Some(hit) = self.state.lock().entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(hit.clone());
        }

        // computed outside the lock; errors are not cached
        self.misses.fetch_add(1, Ordering::Relaxed);
        let assessment = assess_with(series, config)?;

        let mut state = self.state.lock();
        if !state.entries.contains_key(&key) {
            while state.entries.len() >= self.capacity {
                match state.order.pop_front() {
                    Some(oldest) => {
                        state.entries.remove(&oldest);
                    }
                    None => break,
                }
            }
            state.order.push_back(key.clone());
            state.entries.insert(key, assessment.clone());
        }

        Ok(assessment)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.state.lock().entries.len(),
            capacity: self.capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for AssessmentCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
