//! Serving statistics: prediction counts, latencies, confidence distribution.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics collector for the serving facade
pub struct ServingMetrics {
    /// Total predictions served
    pub predictions_served: AtomicU64,
    /// Total training runs completed
    pub trainings_completed: AtomicU64,
    /// Inference times per model (in microseconds)
    inference_times: RwLock<HashMap<String, Vec<u64>>>,
    /// Confidence distribution buckets
    confidence_buckets: RwLock<[u64; 10]>,
    /// Start time for throughput calculation
    start_time: Instant,
}

impl ServingMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            predictions_served: AtomicU64::new(0),
            trainings_completed: AtomicU64::new(0),
            inference_times: RwLock::new(HashMap::new()),
            confidence_buckets: RwLock::new([0; 10]),
            start_time: Instant::now(),
        }
    }

    /// Record a served prediction
    pub fn record_prediction(&self, model_id: &str, duration: Duration, confidence: f64) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut times) = self.inference_times.write() {
            let model_times = times.entry(model_id.to_string()).or_default();
            model_times.push(duration.as_micros() as u64);
            // Keep only the most recent samples
            if model_times.len() > 1000 {
                model_times.drain(0..500);
            }
        }

        let bucket = ((confidence * 10.0).min(9.0)).max(0.0) as usize;
        if let Ok(mut buckets) = self.confidence_buckets.write() {
            buckets[bucket] += 1;
        }
    }

    /// Record a completed training run
    pub fn record_training(&self) {
        self.trainings_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Per-model inference time statistics
    pub fn model_stats(&self) -> HashMap<String, ModelStats> {
        let times = self.inference_times.read().unwrap();
        let mut stats = HashMap::new();

        for (model, model_times) in times.iter() {
            if model_times.is_empty() {
                continue;
            }

            let mut sorted: Vec<u64> = model_times.clone();
            sorted.sort_unstable();

            let sum: u64 = sorted.iter().sum();
            let count = sorted.len();

            stats.insert(
                model.clone(),
                ModelStats {
                    calls: count as u64,
                    mean_us: sum / count as u64,
                    p50_us: sorted[count / 2],
                    p99_us: sorted[(count as f64 * 0.99) as usize],
                },
            );
        }

        stats
    }

    /// Confidence distribution buckets (0.0-0.1 through 0.9-1.0)
    pub fn confidence_distribution(&self) -> [u64; 10] {
        *self.confidence_buckets.read().unwrap()
    }

    /// Predictions per second since start
    pub fn throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.predictions_served.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Log a summary of everything recorded so far
    pub fn print_summary(&self) {
        let predictions = self.predictions_served.load(Ordering::Relaxed);
        let trainings = self.trainings_completed.load(Ordering::Relaxed);

        info!(
            predictions = predictions,
            trainings = trainings,
            throughput = format!("{:.1}/s", self.throughput()),
            "Serving summary"
        );

        for (model, stats) in &self.model_stats() {
            info!(
                model = %model,
                calls = stats.calls,
                mean_us = stats.mean_us,
                p50_us = stats.p50_us,
                p99_us = stats.p99_us,
                "Model inference times"
            );
        }

        let distribution = self.confidence_distribution();
        let total: u64 = distribution.iter().sum();
        if total > 0 {
            for (i, &count) in distribution.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                info!(
                    bucket = format!("{:.1}-{:.1}", i as f64 / 10.0, (i + 1) as f64 / 10.0),
                    count = count,
                    share = format!("{:.1}%", count as f64 / total as f64 * 100.0),
                    "Confidence distribution"
                );
            }
        }
    }
}

impl Default for ServingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-model inference statistics
#[derive(Debug)]
pub struct ModelStats {
    pub calls: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p99_us: u64,
}
