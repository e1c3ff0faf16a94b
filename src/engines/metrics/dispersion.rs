// src/engines/metrics/dispersion.rs
use std::collections::HashMap;

pub struct DispersionMetrics;

impl DispersionMetrics {
    /// Summary of how evenly yield is spread over investors.
    pub fn calculate(yields: &[f64]) -> HashMap<String, f64> {
        let mut metrics = HashMap::new();

        if yields.is_empty() {
            return metrics;
        }

        metrics.insert("mean_yield".to_string(), Self::mean(yields));
        metrics.insert("yield_std_dev".to_string(), Self::std_dev(yields));

        let min = yields.iter().copied().fold(f64::INFINITY, f64::min);
        let max = yields.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        metrics.insert("min_yield".to_string(), min);
        metrics.insert("max_yield".to_string(), max);
        metrics.insert("yield_spread".to_string(), max - min);

        metrics
    }

    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Population standard deviation (divides by n). Empty input gives 0.
    pub fn std_dev(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }

        let mean = Self::mean(values);
        let variance = values.iter()
            .map(|&v| (v - mean).powi(2))
            .sum::<f64>() / values.len() as f64;

        variance.sqrt()
    }
}
