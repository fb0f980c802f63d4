//! Experiment runner
//!
//! Drives policy instances over traces and aggregates hit-ratio statistics.
//! Each comparison run gets its own fresh instance per policy; nothing here
//! reaches into policy internals beyond the `CachePolicy` contract.

use std::collections::VecDeque;

use crate::policies::{create_policy, PolicyType, TimeDecayedCache};
use crate::{CachePolicy, CacheStats, Item};

/// Drive one policy over a full trace and return its final statistics.
pub fn run_trace(policy: &mut dyn CachePolicy, trace: &[Item]) -> CacheStats {
    for &item in trace {
        policy.access(item);
    }
    policy.stats()
}

/// Relative improvement of `proposed` over `baseline`, in percent.
///
/// Positive values mean the proposed policy is better; `0.0` when the
/// proposed hit ratio is zero.
pub fn delta(proposed_hit_ratio: f64, baseline_hit_ratio: f64) -> f64 {
    if proposed_hit_ratio == 0.0 {
        0.0
    } else {
        (proposed_hit_ratio - baseline_hit_ratio) / proposed_hit_ratio * 100.0
    }
}

/// Runs caching experiments across every policy type.
///
/// The decay rate is bound once at runner construction, mirroring how the
/// capacity is bound per run.
#[derive(Debug, Clone)]
pub struct ExperimentRunner {
    decay_rate: f64,
}

impl Default for ExperimentRunner {
    fn default() -> Self {
        Self {
            decay_rate: crate::policies::tdc::DEFAULT_DECAY_RATE,
        }
    }
}

impl ExperimentRunner {
    pub fn new(decay_rate: f64) -> Self {
        Self { decay_rate }
    }

    /// Build a fresh policy instance for one run.
    pub fn build(&self, policy_type: PolicyType, capacity: usize) -> Box<dyn CachePolicy> {
        match policy_type {
            PolicyType::Tdc => Box::new(TimeDecayedCache::with_decay_rate(
                capacity,
                self.decay_rate,
            )),
            other => create_policy(other, capacity),
        }
    }

    /// Run a single experiment: one policy, one trace, one capacity.
    pub fn run_single(
        &self,
        policy_type: PolicyType,
        capacity: usize,
        trace: &[Item],
    ) -> CacheStats {
        let mut policy = self.build(policy_type, capacity);
        run_trace(policy.as_mut(), trace)
    }

    /// Run every policy over the same trace, each on a fresh instance.
    pub fn compare(&self, trace: &[Item], capacity: usize) -> Vec<(PolicyType, CacheStats)> {
        PolicyType::all()
            .iter()
            .map(|&ty| (ty, self.run_single(ty, capacity, trace)))
            .collect()
    }

    /// Track hit ratios over a trailing window for every policy.
    ///
    /// Sampling starts once `window` accesses have elapsed, so each curve
    /// has `trace.len() - window` points (empty for short traces). The
    /// window is maintained as a running sum rather than a rescan.
    pub fn sliding_window(
        &self,
        trace: &[Item],
        capacity: usize,
        window: usize,
    ) -> Vec<(PolicyType, Vec<f64>)> {
        assert!(window > 0, "window must be non-empty");
        PolicyType::all()
            .iter()
            .map(|&ty| {
                let mut policy = self.build(ty, capacity);
                let mut recent: VecDeque<bool> = VecDeque::with_capacity(window + 1);
                let mut in_window = 0usize;
                let mut curve = Vec::new();
                for (i, &item) in trace.iter().enumerate() {
                    let hit = policy.access(item);
                    recent.push_back(hit);
                    if hit {
                        in_window += 1;
                    }
                    if recent.len() > window && recent.pop_front() == Some(true) {
                        in_window -= 1;
                    }
                    if i >= window {
                        curve.push(in_window as f64 / window as f64);
                    }
                }
                (ty, curve)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_trace_accumulates_all_accesses() {
        let runner = ExperimentRunner::default();
        let trace: Vec<Item> = (0..100).map(|i| i % 10).collect();
        for &ty in PolicyType::all() {
            let stats = runner.run_single(ty, 5, &trace);
            assert_eq!(stats.total(), 100, "{}", ty.name());
        }
    }

    #[test]
    fn test_compare_covers_every_policy() {
        let runner = ExperimentRunner::default();
        let trace: Vec<Item> = vec![1, 2, 1, 3, 1, 2, 4, 1];
        let results = runner.compare(&trace, 2);
        assert_eq!(results.len(), PolicyType::all().len());
        for (_, stats) in &results {
            assert_eq!(stats.total(), trace.len() as u64);
        }
    }

    #[test]
    fn test_full_cache_hits_everything_after_warmup() {
        // Capacity covers the whole universe: every policy converges to
        // misses only on cold start.
        let runner = ExperimentRunner::default();
        let trace: Vec<Item> = (0..500).map(|i| i % 10).collect();
        for &ty in PolicyType::all() {
            let stats = runner.run_single(ty, 10, &trace);
            assert_eq!(stats.misses, 10, "{}", ty.name());
            assert_eq!(stats.hits, 490, "{}", ty.name());
        }
    }

    #[test]
    fn test_sliding_window_curve_shape() {
        let runner = ExperimentRunner::default();
        let trace: Vec<Item> = (0..300).map(|i| i % 7).collect();
        let window = 50;
        for (ty, curve) in runner.sliding_window(&trace, 5, window) {
            assert_eq!(curve.len(), trace.len() - window, "{}", ty.name());
            assert!(curve.iter().all(|&r| (0.0..=1.0).contains(&r)));
        }
    }

    #[test]
    fn test_sliding_window_matches_naive_rescan() {
        let runner = ExperimentRunner::default();
        let trace: Vec<Item> = (0..80).map(|i| (i * 3) % 11).collect();
        let window = 20;

        // Naive oracle: rerun the policy, then rescan the outcome vector.
        let mut policy = runner.build(PolicyType::Lru, 4);
        let outcomes: Vec<bool> = trace.iter().map(|&i| policy.access(i)).collect();
        let expected: Vec<f64> = (window..trace.len())
            .map(|i| {
                let hits = outcomes[i + 1 - window..=i].iter().filter(|&&h| h).count();
                hits as f64 / window as f64
            })
            .collect();

        let curves = runner.sliding_window(&trace, 4, window);
        let (_, lru_curve) = curves
            .iter()
            .find(|(ty, _)| *ty == PolicyType::Lru)
            .unwrap();
        assert_eq!(lru_curve, &expected);
    }

    #[test]
    fn test_delta_sign_convention() {
        assert_eq!(delta(0.0, 0.5), 0.0);
        assert!(delta(0.5, 0.25) > 0.0);
        assert!(delta(0.25, 0.5) < 0.0);
        assert_eq!(delta(0.5, 0.25), 50.0);
    }

    #[test]
    fn test_runner_decay_rate_reaches_tdc() {
        // The same trace resolves differently under fast and slow decay:
        // fast decay evicts the stale-but-frequent item 1, slow decay keeps it.
        let trace: Vec<Item> = vec![1, 1, 1, 2, 3, 2];
        let fast = ExperimentRunner::new(0.5).run_single(PolicyType::Tdc, 2, &trace);
        let slow = ExperimentRunner::new(0.9999).run_single(PolicyType::Tdc, 2, &trace);
        assert_eq!(fast.hits, 3);
        assert_eq!(slow.hits, 2);
    }
}
