//! Cache replacement policy implementations
//!
//! This module contains the cache eviction policies that implement the
//! `CachePolicy` trait. Each policy decides hit/miss per access and manages
//! its resident set according to a different eviction strategy.

use crate::CachePolicy;

pub mod arc;
pub mod lfu;
pub mod lru;
mod ordered;
pub mod tdc;

// Re-export all policy implementations
pub use arc::AdaptiveCache;
pub use lfu::FrequencyCache;
pub use lru::RecencyCache;
pub use tdc::TimeDecayedCache;

/// Enumeration of available cache policy types
///
/// This enum allows dynamic selection of cache policies at runtime and is
/// what the experiment runner iterates over when comparing strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyType {
    /// Least Recently Used - evicts the item that was accessed longest ago
    Lru,
    /// Least Frequently Used - evicts the item with the lowest access count
    Lfu,
    /// Adaptive Replacement Cache - balances recency and frequency via ghost lists
    Arc,
    /// Time-Decayed Cache - evicts the item with the lowest decayed score
    Tdc,
}

impl PolicyType {
    /// Returns a human-readable name for the policy
    pub fn name(&self) -> &'static str {
        match self {
            PolicyType::Lru => "LRU",
            PolicyType::Lfu => "LFU",
            PolicyType::Arc => "ARC",
            PolicyType::Tdc => "TDC",
        }
    }

    /// Returns a description of the policy's behavior
    pub fn description(&self) -> &'static str {
        match self {
            PolicyType::Lru => "Evicts the least recently used item",
            PolicyType::Lfu => "Evicts the least frequently used item",
            PolicyType::Arc => "Adapts between recency and frequency using ghost histories",
            PolicyType::Tdc => "Evicts the item with the smallest exponentially decayed score",
        }
    }

    /// Returns all available policy types
    pub fn all() -> &'static [PolicyType] {
        &[
            PolicyType::Lru,
            PolicyType::Lfu,
            PolicyType::Arc,
            PolicyType::Tdc,
        ]
    }
}

/// Factory function to create cache policies dynamically
///
/// Enables runtime selection of policies, which is how the experiment runner
/// builds one fresh instance per comparison run. The time-decayed policy is
/// created with its default decay rate; use [`TimeDecayedCache::with_decay_rate`]
/// directly for other rates.
pub fn create_policy(policy_type: PolicyType, capacity: usize) -> Box<dyn CachePolicy> {
    match policy_type {
        PolicyType::Lru => Box::new(RecencyCache::new(capacity)),
        PolicyType::Lfu => Box::new(FrequencyCache::new(capacity)),
        PolicyType::Arc => Box::new(AdaptiveCache::new(capacity)),
        PolicyType::Tdc => Box::new(TimeDecayedCache::new(capacity)),
    }
}
