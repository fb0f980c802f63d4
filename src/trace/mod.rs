//! Synthetic trace generators for cache evaluation
//!
//! Traces are plain `Vec<Item>` access sequences. Generators are
//! deterministic under an explicit seed so experiment runs are reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Item;

pub mod logfile;

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Cumulative (unnormalized) Zipf weights for ranks `1..=n`.
fn zipf_cumulative(n: usize, alpha: f64) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(n);
    let mut total = 0.0;
    for rank in 1..=n {
        total += 1.0 / (rank as f64).powf(alpha);
        cumulative.push(total);
    }
    cumulative
}

/// Draw one rank index from a cumulative weight table.
fn sample_rank(cumulative: &[f64], rng: &mut StdRng) -> usize {
    let total = cumulative[cumulative.len() - 1];
    let needle = rng.r#gen::<f64>() * total;
    cumulative
        .partition_point(|&c| c <= needle)
        .min(cumulative.len() - 1)
}

/// Generate a stationary trace following a Zipf distribution.
///
/// Item `0` is the most popular; higher `alpha` means a more skewed
/// distribution.
///
/// # Panics
/// Panics if `num_items` is 0.
pub fn zipf_stationary(
    num_items: usize,
    num_requests: usize,
    alpha: f64,
    seed: Option<u64>,
) -> Vec<Item> {
    assert!(num_items > 0, "trace needs at least one item");
    let mut rng = rng_for(seed);
    let cumulative = zipf_cumulative(num_items, alpha);
    (0..num_requests)
        .map(|_| sample_rank(&cumulative, &mut rng) as Item)
        .collect()
}

/// Generate a non-stationary trace with phase changes.
///
/// Each phase designates a rotating hot set of `num_items / 4` items,
/// accessed with probability `p_hot` under a Zipf(alpha) distribution; the
/// remaining cold items are drawn uniformly. The hot set shifts every phase,
/// which is what makes fixed recency- or frequency-only policies struggle.
///
/// # Panics
/// Panics if `num_items < 4` (the hot set would be empty).
pub fn non_stationary_phases(
    num_items: usize,
    num_phases: usize,
    phase_length: usize,
    alpha: f64,
    p_hot: f64,
    seed: Option<u64>,
) -> Vec<Item> {
    assert!(num_items >= 4, "need at least 4 items for a hot set");
    let mut rng = rng_for(seed);
    let hot_len = num_items / 4;
    let cold_len = num_items - hot_len;
    let hot_cumulative = zipf_cumulative(hot_len, alpha);

    let mut trace = Vec::with_capacity(num_phases * phase_length);
    for phase in 0..num_phases {
        let hot_start = (phase * hot_len) % (num_items - hot_len);
        for _ in 0..phase_length {
            let item = if rng.r#gen::<f64>() < p_hot {
                (hot_start + sample_rank(&hot_cumulative, &mut rng)) as Item
            } else {
                // Uniform over the items outside the hot window.
                let idx = rng.gen_range(0..cold_len);
                if idx < hot_start {
                    idx as Item
                } else {
                    (idx + hot_len) as Item
                }
            };
            trace.push(item);
        }
    }
    trace
}
