//! Maximal Marginal Relevance selection of related items.
//!
//! Given the embedding of a target document and a pool of other documents,
//! [`select_related`] picks a small ordered set that balances relevance to the
//! target against redundancy among the picks:
//!
//! ```text
//! mmr(c) = λ · sim(c, target) − (1 − λ) · max_{s ∈ selected} sim(c, s)
//! ```
//!
//! where `λ` is [`MmrConfig::diversity_factor`]. With `λ >= 1.0` the selector
//! returns the plain similarity ranking. Otherwise only the best
//! `top_n * POOL_MULTIPLIER` candidates take part in the greedy loop, which
//! caps its cost at `O(top_n²)` similarity evaluations per selection step.
//! Candidates ranked below that cutoff can never be selected, even when an
//! exhaustive MMR pass would have picked them.
//!
//! # Example
//!
//! ```
//! use vinculo::document::Resolution;
//! use vinculo::mmr::{select_related, MmrConfig};
//!
//! let pool = vec![
//!     Resolution::new("a", "A", "").with_vector(vec![1.0, 0.1, 0.0]),
//!     Resolution::new("b", "B", "").with_vector(vec![1.0, 0.05, 0.12]),
//!     Resolution::new("c", "C", "").with_vector(vec![0.2, -0.1, 0.97]),
//! ];
//!
//! let config = MmrConfig::default()
//!     .with_top_n(2)
//!     .with_diversity_factor(0.0)
//!     .with_threshold(0.0);
//! let related = select_related(Some(&[1.0_f32, 0.0, 0.0][..]), &pool, &config);
//!
//! let ids: Vec<&str> = related.iter().map(|r| r.item.id.as_str()).collect();
//! assert_eq!(ids, ["a", "c"]);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::document::Embedded;
use crate::error::{Result, VinculoError};
use crate::similarity::cosine_similarity;

/// The MMR loop only considers the best `top_n * POOL_MULTIPLIER` candidates.
pub const POOL_MULTIPLIER: usize = 4;

/// Parameters of a related-items selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MmrConfig {
    /// Maximum number of items to return.
    pub top_n: usize,
    /// Relevance/diversity trade-off: `1.0` is pure relevance, `0.0` pure
    /// anti-redundancy.
    pub diversity_factor: f64,
    /// Minimum cosine similarity to the target.
    pub threshold: f64,
}

impl Default for MmrConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            diversity_factor: 0.5,
            threshold: 0.5,
        }
    }
}

impl MmrConfig {
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_diversity_factor(mut self, diversity_factor: f64) -> Self {
        self.diversity_factor = diversity_factor;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Size of the working pool for the MMR loop.
    pub fn pool_limit(&self) -> usize {
        self.top_n.saturating_mul(POOL_MULTIPLIER)
    }

    /// Check that both weights are finite and within `[0, 1]`.
    ///
    /// [`select_related`] accepts any configuration; this is meant for
    /// rejecting user input early.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.diversity_factor) {
            return Err(VinculoError::invalid_argument(format!(
                "diversity factor must be within [0, 1], got {}",
                self.diversity_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(VinculoError::invalid_argument(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// An item together with its cosine similarity to the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scored<T> {
    pub item: T,
    pub similarity: f64,
}

struct Candidate<'a, T> {
    item: &'a T,
    vector: &'a [f32],
    similarity: f64,
}

/// Select up to `config.top_n` items of `pool` related to `target`.
///
/// The target itself must not be part of `pool`; this function does no
/// self-exclusion. Items without an embedding, or whose embedding length
/// differs from the target's, are skipped. A missing target, an empty pool
/// or `top_n == 0` produce an empty result.
///
/// The returned similarities are the raw cosine similarities to `target`,
/// all `>= config.threshold`. The order is the MMR selection order: only the
/// first element is guaranteed to be the most similar one. Ties in the
/// initial ranking keep the order of `pool`. MMR-score ties go to the first
/// entry of the working pool, whose order changes as picked entries are
/// swap-removed, so a later item of `pool` can win a tie.
pub fn select_related<'a, T: Embedded>(
    target: Option<&[f32]>,
    pool: &'a [T],
    config: &MmrConfig,
) -> Vec<Scored<&'a T>> {
    let Some(target) = target else {
        return Vec::new();
    };
    if pool.is_empty() || config.top_n == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<Candidate<'a, T>> = pool
        .iter()
        .filter_map(|item| {
            let vector = item.embedding()?;
            if vector.len() != target.len() {
                return None;
            }
            let similarity = cosine_similarity(target, vector);
            (similarity >= config.threshold).then_some(Candidate {
                item,
                vector,
                similarity,
            })
        })
        .collect();

    // Stable sort keeps pool order among equal similarities.
    candidates.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

    if config.diversity_factor >= 1.0 {
        candidates.truncate(config.top_n);
        return into_scored(candidates);
    }

    let matched = candidates.len();
    candidates.truncate(config.pool_limit());
    debug!(
        "mmr: {} of {} items above threshold {}, pool of {}",
        matched,
        pool.len(),
        config.threshold,
        candidates.len()
    );

    let selected = mmr_loop(candidates, config.top_n, config.diversity_factor);
    into_scored(selected)
}

/// Greedy MMR over an owned working pool. Picked candidates are swap-removed,
/// so the pool is treated as an unordered set after the first pick.
fn mmr_loop<'a, T>(
    mut pool: Vec<Candidate<'a, T>>,
    top_n: usize,
    diversity_factor: f64,
) -> Vec<Candidate<'a, T>> {
    let mut selected: Vec<Candidate<'a, T>> = Vec::with_capacity(top_n.min(pool.len()));

    while selected.len() < top_n && !pool.is_empty() {
        let mut best_score = f64::NEG_INFINITY;
        let mut best_idx = None;

        for (idx, candidate) in pool.iter().enumerate() {
            let redundancy = selected
                .iter()
                .map(|s| cosine_similarity(candidate.vector, s.vector))
                .fold(0.0, f64::max);

            let score =
                diversity_factor * candidate.similarity - (1.0 - diversity_factor) * redundancy;

            if score > best_score {
                best_score = score;
                best_idx = Some(idx);
            }
        }

        match best_idx {
            Some(idx) => selected.push(pool.swap_remove(idx)),
            None => break,
        }
    }

    selected
}

fn into_scored<'a, T>(candidates: Vec<Candidate<'a, T>>) -> Vec<Scored<&'a T>> {
    candidates
        .into_iter()
        .map(|c| Scored {
            item: c.item,
            similarity: c.similarity,
        })
        .collect()
}
