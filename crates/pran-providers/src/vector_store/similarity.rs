//! Vector similarity helpers
//!
//! Exact cosine similarity with heap-based top-k selection, used by the
//! local backend.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Compute the L2 norm of a vector
pub fn compute_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine similarity in [-1, 1] with a precomputed norm for `a`
///
/// Zero vectors have similarity 0 with everything.
pub fn cosine_similarity_with_norm(a: &[f32], b: &[f32], norm_a: f32) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_b = compute_norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot_product / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

/// Scored item for heap-based top-k selection
///
/// Uses reverse ordering so BinaryHeap acts as a min-heap (smallest scores at top).
#[derive(Debug, PartialEq)]
struct ScoredItem {
    score: f32,
    index: usize,
}

impl Eq for ScoredItem {}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Select the `k` best-scoring candidates, best first
///
/// Returns `(index, score)` pairs. Ties keep insertion order. O(n log k).
pub fn top_k<I>(scores: I, k: usize) -> Vec<(usize, f32)>
where
    I: IntoIterator<Item = (usize, f32)>,
{
    if k == 0 {
        return Vec::new();
    }
    let mut heap: BinaryHeap<ScoredItem> = BinaryHeap::with_capacity(k + 1);

    for (index, score) in scores {
        if heap.len() < k {
            heap.push(ScoredItem { score, index });
        } else if let Some(min) = heap.peek() {
            if score > min.score {
                heap.pop();
                heap.push(ScoredItem { score, index });
            }
        }
    }

    let mut items: Vec<_> = heap.into_iter().collect();
    items.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.index.cmp(&b.index))
    });
    items.into_iter().map(|item| (item.index, item.score)).collect()
}
