//! Cosine similarity between embedding vectors.
//!
//! Embeddings are stored as `f32` (the precision the corpus export uses);
//! accumulation happens in `f64` so that scores compared against thresholds
//! and tie-broken in the selector are stable.

/// Calculate the cosine similarity between two vectors.
///
/// The result lies in `[-1, 1]`. Degenerate inputs are not errors:
///
/// - vectors of different length score `0.0`;
/// - a zero dot product scores `0.0` (this covers all-zero vectors as well as
///   genuinely orthogonal ones, where `0.0` is the exact answer);
/// - a zero norm scores `0.0` instead of dividing by zero.
///
/// ```
/// use vinculo::similarity::cosine_similarity;
///
/// assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
/// assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
/// assert!((cosine_similarity(&[3.0, 4.0], &[3.0, 4.0]) - 1.0).abs() < 1e-9);
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if dot == 0.0 {
        return 0.0;
    }

    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        dot / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_self_similarity_is_one() {
        let vectors: [&[f32]; 4] = [
            &[1.0, 2.0, 3.0],
            &[0.1, -0.7, 0.25, 0.9],
            &[-5.0],
            &[1e-3, 2e-3, 4e-3, 8e-3, 1.6e-2],
        ];
        for v in vectors {
            assert!((cosine_similarity(v, v) - 1.0).abs() < EPSILON, "{v:?}");
        }
    }

    #[test]
    fn test_symmetry() {
        let a = [0.3, 0.2, -0.9, 0.4];
        let b = [0.1, 0.8, 0.05, -0.3];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_length_mismatch_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[1.0]), 0.0);
    }

    #[test]
    fn test_orthogonal_vectors() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        // Non-unit, non-zero vectors whose dot product is exactly zero.
        assert_eq!(cosine_similarity(&[2.0, 3.0], &[-3.0, 2.0]), 0.0);
    }

    #[test]
    fn test_zero_and_empty_vectors() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_opposite_vectors() {
        let sim = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]);
        assert!((sim + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_scale_invariance() {
        let a = [0.2, 0.4, 0.1];
        let b = [2.0, 4.0, 1.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }
}
