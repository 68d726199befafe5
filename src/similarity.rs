use crate::features::FeatureVector;

/// Cosine similarity over two sparse vectors.
///
/// The dot product runs over the key intersection, while each vector's L2
/// norm runs over its own full key set. A vector carrying many keys absent
/// from the other is penalized through its inflated norm even though those
/// keys contribute nothing to the dot product. Returns 0.0 when either norm
/// is zero.
pub fn cosine(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let mut dot = 0.0;
    for (key, value) in a {
        if let Some(other) = b.get(key) {
            dot += value * other;
        }
    }

    let norm_a: f64 = a.values().map(|v| v * v).sum();
    let norm_b: f64 = b.values().map(|v| v * v).sum();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(&str, f64)]) -> FeatureVector {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_cosine_exact_value_with_extra_key() {
        let a = vector(&[("x", 1.0)]);
        let b = vector(&[("x", 1.0), ("y", 1.0)]);

        // dot = 1, |a| = 1, |b| = sqrt(2)
        let expected = 1.0 / 2.0_f64.sqrt();
        assert!((cosine(&a, &b) - expected).abs() < 1e-12);
        assert!((cosine(&b, &a) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let a = vector(&[("greek", 1.0), ("gyros", 1.0), ("indoor", 1.0)]);
        assert!((cosine(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_norm_is_zero() {
        let a = vector(&[]);
        let b = vector(&[("x", 1.0)]);
        assert_eq!(cosine(&a, &b), 0.0);
        assert_eq!(cosine(&b, &a), 0.0);
        assert_eq!(cosine(&a, &a), 0.0);
    }

    #[test]
    fn test_cosine_disjoint_keys() {
        let a = vector(&[("x", 2.0)]);
        let b = vector(&[("y", 3.0)]);
        assert_eq!(cosine(&a, &b), 0.0);
    }
}
