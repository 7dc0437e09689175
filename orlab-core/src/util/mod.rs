//! Numerical helpers shared by the primitives and the engines.

/// Dot product of two equally long slices.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Distance from `v` to the nearest integer.
#[inline]
pub fn fractionality(v: f64) -> f64 {
    (v - v.round()).abs()
}

/// True if every entry lies within `tol` of an integer.
pub fn is_integral(x: &[f64], tol: f64) -> bool {
    x.iter().all(|&v| fractionality(v) <= tol)
}

/// Snap values within `tol` of an integer onto it.
pub fn snap_integral(x: &[f64], tol: f64) -> Vec<f64> {
    x.iter()
        .map(|&v| if fractionality(v) <= tol { v.round() } else { v })
        .collect()
}

/// Euclidean norm.
pub fn norm2(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractionality() {
        assert!((fractionality(0.5) - 0.5).abs() < 1e-12);
        assert!((fractionality(2.3) - 0.3).abs() < 1e-12);
        assert!((fractionality(2.7) - 0.3).abs() < 1e-12);
        assert!(fractionality(4.0) < 1e-12);
        assert!((fractionality(-1.25) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_integrality() {
        assert!(is_integral(&[1.0, 2.000001, -3.0], 1e-5));
        assert!(!is_integral(&[1.0, 2.5], 1e-5));
        assert_eq!(snap_integral(&[0.9999999, 2.5], 1e-5), vec![1.0, 2.5]);
    }

    #[test]
    fn test_norm() {
        assert_eq!(norm2(&[3.0, 4.0]), 5.0);
        assert_eq!(dot(&[1.0, 2.0], &[3.0, 4.0]), 11.0);
    }
}
