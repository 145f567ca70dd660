//! Polynomial root finding used by the analytic intersection tests.

/// Real roots of a quadratic, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    None,
    One(f64),
    Two(f64, f64),
}

impl QuadraticRoots {
    /// Smallest root that is not negative, if any.
    pub fn smallest_non_negative(self) -> Option<f64> {
        match self {
            QuadraticRoots::None => None,
            QuadraticRoots::One(r) => (r >= 0.0).then_some(r),
            QuadraticRoots::Two(lo, hi) => {
                if lo >= 0.0 {
                    Some(lo)
                } else if hi >= 0.0 {
                    Some(hi)
                } else {
                    None
                }
            }
        }
    }
}

/// Solve `a*x^2 + b*x + c = 0` for real `x`.
///
/// Uses the cancellation-free form of the quadratic formula. A zero leading
/// coefficient degrades to the linear case.
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> QuadraticRoots {
    if a == 0.0 {
        if b == 0.0 {
            return QuadraticRoots::None;
        }
        return QuadraticRoots::One(-c / b);
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return QuadraticRoots::None;
    }
    if discriminant == 0.0 {
        return QuadraticRoots::One(-b / (2.0 * a));
    }

    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    let (r0, r1) = if q == 0.0 {
        // b == 0 and c == 0: both roots at the origin
        (0.0, 0.0)
    } else {
        (q / a, c / q)
    };

    if r0 <= r1 {
        QuadraticRoots::Two(r0, r1)
    } else {
        QuadraticRoots::Two(r1, r0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_roots_sorted() {
        // (x - 1)(x - 3)
        match quadratic_roots(1.0, -4.0, 3.0) {
            QuadraticRoots::Two(lo, hi) => {
                assert!((lo - 1.0).abs() < 1e-12);
                assert!((hi - 3.0).abs() < 1e-12);
            }
            other => panic!("expected two roots, got {:?}", other),
        }
    }

    #[test]
    fn test_no_real_roots() {
        assert_eq!(quadratic_roots(1.0, 0.0, 1.0), QuadraticRoots::None);
    }

    #[test]
    fn test_double_root() {
        assert_eq!(quadratic_roots(1.0, -2.0, 1.0), QuadraticRoots::One(1.0));
    }

    #[test]
    fn test_linear_fallback() {
        assert_eq!(quadratic_roots(0.0, 2.0, -4.0), QuadraticRoots::One(2.0));
        assert_eq!(quadratic_roots(0.0, 0.0, 1.0), QuadraticRoots::None);
    }

    #[test]
    fn test_smallest_non_negative() {
        assert_eq!(QuadraticRoots::Two(-1.0, 2.0).smallest_non_negative(), Some(2.0));
        assert_eq!(QuadraticRoots::Two(0.5, 2.0).smallest_non_negative(), Some(0.5));
        assert_eq!(QuadraticRoots::Two(-3.0, -2.0).smallest_non_negative(), None);
        assert_eq!(QuadraticRoots::One(-1.0).smallest_non_negative(), None);
        assert_eq!(QuadraticRoots::None.smallest_non_negative(), None);
    }
}
