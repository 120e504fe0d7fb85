//! Dot product, magnitude and angle helpers over 2D vectors.
//!
//! Each function validates its arguments through [`AsVector2D`] and then
//! does plain `f64` arithmetic. Nothing is stored between calls.

use crate::error::{Result, VectorError};
use crate::vector::AsVector2D;

/// `v1.x * v2.x + v1.y * v2.y`.
///
/// ```
/// use dot_engine::library::dot;
///
/// assert_eq!(dot((1, 2), (3, 4)).unwrap(), 11.0);
/// assert_eq!(dot([2.5, 3.0], [1.0, 2.0]).unwrap(), 8.5);
/// ```
pub fn dot<A: AsVector2D, B: AsVector2D>(vec1: A, vec2: B) -> Result<f64> {
    let vec1 = vec1.to_vector()?;
    let vec2 = vec2.to_vector()?;
    Ok(vec1.dot(vec2))
}

/// Euclidean length, `sqrt(x² + y²)`, computed without squaring so that
/// only the zero vector has length 0.
///
/// ```
/// use dot_engine::library::magnitude;
///
/// assert_eq!(magnitude((3, 4)).unwrap(), 5.0);
/// ```
pub fn magnitude<V: AsVector2D>(vec: V) -> Result<f64> {
    Ok(vec.to_vector()?.magnitude())
}

/// Angle between two vectors in radians, in `[0, π]`.
///
/// Fails with [`VectorError::ZeroVector`] when either vector has zero
/// length. The cosine is taken between the unit vectors, so no
/// intermediate overflows or underflows, and it is clamped to `[-1, 1]`
/// before `acos` to absorb rounding.
///
/// ```
/// use dot_engine::library::angle_between;
///
/// let angle = angle_between((1, 0), (0, 1)).unwrap();
/// assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn angle_between<A: AsVector2D, B: AsVector2D>(vec1: A, vec2: B) -> Result<f64> {
    let vec1 = vec1.to_vector()?;
    let vec2 = vec2.to_vector()?;
    let (Some(unit1), Some(unit2)) = (vec1.unit(), vec2.unit()) else {
        return Err(VectorError::ZeroVector);
    };
    let cos_angle = unit1.dot(unit2).clamp(-1.0, 1.0);
    Ok(cos_angle.acos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq, relative_eq};
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_dot() {
        let test_cases = vec![
            ([1.0, 2.0], [3.0, 4.0], 11.0),
            ([1.0, 0.0], [0.0, 1.0], 0.0),
            ([2.5, 3.0], [1.0, 2.0], 8.5),
            ([-1.0, 2.0], [3.0, -4.0], -11.0),
            ([0.0, 0.0], [5.0, 7.0], 0.0),
        ];
        for (v1, v2, expected) in test_cases {
            assert_eq!(dot(v1, v2).unwrap(), expected);
        }
    }

    #[test]
    fn test_dot_accepts_sequences() {
        assert_eq!(dot((1, 2), (3, 4)).unwrap(), 11.0);
        assert_eq!(dot(vec![1, 2], [3.0, 4.0]).unwrap(), 11.0);
        assert_eq!(dot(&[1.0, 2.0][..], (3u32, 4i64)).unwrap(), 11.0);
    }

    #[test]
    fn test_dot_dimension_error() {
        assert_eq!(
            dot([1, 2, 3], [1, 2]),
            Err(VectorError::Dimension {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(dot([1, 2], [1]), Err(VectorError::dimension(1)));
    }

    #[test]
    fn test_dot_conversion_error() {
        assert!(matches!(
            dot([1.0, f64::NAN], [1.0, 2.0]),
            Err(VectorError::TypeConversion { index: 1, .. })
        ));
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(magnitude((3, 4)).unwrap(), 5.0);
        assert_eq!(magnitude((0, 0)).unwrap(), 0.0);
        assert_eq!(magnitude([-3.0, -4.0]).unwrap(), 5.0);
        assert_relative_eq!(magnitude([1.0, 1.0]).unwrap(), 2f64.sqrt());
        assert_eq!(magnitude([1.0, 2.0, 3.0]), Err(VectorError::dimension(3)));
    }

    #[test]
    fn test_angle_between() {
        let test_cases = vec![
            ([1.0, 0.0], [0.0, 1.0], FRAC_PI_2),
            ([1.0, 0.0], [-1.0, 0.0], PI),
            ([2.0, 3.0], [4.0, 6.0], 0.0),
            ([1.0, 0.0], [1.0, 1.0], PI / 4.0),
        ];
        for (v1, v2, expected) in test_cases {
            assert_abs_diff_eq!(angle_between(v1, v2).unwrap(), expected, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_angle_between_zero_vector() {
        assert_eq!(angle_between((0, 0), (1, 0)), Err(VectorError::ZeroVector));
        assert_eq!(angle_between((1, 0), (0, 0)), Err(VectorError::ZeroVector));
        assert_eq!(angle_between((0, 0), (0, 0)), Err(VectorError::ZeroVector));
    }

    #[test]
    fn test_angle_between_validates_before_zero_check() {
        assert_eq!(
            angle_between([0, 0, 0], [1, 0]),
            Err(VectorError::dimension(3))
        );
    }

    #[test]
    fn test_angle_between_clamps_rounding() {
        // parallel vectors can round the cosine past 1.0
        let v = [0.1, 0.7];
        let scaled = [0.1 * 3.0, 0.7 * 3.0];
        let angle = angle_between(v, scaled).unwrap();
        assert!(!angle.is_nan());
        assert_abs_diff_eq!(angle, 0.0, epsilon = 1e-7);
    }

    #[test]
    fn test_angle_between_huge_vectors() {
        let huge = [1e200, 1e200];
        assert_abs_diff_eq!(angle_between(huge, huge).unwrap(), 0.0, epsilon = 1e-7);
        assert_abs_diff_eq!(
            angle_between([1e200, 0.0], [0.0, 1e200]).unwrap(),
            FRAC_PI_2,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            angle_between([f64::MAX, f64::MAX], [-f64::MAX, -f64::MAX]).unwrap(),
            PI,
            epsilon = 1e-7
        );
    }

    #[test]
    fn test_tiny_vectors_are_not_zero() {
        let tiny = [1e-200, 0.0];
        assert_eq!(magnitude(tiny).unwrap(), 1e-200);
        assert!(magnitude([0.0, 5e-324]).unwrap() > 0.0);
        assert_abs_diff_eq!(angle_between(tiny, [1.0, 0.0]).unwrap(), 0.0, epsilon = 1e-7);
        assert_abs_diff_eq!(
            angle_between([0.0, -1e-310], [1.0, 0.0]).unwrap(),
            FRAC_PI_2,
            epsilon = 1e-12
        );
    }

    fn component() -> impl Strategy<Value = f64> {
        -1.0e6f64..1.0e6
    }

    /// Any finite value, from subnormals up to `f64::MAX`, including zero.
    fn any_component() -> impl Strategy<Value = f64> {
        use proptest::num::f64::{NORMAL, SUBNORMAL, ZERO};
        NORMAL | SUBNORMAL | ZERO
    }

    proptest! {
        #[test]
        fn test_dot_formula(a in component(), b in component(), c in component(), d in component()) {
            prop_assert_eq!(dot((a, b), (c, d)).unwrap(), a * c + b * d);
        }

        #[test]
        fn test_dot_commutes(a in component(), b in component(), c in component(), d in component()) {
            prop_assert_eq!(dot([a, b], [c, d]).unwrap(), dot([c, d], [a, b]).unwrap());
        }

        #[test]
        fn test_magnitude_is_root_of_self_dot(a in component(), b in component()) {
            let m = magnitude([a, b]).unwrap();
            prop_assert!(m >= 0.0);
            let expected = dot([a, b], [a, b]).unwrap().sqrt();
            prop_assert!(relative_eq!(m, expected, max_relative = 1e-15));
        }

        #[test]
        fn test_magnitude_zero_only_for_zero_vector(a in any_component(), b in any_component()) {
            let m = magnitude([a, b]).unwrap();
            prop_assert!(m >= 0.0);
            prop_assert_eq!(m == 0.0, a == 0.0 && b == 0.0);
        }

        #[test]
        fn test_angle_with_self_is_zero(a in any_component(), b in any_component()) {
            prop_assume!(a != 0.0 || b != 0.0);
            let angle = angle_between([a, b], [a, b]).unwrap();
            prop_assert!(angle.abs() < 1e-6);
        }

        #[test]
        fn test_angle_in_range(
            a in any_component(),
            b in any_component(),
            c in any_component(),
            d in any_component()
        ) {
            prop_assume!((a != 0.0 || b != 0.0) && (c != 0.0 || d != 0.0));
            let angle = angle_between([a, b], [c, d]).unwrap();
            prop_assert!((0.0..=PI).contains(&angle));
        }
    }
}
