//! 2D vector algebra and angle arithmetic for canvas coordinates.
//!
//! Canvas coordinates follow the screen convention: `x` grows to the
//! right and `y` grows downwards.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A point or displacement on the editor canvas.
///
/// Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Vector2) -> Vector2 {
        Vector2::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn scale(self, s: f64) -> Vector2 {
        Vector2::new(self.x * s, self.y * s)
    }

    /// Mirror across the vertical axis (negates `x`).
    pub fn flip_x(self) -> Vector2 {
        Vector2::new(-self.x, self.y)
    }

    /// Mirror across the horizontal axis (negates `y`).
    pub fn flip_y(self) -> Vector2 {
        Vector2::new(self.x, -self.y)
    }

    /// Rotate by +90° in screen space.
    pub fn perpendicular(self) -> Vector2 {
        Vector2::new(-self.y, self.x)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector.
    pub fn try_normalize(self) -> Option<Vector2> {
        let len = self.length();
        if len <= f64::EPSILON || !len.is_finite() {
            None
        } else {
            Some(self.scale(1.0 / len))
        }
    }

    /// Unit vector in the same direction; the zero vector maps to itself.
    pub fn normalize(self) -> Vector2 {
        self.try_normalize().unwrap_or(Vector2::ZERO)
    }

    pub fn distance(self, other: Vector2) -> f64 {
        (other - self).length()
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Vector2::new(x, y)
    }
}

impl From<Vector2> for [f64; 2] {
    fn from(v: Vector2) -> Self {
        [v.x, v.y]
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;
    fn mul(self, s: f64) -> Vector2 {
        self.scale(s)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

// ─── Angles ──────────────────────────────────────────────────────────────

/// Angle helpers. All angles are radians unless a name says otherwise.
pub mod angle {
    use super::*;

    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees * (PI / 180.0)
    }

    pub fn rad_to_deg(radians: f64) -> f64 {
        radians * (180.0 / PI)
    }

    /// Wrap an angle into `[0, 2π)`.
    pub fn normalize(angle: f64) -> f64 {
        let wrapped = angle.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if wrapped >= TAU { 0.0 } else { wrapped }
    }

    /// Signed minimal difference `a − b`, in `(−π, π]`.
    pub fn diff(a: f64, b: f64) -> f64 {
        let d = normalize(a - b);
        if d > PI { d - TAU } else { d }
    }

    /// `count` angles evenly spaced around the full circle, starting at 0.
    pub fn distribute(count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }
        let slice = TAU / count as f64;
        (0..count).map(|i| i as f64 * slice).collect()
    }

    /// Like [`distribute`], with each angle pushed forward by up to
    /// `jitter` radians. `sample` yields values in `[0, 1)`; callers pick
    /// the source, e.g. `|| rng.gen::<f64>()`.
    pub fn distribute_jittered(
        count: usize,
        jitter: f64,
        mut sample: impl FnMut() -> f64,
    ) -> Vec<f64> {
        distribute(count)
            .into_iter()
            .map(|a| normalize(a + jitter * sample()))
            .collect()
    }

    /// Unit vector pointing along `angle`.
    pub fn unit_vector(angle: f64) -> Vector2 {
        Vector2::new(angle.cos(), angle.sin())
    }

    /// Direction from `from` towards `to`, as given by `atan2`.
    pub fn between(from: Vector2, to: Vector2) -> f64 {
        let d = to - from;
        d.y.atan2(d.x)
    }
}

#[cfg(test)]
mod tests {
    use super::angle;
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn vector_arithmetic() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(4.0, 6.0);
        assert_eq!(a + b, Vector2::new(5.0, 8.0));
        assert_eq!(b - a, Vector2::new(3.0, 4.0));
        assert_eq!(a.midpoint(b), Vector2::new(2.5, 4.0));
        assert_eq!(-a, Vector2::new(-1.0, -2.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(a.flip_x(), Vector2::new(-1.0, 2.0));
        assert_eq!(a.flip_y(), Vector2::new(1.0, -2.0));
        assert!(close((b - a).length(), 5.0));
    }

    #[test]
    fn normalize_zero_vector_falls_back_to_zero() {
        assert_eq!(Vector2::ZERO.try_normalize(), None);
        assert_eq!(Vector2::ZERO.normalize(), Vector2::ZERO);
        let unit = Vector2::new(3.0, 4.0).normalize();
        assert!(close(unit.length(), 1.0));
    }

    #[test]
    fn serializes_as_pair() {
        let json = serde_json::to_string(&Vector2::new(1.5, -2.0)).unwrap();
        assert_eq!(json, "[1.5,-2.0]");
        let back: Vector2 = serde_json::from_str("[3,4]").unwrap();
        assert_eq!(back, Vector2::new(3.0, 4.0));
    }

    #[test]
    fn angle_normalization() {
        assert!(close(angle::normalize(-PI / 2.0), 1.5 * PI));
        assert!(close(angle::normalize(TAU + 0.25), 0.25));
        assert!(angle::normalize(-1e-18) < TAU);
        assert!(close(angle::deg_to_rad(180.0), PI));
        assert!(close(angle::rad_to_deg(PI / 2.0), 90.0));
    }

    #[test]
    fn angle_diff_is_minimal_and_signed() {
        let a = angle::deg_to_rad(10.0);
        let b = angle::deg_to_rad(350.0);
        assert!(close(angle::diff(a, b), angle::deg_to_rad(20.0)));
        assert!(close(angle::diff(b, a), angle::deg_to_rad(-20.0)));
        assert!(close(angle::diff(PI, 0.0), PI));
    }

    #[test]
    fn distribute_handles_degenerate_counts() {
        assert!(angle::distribute(0).is_empty());
        assert_eq!(angle::distribute(1), vec![0.0]);
        let four = angle::distribute(4);
        assert_eq!(four.len(), 4);
        assert!(close(four[1], PI / 2.0));
        assert!(close(four[3], 1.5 * PI));
    }

    #[test]
    fn jitter_stays_within_bound() {
        let jitter = angle::deg_to_rad(5.0);
        let angles = angle::distribute_jittered(3, jitter, || 0.5);
        assert!(close(angles[0], jitter * 0.5));
        assert!(close(angles[1], TAU / 3.0 + jitter * 0.5));
    }

    #[test]
    fn random_jitter_never_reaches_next_slot() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let jitter = angle::deg_to_rad(10.0);
        let mut rng = StdRng::seed_from_u64(7);
        let angles = angle::distribute_jittered(6, jitter, || rng.r#gen::<f64>());
        for (i, a) in angles.iter().enumerate() {
            let base = i as f64 * TAU / 6.0;
            assert!(*a >= base && *a < base + jitter, "slot {i}: {a}");
        }
    }

    #[test]
    fn unit_vector_and_between() {
        let v = angle::unit_vector(PI / 2.0);
        assert!(close(v.x, 0.0) && close(v.y, 1.0));
        let a = angle::between(Vector2::new(0.0, 0.0), Vector2::new(0.0, 10.0));
        assert!(close(a, PI / 2.0));
    }
}
