//! SE(2) state space with bounded position
//!
//! The position part is bounded by a box, the orientation part is an
//! unbounded angle. Distances combine both parts with a fixed weight on
//! the angular term.

use std::f64::consts::PI;

use nalgebra::Vector2;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::common::{PlanningError, PlanningResult, Pose2D};

/// Weight of the angular component in the SE(2) distance
pub const YAW_DISTANCE_WEIGHT: f64 = 0.5;

/// Axis-aligned box bounds for a 2-dimensional real vector
#[derive(Debug, Clone, PartialEq)]
pub struct RealVectorBounds {
    pub low: Vector2<f64>,
    pub high: Vector2<f64>,
}

impl RealVectorBounds {
    pub fn new(low: Vector2<f64>, high: Vector2<f64>) -> Self {
        Self { low, high }
    }

    /// Same `[low, high]` interval on every axis
    pub fn uniform(low: f64, high: f64) -> Self {
        Self::new(Vector2::repeat(low), Vector2::repeat(high))
    }

    /// Verify that bounds are finite and `low <= high` on each axis
    pub fn check(&self) -> PlanningResult<()> {
        for i in 0..2 {
            let (lo, hi) = (self.low[i], self.high[i]);
            if !lo.is_finite() || !hi.is_finite() {
                return Err(PlanningError::InvalidParameter(format!(
                    "bounds on axis {} are not finite: [{}, {}]", i, lo, hi
                )));
            }
            if lo > hi {
                return Err(PlanningError::InvalidParameter(format!(
                    "lower bound {} exceeds upper bound {} on axis {}", lo, hi, i
                )));
            }
        }
        Ok(())
    }

    /// Inclusive containment test
    pub fn contains(&self, v: &Vector2<f64>) -> bool {
        (0..2).all(|i| v[i] >= self.low[i] && v[i] <= self.high[i])
    }

    pub fn difference(&self) -> Vector2<f64> {
        self.high - self.low
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2<f64> {
        Vector2::new(
            rng.gen_range(self.low[0]..=self.high[0]),
            rng.gen_range(self.low[1]..=self.high[1]),
        )
    }
}

/// Shortest angular distance between two yaw angles, in [0, pi]
pub fn yaw_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(2.0 * PI);
    if d > PI {
        2.0 * PI - d
    } else {
        d
    }
}

/// SE(2) state space: bounded R^2 position plus SO(2) heading
#[derive(Debug, Clone)]
pub struct SE2StateSpace {
    bounds: RealVectorBounds,
}

impl SE2StateSpace {
    pub fn new(bounds: RealVectorBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> &RealVectorBounds {
        &self.bounds
    }

    pub fn set_bounds(&mut self, bounds: RealVectorBounds) {
        self.bounds = bounds;
    }

    /// True when the position lies inside the bounds; yaw is not constrained
    pub fn satisfies_bounds(&self, pose: &Pose2D) -> bool {
        self.bounds.contains(&pose.position().to_vector())
    }

    /// Weighted SE(2) distance: euclidean position term plus wrapped yaw term
    pub fn distance(&self, a: &Pose2D, b: &Pose2D) -> f64 {
        a.position().distance(&b.position()) + YAW_DISTANCE_WEIGHT * yaw_distance(a.yaw, b.yaw)
    }

    /// Largest possible distance between two poses in this space
    pub fn maximum_extent(&self) -> f64 {
        self.bounds.difference().norm() + YAW_DISTANCE_WEIGHT * PI
    }

    /// Uniform sample over the position box with yaw in [-pi, pi)
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Pose2D {
        let p = self.bounds.sample(rng);
        Pose2D::new(p[0], p[1], rng.gen_range(-PI..PI))
    }

    /// Normal sample around `mean`, clamped to the position bounds
    ///
    /// The yaw spread is scaled so that both components contribute
    /// comparably to the SE(2) distance.
    pub fn sample_gaussian<R: Rng + ?Sized>(&self, rng: &mut R, mean: &Pose2D, std_dev: f64) -> Pose2D {
        let (nx, ny, nyaw): (f64, f64, f64) =
            (rng.sample(StandardNormal), rng.sample(StandardNormal), rng.sample(StandardNormal));
        let low = &self.bounds.low;
        let high = &self.bounds.high;
        Pose2D::new(
            (mean.x + std_dev * nx).max(low[0]).min(high[0]),
            (mean.y + std_dev * ny).max(low[1]).min(high[1]),
            mean.yaw + std_dev / YAW_DISTANCE_WEIGHT * nyaw,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_space() -> SE2StateSpace {
        SE2StateSpace::new(RealVectorBounds::uniform(-1.0, 1.0))
    }

    #[test]
    fn test_bounds_check() {
        assert!(RealVectorBounds::uniform(-1.0, 1.0).check().is_ok());
        assert!(RealVectorBounds::uniform(1.0, -1.0).check().is_err());
        assert!(RealVectorBounds::uniform(f64::NEG_INFINITY, 1.0).check().is_err());
    }

    #[test]
    fn test_satisfies_bounds_is_inclusive_and_ignores_yaw() {
        let space = unit_space();
        assert!(space.satisfies_bounds(&Pose2D::new(1.0, 1.0, 42.0)));
        assert!(space.satisfies_bounds(&Pose2D::new(-1.0, -1.0, -42.0)));
        assert!(!space.satisfies_bounds(&Pose2D::new(1.0001, 0.0, 0.0)));
        assert!(!space.satisfies_bounds(&Pose2D::new(0.0, -1.0001, 0.0)));
    }

    #[test]
    fn test_yaw_distance_wraps() {
        assert!((yaw_distance(PI - 0.1, -PI + 0.1) - 0.2).abs() < 1e-12);
        assert!((yaw_distance(0.0, 4.0 * PI) - 0.0).abs() < 1e-12);
        assert!((yaw_distance(0.0, PI) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_distance_symmetric() {
        let space = unit_space();
        let a = Pose2D::new(-0.5, 0.2, 3.0);
        let b = Pose2D::new(0.4, -0.1, -3.0);
        assert!((space.distance(&a, &b) - space.distance(&b, &a)).abs() < 1e-12);
        assert_eq!(space.distance(&a, &a), 0.0);
    }

    #[test]
    fn test_distance_weights_yaw() {
        let space = unit_space();
        let a = Pose2D::origin();
        let b = Pose2D::new(0.3, 0.4, 1.0);
        assert!((space.distance(&a, &b) - (0.5 + 0.5 * 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_samples_within_bounds() {
        let space = unit_space();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let s = space.sample_uniform(&mut rng);
            assert!(space.satisfies_bounds(&s));
            assert!(s.yaw >= -PI && s.yaw < PI);
        }
    }

    #[test]
    fn test_gaussian_samples_cluster_and_stay_in_bounds() {
        let space = unit_space();
        let mut rng = StdRng::seed_from_u64(21);
        let mean = Pose2D::new(0.95, 0.5, 0.0);
        let n = 2000;
        let mut sum_y = 0.0;
        for _ in 0..n {
            let s = space.sample_gaussian(&mut rng, &mean, 0.1);
            assert!(space.satisfies_bounds(&s));
            sum_y += s.y;
        }
        assert!((sum_y / n as f64 - 0.5).abs() < 0.02);
    }
}
