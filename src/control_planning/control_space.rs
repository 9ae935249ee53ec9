//! Bounded 2D control space (forward speed, yaw rate)

use rand::Rng;

use crate::common::ControlInput;
use crate::control_planning::state_space::RealVectorBounds;

#[derive(Debug, Clone)]
pub struct ControlSpace {
    bounds: RealVectorBounds,
}

impl ControlSpace {
    pub fn new(bounds: RealVectorBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> &RealVectorBounds {
        &self.bounds
    }

    pub fn set_bounds(&mut self, bounds: RealVectorBounds) {
        self.bounds = bounds;
    }

    pub fn satisfies_bounds(&self, control: &ControlInput) -> bool {
        self.bounds.contains(&control.to_vector())
    }

    /// Uniform sample over the control box
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> ControlInput {
        ControlInput::from(self.bounds.sample(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_control_samples_within_bounds() {
        let space = ControlSpace::new(RealVectorBounds::uniform(-0.3, 0.3));
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let c = space.sample_uniform(&mut rng);
            assert!(space.satisfies_bounds(&c));
            assert!(c.v.abs() <= 0.3 && c.omega.abs() <= 0.3);
        }
    }

    #[test]
    fn test_out_of_bounds_control() {
        let space = ControlSpace::new(RealVectorBounds::uniform(-0.3, 0.3));
        assert!(!space.satisfies_bounds(&ControlInput::new(0.31, 0.0)));
        assert!(space.satisfies_bounds(&ControlInput::new(0.3, -0.3)));
    }
}
