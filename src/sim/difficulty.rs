//! Score-driven difficulty curves
//!
//! A `Ramp` maps the current score to a speed or spawn interval. Ramps are
//! linear in score and clamped, so they are monotone and always well-defined.

/// Linear, clamped mapping from score to a tuning value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    /// Value at score 0
    pub base: f32,
    /// Change per point of score (negative for shrinking intervals)
    pub per_point: f32,
    /// Clamp bound: a ceiling for growing ramps, a floor for shrinking ones
    pub limit: f32,
}

impl Ramp {
    /// Growing value capped at `ceiling` (speeds)
    pub const fn rising(base: f32, per_point: f32, ceiling: f32) -> Self {
        Self {
            base,
            per_point,
            limit: ceiling,
        }
    }

    /// Shrinking value floored at `floor` (spawn intervals)
    pub const fn falling(base: f32, per_point: f32, floor: f32) -> Self {
        Self {
            base,
            per_point: -per_point,
            limit: floor,
        }
    }

    /// Value at `score`
    pub fn at(&self, score: u64) -> f32 {
        let raw = self.base + self.per_point * score as f32;
        if self.per_point >= 0.0 {
            raw.min(self.limit)
        } else {
            raw.max(self.limit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rising_ramp_clamps() {
        let ramp = Ramp::rising(5.5, 0.2, 12.0);
        assert_eq!(ramp.at(0), 5.5);
        assert!((ramp.at(10) - 7.5).abs() < 1e-5);
        assert_eq!(ramp.at(1000), 12.0);
    }

    #[test]
    fn test_falling_ramp_floors() {
        let ramp = Ramp::falling(85.0, 1.0 / 150.0, 25.0);
        assert_eq!(ramp.at(0), 85.0);
        assert!((ramp.at(1500) - 75.0).abs() < 1e-3);
        assert_eq!(ramp.at(1_000_000), 25.0);
    }

    #[test]
    fn test_ramps_are_monotone() {
        let up = Ramp::rising(3.5, 0.1, 9.0);
        let down = Ramp::falling(60.0, 0.01, 20.0);
        let mut last_up = up.at(0);
        let mut last_down = down.at(0);
        for score in (0..20_000).step_by(7) {
            assert!(up.at(score) >= last_up);
            assert!(down.at(score) <= last_down);
            last_up = up.at(score);
            last_down = down.at(score);
        }
    }
}
