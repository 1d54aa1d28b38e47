//! Quadratic ease-in/out step timing
//!
//! The profile stretches the inter-step delay at both ends of a move so the
//! motors ramp into and out of full speed instead of jumping, which would
//! skip steps under the arm's inertia. The curve is the classic quadratic
//! ease pair evaluated on the delay itself: it starts at the rest delay,
//! meets the cruise delay at the end of the window, and mirrors for the
//! deceleration side.

use libm::roundf;

use crate::config::MotionConfig;

/// Per-move, per-axis step timing
///
/// Built fresh for each move from that axis's own total step count, so a
/// short axis eases over its own length even when paired with a longer one.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionProfile {
    total: u32,
    window: u32,
    cruise_us: f32,
    start_us: f32,
}

impl MotionProfile {
    /// Profile for a move of `total_steps` steps
    pub fn new(total_steps: u32, config: &MotionConfig) -> Self {
        debug_assert!(config.start_delay_us >= config.cruise_delay_us);
        Self {
            total: total_steps,
            window: config.ease_window as u32,
            cruise_us: config.cruise_delay_us as f32,
            start_us: config.start_delay_us as f32,
        }
    }

    /// Delay to sleep after step `step` (1-based), in µs
    ///
    /// Ease-in applies through the first window while still in the first
    /// half of the move; ease-out applies through the last window. On short
    /// moves the windows overlap and ease-in wins, so the move ramps only
    /// to its midpoint speed before ramping back out.
    pub fn delay_us(&self, step: u32) -> u32 {
        if self.window == 0 || self.total == 0 {
            return self.cruise_us as u32;
        }

        if step <= self.window && 2 * step < self.total {
            self.curve(step)
        } else if step + self.window >= self.total {
            // Mirror of the ease-in curve, counted from the end
            self.curve(self.total - step)
        } else {
            self.cruise_us as u32
        }
    }

    /// Quadratic ease evaluated `pos` steps into a window
    fn curve(&self, pos: u32) -> u32 {
        let b = self.start_us;
        let c = self.cruise_us - self.start_us;
        let half = self.window as f32 / 2.0;

        let t = pos as f32 / half;
        let delay = if t < 1.0 {
            b + c / 2.0 * t * t
        } else {
            let u = t - 1.0;
            -c / 2.0 * (u * (u - 2.0) - 1.0) + b
        };

        roundf(delay) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MotionConfig {
        MotionConfig {
            cruise_delay_us: 1_000,
            start_delay_us: 4_000,
            ease_window: 160,
        }
    }

    #[test]
    fn test_endpoints() {
        let profile = MotionProfile::new(1_000, &config());

        // First step is near the rest delay, window end is at cruise
        assert!(profile.delay_us(1) > 3_900);
        assert_eq!(profile.delay_us(160), 1_000);

        // Cruise in the middle
        assert_eq!(profile.delay_us(500), 1_000);

        // Final step back at the rest delay
        assert_eq!(profile.delay_us(1_000), 4_000);
    }

    #[test]
    fn test_accelerates_monotonically() {
        let profile = MotionProfile::new(1_000, &config());

        for i in 2..=160 {
            assert!(
                profile.delay_us(i) <= profile.delay_us(i - 1),
                "delay increased at step {}",
                i
            );
        }
    }

    #[test]
    fn test_decelerates_monotonically() {
        let profile = MotionProfile::new(1_000, &config());

        for i in 841..=1_000 {
            assert!(
                profile.delay_us(i) >= profile.delay_us(i - 1),
                "delay decreased at step {}",
                i
            );
        }
    }

    #[test]
    fn test_symmetric() {
        let total = 1_000;
        let profile = MotionProfile::new(total, &config());

        for i in 1..=160 {
            assert_eq!(profile.delay_us(i), profile.delay_us(total - i));
        }
    }

    #[test]
    fn test_short_move_ease_in_wins() {
        // Windows overlap on a move shorter than twice the ease window:
        // the first half eases in, everything after falls through to the
        // mirrored ease-out, so the move never reaches cruise speed
        let profile = MotionProfile::new(100, &config());

        for i in 1..=100 {
            assert!(profile.delay_us(i) > 1_000);
        }

        // Still slow at both ends and fastest near the midpoint
        assert!(profile.delay_us(1) > profile.delay_us(49));
        assert!(profile.delay_us(100) > profile.delay_us(51));
    }

    #[test]
    fn test_single_step_move() {
        let profile = MotionProfile::new(1, &config());
        // Ease-in requires 2·step < total, which a one-step move never
        // satisfies; the mirrored ease-out catches it at the rest delay
        assert_eq!(profile.delay_us(1), 4_000);
    }

    #[test]
    fn test_degenerate_window() {
        let config = MotionConfig {
            cruise_delay_us: 1_000,
            start_delay_us: 4_000,
            ease_window: 0,
        };
        let profile = MotionProfile::new(100, &config);
        assert_eq!(profile.delay_us(1), 1_000);
        assert_eq!(profile.delay_us(100), 1_000);
    }
}
