//! Fixed physics timestep
//!
//! Every entity update (vibration impulses, ball flight, contact resolution)
//! runs once per tick at this rate, synchronously.

/// Physics tick rate (Hz)
pub const PHYSICS_HZ: u32 = 60;

/// Physics timestep (s)
pub const PHYSICS_DT: f32 = 1.0 / PHYSICS_HZ as f32;

/// Upper bound for a single step; larger frames are clamped to it.
pub const MAX_STEP_DT: f32 = 0.1;

/// Number of fixed ticks needed to cover `seconds` of simulated time.
pub fn ticks_for(seconds: f32) -> u32 {
    if seconds <= 0.0 {
        return 0;
    }
    (seconds / PHYSICS_DT).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestep_consistency() {
        assert_eq!(PHYSICS_HZ, 60);
        assert!((PHYSICS_DT * PHYSICS_HZ as f32 - 1.0).abs() < 1e-6);
        assert!(PHYSICS_DT < MAX_STEP_DT);
    }

    #[test]
    fn test_ticks_per_flight_cap() {
        // 2.0s flight cap = 120 ticks
        assert_eq!(ticks_for(2.0), 120);
        assert_eq!(ticks_for(0.0), 0);
        assert_eq!(ticks_for(-1.0), 0);
    }
}
