//! Vibration Engine
//!
//! The motor under the board. While it runs, every figure asks it for one
//! impulse per physics tick; each impulse is the figure's base heading rotated
//! by a random angle and scaled by a random magnitude factor. That noise is the
//! only source of the board's chaotic movement.
//!
//! Start/stop acknowledgements are queued as [`VibrationSignal`]s and drained by
//! whoever owns the play clock (the rules engine treats `Started` as "the play
//! is live").

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::VibrationConfig;
use super::types::{heading, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VibrationSignal {
    Started,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct VibrationEngine {
    is_active: bool,
    frequency: f32,
    amplitude: f32,
    angle_jitter_rad: f32,
    magnitude_range: (f32, f32),
    /// Seconds since the last start
    elapsed: f32,
    /// Oscillator phase in [0, 1)
    phase: f32,
    rng: ChaCha8Rng,
    signals: Vec<VibrationSignal>,
}

impl VibrationEngine {
    pub fn new(config: &VibrationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let min = config.magnitude_min.max(0.0);
        Self {
            is_active: false,
            frequency: config.frequency.max(0.0),
            amplitude: config.amplitude.max(0.0),
            angle_jitter_rad: config.angle_jitter_deg.max(0.0).to_radians(),
            magnitude_range: (min, config.magnitude_max.max(min)),
            elapsed: 0.0,
            phase: 0.0,
            rng,
            signals: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn set_frequency(&mut self, hz: f32) {
        self.frequency = hz.max(0.0);
    }

    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.amplitude = amplitude.max(0.0);
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Turn the motor on. Returns false (and signals nothing) if already running.
    pub fn start(&mut self) -> bool {
        if self.is_active {
            return false;
        }
        self.is_active = true;
        self.elapsed = 0.0;
        self.phase = 0.0;
        self.signals.push(VibrationSignal::Started);
        log::debug!("vibration started ({} Hz, amplitude {})", self.frequency, self.amplitude);
        true
    }

    /// Turn the motor off. Returns false if it was not running.
    pub fn stop(&mut self) -> bool {
        if !self.is_active {
            return false;
        }
        self.is_active = false;
        self.signals.push(VibrationSignal::Stopped);
        log::debug!("vibration stopped after {:.2}s", self.elapsed);
        true
    }

    /// Drain pending start/stop acknowledgements.
    pub fn take_signals(&mut self) -> Vec<VibrationSignal> {
        std::mem::take(&mut self.signals)
    }

    /// Advance the time and phase accumulators.
    pub fn advance(&mut self, dt: f32) {
        if !self.is_active || dt <= 0.0 {
            return;
        }
        self.elapsed += dt;
        self.phase = (self.phase + self.frequency * dt).fract();
    }

    /// One independent impulse sample for a figure.
    ///
    /// Zero while inactive. Otherwise the heading is `base_direction` rotated by
    /// a uniform angle in [-jitter, +jitter] and the length is
    /// `amplitude * base_speed * U(magnitude_min, magnitude_max)`.
    pub fn compute_impulse(&mut self, base_direction: f32, base_speed: f32) -> Vec2 {
        if !self.is_active {
            return Vec2::zeros();
        }

        let jitter = self.sample(-self.angle_jitter_rad, self.angle_jitter_rad);
        let factor = self.sample(self.magnitude_range.0, self.magnitude_range.1);

        heading(base_direction + jitter) * (self.amplitude * base_speed * factor)
    }

    fn sample(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo {
            self.rng.gen_range(lo..=hi)
        } else {
            lo
        }
    }
}
