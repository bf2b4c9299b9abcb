//! Haptic output seam.
//!
//! Haptics are a platform capability, not something this crate can drive
//! portably, so the engine talks to a [`HapticDriver`] supplied by the host.
//! Pulses are best-effort: a failed or absent driver never blocks or fails an
//! activation.

use thiserror::Error;

/// The haptic capability is absent or was denied on this host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("haptic output unavailable")]
pub struct HapticUnavailableError;

/// Platform haptic output.
pub trait HapticDriver {
    /// Emits one pulse at the given intensity (0.0 to 1.0). Must not block.
    fn pulse(&mut self, intensity: f32) -> Result<(), HapticUnavailableError>;
}

/// Driver for hosts without haptic hardware; every pulse reports unavailable.
#[derive(Debug, Default)]
pub struct NoHaptics;

impl HapticDriver for NoHaptics {
    fn pulse(&mut self, _intensity: f32) -> Result<(), HapticUnavailableError> {
        Err(HapticUnavailableError)
    }
}
