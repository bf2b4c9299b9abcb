//! Activation coordinator.
//!
//! Entry point for one physical tap: fans out to the haptic pulse, a new
//! playback voice, and the pad's feedback timeline. All three effects are
//! dispatched without waiting on each other and [`ActivationCoordinator::activate`]
//! returns as soon as they are issued — their completions are independent and
//! may interleave in any order.

use std::time::Duration;

use crate::audio_engine::{AudioBackend, VoiceManager};
use crate::feedback::{FeedbackFrame, FeedbackSequencer};
use crate::haptics::HapticDriver;
use crate::messages::VoiceId;
use crate::registry::{PadDefinition, PadId};

/// Intensity of the activation pulse (a single firm tap).
pub const PULSE_INTENSITY: f32 = 1.0;

/// Fans one tap out to haptic, audio, and visual feedback.
pub struct ActivationCoordinator<B: AudioBackend, H: HapticDriver> {
    haptics: H,
    voices: VoiceManager<B>,
    feedback: FeedbackSequencer,
}

impl<B: AudioBackend, H: HapticDriver> ActivationCoordinator<B, H> {
    pub fn new(haptics: H, voices: VoiceManager<B>, feedback: FeedbackSequencer) -> Self {
        Self {
            haptics,
            voices,
            feedback,
        }
    }

    /// Handles one discrete tap on a pad.
    ///
    /// Issues, in order: the haptic pulse (failure swallowed), the playback
    /// trigger, and the feedback timeline start. Nothing is awaited, no effect
    /// can abort another, and there is no debounce — rapid-fire taps each get
    /// their own independent voice and a restarted timeline.
    pub fn activate(&mut self, pad: &PadDefinition) -> VoiceId {
        if let Err(err) = self.haptics.pulse(PULSE_INTENSITY) {
            log::debug!("haptic pulse skipped for pad {}: {err}", pad.id);
        }

        let voice = self.voices.trigger(pad.sample.clone());
        self.feedback.run(&pad.id);
        voice
    }

    /// Applies pending voice lifecycle events. Call once per coordination tick.
    pub fn pump(&mut self) {
        self.voices.pump();
    }

    /// Advances every pad's feedback timeline by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.feedback.advance(dt);
    }

    /// The current visual state of a pad, for the rendering surface.
    pub fn frame(&self, pad: &PadId) -> FeedbackFrame {
        self.feedback.frame(pad)
    }

    /// The voice bookkeeping (states, counters, error sink).
    pub fn voices(&self) -> &VoiceManager<B> {
        &self.voices
    }

    /// Mutable access to the voice bookkeeping, e.g. to drain the error sink.
    pub fn voices_mut(&mut self) -> &mut VoiceManager<B> {
        &mut self.voices
    }
}
