//! Message definitions for communication between the coordination thread and the
//! real-time audio thread.
//!
//! This module defines the types that serve as the wire format for messages passed
//! through the ring buffers between the coordination side and the audio callback.

use std::sync::Arc;

/// Pre-decoded, immutable interleaved audio data shared between threads.
///
/// Cloning is cheap: the sample data itself lives behind an [`Arc`] and is shared
/// by every voice playing it.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    /// Number of interleaved channels.
    pub channels: usize,

    /// Interleaved f32 sample data.
    pub samples: Arc<[f32]>,
}

impl SampleBuffer {
    /// Number of frames (samples per channel) in the buffer.
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels
    }
}

/// Identifier of one in-flight playback voice.
///
/// Ids are allocated monotonically by the voice manager and never reused, so a
/// recycled mixer slot can never be mistaken for a voice that already finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoiceId(pub(crate) u64);

/// Message sent from the coordination side into the audio callback.
#[derive(Debug, Clone)]
pub enum ControlMessage {
    /// Begin playback of a new, independent voice.
    StartVoice {
        /// Identifier the voice manager tracks this voice under.
        voice: VoiceId,
        /// Shared handle to the sample data to play.
        sample: SampleBuffer,
    },
}

/// Lifecycle event emitted from the audio callback back to the coordination side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// The voice was placed in a mixer slot and has begun rendering.
    VoiceStarted { voice: VoiceId },

    /// The voice rendered its final frame; its slot has been cleared.
    VoiceFinished { voice: VoiceId },

    /// The output device had no free mixing slot; the voice never played.
    VoiceDropped { voice: VoiceId },
}
