//! pulsepad — a low-latency pad activation engine.
//!
//! A fixed grid of pads, each bound to one short sample. Every activation
//! fans out to a haptic pulse, a fresh playback voice, and a visual feedback
//! timeline; activations overlap freely (full polyphony) and never cut each
//! other off.
//!
//! The crate is an embeddable engine: the host supplies the pad kit and the
//! rendering surface, drives the coordination loop, and reads each pad's
//! [`feedback::FeedbackFrame`] every frame. A typical host loop:
//!
//! 1. Build a [`registry::SampleRegistry`] (decodes every sample once).
//! 2. Open the audio stream ([`audio_engine::open_output_stream`]) and wrap it
//!    in a [`audio_engine::VoiceManager`] and [`coordinator::ActivationCoordinator`].
//! 3. Wait out the [`boot::BootGate`], then per frame: `activate` on taps,
//!    `pump` voice events, `advance` the feedback timelines, draw.

pub mod audio_engine;
pub mod boot;
pub mod coordinator;
pub mod feedback;
pub mod haptics;
pub mod messages;
pub mod registry;

pub use audio_engine::{
    AudioBackend, PlaybackError, SampleLoadError, VoiceManager, VoiceState, open_output_stream,
};
pub use boot::BootGate;
pub use coordinator::ActivationCoordinator;
pub use feedback::{FeedbackFrame, FeedbackSequencer};
pub use haptics::{HapticDriver, HapticUnavailableError, NoHaptics};
pub use messages::{SampleBuffer, VoiceId};
pub use registry::{PadDefinition, PadId, Rgba, SampleRegistry, UnknownPadError, default_kit};
