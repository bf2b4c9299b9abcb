//! Audio Engine Module
//!
//! This module provides real-time, polyphonic sample playback. It is organized
//! into sub-modules, each with a specific responsibility:
//!
//! - [`audio_stream`]: CPAL audio stream management and real-time callback
//! - [`constants`]: Configuration constants and limits
//! - [`errors`]: Audio-specific error types
//! - [`voice`]: Real-time voice rendering
//! - [`mixer`]: Real-time mixing engine
//! - [`sample_loader`]: Audio file loading and decoding
//!
//! The [`VoiceManager`] in this module is the coordination-side orchestrator: it
//! tracks the lifecycle of every in-flight voice across the [`AudioBackend`]
//! seam. Triggering is fire-and-forget — a trigger enqueues the voice and
//! returns; the backend reports lifecycle transitions asynchronously and the
//! manager applies them on [`VoiceManager::pump`].

use std::collections::HashMap;

use crate::messages::{EngineEvent, SampleBuffer, VoiceId};

pub mod audio_stream;
pub mod constants;
pub mod errors;
pub mod mixer;
pub mod sample_loader;
pub mod voice;

pub use audio_stream::{AudioStreamHandle, open_output_stream};
pub use errors::{PlaybackError, SampleLoadError};

/// Lifecycle state of one playback voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    /// Enqueued; not yet picked up by the audio callback.
    Loading,

    /// Placed in a mixer slot and rendering.
    Playing,

    /// Rendered its final frame; resources released.
    Finished,

    /// Never played (load or capacity failure); resources released.
    Failed,
}

/// The seam over the platform playback service.
///
/// The production implementation is [`AudioStreamHandle`] (cpal stream plus
/// ring buffers); tests substitute a fake. `start` must not block, and events
/// may arrive in any order relative to other voices.
pub trait AudioBackend {
    /// Begins playback of a new voice. Must return without waiting for
    /// playback to start, let alone finish.
    fn start(&mut self, voice: VoiceId, sample: SampleBuffer) -> Result<(), PlaybackError>;

    /// Polls one pending lifecycle event, if any.
    fn poll_event(&mut self) -> Option<EngineEvent>;
}

/// Coordination-side bookkeeping for all in-flight voices.
///
/// Every trigger produces an independent voice with its own bookkeeping entry
/// and its own handle to the sample data; no voice ever blocks or is blocked by
/// another. An entry is released exactly once, when its voice reaches
/// [`VoiceState::Finished`] or [`VoiceState::Failed`]; duplicate completion
/// events for an already-released voice are ignored.
pub struct VoiceManager<B: AudioBackend> {
    backend: B,
    voices: HashMap<VoiceId, VoiceState>,
    next_voice: u64,
    errors: Vec<PlaybackError>,
    finished: u64,
    failed: u64,
}

impl<B: AudioBackend> VoiceManager<B> {
    /// Creates a manager over the given backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            voices: HashMap::new(),
            next_voice: 0,
            errors: Vec::new(),
            finished: 0,
            failed: 0,
        }
    }

    /// Starts a new, independent voice for the sample. Fire-and-forget.
    ///
    /// Never fails from the caller's perspective: a start failure transitions
    /// the voice to [`VoiceState::Failed`], reports the error to the sink and
    /// logs it. There is no debounce and no cap — every call produces its own
    /// voice.
    pub fn trigger(&mut self, sample: SampleBuffer) -> VoiceId {
        let id = VoiceId(self.next_voice);
        self.next_voice += 1;

        self.voices.insert(id, VoiceState::Loading);

        if let Err(err) = self.backend.start(id, sample) {
            self.fail(id, err);
        }

        id
    }

    /// Applies all pending lifecycle events from the backend.
    ///
    /// Call from the coordination loop; completion order across voices is
    /// unspecified and events for released voices are ignored.
    pub fn pump(&mut self) {
        while let Some(event) = self.backend.poll_event() {
            match event {
                EngineEvent::VoiceStarted { voice } => {
                    if let Some(state) = self.voices.get_mut(&voice) {
                        *state = VoiceState::Playing;
                    }
                }
                EngineEvent::VoiceFinished { voice } => {
                    if self.voices.remove(&voice).is_some() {
                        self.finished += 1;
                        log::debug!("voice {voice:?} finished");
                    }
                }
                EngineEvent::VoiceDropped { voice } => {
                    if self.voices.contains_key(&voice) {
                        self.fail(voice, PlaybackError::Exhausted);
                    }
                }
            }
        }
    }

    /// Marks a voice failed, releases it, and reports to the error sink.
    fn fail(&mut self, voice: VoiceId, err: PlaybackError) {
        if self.voices.remove(&voice).is_none() {
            return;
        }
        self.failed += 1;
        log::error!("voice {voice:?} failed: {err}");
        self.errors.push(err);
    }

    /// Current state of a voice, or `None` once it has been released.
    pub fn state(&self, voice: VoiceId) -> Option<VoiceState> {
        self.voices.get(&voice).copied()
    }

    /// Number of voices not yet finished or failed.
    pub fn in_flight(&self) -> usize {
        self.voices.len()
    }

    /// Total voices that reached [`VoiceState::Finished`].
    pub fn finished_count(&self) -> u64 {
        self.finished
    }

    /// Total voices that reached [`VoiceState::Failed`].
    pub fn failed_count(&self) -> u64 {
        self.failed
    }

    /// Drains the error sink.
    ///
    /// Failures are deliberately silent for the user (a missed sound is
    /// acceptable degraded behavior); the sink exists for hosts that want to
    /// observe them.
    pub fn drain_errors(&mut self) -> Vec<PlaybackError> {
        std::mem::take(&mut self.errors)
    }

    /// Access to the backend (e.g. to read stream parameters).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
