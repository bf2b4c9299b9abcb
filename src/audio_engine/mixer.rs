//! Real-time audio mixer implementation.
//!
//! This module provides the [`RtMixer`] struct which runs inside the audio
//! callback: it starts voices on command, mixes every active voice into the
//! output buffer, and reports voice lifecycle transitions back to the
//! coordination side through the event ring.
//!
//! The mixer owns a fixed arena of voice slots so the callback never allocates.
//! The arena size models the output device's mixing capacity; the engine itself
//! imposes no voice cap and never steals an occupied slot.

use cpal::Sample;
use rtrb::Producer;

use crate::audio_engine::constants::MIX_SLOTS;
use crate::audio_engine::voice::RtVoice;
use crate::messages::{ControlMessage, EngineEvent, SampleBuffer, VoiceId};

struct ActiveVoice {
    id: VoiceId,
    voice: RtVoice,
}

/// Audio-thread mixer over a fixed arena of independent voices.
pub struct RtMixer {
    /// Number of output channels (1 for mono, 2 for stereo).
    channels: usize,

    /// Voice slot arena; `None` slots are free.
    slots: Vec<Option<ActiveVoice>>,

    /// Lifecycle events back to the coordination side.
    events: Producer<EngineEvent>,
}

impl RtMixer {
    /// Creates a mixer for the given channel count, reporting into `events`.
    pub fn new(channels: usize, events: Producer<EngineEvent>) -> Self {
        Self {
            channels,
            slots: (0..MIX_SLOTS).map(|_| None).collect(),
            events,
        }
    }

    /// Processes one command from the coordination side.
    pub fn handle_message(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::StartVoice { voice, sample } => self.start_voice(voice, sample),
        }
    }

    /// Places a new voice in a free slot, or reports it dropped.
    ///
    /// Every started voice is announced with `VoiceStarted` and later leaves the
    /// arena with exactly one `VoiceFinished`.
    fn start_voice(&mut self, id: VoiceId, sample: SampleBuffer) {
        let Some(slot) = self.slots.iter_mut().find(|slot| slot.is_none()) else {
            let _ = self.events.push(EngineEvent::VoiceDropped { voice: id });
            return;
        };

        *slot = Some(ActiveVoice {
            id,
            voice: RtVoice::new(sample),
        });
        let _ = self.events.push(EngineEvent::VoiceStarted { voice: id });
    }

    /// Renders one interleaved output block, mixing all active voices.
    ///
    /// Voices that render their final frame are cleared from the arena and
    /// reported finished.
    pub fn render(&mut self, output: &mut [f32]) {
        output.fill(Sample::EQUILIBRIUM);

        if self.channels == 0 || output.len() < self.channels {
            return;
        }

        for slot in &mut self.slots {
            let finished = match slot.as_mut() {
                Some(active) => {
                    active.voice.mix_into(output, self.channels);
                    (!active.voice.is_active()).then_some(active.id)
                }
                None => None,
            };

            if let Some(id) = finished {
                let _ = self.events.push(EngineEvent::VoiceFinished { voice: id });
                *slot = None;
            }
        }
    }

    /// Number of voices currently occupying a slot.
    pub fn active_voices(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Gets the number of channels configured for this mixer.
    pub fn channels(&self) -> usize {
        self.channels
    }
}
