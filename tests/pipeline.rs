//! End-to-end pipeline tests: activation coordinator, voice manager and the
//! real-time mixer wired through the same ring buffers the audio stream uses,
//! with the render callback driven by the test instead of a device.

use std::sync::Arc;
use std::time::Duration;

use rtrb::{Consumer, Producer, RingBuffer};

use pulsepad::audio_engine::constants::{COMMAND_RING_CAPACITY, EVENT_RING_CAPACITY};
use pulsepad::audio_engine::mixer::RtMixer;
use pulsepad::feedback::{FeedbackSequencer, REST_SCALE};
use pulsepad::messages::{ControlMessage, EngineEvent, SampleBuffer, VoiceId};
use pulsepad::{
    ActivationCoordinator, AudioBackend, NoHaptics, PadDefinition, PadId, PlaybackError, Rgba,
    SampleRegistry, VoiceManager,
};

/// Ring-buffer backend identical in shape to the production stream handle,
/// with the callback side held by the test.
struct LoopbackBackend {
    producer: Producer<ControlMessage>,
    consumer: Consumer<EngineEvent>,
}

impl AudioBackend for LoopbackBackend {
    fn start(&mut self, voice: VoiceId, sample: SampleBuffer) -> Result<(), PlaybackError> {
        self.producer
            .push(ControlMessage::StartVoice { voice, sample })
            .map_err(|_| PlaybackError::Backlogged)
    }

    fn poll_event(&mut self) -> Option<EngineEvent> {
        self.consumer.pop().ok()
    }
}

struct TestRig {
    coordinator: ActivationCoordinator<LoopbackBackend, NoHaptics>,
    registry: SampleRegistry,
    commands: Consumer<ControlMessage>,
    mixer: RtMixer,
}

impl TestRig {
    fn new() -> Self {
        let (cmd_tx, cmd_rx) = RingBuffer::new(COMMAND_RING_CAPACITY);
        let (evt_tx, evt_rx) = RingBuffer::new(EVENT_RING_CAPACITY);

        let pad = |id: &str, accent: u32, frames: usize| PadDefinition {
            id: PadId::new(id),
            label: id.to_uppercase(),
            accent: Rgba::from_rgb(accent),
            sample: SampleBuffer {
                channels: 1,
                samples: Arc::from(vec![0.1f32; frames].into_boxed_slice()),
            },
        };
        let registry = SampleRegistry::new(vec![
            pad("kick", 0xF72585, 8),
            pad("snare", 0x4CC9F0, 16),
        ]);

        let coordinator = ActivationCoordinator::new(
            NoHaptics,
            VoiceManager::new(LoopbackBackend {
                producer: cmd_tx,
                consumer: evt_rx,
            }),
            FeedbackSequencer::new(&registry),
        );

        Self {
            coordinator,
            registry,
            commands: cmd_rx,
            mixer: RtMixer::new(1, evt_tx),
        }
    }

    fn pad(&self, id: &str) -> PadDefinition {
        self.registry.pad(&PadId::new(id)).unwrap().clone()
    }

    /// One simulated audio callback: drain commands, render a block.
    fn render_block(&mut self, frames: usize) -> Vec<f32> {
        while let Ok(message) = self.commands.pop() {
            self.mixer.handle_message(message);
        }
        let mut block = vec![0.0f32; frames];
        self.mixer.render(&mut block);
        block
    }
}

#[test]
fn test_single_activation_runs_to_completion() {
    let mut rig = TestRig::new();
    let kick = rig.pad("kick");

    rig.coordinator.activate(&kick);
    assert_eq!(rig.coordinator.voices().in_flight(), 1);

    // The 8-frame sample finishes within one 16-frame block.
    let block = rig.render_block(16);
    assert!((block[0] - 0.1).abs() < 1e-6);
    assert_eq!(block[8], 0.0);

    rig.coordinator.pump();
    assert_eq!(rig.coordinator.voices().finished_count(), 1);
    assert_eq!(rig.coordinator.voices().in_flight(), 0);

    // Visual feedback settles back to rest independently of playback.
    rig.coordinator.advance(Duration::from_millis(400));
    let frame = rig.coordinator.frame(&kick.id);
    assert_eq!(frame.scale, REST_SCALE);
    assert!(frame.border.is_transparent());
}

#[test]
fn test_rapid_retrigger_produces_independent_voices() {
    let mut rig = TestRig::new();
    let kick = rig.pad("kick");

    let first = rig.coordinator.activate(&kick);
    let second = rig.coordinator.activate(&kick);
    assert_ne!(first, second);

    // Both voices render in full; overlapping frames sum.
    let block = rig.render_block(16);
    assert!((block[0] - 0.2).abs() < 1e-6);
    assert!((block[7] - 0.2).abs() < 1e-6);
    assert_eq!(block[8], 0.0);

    rig.coordinator.pump();
    assert_eq!(rig.coordinator.voices().finished_count(), 2);
}

#[test]
fn test_concurrent_pads_do_not_truncate_each_other() {
    let mut rig = TestRig::new();
    let kick = rig.pad("kick");
    let snare = rig.pad("snare");

    rig.coordinator.activate(&kick);
    rig.coordinator.activate(&snare);

    let block = rig.render_block(16);
    // Frames 0..8 carry both pads, frames 8..16 the snare alone — the same
    // tail the snare renders when triggered by itself.
    assert!((block[0] - 0.2).abs() < 1e-6);
    assert!((block[12] - 0.1).abs() < 1e-6);

    rig.coordinator.pump();
    assert_eq!(rig.coordinator.voices().finished_count(), 2);

    // Each pad animates its own timeline only.
    rig.coordinator.advance(Duration::from_millis(25));
    assert!(rig.coordinator.frame(&kick.id).scale < REST_SCALE);
    assert!(rig.coordinator.frame(&snare.id).scale < REST_SCALE);
}

#[test]
fn test_burst_of_activations_all_finish() {
    let mut rig = TestRig::new();
    let kick = rig.pad("kick");

    for _ in 0..20 {
        rig.coordinator.activate(&kick);
    }
    assert_eq!(rig.coordinator.voices().in_flight(), 20);

    let mut quiet_blocks = 0;
    while quiet_blocks < 2 {
        let block = rig.render_block(32);
        if block.iter().all(|&s| s == 0.0) {
            quiet_blocks += 1;
        }
        rig.coordinator.pump();
    }

    assert_eq!(rig.coordinator.voices().finished_count(), 20);
    assert_eq!(rig.coordinator.voices().in_flight(), 0);
    assert!(rig.coordinator.voices_mut().drain_errors().is_empty());
}
