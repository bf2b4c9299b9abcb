//! Audio Stream Module
//!
//! This module handles CPAL audio stream management including:
//! - Stream initialization and configuration
//! - Audio callback setup
//! - Real-time command processing
//! - Error handling for audio stream operations
//!
//! The callback drains pending [`ControlMessage`]s into the mixer, then renders
//! one block; lifecycle events flow back through the event ring. Nothing on the
//! coordination side ever waits on the callback.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, Stream, StreamConfig};
use env_logger::{Builder, Env};
use rtrb::{Consumer, Producer, RingBuffer};

use crate::audio_engine::constants::{
    COMMAND_RING_CAPACITY, EVENT_RING_CAPACITY, OUTPUT_BUFFER_FRAMES,
};
use crate::audio_engine::errors::PlaybackError;
use crate::audio_engine::mixer::RtMixer;
use crate::audio_engine::AudioBackend;
use crate::messages::{ControlMessage, EngineEvent, SampleBuffer, VoiceId};

/// Handle to the running audio stream with its message rings.
///
/// Owns the stream; dropping the handle stops playback and releases the device.
pub struct AudioStreamHandle {
    producer: Producer<ControlMessage>,
    consumer: Consumer<EngineEvent>,
    pub output_channels: usize,
    pub output_sample_rate: u32,
    _stream: Stream,
}

impl AudioBackend for AudioStreamHandle {
    fn start(&mut self, voice: VoiceId, sample: SampleBuffer) -> Result<(), PlaybackError> {
        self.producer
            .push(ControlMessage::StartVoice { voice, sample })
            .map_err(|_| PlaybackError::Backlogged)
    }

    fn poll_event(&mut self) -> Option<EngineEvent> {
        self.consumer.pop().ok()
    }
}

/// Setup and configure the logger for audio operations
pub fn setup_logger() {
    // Default to `info`; override via `RUST_LOG`, e.g. `RUST_LOG=debug`.
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .try_init()
        .unwrap_or(()); // Ignore initialization errors
}

/// Create and configure the audio stream
///
/// This function:
/// 1. Sets up the default audio device
/// 2. Configures the stream with appropriate parameters
/// 3. Creates ring buffers for message passing
/// 4. Initializes the mixer
/// 5. Builds, starts, and returns the audio stream handle
pub fn open_output_stream() -> Result<AudioStreamHandle, Box<dyn std::error::Error>> {
    setup_logger();

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or("No audio device found")?;

    let config = device.default_output_config()?;
    let sample_rate = config.sample_rate();
    let channels = config.channels();

    log::info!(
        "Starting pad engine... ({} ch@{} Hz)",
        channels,
        sample_rate
    );

    // Command ring (coordination -> audio thread)
    let (producer_in, mut consumer_in) = RingBuffer::new(COMMAND_RING_CAPACITY);

    // Event ring (audio thread -> coordination)
    let (producer_out, consumer_out) = RingBuffer::new(EVENT_RING_CAPACITY);

    let mut mixer = RtMixer::new(channels as usize, producer_out);

    let stream_config = StreamConfig {
        channels,
        sample_rate,
        buffer_size: BufferSize::Fixed(OUTPUT_BUFFER_FRAMES),
    };

    let stream = device.build_output_stream(
        &stream_config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            while let Ok(message) = consumer_in.pop() {
                mixer.handle_message(message);
            }

            mixer.render(data);
        },
        |err| {
            log::error!("Audio stream error: {}", err);
        },
        None,
    )?;

    stream.play()?;

    Ok(AudioStreamHandle {
        producer: producer_in,
        consumer: consumer_out,
        output_channels: channels as usize,
        output_sample_rate: sample_rate,
        _stream: stream,
    })
}
