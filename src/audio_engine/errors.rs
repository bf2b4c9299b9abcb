//! Audio-specific error types.

use thiserror::Error;

/// Errors that can occur while loading audio files.
#[derive(Debug, Error)]
pub enum SampleLoadError {
    /// Failed to open the audio file.
    #[error("failed to open file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode the audio file.
    #[error("failed to decode audio file: {0}")]
    Decode(#[from] symphonia::core::errors::Error),

    /// Audio file has no default track.
    #[error("audio file has no default track")]
    NoDefaultTrack,

    /// Audio file is missing sample rate information.
    #[error("audio file is missing a sample rate")]
    MissingSampleRate,

    /// Audio file is missing channel information.
    #[error("audio file is missing channel information")]
    MissingChannels,

    /// Audio file sample rate does not match the output stream.
    #[error("sample rate mismatch: file is {file_rate} Hz, output is {output_rate} Hz")]
    SampleRateMismatch {
        /// Sample rate of the source file in Hz.
        file_rate: u32,
        /// Sample rate of the output stream in Hz.
        output_rate: u32,
    },

    /// Unsupported channel mapping configuration.
    #[error(
        "unsupported channel mapping: file has {file_channels} channels, output has {output_channels} channels (only mono↔stereo supported)"
    )]
    UnsupportedChannels {
        /// Number of channels in the source file.
        file_channels: usize,
        /// Number of channels expected for output.
        output_channels: usize,
    },
}

/// Errors on the trigger path of the voice manager.
///
/// These are never propagated to the caller of `trigger`; they are reported to
/// the manager's error sink and logged, and the affected voice transitions to
/// `Failed`.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The sample data could not be loaded or decoded.
    #[error(transparent)]
    Load(#[from] SampleLoadError),

    /// The output device had no free mixing slot for the voice.
    #[error("output device mixing capacity exhausted")]
    Exhausted,

    /// The command ring to the audio callback was full.
    #[error("playback command queue is full")]
    Backlogged,
}
