//! Audio engine configuration constants and limits.

/// Number of mixing slots on the output device side.
///
/// This models the host's audio-mixing capacity, not an engine policy: the voice
/// manager itself places no cap on concurrent voices and never steals a slot. A
/// trigger that finds every slot occupied is dropped and reported as a failed
/// voice.
pub const MIX_SLOTS: usize = 32;

/// Capacity of the command ring into the audio callback.
pub const COMMAND_RING_CAPACITY: usize = 1024;

/// Capacity of the event ring out of the audio callback.
pub const EVENT_RING_CAPACITY: usize = 1024;

/// Fixed cpal output buffer size in frames.
pub const OUTPUT_BUFFER_FRAMES: u32 = 512;
