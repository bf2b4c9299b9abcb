//! Static pad registry.
//!
//! This module provides the immutable mapping from pad identifier to sample data
//! and display metadata. The registry is built once at startup and is read-only
//! afterwards; lookups have no side effects and are safe from any number of
//! callers.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::audio_engine::errors::SampleLoadError;
use crate::audio_engine::sample_loader::decode_audio_file_to_sample_buffer;
use crate::messages::SampleBuffer;

/// Opaque pad identifier.
///
/// Backed by a shared string so cloning is cheap; ids are only ever sourced from
/// the registry itself during normal operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PadId(Arc<str>);

impl PadId {
    /// Creates a pad id from any string-like value.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PadId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// An RGBA color with linear component interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Builds an opaque color from a `0xRRGGBB` value.
    pub const fn from_rgb(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Returns this color with the given alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Linear interpolation between `self` (t = 0) and `to` (t = 1).
    pub fn lerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (to.r - self.r) * t,
            g: self.g + (to.g - self.g) * t,
            b: self.b + (to.b - self.b) * t,
            a: self.a + (to.a - self.a) * t,
        }
    }

    /// Whether the color is fully transparent.
    pub fn is_transparent(self) -> bool {
        self.a == 0.0
    }
}

/// One pad: identity, display metadata and the sample it plays.
///
/// Created once at registry construction and never mutated for the process
/// lifetime.
#[derive(Debug, Clone)]
pub struct PadDefinition {
    /// Opaque identifier, unique within the registry.
    pub id: PadId,

    /// Display label.
    pub label: String,

    /// Accent color used by the feedback flash.
    pub accent: Rgba,

    /// Shared handle to the pad's decoded sample data.
    pub sample: SampleBuffer,
}

/// Lookup failure for a pad id absent from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pad id: {0}")]
pub struct UnknownPadError(pub PadId);

/// Declaration of a pad whose sample still has to be decoded from disk.
#[derive(Debug, Clone)]
pub struct KitEntry {
    pub id: PadId,
    pub label: String,
    pub accent: Rgba,
    pub path: PathBuf,
}

/// Immutable, ordered pad registry.
pub struct SampleRegistry {
    pads: Vec<PadDefinition>,
    index: HashMap<PadId, usize>,
}

impl SampleRegistry {
    /// Builds a registry from already-decoded pad definitions.
    ///
    /// Declaration order is preserved; a duplicate id keeps the first
    /// declaration.
    pub fn new(pads: Vec<PadDefinition>) -> Self {
        let mut index = HashMap::with_capacity(pads.len());
        for (i, pad) in pads.iter().enumerate() {
            index.entry(pad.id.clone()).or_insert(i);
        }
        Self { pads, index }
    }

    /// Decodes every entry's sample from disk and builds the registry.
    ///
    /// Samples are decoded to `output_channels` interleaved channels at
    /// `output_rate_hz`. Fails on the first entry that cannot be decoded.
    pub fn load(
        entries: &[KitEntry],
        output_channels: usize,
        output_rate_hz: u32,
    ) -> Result<Self, SampleLoadError> {
        let mut pads = Vec::with_capacity(entries.len());
        for entry in entries {
            let sample =
                decode_audio_file_to_sample_buffer(&entry.path, output_channels, output_rate_hz)?;
            log::info!(
                "loaded pad {} ({}): {} frames",
                entry.id,
                entry.label,
                sample.frames()
            );
            pads.push(PadDefinition {
                id: entry.id.clone(),
                label: entry.label.clone(),
                accent: entry.accent,
                sample,
            });
        }
        Ok(Self::new(pads))
    }

    /// The pads in declaration order.
    pub fn pads(&self) -> &[PadDefinition] {
        &self.pads
    }

    /// Looks up a pad definition by id.
    pub fn pad(&self, id: &PadId) -> Result<&PadDefinition, UnknownPadError> {
        self.index
            .get(id)
            .map(|&i| &self.pads[i])
            .ok_or_else(|| UnknownPadError(id.clone()))
    }

    /// Resolves a pad id to its sample handle.
    pub fn resolve(&self, id: &PadId) -> Result<SampleBuffer, UnknownPadError> {
        self.pad(id).map(|pad| pad.sample.clone())
    }
}

/// The stock six-pad kit, with the expected sample files under `dir`.
pub fn default_kit(dir: &Path) -> Vec<KitEntry> {
    let entry = |id: &str, label: &str, accent: u32, file: &str| KitEntry {
        id: PadId::new(id),
        label: label.to_string(),
        accent: Rgba::from_rgb(accent),
        path: dir.join(file),
    };

    vec![
        entry("kick", "KICK", 0xF72585, "kick.wav"),
        entry("snare", "SNARE", 0x4CC9F0, "snare.wav"),
        entry("hihat", "HI-HAT", 0xF72585, "hihat.wav"),
        entry("clap", "CLAP", 0x4361EE, "clap.wav"),
        entry("bass", "BASS", 0x7209B7, "bass.wav"),
        entry("vox", "VOX", 0x3A0CA3, "vox.wav"),
    ]
}
