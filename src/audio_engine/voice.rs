//! Real-time playback voice.
//!
//! An [`RtVoice`] is the audio-thread half of one playback voice: a one-shot
//! playhead over a shared [`SampleBuffer`]. Voices are fully independent — each
//! owns its own position and its own handle to the sample data, and renders
//! additively so no voice can truncate or delay another.

use crate::messages::SampleBuffer;

/// One playing sample on the audio thread.
#[derive(Debug)]
pub struct RtVoice {
    sample: SampleBuffer,
    frame_pos: usize,
    active: bool,
}

impl RtVoice {
    /// Creates a voice at the start of the sample.
    pub fn new(sample: SampleBuffer) -> Self {
        let active = sample.frames() > 0;
        Self {
            sample,
            frame_pos: 0,
            active,
        }
    }

    /// Whether the voice still has frames to render.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Additively mixes this voice into the interleaved output buffer.
    ///
    /// `output` must be interleaved with `channels` samples per frame and the
    /// voice's sample must have the same channel count. The voice goes inactive
    /// once its final frame has been rendered; there is no looping.
    pub fn mix_into(&mut self, output: &mut [f32], channels: usize) {
        if !self.active || channels == 0 || self.sample.channels != channels {
            self.active = false;
            return;
        }

        let total_frames = self.sample.frames();
        let out_frames = output.len() / channels;

        for frame in 0..out_frames {
            if self.frame_pos >= total_frames {
                self.active = false;
                break;
            }

            let in_base = self.frame_pos * channels;
            let out_base = frame * channels;
            for channel in 0..channels {
                output[out_base + channel] += self.sample.samples[in_base + channel];
            }

            self.frame_pos += 1;
        }

        if self.frame_pos >= total_frames {
            self.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn sample(channels: usize, data: Vec<f32>) -> SampleBuffer {
        SampleBuffer {
            channels,
            samples: Arc::from(data.into_boxed_slice()),
        }
    }

    #[test]
    fn test_voice_renders_and_finishes() {
        let mut voice = RtVoice::new(sample(1, vec![0.5, 0.25, -0.5]));
        let mut output = vec![0.0f32; 4];

        voice.mix_into(&mut output, 1);

        assert_eq!(&output[..3], &[0.5, 0.25, -0.5]);
        assert_eq!(output[3], 0.0);
        assert!(!voice.is_active());
    }

    #[test]
    fn test_voice_spans_multiple_blocks() {
        let mut voice = RtVoice::new(sample(1, vec![0.1; 6]));

        let mut block = vec![0.0f32; 4];
        voice.mix_into(&mut block, 1);
        assert!(voice.is_active());

        block.fill(0.0);
        voice.mix_into(&mut block, 1);
        assert!(!voice.is_active());
        assert!((block[0] - 0.1).abs() < 1e-6);
        assert!((block[1] - 0.1).abs() < 1e-6);
        assert_eq!(block[2], 0.0);
    }

    #[test]
    fn test_voice_mixes_additively() {
        let mut a = RtVoice::new(sample(1, vec![0.3, 0.3]));
        let mut b = RtVoice::new(sample(1, vec![0.2, 0.2]));
        let mut output = vec![0.0f32; 2];

        a.mix_into(&mut output, 1);
        b.mix_into(&mut output, 1);

        assert!((output[0] - 0.5).abs() < 1e-6);
        assert!((output[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_empty_sample_is_inactive() {
        let voice = RtVoice::new(sample(1, vec![]));
        assert!(!voice.is_active());
    }

    #[test]
    fn test_channel_mismatch_deactivates() {
        let mut voice = RtVoice::new(sample(2, vec![0.5; 8]));
        let mut output = vec![0.0f32; 4];

        voice.mix_into(&mut output, 1);

        assert!(!voice.is_active());
        assert!(output.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_stereo_interleaving() {
        let mut voice = RtVoice::new(sample(2, vec![0.1, -0.1, 0.2, -0.2]));
        let mut output = vec![0.0f32; 4];

        voice.mix_into(&mut output, 2);

        assert_eq!(output, vec![0.1, -0.1, 0.2, -0.2]);
        assert!(!voice.is_active());
    }
}
