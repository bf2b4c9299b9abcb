//! Per-pad visual feedback timelines.
//!
//! Each pad owns one [`FeedbackTimeline`] driving two animated properties the
//! rendering surface reads every frame: a scale factor (press dip, then an
//! under-damped spring back to rest) and a border flash (step to the pad's
//! accent color, then a fade to transparent).
//!
//! Timelines are pure presentation state advanced explicitly by the host frame
//! loop; they never touch the audio path and playback never blocks them.
//! Restarting a pad's timeline mid-flight continues from the current
//! instantaneous values, so rapid re-triggers flicker instead of snapping.

use std::collections::HashMap;
use std::time::Duration;

use crate::registry::{PadId, Rgba, SampleRegistry};

/// Duration of the press dip from the current scale down to [`PRESSED_SCALE`].
pub const PRESS_DURATION: Duration = Duration::from_millis(50);

/// Duration of the border fade-in to the full-intensity accent color.
pub const FLASH_IN_DURATION: Duration = Duration::from_millis(50);

/// Duration of the border fade-out back to transparent.
pub const FLASH_OUT_DURATION: Duration = Duration::from_millis(300);

/// Scale factor at rest.
pub const REST_SCALE: f32 = 1.0;

/// Scale factor at the bottom of the press dip.
pub const PRESSED_SCALE: f32 = 0.95;

// Spring constants tuned for a single small overshoot that settles well inside
// the 350 ms timeline budget (damping ratio 0.6, natural frequency 30 rad/s).
const SPRING_STIFFNESS: f32 = 900.0;
const SPRING_DAMPING: f32 = 36.0;

/// Integration substep for the spring, in seconds.
const SPRING_STEP_SECS: f32 = 0.001;

const SETTLE_POS_EPS: f32 = 1e-3;
const SETTLE_VEL_EPS: f32 = 5e-2;

/// Snapshot of one pad's animated visual state, read by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackFrame {
    pub scale: f32,
    pub border: Rgba,
}

#[derive(Debug, Clone, Copy)]
enum ScalePhase {
    Rest,
    Press { from: f32, elapsed: Duration },
    Spring { pos: f32, vel: f32 },
}

#[derive(Debug, Clone, Copy)]
enum BorderPhase {
    Rest,
    FlashIn { from: Rgba, elapsed: Duration },
    FadeOut { elapsed: Duration },
}

fn fraction(elapsed: Duration, total: Duration) -> f32 {
    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Animation timeline for one pad; reused across that pad's activations.
#[derive(Debug)]
pub struct FeedbackTimeline {
    accent: Rgba,
    scale: ScalePhase,
    border: BorderPhase,
}

impl FeedbackTimeline {
    /// Creates a timeline at rest with the pad's accent color.
    pub fn new(accent: Rgba) -> Self {
        Self {
            accent: accent.with_alpha(1.0),
            scale: ScalePhase::Rest,
            border: BorderPhase::Rest,
        }
    }

    /// Starts (or restarts) the timeline.
    ///
    /// Both properties restart from their current instantaneous values, never
    /// from a hard reset, so trajectories stay continuous across re-triggers.
    pub fn begin(&mut self) {
        self.scale = ScalePhase::Press {
            from: self.scale(),
            elapsed: Duration::ZERO,
        };
        self.border = BorderPhase::FlashIn {
            from: self.border(),
            elapsed: Duration::ZERO,
        };
    }

    /// Current animated scale factor.
    pub fn scale(&self) -> f32 {
        match self.scale {
            ScalePhase::Rest => REST_SCALE,
            ScalePhase::Press { from, elapsed } => {
                lerp(from, PRESSED_SCALE, fraction(elapsed, PRESS_DURATION))
            }
            ScalePhase::Spring { pos, .. } => pos,
        }
    }

    /// Current animated border color.
    pub fn border(&self) -> Rgba {
        let transparent = self.accent.with_alpha(0.0);
        match self.border {
            BorderPhase::Rest => transparent,
            BorderPhase::FlashIn { from, elapsed } => {
                from.lerp(self.accent, fraction(elapsed, FLASH_IN_DURATION))
            }
            BorderPhase::FadeOut { elapsed } => self
                .accent
                .lerp(transparent, fraction(elapsed, FLASH_OUT_DURATION)),
        }
    }

    /// Whether both properties have settled back to the rest state.
    pub fn is_at_rest(&self) -> bool {
        matches!(self.scale, ScalePhase::Rest) && matches!(self.border, BorderPhase::Rest)
    }

    /// Current visual state as one snapshot.
    pub fn frame(&self) -> FeedbackFrame {
        FeedbackFrame {
            scale: self.scale(),
            border: self.border(),
        }
    }

    /// Advances both properties by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.advance_scale(dt);
        self.advance_border(dt);
    }

    fn advance_scale(&mut self, dt: Duration) {
        match self.scale {
            ScalePhase::Rest => {}
            ScalePhase::Press { from, elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed < PRESS_DURATION {
                    self.scale = ScalePhase::Press { from, elapsed };
                } else {
                    // The dip bottoms out; the remainder of the step drives the spring.
                    self.scale = ScalePhase::Spring {
                        pos: PRESSED_SCALE,
                        vel: 0.0,
                    };
                    self.step_spring(elapsed - PRESS_DURATION);
                }
            }
            ScalePhase::Spring { .. } => self.step_spring(dt),
        }
    }

    fn step_spring(&mut self, dt: Duration) {
        let ScalePhase::Spring { mut pos, mut vel } = self.scale else {
            return;
        };

        // Semi-implicit Euler in fixed substeps; stable for these constants.
        let mut remaining = dt.as_secs_f32();
        while remaining > 0.0 {
            let step = remaining.min(SPRING_STEP_SECS);
            let acc = SPRING_STIFFNESS * (REST_SCALE - pos) - SPRING_DAMPING * vel;
            vel += acc * step;
            pos += vel * step;
            remaining -= step;

            if (pos - REST_SCALE).abs() < SETTLE_POS_EPS && vel.abs() < SETTLE_VEL_EPS {
                self.scale = ScalePhase::Rest;
                return;
            }
        }

        self.scale = ScalePhase::Spring { pos, vel };
    }

    fn advance_border(&mut self, dt: Duration) {
        match self.border {
            BorderPhase::Rest => {}
            BorderPhase::FlashIn { from, elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed < FLASH_IN_DURATION {
                    self.border = BorderPhase::FlashIn { from, elapsed };
                } else {
                    self.border = BorderPhase::FadeOut {
                        elapsed: elapsed - FLASH_IN_DURATION,
                    };
                    self.finish_fade_out();
                }
            }
            BorderPhase::FadeOut { elapsed } => {
                self.border = BorderPhase::FadeOut {
                    elapsed: elapsed + dt,
                };
                self.finish_fade_out();
            }
        }
    }

    fn finish_fade_out(&mut self) {
        if let BorderPhase::FadeOut { elapsed } = self.border {
            if elapsed >= FLASH_OUT_DURATION {
                self.border = BorderPhase::Rest;
            }
        }
    }
}

/// All pad timelines, keyed by pad id.
///
/// Each timeline is mutated only through its own pad's calls; no cross-pad
/// mutation ever occurs.
pub struct FeedbackSequencer {
    timelines: HashMap<PadId, FeedbackTimeline>,
}

impl FeedbackSequencer {
    /// Creates one timeline per registered pad.
    pub fn new(registry: &SampleRegistry) -> Self {
        Self::with_pads(
            registry
                .pads()
                .iter()
                .map(|pad| (pad.id.clone(), pad.accent)),
        )
    }

    /// Creates timelines from explicit pad/accent pairs.
    pub fn with_pads(pads: impl IntoIterator<Item = (PadId, Rgba)>) -> Self {
        Self {
            timelines: pads
                .into_iter()
                .map(|(id, accent)| (id, FeedbackTimeline::new(accent)))
                .collect(),
        }
    }

    /// Starts (or restarts) the timeline for a pad.
    ///
    /// Unknown ids are ignored; feedback is pure presentation and has no error
    /// path.
    pub fn run(&mut self, pad: &PadId) {
        match self.timelines.get_mut(pad) {
            Some(timeline) => timeline.begin(),
            None => log::debug!("feedback run for unregistered pad {pad}"),
        }
    }

    /// Advances every pad's timeline by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        for timeline in self.timelines.values_mut() {
            timeline.advance(dt);
        }
    }

    /// The current visual state of a pad; rest state for unknown ids.
    pub fn frame(&self, pad: &PadId) -> FeedbackFrame {
        self.timelines
            .get(pad)
            .map(FeedbackTimeline::frame)
            .unwrap_or(FeedbackFrame {
                scale: REST_SCALE,
                border: Rgba::TRANSPARENT,
            })
    }
}
