// timeline.rs - Easing, tweens and a run-once timeline
//
// Everything is sampled from elapsed time; nothing here owns a timer.
// The frame loop advances a Timeline and reads transforms back out.

use serde::Serialize;

use crate::math::{clamp, mix};

const BACK_OVERSHOOT: f32 = 1.70158;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    CubicIn,
    QuadOut,
    BackOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Ease::CubicIn => t * t * t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::BackOut => {
                let t = t - 1.0;
                t * t * ((BACK_OVERSHOOT + 1.0) * t + BACK_OVERSHOOT) + 1.0
            }
        }
    }
}

/// One scalar property animated from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub delay: f32,
    pub duration: f32,
    pub from: f32,
    pub to: f32,
    pub ease: Ease,
}

impl Tween {
    /// Linear progress in `[0, 1]` at time `t`
    pub fn progress(&self, t: f32) -> f32 {
        if self.duration <= 0.0 {
            return if t >= self.delay { 1.0 } else { 0.0 };
        }
        clamp((t - self.delay) / self.duration, 0.0, 1.0)
    }

    pub fn sample(&self, t: f32) -> f32 {
        mix(self.from, self.to, self.ease.apply(self.progress(t)))
    }

    pub fn end(&self) -> f32 {
        self.delay + self.duration.max(0.0)
    }
}

/// Pseudo-3D transform of a fragment surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FragmentTransform {
    pub z: f32,
    /// Degrees
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub opacity: f32,
}

impl FragmentTransform {
    /// Rest pose: flat, in place, opaque
    pub const IDENTITY: Self = Self { z: 0.0, rotation_x: 0.0, rotation_y: 0.0, opacity: 1.0 };
}

/// Fly-away then fade-out, both offset by the fragment's delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentTween {
    pub delay: f32,
    pub fly_duration: f32,
    /// Relative to `delay`
    pub fade_start: f32,
    pub fade_duration: f32,
    pub target: FragmentTransform,
}

impl FragmentTween {
    fn fly(&self, from: f32, to: f32) -> Tween {
        Tween { delay: self.delay, duration: self.fly_duration, from, to, ease: Ease::CubicIn }
    }

    fn fade(&self) -> Tween {
        Tween {
            delay: self.delay + self.fade_start,
            duration: self.fade_duration,
            from: FragmentTransform::IDENTITY.opacity,
            to: self.target.opacity,
            ease: Ease::QuadOut,
        }
    }

    pub fn sample(&self, t: f32) -> FragmentTransform {
        let (rest, target) = (FragmentTransform::IDENTITY, self.target);
        FragmentTransform {
            z: self.fly(rest.z, target.z).sample(t),
            rotation_x: self.fly(rest.rotation_x, target.rotation_x).sample(t),
            rotation_y: self.fly(rest.rotation_y, target.rotation_y).sample(t),
            opacity: self.fade().sample(t),
        }
    }

    pub fn end(&self) -> f32 {
        self.fly(0.0, 0.0).end().max(self.fade().end())
    }
}

/// Elapsed-time cursor that reports completion once.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timeline {
    elapsed: f32,
    duration: f32,
    finished: bool,
}

impl Timeline {
    pub fn new(duration: f32) -> Self {
        Self { elapsed: 0.0, duration: duration.max(0.0), finished: false }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by `dt`; returns true on the tick that reaches the end.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.finished { return false; }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            self.finished = true;
            return true;
        }
        false
    }
}
