//! # Scene Transitions
//!
//! Maps an animated history position to per-scene presentation attributes.
//! Each history entry is a scene; `position` slides from the previously
//! focused index to the new one and every scene fades by its distance from it:
//!
//! ```text
//! position   i-1      i      i+1
//! opacity     0   →   1   →   0
//! ```
//!
//! Scenes that are neither focused nor part of a running transition are moved
//! off screen entirely.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub opacity: f32,
    /// Moved off screen; not drawn at all.
    pub offscreen: bool,
}

/// Before the layout is measured only the focused scene is shown, fully opaque.
fn initial(focused: bool) -> Presentation {
    Presentation {
        opacity: if focused { 1.0 } else { 0.0 },
        offscreen: !focused,
    }
}

pub fn fade(
    scene_index: usize,
    focused_index: usize,
    position: f32,
    measured: bool,
    in_transition: bool,
) -> Presentation {
    let focused = scene_index == focused_index;
    if !measured {
        return initial(focused);
    }

    let distance = (position - scene_index as f32).abs();
    Presentation {
        opacity: (1.0 - distance).clamp(0.0, 1.0),
        offscreen: !(focused || in_transition),
    }
}

/// Drives `position` from one history index to another over `duration`.
#[derive(Debug, Clone, Copy)]
pub struct FadeClock {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl FadeClock {
    /// A clock that has already finished at `index`.
    pub fn settled(index: usize) -> Self {
        Self {
            from: index as f32,
            to: index as f32,
            started: Instant::now(),
            duration: Duration::ZERO,
        }
    }

    /// Start moving towards `to`. When the index does not move (a reset) the
    /// scene fades in from one step behind.
    pub fn start(from: usize, to: usize, duration: Duration, now: Instant) -> Self {
        let from = if from == to {
            to as f32 - 1.0
        } else {
            from as f32
        };
        Self {
            from,
            to: to as f32,
            started: now,
            duration,
        }
    }

    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn position(&self, now: Instant) -> f32 {
        self.from + (self.to - self.from) * self.progress(now)
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.progress(now) < 1.0
    }
}
