//! Input mapping
//!
//! Translates keyboard codes and pointer gestures into game actions. Hosts
//! forward raw events here and apply the result with
//! [`BadgerRun::apply`](crate::BadgerRun::apply).

use serde::{Deserialize, Serialize};

/// Pointer travel (px) below which a release counts as a tap
pub const TAP_THRESHOLD: f32 = 16.0;
/// How long a downward swipe keeps the player ducked (seconds)
pub const DUCK_PULSE: f32 = 0.25;

/// One call into the action API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Start, jump or restart depending on phase
    Primary,
    Jump,
    DuckStart,
    DuckEnd,
    /// Duck for `DUCK_PULSE` seconds
    DuckPulse,
    Left,
    Right,
    Reset,
}

/// Action for a key press (`KeyboardEvent.code` names)
pub fn key_down(code: &str) -> Option<Action> {
    match code {
        "Space" | "ArrowUp" => Some(Action::Primary),
        "ArrowDown" => Some(Action::DuckStart),
        "ArrowLeft" | "KeyA" => Some(Action::Left),
        "ArrowRight" | "KeyD" => Some(Action::Right),
        "KeyR" => Some(Action::Reset),
        _ => None,
    }
}

/// Action for a key release
pub fn key_up(code: &str) -> Option<Action> {
    match code {
        "ArrowDown" => Some(Action::DuckEnd),
        _ => None,
    }
}

/// Classify a pointer gesture by its travel in screen space (y grows downward)
pub fn classify_gesture(dx: f32, dy: f32) -> Action {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax < TAP_THRESHOLD && ay < TAP_THRESHOLD {
        return Action::Primary;
    }
    if ax > ay {
        if dx < 0.0 { Action::Left } else { Action::Right }
    } else if dy > 0.0 {
        Action::DuckPulse
    } else {
        Action::Primary
    }
}

/// Tracks one pointer from press to release
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureTracker {
    start: Option<(f32, f32)>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish the gesture. `None` if no press was seen.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> Option<Action> {
        let (sx, sy) = self.start.take()?;
        Some(classify_gesture(x - sx, y - sy))
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}
