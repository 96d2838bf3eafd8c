//! Timed notification banners and the reveal card.
//!
//! Timers are plain deadlines checked every frame. Showing a banner again
//! replaces its deadline, which cancels the pending hide.

use std::time::{Duration, Instant};

pub const MESSAGE_BANNER_DURATION: Duration = Duration::from_secs(10);
pub const REVEAL_BANNER_DURATION: Duration = Duration::from_secs(7);

/// How long the reveal card takes to fade in.
const REVEAL_FADE: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Default)]
pub struct Banner {
    pub text: String,
    hide_at: Option<Instant>,
}

impl Banner {
    pub fn show(&mut self, text: impl Into<String>, duration: Duration, now: Instant) {
        self.text = text.into();
        self.hide_at = Some(now + duration);
    }

    pub fn hide(&mut self) {
        self.hide_at = None;
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.hide_at.is_some_and(|at| now < at)
    }

    /// Time until the banner hides itself, if it is showing.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.hide_at
            .and_then(|at| at.checked_duration_since(now))
            .filter(|d| !d.is_zero())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Notifications {
    pub message: Banner,
    pub reveal: Banner,
}

impl Notifications {
    pub fn hide_all(&mut self) {
        self.message.hide();
        self.reveal.hide();
    }

    /// Earliest pending hide, so the UI can schedule its next repaint.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        [self.message.remaining(now), self.reveal.remaining(now)]
            .into_iter()
            .flatten()
            .min()
    }
}

/// Result of the last reveal, faded in each time a new one arrives.
#[derive(Debug, Clone)]
pub struct RevealCard {
    pub text: String,
    shown_at: Instant,
}

impl RevealCard {
    pub fn new(text: impl Into<String>, now: Instant) -> Self {
        Self {
            text: text.into(),
            shown_at: now,
        }
    }

    /// 0.0 right after the reveal, 1.0 once the fade finished.
    pub fn opacity(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.shown_at);
        (elapsed.as_secs_f32() / REVEAL_FADE.as_secs_f32()).min(1.0)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.opacity(now) < 1.0
    }
}
