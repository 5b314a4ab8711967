//! RoundTimer: whole-second countdown for the open round.
//!
//! The countdown is plain data; something outside (see `scheduler`) calls `tick` once per
//! second. Reaching zero only stops the countdown, it never closes the round.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundTimer {
    /// Configured length of the current countdown; 0 means the timer is disabled.
    total_seconds: u64,
    seconds_remaining: u64,
    running: bool,
    /// Bumped on every start/stop so ticks scheduled for an older countdown can be ignored.
    generation: u64,
}

impl RoundTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds for a (hours, minutes) duration: negative hours count as 0, minutes clamp to 0..=59.
    pub fn duration_secs(hours: i32, minutes: i32) -> u64 {
        let hours = hours.max(0) as u64;
        let minutes = minutes.clamp(0, 59) as u64;
        hours * 3600 + minutes * 60
    }

    /// Begin a fresh countdown. A zero duration leaves the timer disabled (not running).
    pub fn start(&mut self, hours: i32, minutes: i32) {
        let total = Self::duration_secs(hours, minutes);
        self.total_seconds = total;
        self.seconds_remaining = total;
        self.running = total > 0;
        self.generation += 1;
    }

    /// One second elapsed. Returns true if the countdown changed.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.running = false;
        }
        true
    }

    /// Stop ticking. Idempotent: stopping a stopped timer changes nothing.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.generation += 1;
        }
    }

    /// Back to a disabled countdown, invalidating any scheduled ticks.
    pub fn clear(&mut self) {
        self.total_seconds = 0;
        self.seconds_remaining = 0;
        self.running = false;
        self.generation += 1;
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.seconds_remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_disabled(&self) -> bool {
        self.total_seconds == 0
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `H:MM:SS` when at least an hour remains, else `M:SS`. None when disabled.
    pub fn formatted_remaining(&self) -> Option<String> {
        if self.is_disabled() {
            return None;
        }
        Some(format_seconds(self.seconds_remaining))
    }
}

pub fn format_seconds(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
