//! Haptic feedback patterns.
//!
//! Patterns are alternating vibrate/pause durations in milliseconds, the
//! shape the platform vibration call expects.

#[cfg(test)]
#[path = "haptics_test.rs"]
mod haptics_test;

use crate::announcer::Announcer;
use crate::notice::{Notice, NoticeBoard};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VibrationPattern {
    /// Single vibration.
    #[default]
    Basic,
    /// Triple pulse.
    Attention,
    /// Ascending.
    Success,
    /// Double long.
    Warning,
    /// Triple long.
    Error,
}

impl VibrationPattern {
    pub const ALL: [VibrationPattern; 5] = [
        VibrationPattern::Basic,
        VibrationPattern::Attention,
        VibrationPattern::Success,
        VibrationPattern::Warning,
        VibrationPattern::Error,
    ];

    #[must_use]
    pub fn durations(self) -> &'static [u32] {
        match self {
            Self::Basic => &[200],
            Self::Attention => &[100, 50, 100, 50, 100],
            Self::Success => &[100, 50, 100, 50, 300],
            Self::Warning => &[300, 100, 300],
            Self::Error => &[500, 100, 500, 100, 500],
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Attention => "attention",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pattern| pattern.as_str() == raw)
    }

    fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Attention => "Attention",
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// Platform vibration seam.
pub trait Vibrator {
    /// Whether the device can vibrate at all.
    fn supported(&self) -> bool;

    /// Start a pattern. Returns `false` if the platform refused it.
    fn vibrate(&mut self, durations: &[u32]) -> bool;
}

/// Play `pattern` and narrate the result. Returns whether it played.
pub fn activate<V: Vibrator + ?Sized>(
    vibrator: &mut V,
    pattern: VibrationPattern,
    announcer: &Announcer,
    notices: &NoticeBoard,
) -> bool {
    if !vibrator.supported() || !vibrator.vibrate(pattern.durations()) {
        notices.push(Notice::new("Not Supported", "Haptic feedback is not supported on this device", 3000).destructive());
        return false;
    }
    notices.push(Notice::new("Haptic Feedback", format!("{} vibration pattern activated", pattern.label()), 2000));
    announcer.announce(format!("{} vibration pattern activated", pattern.as_str()));
    true
}
