//! Narrative progress marker.

/// Narrative stage. Only ever moves forward.
///
/// `Climax` is reserved: nothing in the script enters it yet, but the ordering
/// keeps it above every reachable stage so guards stay monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Stage {
    #[default]
    Boot,
    Interaction,
    Escalating,
    Climax,
}

impl Stage {
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Boot => 0,
            Self::Interaction => 1,
            Self::Escalating => 2,
            Self::Climax => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Boot => "boot",
            Self::Interaction => "interaction",
            Self::Escalating => "escalating",
            Self::Climax => "climax",
        }
    }

    /// Move to `target` if it lies ahead of the current stage.
    ///
    /// Returns `true` when the stage changed. Requests to move backwards or to
    /// stay put are ignored.
    pub fn advance_to(&mut self, target: Stage) -> bool {
        if *self < target {
            *self = target;
            true
        } else {
            false
        }
    }
}
