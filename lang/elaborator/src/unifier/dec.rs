use std::fmt;

/// The outcome of comparing two terms.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Yes,
    No,
    /// The comparison could not be decided yet.
    Maybe,
}

pub use Decision::*;

impl Decision {
    /// Both comparisons hold. A failure wins over an undecided comparison.
    pub fn and(self, other: Decision) -> Decision {
        match (self, other) {
            (No, _) | (_, No) => No,
            (Maybe, _) | (_, Maybe) => Maybe,
            (Yes, Yes) => Yes,
        }
    }
}

impl From<bool> for Decision {
    fn from(b: bool) -> Self {
        if b { Yes } else { No }
    }
}

impl fmt::Debug for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => f.debug_tuple("Yes").finish(),
            Self::No => f.debug_tuple("No").finish(),
            Self::Maybe => f.debug_tuple("Maybe").finish(),
        }
    }
}
