use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! label_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

label_newtype!(ItemId);
label_newtype!(ZoneId);

/// Number of stages in the guided activity.
pub const STEP_COUNT: u8 = 7;

/// One-based position within the fixed step list. Always inside 1..=7.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct StepOrdinal(u8);

impl StepOrdinal {
    pub const FIRST: StepOrdinal = StepOrdinal(1);
    pub const LAST: StepOrdinal = StepOrdinal(STEP_COUNT);

    pub fn new(ordinal: u8) -> Result<Self, DomainError> {
        if (1..=STEP_COUNT).contains(&ordinal) {
            Ok(Self(ordinal))
        } else {
            Err(DomainError::OutOfRangeStep { ordinal })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into catalog storage.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn next(self) -> Option<Self> {
        (self.0 < STEP_COUNT).then_some(Self(self.0 + 1))
    }

    pub fn prev(self) -> Option<Self> {
        (self.0 > 1).then_some(Self(self.0 - 1))
    }

    pub fn is_last(self) -> bool {
        self.0 == STEP_COUNT
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (1..=STEP_COUNT).map(Self)
    }
}

impl std::fmt::Display for StepOrdinal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decorative animation attached to a step. Purely cosmetic; the core
/// never inspects these beyond carrying the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
    None,
    Steam,
    Bubbles,
    Bacteria,
    BacteriaMultiply,
    Snowflakes,
    Pouring,
}

/// Discrete fire-and-forget signal requesting decorative audio/visual
/// feedback from the presentation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCue {
    Pour,
    Stir,
    Drop,
    Success,
    Complete,
    Pronounce,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_accepts_full_range_and_nothing_else() {
        for n in 1..=STEP_COUNT {
            assert_eq!(StepOrdinal::new(n).expect("valid ordinal").get(), n);
        }
        assert!(matches!(
            StepOrdinal::new(0),
            Err(DomainError::OutOfRangeStep { ordinal: 0 })
        ));
        assert!(matches!(
            StepOrdinal::new(8),
            Err(DomainError::OutOfRangeStep { ordinal: 8 })
        ));
    }

    #[test]
    fn ordinal_navigation_stays_in_range() {
        assert_eq!(StepOrdinal::FIRST.prev(), None);
        assert_eq!(StepOrdinal::LAST.next(), None);
        assert_eq!(
            StepOrdinal::FIRST.next(),
            Some(StepOrdinal::new(2).expect("valid ordinal"))
        );
        assert_eq!(
            StepOrdinal::LAST.prev(),
            Some(StepOrdinal::new(6).expect("valid ordinal"))
        );
        assert!(StepOrdinal::LAST.is_last());
        assert_eq!(StepOrdinal::all().count(), usize::from(STEP_COUNT));
    }

    #[test]
    fn item_ids_compare_by_value() {
        assert_eq!(ItemId::new("hot-water"), ItemId::new("hot-water"));
        assert_ne!(ItemId::new("hot-water"), ItemId::new("cold-water"));
        assert_eq!(ZoneId::new("drop-zone").as_str(), "drop-zone");
    }
}
