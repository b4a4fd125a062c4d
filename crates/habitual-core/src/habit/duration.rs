use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Largest selectable number of hours.
pub const MAX_HOURS: u8 = 3;

/// Selectable minute values.
pub const MINUTE_STEPS: [u8; 4] = [0, 15, 30, 45];

/// Time a habit takes per occurrence.
///
/// Hours range over `0..=3` and minutes over [`MINUTE_STEPS`]. A zero
/// duration is representable here (it is the empty form value) and is
/// rejected when a habit is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDuration")]
pub struct HabitDuration {
    hours: u8,
    minutes: u8,
}

#[derive(Deserialize)]
struct RawDuration {
    hours: u8,
    minutes: u8,
}

impl TryFrom<RawDuration> for HabitDuration {
    type Error = ValidationError;

    fn try_from(raw: RawDuration) -> Result<Self, Self::Error> {
        HabitDuration::new(raw.hours, raw.minutes)
    }
}

impl HabitDuration {
    pub fn new(hours: u8, minutes: u8) -> Result<Self, ValidationError> {
        if hours > MAX_HOURS || !MINUTE_STEPS.contains(&minutes) {
            return Err(ValidationError::InvalidDuration { hours, minutes });
        }
        Ok(Self { hours, minutes })
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0
    }

    pub fn total_minutes(&self) -> u32 {
        u32::from(self.hours) * 60 + u32::from(self.minutes)
    }
}
