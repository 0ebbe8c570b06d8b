use std::fmt;

use crate::error::FloorError;

pub const DEFAULT_MIN_FLOOR: i32 = 1;
pub const DEFAULT_MAX_FLOOR: i32 = 10;

/// A floor number known to lie inside the building it was validated against.
///
/// The only way to get one is through [`FloorRange::floor`] (or [`Floor::new`]
/// for the default building), so holding a `Floor` means the bounds check
/// already happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Floor(i32);

impl Floor {
    /// Validates `value` against the default building range.
    pub fn new(value: i32) -> Result<Self, FloorError> {
        FloorRange::default().floor(value)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Inclusive span of floors served by the building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorRange {
    min: i32,
    max: i32,
}

impl FloorRange {
    pub fn new(min: i32, max: i32) -> Result<Self, FloorError> {
        if min > max {
            return Err(FloorError::EmptyRange { min, max });
        }
        Ok(FloorRange { min, max })
    }

    pub fn floor(&self, value: i32) -> Result<Floor, FloorError> {
        if value < self.min || value > self.max {
            return Err(FloorError::OutOfRange {
                floor: value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(Floor(value))
    }

    pub fn contains(&self, floor: Floor) -> bool {
        self.min <= floor.0 && floor.0 <= self.max
    }

    pub fn lowest(&self) -> Floor {
        Floor(self.min)
    }

    pub fn highest(&self) -> Floor {
        Floor(self.max)
    }

    pub fn above(&self, floor: Floor) -> Option<Floor> {
        self.floor(floor.0.checked_add(1)?).ok()
    }

    pub fn below(&self, floor: Floor) -> Option<Floor> {
        self.floor(floor.0.checked_sub(1)?).ok()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Floor> {
        (self.min..=self.max).map(Floor)
    }
}

impl fmt::Display for FloorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

impl Default for FloorRange {
    fn default() -> Self {
        FloorRange {
            min: DEFAULT_MIN_FLOOR,
            max: DEFAULT_MAX_FLOOR,
        }
    }
}
