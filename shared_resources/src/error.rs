use std::io;

use thiserror::Error;

use crate::direction::Direction;
use crate::floor::{Floor, FloorRange};

/// Rejected floor input, either from a caller or from the building configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorError {
    #[error("floor {floor} is outside the building range {min}..={max}")]
    OutOfRange { floor: i32, min: i32, max: i32 },

    #[error("building range {min}..={max} contains no floors")]
    EmptyRange { min: i32, max: i32 },
}

/// A transition the car refused to make.
///
/// The controller checks before moving, so seeing one of these means an
/// invariant was broken somewhere upstream.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    #[error("cannot move while doors are open at floor {floor}")]
    DoorsOpen { floor: Floor },

    #[error("cannot move {direction} from floor {floor}, it is the last floor in that direction")]
    OutOfBounds { floor: Floor, direction: Direction },

    #[error("floor {floor} is outside the floors {range} served by this car")]
    Unreachable { floor: Floor, range: FloorRange },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed configuration file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid building configuration: {0}")]
    Building(#[from] FloorError),

    #[error("timing.{field} must be greater than zero")]
    ZeroTiming { field: &'static str },
}
