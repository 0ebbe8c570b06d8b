use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use super::direction::Direction;
use super::floor::Floor;

/// A passenger request: where to pick up and, for in-car selections, where to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevatorRequest {
    pickup_floor: Floor,
    direction: Direction,
    destination_floor: Option<Floor>,
    created_at: DateTime<Utc>,
}

impl ElevatorRequest {
    /// A hall call from `floor`, with no destination.
    pub fn pickup(floor: Floor, direction: Direction, created_at: DateTime<Utc>) -> Self {
        ElevatorRequest {
            pickup_floor: floor,
            direction,
            destination_floor: None,
            created_at,
        }
    }

    /// A destination chosen inside the car while it stands at `current`.
    pub fn destination(current: Floor, destination: Floor, created_at: DateTime<Utc>) -> Self {
        ElevatorRequest {
            pickup_floor: current,
            direction: Direction::towards(current, destination),
            destination_floor: Some(destination),
            created_at,
        }
    }

    pub fn pickup_floor(&self) -> Floor {
        self.pickup_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn destination_floor(&self) -> Option<Floor> {
        self.destination_floor
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl fmt::Display for ElevatorRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pickup={}, dest=", self.pickup_floor)?;
        match self.destination_floor {
            Some(floor) => write!(f, "{}", floor)?,
            None => f.write_str("-")?,
        }
        write!(
            f,
            ", dir={}, at={}",
            self.direction,
            self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn destination_infers_direction_from_current_floor() {
        let request = ElevatorRequest::destination(Floor::new(7).unwrap(), Floor::new(3).unwrap(), noon());
        assert_eq!(request.pickup_floor().value(), 7);
        assert_eq!(request.destination_floor(), Some(Floor::new(3).unwrap()));
        assert_eq!(request.direction(), Direction::Down);

        let request = ElevatorRequest::destination(Floor::new(2).unwrap(), Floor::new(9).unwrap(), noon());
        assert_eq!(request.direction(), Direction::Up);
    }

    #[test]
    fn renders_for_logs() {
        let pickup = ElevatorRequest::pickup(Floor::new(5).unwrap(), Direction::Up, noon());
        assert_eq!(pickup.to_string(), "pickup=5, dest=-, dir=up, at=2024-03-01T12:00:00.000Z");

        let destination = ElevatorRequest::destination(Floor::new(4).unwrap(), Floor::new(1).unwrap(), noon());
        assert_eq!(destination.to_string(), "pickup=4, dest=1, dir=down, at=2024-03-01T12:00:00.000Z");
    }
}
