//! Domain types shared by the elevator controller and its front ends.

pub mod config;
pub mod direction;
pub mod error;
pub mod floor;
pub mod request;
pub mod request_queue;
pub mod time;

pub use direction::Direction;
pub use error::{ConfigError, FloorError, StateError};
pub use floor::{Floor, FloorRange};
pub use request::ElevatorRequest;
pub use request_queue::{FifoRequestQueue, RequestQueue};
pub use time::{ManualClock, SystemClock, TimeProvider};
