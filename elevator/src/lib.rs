//! Single-car elevator simulation: the car's state machine, the controller
//! that services requests in arrival order, and the console that feeds it.

pub mod modules;
pub mod utilities;

pub use modules::controller::{ControllerSettings, ElevatorController};
pub use utilities::elevator::{Elevator, ElevatorState, ElevatorStatus};
