use shared_resources::{Direction, Floor, FloorError, FloorRange, StateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorState {
    Idle,
    MovingUp,
    MovingDown,
    DoorOpen,
}

impl ElevatorState {
    pub fn as_str(self) -> &'static str {
        match self {
            ElevatorState::Idle => "idle",
            ElevatorState::MovingUp => "movingUp",
            ElevatorState::MovingDown => "movingDown",
            ElevatorState::DoorOpen => "doorOpen",
        }
    }

    pub fn is_moving(self) -> bool {
        matches!(self, ElevatorState::MovingUp | ElevatorState::MovingDown)
    }
}

/// Point-in-time copy of the car, published after every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevatorStatus {
    pub id: u32,
    pub floor: Floor,
    pub state: ElevatorState,
    pub target_floors: Vec<Floor>,
    pub pending_requests: usize,
}

/// A single car. Knows nothing about threads; every change goes through
/// one of the transition methods below.
#[derive(Debug, Clone)]
pub struct Elevator {
    id: u32,
    range: FloorRange,
    floor: Floor,
    state: ElevatorState,
    target_floors: Vec<Floor>,
}

impl Elevator {
    pub fn new(id: u32, initial_floor: Floor, range: FloorRange) -> Result<Self, FloorError> {
        let floor = range.floor(initial_floor.value())?;
        Ok(Elevator {
            id,
            range,
            floor,
            state: ElevatorState::Idle,
            target_floors: Vec::new(),
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn range(&self) -> FloorRange {
        self.range
    }

    pub fn current_floor(&self) -> Floor {
        self.floor
    }

    pub fn state(&self) -> ElevatorState {
        self.state
    }

    pub fn target_floors(&self) -> &[Floor] {
        &self.target_floors
    }

    pub fn move_up(&mut self) -> Result<Floor, StateError> {
        self.step(Direction::Up)
    }

    pub fn move_down(&mut self) -> Result<Floor, StateError> {
        self.step(Direction::Down)
    }

    fn step(&mut self, direction: Direction) -> Result<Floor, StateError> {
        if self.state == ElevatorState::DoorOpen {
            return Err(StateError::DoorsOpen { floor: self.floor });
        }
        let next = match direction {
            Direction::Up => self.range.above(self.floor),
            Direction::Down => self.range.below(self.floor),
        };
        let next = next.ok_or(StateError::OutOfBounds {
            floor: self.floor,
            direction,
        })?;

        self.state = match direction {
            Direction::Up => ElevatorState::MovingUp,
            Direction::Down => ElevatorState::MovingDown,
        };
        self.floor = next;
        Ok(next)
    }

    /// Returns a moving car to idle. No-op in any other state.
    pub fn halt(&mut self) {
        if self.state.is_moving() {
            self.state = ElevatorState::Idle;
        }
    }

    pub fn open_door(&mut self) {
        self.state = ElevatorState::DoorOpen;
    }

    pub fn close_door(&mut self) {
        if self.state == ElevatorState::DoorOpen {
            self.state = ElevatorState::Idle;
        }
    }

    pub fn add_target_floor(&mut self, floor: Floor) {
        if floor == self.floor || self.target_floors.contains(&floor) {
            return;
        }
        self.target_floors.push(floor);
    }

    pub fn remove_target_floor(&mut self, floor: Floor) {
        self.target_floors.retain(|f| *f != floor);
    }

    pub fn status(&self, pending_requests: usize) -> ElevatorStatus {
        ElevatorStatus {
            id: self.id,
            floor: self.floor,
            state: self.state,
            target_floors: self.target_floors.clone(),
            pending_requests,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn floor(value: i32) -> Floor {
        Floor::new(value).unwrap()
    }

    fn elevator_at(value: i32) -> Elevator {
        Elevator::new(1, floor(value), FloorRange::default()).unwrap()
    }

    #[test]
    fn move_up_increments_floor_and_sets_state() {
        let mut elevator = elevator_at(1);
        assert_eq!(elevator.move_up(), Ok(floor(2)));
        assert_eq!(elevator.current_floor(), floor(2));
        assert_eq!(elevator.state(), ElevatorState::MovingUp);
    }

    #[test]
    fn move_down_decrements_floor_and_sets_state() {
        let mut elevator = elevator_at(5);
        assert_eq!(elevator.move_down(), Ok(floor(4)));
        assert_eq!(elevator.state(), ElevatorState::MovingDown);
    }

    #[test]
    fn cannot_leave_the_building() {
        let mut top = elevator_at(10);
        assert_eq!(
            top.move_up(),
            Err(StateError::OutOfBounds { floor: floor(10), direction: Direction::Up })
        );
        assert_eq!(top.current_floor(), floor(10));
        assert_eq!(top.state(), ElevatorState::Idle);

        let mut bottom = elevator_at(1);
        assert!(matches!(bottom.move_down(), Err(StateError::OutOfBounds { .. })));
        assert_eq!(bottom.current_floor(), floor(1));
    }

    #[test]
    fn cannot_move_with_doors_open() {
        let mut elevator = elevator_at(3);
        elevator.open_door();
        assert_eq!(elevator.move_up(), Err(StateError::DoorsOpen { floor: floor(3) }));
        assert_eq!(elevator.move_down(), Err(StateError::DoorsOpen { floor: floor(3) }));
        assert_eq!(elevator.current_floor(), floor(3));
    }

    #[test]
    fn door_cycle_returns_to_idle() {
        let mut elevator = elevator_at(3);
        elevator.open_door();
        elevator.open_door();
        assert_eq!(elevator.state(), ElevatorState::DoorOpen);
        elevator.close_door();
        assert_eq!(elevator.state(), ElevatorState::Idle);
    }

    #[test]
    fn close_door_without_open_is_noop() {
        let mut elevator = elevator_at(3);
        elevator.move_up().unwrap();
        elevator.close_door();
        assert_eq!(elevator.state(), ElevatorState::MovingUp);
    }

    #[test]
    fn halt_only_affects_a_moving_car() {
        let mut elevator = elevator_at(3);
        elevator.move_down().unwrap();
        elevator.halt();
        assert_eq!(elevator.state(), ElevatorState::Idle);

        elevator.open_door();
        elevator.halt();
        assert_eq!(elevator.state(), ElevatorState::DoorOpen);
    }

    #[test]
    fn target_floors_skip_current_and_duplicates() {
        let mut elevator = elevator_at(3);
        elevator.add_target_floor(floor(3));
        elevator.add_target_floor(floor(8));
        elevator.add_target_floor(floor(5));
        elevator.add_target_floor(floor(8));
        assert_eq!(elevator.target_floors(), &[floor(8), floor(5)]);

        elevator.remove_target_floor(floor(8));
        elevator.remove_target_floor(floor(9));
        assert_eq!(elevator.target_floors(), &[floor(5)]);
    }

    #[test]
    fn initial_floor_must_fit_the_building() {
        let small = FloorRange::new(1, 4).unwrap();
        assert!(Elevator::new(1, floor(7), small).is_err());
    }

    proptest! {
        #[test]
        fn move_up_below_the_top_lands_one_floor_higher(start in 1i32..10) {
            let mut elevator = elevator_at(start);
            prop_assert_eq!(elevator.move_up(), Ok(floor(start + 1)));
            prop_assert_eq!(elevator.state(), ElevatorState::MovingUp);
        }
    }
}
