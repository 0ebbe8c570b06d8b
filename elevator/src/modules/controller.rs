/// ----- CONTROLLER MODULE -----
/// Owns the car and the request queue. One worker thread drains the queue
/// in submission order, driving the car floor by floor and through its
/// door cycles. Callers on any thread submit requests; they never touch
/// the car except to read its floor under the same lock the worker uses.

use std::cmp;
use std::io;
use std::iter;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, unbounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, error, info, warn};
use parking_lot::Mutex;

use shared_resources::config::TimingConfig;
use shared_resources::{
    Direction, ElevatorRequest, Floor, FloorError, FloorRange, RequestQueue, StateError, TimeProvider,
};

use crate::utilities::elevator::{Elevator, ElevatorStatus};
use crate::utilities::stall::StallMonitor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    /// Time to travel a single floor.
    pub floor_travel: Duration,
    /// How long the door stays open at a stop.
    pub door_open: Duration,
    /// Stillness longer than this is reported as a possible stall.
    pub stall_timeout: Duration,
    /// Upper bound on an idle wait, so stall checks keep running.
    pub idle_wait: Duration,
}

impl From<&TimingConfig> for ControllerSettings {
    fn from(timing: &TimingConfig) -> Self {
        ControllerSettings {
            floor_travel: timing.floor_travel(),
            door_open: timing.door_open(),
            stall_timeout: timing.stall_timeout(),
            idle_wait: timing.idle_wait(),
        }
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        ControllerSettings::from(&TimingConfig::default())
    }
}

/// Why request handling stopped early.
enum Interrupt {
    Cancelled,
    Failed(StateError),
}

impl From<StateError> for Interrupt {
    fn from(e: StateError) -> Self {
        Interrupt::Failed(e)
    }
}

struct Shared {
    elevator: Mutex<Elevator>,
    queue: Box<dyn RequestQueue>,
    clock: Arc<dyn TimeProvider>,
    settings: ControllerSettings,
    range: FloorRange,
    stall: Mutex<StallMonitor>,
    stopping: AtomicBool,
    request_signal_rx: Receiver<()>,
    // never receives a message; disconnects when the controller stops
    cancel_rx: Receiver<()>,
    subscribers: Mutex<Vec<Sender<ElevatorStatus>>>,
}

pub struct ElevatorController {
    shared: Arc<Shared>,
    request_signal_tx: Sender<()>,
    cancel_tx: Mutex<Option<Sender<()>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ElevatorController {
    pub fn new(
        elevator: Elevator,
        queue: impl RequestQueue + 'static,
        clock: Arc<dyn TimeProvider>,
        settings: ControllerSettings,
    ) -> Self {
        let (request_signal_tx, request_signal_rx) = bounded(1);
        let (cancel_tx, cancel_rx) = bounded(0);
        let stall = StallMonitor::new(clock.now(), settings.stall_timeout);

        ElevatorController {
            shared: Arc::new(Shared {
                range: elevator.range(),
                elevator: Mutex::new(elevator),
                queue: Box::new(queue),
                clock,
                settings,
                stall: Mutex::new(stall),
                stopping: AtomicBool::new(false),
                request_signal_rx,
                cancel_rx,
                subscribers: Mutex::new(Vec::new()),
            }),
            request_signal_tx,
            cancel_tx: Mutex::new(Some(cancel_tx)),
            worker: Mutex::new(None),
        }
    }

    /// Launches the worker thread. Does nothing if it is already running.
    pub fn start(&self) -> io::Result<()> {
        let mut worker = self.worker.lock();
        if worker.is_some() {
            return Ok(());
        }
        if self.shared.stopping.load(Ordering::SeqCst) {
            warn!("controller has been stopped, not starting a new worker");
            return Ok(());
        }

        let shared = Arc::clone(&self.shared);
        *worker = Some(
            thread::Builder::new()
                .name("controller".to_string())
                .spawn(move || shared.run())?,
        );
        Ok(())
    }

    /// Cancels the worker and waits for it to exit. Safe to call repeatedly.
    pub fn stop(&self) {
        self.shared.stopping.store(true, Ordering::SeqCst);
        drop(self.cancel_tx.lock().take());

        let mut worker = self.worker.lock();
        if let Some(handle) = worker.take() {
            if handle.join().is_err() {
                error!("controller worker panicked");
            }
        }
    }

    /// Hall call from `floor`. Returns once the request is queued.
    pub fn request_elevator(&self, floor: i32, direction: Direction) -> Result<(), FloorError> {
        let pickup = self.shared.range.floor(floor)?;
        let request = ElevatorRequest::pickup(pickup, direction, self.shared.clock.now());
        info!("elevator requested: {}", request);
        self.submit(request);
        Ok(())
    }

    /// Destination chosen inside the car. The pickup is wherever the car is now.
    pub fn add_destination(&self, floor: i32) -> Result<(), FloorError> {
        let destination = self.shared.range.floor(floor)?;
        let current = self.shared.elevator.lock().current_floor();
        let request = ElevatorRequest::destination(current, destination, self.shared.clock.now());
        info!("destination added: {}", request);
        self.submit(request);
        Ok(())
    }

    fn submit(&self, request: ElevatorRequest) {
        self.shared.queue.enqueue(request);
        // a full signal channel already has a wakeup pending
        self.request_signal_tx.try_send(()).ok();
    }

    pub fn status(&self) -> ElevatorStatus {
        self.shared.status()
    }

    pub fn pending_requests(&self) -> Vec<ElevatorRequest> {
        self.shared.queue.snapshot()
    }

    pub fn range(&self) -> FloorRange {
        self.shared.range
    }

    /// How long the car has been still, once that passes the stall timeout.
    pub fn stalled_for(&self) -> Option<Duration> {
        self.shared.stall.lock().check(self.shared.clock.now())
    }

    /// Receives a status after every transition the worker makes.
    pub fn subscribe(&self) -> Receiver<ElevatorStatus> {
        let (status_tx, status_rx) = unbounded();
        self.shared.subscribers.lock().push(status_tx);
        status_rx
    }
}

impl Drop for ElevatorController {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Shared {
    fn run(&self) {
        info!("controller worker started");

        while !self.cancelled() {
            if self.queue.count() == 0 {
                self.detect_stall();
                debug!("no pending requests, waiting...");
                self.wait_for_request();
                continue;
            }

            let request = match self.queue.try_dequeue() {
                Some(request) => request,
                None => continue,
            };

            match self.handle_request(&request) {
                Ok(()) => {},
                Err(Interrupt::Cancelled) => debug!("shutdown interrupted request: {}", request),
                Err(Interrupt::Failed(e)) => {
                    error!("error while handling request {}: {}", request, e);
                    self.settle();
                },
            }
        }

        let discarded = self.queue.count();
        if discarded > 0 {
            info!("discarding {} unserviced requests", discarded);
        }
        info!("controller worker stopped");
    }

    fn cancelled(&self) -> bool {
        self.stopping.load(Ordering::SeqCst)
    }

    fn wait_for_request(&self) {
        select! {
            recv(self.request_signal_rx) -> _ => {},
            recv(self.cancel_rx) -> _ => {},
            default(self.settings.idle_wait) => {},
        }
    }

    /// Sleeps for `duration` unless the controller is stopped first.
    fn pause(&self, duration: Duration) -> Result<(), Interrupt> {
        match self.cancel_rx.recv_timeout(duration) {
            Err(RecvTimeoutError::Timeout) => Ok(()),
            _ => Err(Interrupt::Cancelled),
        }
    }

    fn handle_request(&self, request: &ElevatorRequest) -> Result<(), Interrupt> {
        info!("handling request: {}", request);

        let floors = iter::once(request.pickup_floor()).chain(request.destination_floor());
        for floor in floors {
            if !self.range.contains(floor) {
                return Err(StateError::Unreachable { floor, range: self.range }.into());
            }
        }

        self.move_to_floor(request.pickup_floor())?;
        self.door_cycle()?;

        if let Some(destination) = request.destination_floor() {
            self.move_to_floor(destination)?;
            self.door_cycle()?;
        }
        Ok(())
    }

    fn move_to_floor(&self, target: Floor) -> Result<(), Interrupt> {
        loop {
            if self.cancelled() {
                return Err(Interrupt::Cancelled);
            }

            let status = {
                let mut elevator = self.elevator.lock();
                let (direction, floor) = match elevator.current_floor().cmp(&target) {
                    cmp::Ordering::Equal => break,
                    cmp::Ordering::Less => (Direction::Up, elevator.move_up()?),
                    cmp::Ordering::Greater => (Direction::Down, elevator.move_down()?),
                };
                self.stall.lock().record_movement(self.clock.now());
                info!("elevator moved {} to floor {}", direction, floor);
                elevator.status(self.queue.count())
            };
            self.publish(status);

            self.pause(self.settings.floor_travel)?;
        }

        let status = {
            let mut elevator = self.elevator.lock();
            elevator.halt();
            elevator.status(self.queue.count())
        };
        self.publish(status);
        info!("elevator arrived at floor {}", target);
        Ok(())
    }

    fn door_cycle(&self) -> Result<(), Interrupt> {
        let status = {
            let mut elevator = self.elevator.lock();
            elevator.open_door();
            info!("door opened at floor {}", elevator.current_floor());
            elevator.status(self.queue.count())
        };
        self.publish(status);

        self.pause(self.settings.door_open)?;

        let status = {
            let mut elevator = self.elevator.lock();
            elevator.close_door();
            info!("door closed at floor {}", elevator.current_floor());
            elevator.status(self.queue.count())
        };
        self.publish(status);
        Ok(())
    }

    /// Leaves a failed request with the car stopped where it is.
    fn settle(&self) {
        let status = {
            let mut elevator = self.elevator.lock();
            elevator.halt();
            elevator.status(self.queue.count())
        };
        self.publish(status);
    }

    fn detect_stall(&self) {
        if let Some(still_for) = self.stall.lock().check(self.clock.now()) {
            warn!(
                "elevator might be stuck, no movement for {:.1} seconds",
                still_for.as_secs_f64()
            );
        }
    }

    fn status(&self) -> ElevatorStatus {
        self.elevator.lock().status(self.queue.count())
    }

    fn publish(&self, status: ElevatorStatus) {
        self.subscribers.lock().retain(|status_tx| status_tx.send(status.clone()).is_ok());
    }
}
