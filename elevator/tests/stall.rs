use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

use elevator::{ControllerSettings, Elevator, ElevatorController};
use shared_resources::{FifoRequestQueue, Floor, FloorRange, ManualClock};

struct WarningLog {
    lines: Mutex<Vec<String>>,
}

impl Log for WarningLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.lines.lock().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static WARNINGS: WarningLog = WarningLog {
    lines: parking_lot::const_mutex(Vec::new()),
};

fn stall_warnings() -> usize {
    WARNINGS.lines.lock().iter().filter(|line| line.contains("might be stuck")).count()
}

#[test]
fn idle_worker_warns_once_the_car_has_been_still_too_long() {
    log::set_logger(&WARNINGS).unwrap();
    log::set_max_level(LevelFilter::Warn);

    let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let elevator = Elevator::new(1, Floor::new(1).unwrap(), FloorRange::default()).unwrap();
    let settings = ControllerSettings {
        floor_travel: Duration::from_millis(5),
        door_open: Duration::from_millis(5),
        stall_timeout: Duration::from_secs(10),
        idle_wait: Duration::from_millis(10),
    };
    let controller = ElevatorController::new(elevator, FifoRequestQueue::new(), clock.clone(), settings);
    controller.start().unwrap();

    // several idle checks inside the threshold
    thread::sleep(Duration::from_millis(60));
    assert_eq!(stall_warnings(), 0);

    clock.advance(chrono::Duration::seconds(11));
    let deadline = Instant::now() + Duration::from_secs(5);
    while stall_warnings() == 0 {
        assert!(Instant::now() < deadline, "idle worker never checked for a stall");
        thread::sleep(Duration::from_millis(10));
    }

    controller.stop();
}
