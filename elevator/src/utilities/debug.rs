use std::io::{self, Write};
use std::time::Duration;

use crossterm::{terminal, ExecutableCommand};

use shared_resources::{ElevatorRequest, FloorRange};

use super::elevator::ElevatorStatus;

/// Prints the car and its pending requests as a table.
pub struct StatusPrinter<W: Write> {
    out: W,
    range: FloorRange,
}

impl<W: Write> StatusPrinter<W> {
    pub fn new(out: W, range: FloorRange) -> Self {
        StatusPrinter { out, range }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn print_status(
        &mut self,
        status: &ElevatorStatus,
        pending: &[ElevatorRequest],
        stalled_for: Option<Duration>,
    ) -> io::Result<()> {
        self.out.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;

        writeln!(self.out, "+------------+------------+------------+------------+")?;
        writeln!(self.out, "| {0:<10} | {1:<10} | {2:<10} | {3:<10} |", "FLOOR", "CAR", "PICKUPS", "DROPOFFS")?;
        for floor in self.range.iter().rev() {
            let pickups = pending.iter().filter(|r| r.pickup_floor() == floor).count();
            let dropoffs = pending.iter().filter(|r| r.destination_floor() == Some(floor)).count();
            let car = if status.floor == floor { "[#]" } else { "" };
            writeln!(self.out, "+------------+------------+------------+------------+")?;
            writeln!(self.out, "| {0:<10} | {1:<10} | {2:<10} | {3:<10} |", floor, car, pickups, dropoffs)?;
        }
        writeln!(self.out, "+------------+------------+------------+------------+\n")?;

        writeln!(self.out, "+-------------------------+")?;
        writeln!(self.out, "| STATE MACHINE           |")?;
        writeln!(self.out, "+------------+------------+")?;
        writeln!(self.out, "| {0:<10} | {1:<10} |", "STATE", status.state.as_str())?;
        writeln!(self.out, "+------------+------------+")?;
        writeln!(self.out, "| {0:<10} | {1:<10} |", "FLOOR", status.floor)?;
        writeln!(self.out, "+------------+------------+")?;
        writeln!(self.out, "| {0:<10} | {1:<10} |", "PENDING", status.pending_requests)?;
        writeln!(self.out, "+------------+------------+")?;
        let stalled = match stalled_for {
            Some(still_for) => format!("{:.1}s", still_for.as_secs_f64()),
            None => String::from("no"),
        };
        writeln!(self.out, "| {0:<10} | {1:<10} |", "STALLED", stalled)?;
        writeln!(self.out, "+------------+------------+")?;
        self.out.flush()
    }
}
