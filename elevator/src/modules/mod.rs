use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use log::{info, warn};

use shared_resources::config::Config;
use shared_resources::{FifoRequestQueue, SystemClock};

use crate::utilities::console_logger::PromptAwareLogger;
use crate::utilities::debug::StatusPrinter;
use crate::utilities::elevator::Elevator;

pub mod console;
pub mod controller;

use console::Command;
use controller::{ControllerSettings, ElevatorController};

pub fn run() -> anyhow::Result<()> {
    let logger = PromptAwareLogger::from_env().install()?;

    // READ CONFIGURATION
    let args: Vec<String> = env::args().collect();
    let config = Config::get(&args)?;

    // INITIALIZE CONTROLLER
    let elevator = Elevator::new(1, config.building.initial_floor, config.building.range)?;
    let controller = ElevatorController::new(
        elevator,
        FifoRequestQueue::new(),
        Arc::new(SystemClock),
        ControllerSettings::from(&config.timing),
    );
    controller.start()?;

    info!("elevator simulation started. type commands:");
    for line in console::USAGE {
        info!("{}", line);
    }

    let mut printer = StatusPrinter::new(io::stdout(), config.building.range);
    let mut lines = io::stdin().lock().lines();

    loop {
        logger.set_user_typing(true);
        print!("> ");
        io::stdout().flush()?;
        let line = lines.next();
        logger.set_user_typing(false);

        let line = match line {
            Some(line) => line?,
            None => break,
        };

        match console::parse(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => console::execute(&controller, command, &mut printer)?,
            Ok(None) => {},
            Err(e) => warn!("{}", e),
        }
    }

    info!("shutting down...");
    controller.stop();
    Ok(())
}
