pub mod console_logger;
pub mod debug;
pub mod elevator;
pub mod stall;
