use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{SecondsFormat, Utc};
use env_logger::{Env, Target};
use log::{Log, Metadata, Record, SetLoggerError};
use parking_lot::Mutex;

/// Wraps the `env_logger` logger and holds lines back while the user is
/// typing at the prompt, so log output does not split their input.
pub struct PromptAwareLogger {
    inner: env_logger::Logger,
    typing: AtomicBool,
    buffer: Mutex<Vec<String>>,
}

pub fn format_line(record: &Record) -> String {
    format!(
        "{} [{:<5}] {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        record.level(),
        record.args()
    )
}

impl PromptAwareLogger {
    pub fn new(inner: env_logger::Logger) -> Self {
        PromptAwareLogger {
            inner,
            typing: AtomicBool::new(false),
            buffer: Mutex::new(Vec::new()),
        }
    }

    /// Filter from `RUST_LOG`, `info` when unset.
    pub fn from_env() -> Self {
        let inner = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
            .target(Target::Stdout)
            .format(|buf, record| writeln!(buf, "{}", format_line(record)))
            .build();
        PromptAwareLogger::new(inner)
    }

    pub fn install(self) -> Result<&'static PromptAwareLogger, SetLoggerError> {
        let max_level = self.inner.filter();
        let logger: &'static PromptAwareLogger = Box::leak(Box::new(self));
        log::set_logger(logger)?;
        log::set_max_level(max_level);
        Ok(logger)
    }

    /// Ending a typing session prints everything held back, in order.
    pub fn set_user_typing(&self, typing: bool) {
        let mut buffer = self.buffer.lock();
        self.typing.store(typing, Ordering::SeqCst);
        if typing {
            return;
        }

        let mut stdout = io::stdout().lock();
        for line in buffer.drain(..) {
            writeln!(stdout, "{}", line).ok();
        }
        stdout.flush().ok();
    }

    #[cfg(test)]
    fn buffered(&self) -> usize {
        self.buffer.lock().len()
    }
}

impl Log for PromptAwareLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.inner.matches(record) {
            return;
        }
        let mut buffer = self.buffer.lock();
        if self.typing.load(Ordering::SeqCst) {
            buffer.push(format_line(record));
            return;
        }
        drop(buffer);
        self.inner.log(record);
    }

    fn flush(&self) {
        self.inner.flush();
    }
}
