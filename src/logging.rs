use std::{
    fs, io,
    sync::{Mutex, MutexGuard},
};

use anyhow::Context;
use tracing_subscriber::{filter::LevelFilter, prelude::*};

/// Holds the log file lock for the duration of one write.
struct MutexGuardWriter<'a, W>(MutexGuard<'a, W>);

impl<W: io::Write> io::Write for MutexGuardWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

struct LogWriterBuilder {
    log_file: Option<Mutex<fs::File>>,
    to_stderr: bool,
}

impl<'writer> tracing_subscriber::fmt::MakeWriter<'writer> for LogWriterBuilder {
    type Writer = Box<dyn io::Write + 'writer>;

    fn make_writer(&'writer self) -> Self::Writer {
        if let Some(log_file) = &self.log_file {
            let guard = log_file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            Box::new(MutexGuardWriter(guard))
        } else if self.to_stderr {
            Box::new(io::stderr())
        } else {
            // the interactive front-ends own the terminal
            Box::new(io::empty())
        }
    }
}

pub fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber. Logs go to `log_file` when given, else to
/// stderr when `to_stderr` is set, else nowhere.
pub fn init(log_file: Option<&str>, verbose: u8, to_stderr: bool) -> anyhow::Result<()> {
    let log_writer_builder = LogWriterBuilder {
        log_file: match log_file {
            Some(path) => Some(Mutex::new(
                fs::File::create(path).with_context(|| format!("unable to create log file {path}"))?,
            )),
            None => None,
        },
        to_stderr,
    };

    tracing_subscriber::registry::Registry::default()
        .with(level_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(log_writer_builder),
        )
        .try_init()
        .context("installing log subscriber")?;
    Ok(())
}
