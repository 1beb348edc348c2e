//! Diagnostics file for native runs: `general.log`, truncated at startup, one
//! microsecond-stamped line per record.

use chrono::{Local, NaiveTime};
use log::{LevelFilter, Record};
use std::fs::File;
use std::io::{self, Write};

pub const GENERAL_LOG_PATH: &str = "general.log";

pub fn write_record<W: Write>(out: &mut W, time: NaiveTime, record: &Record) -> io::Result<()> {
    writeln!(
        out,
        "{} {:<5} {}",
        time.format("%H:%M:%S%.6f"),
        record.level(),
        record.args()
    )
}

/// Installs `env_logger` writing to [`GENERAL_LOG_PATH`]. Falls back to stderr when the
/// file cannot be created. `RUST_LOG` still overrides the default `info` level.
pub fn init() {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| write_record(buf, Local::now().time(), record));

    let file_error = match File::create(GENERAL_LOG_PATH) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            None
        }
        Err(err) => Some(err),
    };
    builder.init();

    if let Some(err) = file_error {
        log::warn!("could not open {GENERAL_LOG_PATH}, logging to stderr: {err}");
    }
}

/// Flushes buffered records; call once the viewer loop has exited.
pub fn shutdown() {
    log::logger().flush();
}
