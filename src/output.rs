use std::io::{self, Write};

use serde::Serialize;

use crate::app::{ClearResult, GridResult, InfoResult, ProgressEvent, ProgressSink, SyncResult};

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_sync(result: &SyncResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_grid(result: &GridResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_info(result: &InfoResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_clear(result: &ClearResult) -> io::Result<()> {
        Self::print_json(result)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl ProgressSink for JsonOutput {
    fn event(&self, event: ProgressEvent) {
        match event.progress {
            Some(progress) => tracing::debug!(
                current = progress.current,
                total = progress.total,
                "{}",
                event.message
            ),
            None => tracing::info!("{}", event.message),
        }
    }
}
