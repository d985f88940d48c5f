// Presentation sinks: where status messages end up
//
// A sink receives a human-readable message plus a display colour and shows it
// somehow. Updates are fire-and-forget; a sink never fails the loop.

use std::io::{self, Write};

use log::{info, warn};

use crate::color::DisplayColor;

/// Shown when the frame source cannot be opened.
pub const ACCESS_DENIED_MESSAGE: &str = "Webcam Access Denied";
/// Shown when a tick fails and the loop stops.
pub const ESTIMATION_FAILED_MESSAGE: &str = "Estimation Failed";

/// Receiver of status messages.
pub trait StatusSink {
    fn update_status(&mut self, message: &str, color: DisplayColor);
}

impl<S: StatusSink + ?Sized> StatusSink for &mut S {
    fn update_status(&mut self, message: &str, color: DisplayColor) {
        (**self).update_status(message, color)
    }
}

impl<S: StatusSink + ?Sized> StatusSink for Box<S> {
    fn update_status(&mut self, message: &str, color: DisplayColor) {
        (**self).update_status(message, color)
    }
}

/// Sends every status to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn update_status(&mut self, message: &str, color: DisplayColor) {
        info!(target: "lightsense::status", "[{}] {}", color, single_line(message));
    }
}

/// Writes one `[#RRGGBB] message` line per status.
pub struct ConsoleSink<W: Write> {
    writer: W,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StatusSink for ConsoleSink<W> {
    fn update_status(&mut self, message: &str, color: DisplayColor) {
        let result = writeln!(self.writer, "[{}] {}", color, single_line(message))
            .and_then(|_| self.writer.flush());
        if let Err(e) = result {
            warn!("status write failed: {e}");
        }
    }
}

/// One recorded status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub message: String,
    pub color: DisplayColor,
}

/// Keeps every status in memory, oldest first.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    updates: Vec<StatusUpdate>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> &[StatusUpdate] {
        &self.updates
    }

    pub fn last(&self) -> Option<&StatusUpdate> {
        self.updates.last()
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

impl StatusSink for MemorySink {
    fn update_status(&mut self, message: &str, color: DisplayColor) {
        self.updates.push(StatusUpdate {
            message: message.to_string(),
            color,
        });
    }
}

fn single_line(message: &str) -> String {
    message.lines().collect::<Vec<_>>().join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_sink_flattens_lines() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.update_status("Lighting: Dark Environment\nBrightness: 0.00", DisplayColor::new(0x8B, 0, 0));
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "[#8B0000] Lighting: Dark Environment | Brightness: 0.00\n");
    }

    #[test]
    fn memory_sink_records_in_order() {
        let mut sink = MemorySink::new();
        sink.update_status("first", DisplayColor::STATUS_DEFAULT);
        sink.update_status("second", DisplayColor::FAILURE);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.updates()[0].message, "first");
        assert_eq!(sink.last().unwrap().color, DisplayColor::FAILURE);
    }

    #[test]
    fn borrowed_sink_forwards() {
        fn present<S: StatusSink>(mut sink: S) {
            sink.update_status("lent", DisplayColor::STATUS_DEFAULT);
        }

        let mut sink = MemorySink::new();
        present(&mut sink);
        assert_eq!(sink.last().unwrap().message, "lent");
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn console_sink_swallows_write_errors() {
        let mut sink = ConsoleSink::new(BrokenWriter);
        sink.update_status("ignored", DisplayColor::STATUS_DEFAULT);
    }
}
