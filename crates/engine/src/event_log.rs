//! Line-delimited JSON log of game events.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::core::GameEvent;

#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Session clock in milliseconds.
    pub t_ms: u64,
    pub run: u32,
    #[serde(flatten)]
    pub event: &'a GameEvent,
}

pub struct EventLog {
    out: BufWriter<File>,
    buf: Vec<u8>,
}

impl EventLog {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self {
            out: BufWriter::new(file),
            buf: Vec::with_capacity(1024),
        })
    }

    /// Append one record as a single line.
    pub fn write(&mut self, record: &EventRecord<'_>) -> io::Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, record)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_one_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        let mut log = EventLog::open(&path).unwrap();
        log.write(&EventRecord {
            t_ms: 5,
            run: 1,
            event: &GameEvent::Started,
        })
        .unwrap();
        log.write(&EventRecord {
            t_ms: 9,
            run: 1,
            event: &GameEvent::Ended { score: 4 },
        })
        .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "started");
        assert_eq!(lines[0]["t_ms"], 5);
        assert_eq!(lines[1]["type"], "ended");
        assert_eq!(lines[1]["score"], 4);
        assert_eq!(lines[1]["run"], 1);
    }

    #[test]
    fn appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        for _ in 0..2 {
            let mut log = EventLog::open(&path).unwrap();
            log.write(&EventRecord {
                t_ms: 0,
                run: 0,
                event: &GameEvent::Started,
            })
            .unwrap();
        }
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
    }
}
