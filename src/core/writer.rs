//! Result sinks.
//!
//! Writers only see the final `KeySet`; they never know how it was computed.

use std::{
    fmt,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{error::OutputWriteError, key_set::KeySet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// Output file used when no destination is given.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Json => "output.json",
            Self::Csv => "output.csv",
        }
    }

    pub fn writer(self) -> &'static dyn ResultWriter {
        match self {
            Self::Json => &JsonWriter,
            Self::Csv => &CsvWriter,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Serializes key counts into a byte stream.
pub trait ResultWriter {
    fn write_to(&self, counts: &KeySet, out: &mut dyn Write) -> io::Result<()>;
}

/// `key,count` rows, one per key, sorted by key.
pub struct CsvWriter;

impl ResultWriter for CsvWriter {
    fn write_to(&self, counts: &KeySet, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "key,count")?;
        for (key, count) in counts.iter() {
            writeln!(out, "{},{}", csv_field(key), count)?;
        }
        Ok(())
    }
}

/// Quote a field when it contains a separator, a quote or a line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// A pretty-printed JSON object of key to count.
pub struct JsonWriter;

impl ResultWriter for JsonWriter {
    fn write_to(&self, counts: &KeySet, out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, counts)?;
        writeln!(out)
    }
}

/// Where the report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// `-` means stdout, anything else is a file path.
    pub fn parse(value: &Path) -> Self {
        if value == Path::new("-") {
            Self::Stdout
        } else {
            Self::File(value.to_path_buf())
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => write!(f, "stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Write `counts` to `destination` in `format`.
pub fn write_report(
    counts: &KeySet,
    format: OutputFormat,
    destination: &Destination,
) -> Result<(), OutputWriteError> {
    let writer = format.writer();
    let result = match destination {
        Destination::Stdout => {
            let mut out = io::stdout().lock();
            writer.write_to(counts, &mut out).and_then(|()| out.flush())
        }
        Destination::File(path) => File::create(path).and_then(|file| {
            let mut out = BufWriter::new(file);
            writer.write_to(counts, &mut out)?;
            out.flush()
        }),
    };
    result.map_err(|source| OutputWriteError {
        destination: destination.to_string(),
        source,
    })
}
