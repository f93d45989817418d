//! Delimited metadata table for bulk minting tools.
//!
//! One header row (file, name, description, then the trait names) and one
//! row per record. Fields are quoted only when they contain the
//! delimiter, a quote or a line break. Rows end with CRLF.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{MixError, Result};
use crate::types::{columns, ExportRecord, TraitDef};

const QUOTE: char = '"';
const LINE_END: &str = "\r\n";

/// Streams the metadata table to any writer.
pub struct MetadataWriter<W: Write> {
    out: W,
    delimiter: char,
    rows: usize,
}

impl<W: Write> MetadataWriter<W> {
    /// Start a table, writing the header for `traits` immediately.
    pub fn new(out: W, delimiter: char, traits: &[TraitDef]) -> std::io::Result<Self> {
        let mut writer = Self {
            out,
            delimiter,
            rows: 0,
        };
        writer.write_row(&columns(traits))?;
        Ok(writer)
    }

    /// Append one record's values in column order.
    pub fn write_record(&mut self, record: &ExportRecord) -> std::io::Result<()> {
        self.write_row(&record.values())?;
        self.rows += 1;
        Ok(())
    }

    /// Data rows written so far, not counting the header.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(mut self) -> std::io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_row(&mut self, fields: &[&str]) -> std::io::Result<()> {
        let mut line = String::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                line.push(self.delimiter);
            }
            push_field(&mut line, field, self.delimiter);
        }
        line.push_str(LINE_END);
        self.out.write_all(line.as_bytes())
    }
}

fn push_field(line: &mut String, field: &str, delimiter: char) {
    let needs_quotes = field
        .chars()
        .any(|c| c == delimiter || c == QUOTE || c == '\r' || c == '\n');

    if !needs_quotes {
        line.push_str(field);
        return;
    }

    line.push(QUOTE);
    for c in field.chars() {
        if c == QUOTE {
            line.push(QUOTE);
        }
        line.push(c);
    }
    line.push(QUOTE);
}

/// Metadata table backed by a file on disk.
pub struct MetadataFile {
    path: PathBuf,
    writer: MetadataWriter<BufWriter<File>>,
}

impl MetadataFile {
    pub fn create(path: &Path, delimiter: char, traits: &[TraitDef]) -> Result<Self> {
        let file = File::create(path)
            .map_err(|e| MixError::io(path, format!("Failed to create metadata file: {}", e)))?;
        let writer = MetadataWriter::new(BufWriter::new(file), delimiter, traits)
            .map_err(|e| MixError::io(path, format!("Failed to write metadata header: {}", e)))?;

        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    pub fn write_record(&mut self, record: &ExportRecord) -> Result<()> {
        self.writer.write_record(record).map_err(|e| {
            MixError::io(
                &self.path,
                format!("Failed to write metadata for {}: {}", record.file, e),
            )
        })
    }

    pub fn rows(&self) -> usize {
        self.writer.rows()
    }

    pub fn finish(self) -> Result<PathBuf> {
        let path = self.path;
        self.writer
            .finish()
            .map_err(|e| MixError::io(&path, format!("Failed to flush metadata: {}", e)))?;
        Ok(path)
    }
}
