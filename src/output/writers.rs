//! Output destinations

use crate::error::{InspectError, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Destination for rendered output
pub trait OutputWriter {
    fn write(&mut self, content: &str) -> Result<()>;
}

/// Writer that prints to stdout
pub struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write(&mut self, content: &str) -> Result<()> {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|source| InspectError::StdoutWrite { source })
    }
}

/// Writer that saves to a file
pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl OutputWriter for FileWriter {
    fn write(&mut self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| InspectError::OutputWrite {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }
        fs::write(&self.path, content).map_err(|source| InspectError::OutputWrite {
            path: self.path.clone(),
            source,
        })
    }
}

/// Create the writer for the configured destination
pub fn create_writer(output_file: Option<&PathBuf>) -> Box<dyn OutputWriter> {
    match output_file {
        Some(path) => Box::new(FileWriter::new(path.clone())),
        None => Box::new(StdoutWriter),
    }
}
