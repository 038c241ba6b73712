use crate::model::record::{LogRecord, LOG_HEADER};
use crate::model::Sample;
use crate::prelude::{PipelineError, PipelineResult};
use crate::telemetry::log::LogManager;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Durable append-only record of every ingested sample.
///
/// Records are flushed one per append; existing content is never rewritten
/// or reordered.
pub struct SampleLog {
    file: File,
    path: PathBuf,
}

impl SampleLog {
    /// Opens the log for appending, writing the column header only when
    /// the sink does not exist yet or is empty.
    pub fn create<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    PipelineError::LogWrite(format!("creating {}: {err}", parent.display()))
                })?;
            }
        }

        let needs_header = fs::metadata(path_ref)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path_ref)
            .map_err(|err| {
                PipelineError::LogWrite(format!("opening {}: {err}", path_ref.display()))
            })?;
        if needs_header {
            writeln!(file, "{LOG_HEADER}").map_err(|err| {
                PipelineError::LogWrite(format!("writing header to {}: {err}", path_ref.display()))
            })?;
        }

        LogManager::new().record(&format!("sample log ready at {}", path_ref.display()));
        Ok(Self {
            file,
            path: path_ref.to_path_buf(),
        })
    }

    /// Appends one record and flushes it before returning. A failure is
    /// reported to the caller; the sample stays in the in-memory series.
    pub fn append(&mut self, sample: &Sample) -> PipelineResult<()> {
        writeln!(self.file, "{}", LogRecord::encode(sample)).map_err(|err| {
            PipelineError::LogWrite(format!("appending to {}: {err}", self.path.display()))
        })?;
        self.file.flush().map_err(|err| {
            PipelineError::LogWrite(format!("flushing {}: {err}", self.path.display()))
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reads an exported log back into an ordered sample sequence.
pub fn read_samples<P: AsRef<Path>>(path: P) -> PipelineResult<Vec<Sample>> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref)
        .map_err(|err| PipelineError::LogWrite(format!("opening {}: {err}", path_ref.display())))?;

    let mut samples = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|err| {
            PipelineError::LogWrite(format!("reading {}: {err}", path_ref.display()))
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || (index == 0 && trimmed == LOG_HEADER) {
            continue;
        }
        let sample = LogRecord::parse(trimmed).map_err(|err| match err {
            PipelineError::Malformed(reason) => PipelineError::Malformed(format!(
                "{} line {}: {reason}",
                path_ref.display(),
                index + 1
            )),
            other => other,
        })?;
        samples.push(sample);
    }
    Ok(samples)
}
