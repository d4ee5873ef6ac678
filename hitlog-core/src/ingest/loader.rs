use crate::enrichment::Enricher;
use crate::ingest::error::{LoadError, ParseError};
use crate::ingest::parse::parse_line;
use crate::ingest::report::LoadReport;
use crate::ingest::types::LogRecord;
use crate::store::DocumentStore;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Records buffered before one bulk insert.
pub const BATCH_SIZE: usize = 400;

/// Skipped lines kept verbatim in a [`LoadReport`]; the count is always exact.
pub const MAX_SKIPPED_SAMPLES: usize = 100;

/// Streams a log file through parse + enrich and writes the records in
/// fixed-size batches. A bad line is skipped, never fatal.
pub struct BatchLoader<'a> {
    store: &'a mut dyn DocumentStore,
    enricher: &'a Enricher,
}

impl<'a> BatchLoader<'a> {
    pub fn new(store: &'a mut dyn DocumentStore, enricher: &'a Enricher) -> Self {
        Self { store, enricher }
    }

    pub fn load(&mut self, path: &Path, collection: &str) -> Result<LoadReport, LoadError> {
        let file = File::open(path).map_err(|e| LoadError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!(file = %path.display(), collection, "loading access log");
        self.ingest(BufReader::new(file), path, collection)
    }

    /// Load from any buffered reader; `-` stands in for the file name in errors.
    pub fn load_reader<R: BufRead>(
        &mut self,
        reader: R,
        collection: &str,
    ) -> Result<LoadReport, LoadError> {
        self.ingest(reader, Path::new("-"), collection)
    }

    fn ingest<R: BufRead>(
        &mut self,
        reader: R,
        source: &Path,
        collection: &str,
    ) -> Result<LoadReport, LoadError> {
        let mut report = LoadReport::new(collection);
        let mut buffer: Vec<LogRecord> = Vec::with_capacity(BATCH_SIZE);

        for (idx, chunk) in reader.split(b'\n').enumerate() {
            let line_number = idx + 1;
            let bytes = chunk.map_err(|e| LoadError::Read {
                path: source.to_path_buf(),
                line: line_number,
                source: e,
            })?;

            // Stray non-UTF-8 bytes should cost one field, not the whole run.
            let line = String::from_utf8_lossy(&bytes);
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            match self.process_line(line) {
                Ok(record) => buffer.push(record),
                Err(err) => {
                    tracing::debug!(line = line_number, error = %err, "skipping line");
                    report.record_skip(line_number, &err);
                    continue;
                }
            }

            if buffer.len() >= BATCH_SIZE {
                self.flush(collection, &mut buffer, &mut report)?;
            }
        }

        if !buffer.is_empty() {
            self.flush(collection, &mut buffer, &mut report)?;
        }

        report.success = self.store.collection_exists(collection)?;

        tracing::info!(
            collection,
            loaded = report.loaded,
            skipped = report.skipped,
            batches = report.batches,
            success = report.success,
            "load finished"
        );

        Ok(report)
    }

    fn process_line(&self, line: &str) -> Result<LogRecord, ParseError> {
        let raw = parse_line(line)?;
        self.enricher.enrich(raw)
    }

    fn flush(
        &mut self,
        collection: &str,
        buffer: &mut Vec<LogRecord>,
        report: &mut LoadReport,
    ) -> Result<(), LoadError> {
        self.store.insert_many(collection, buffer)?;

        report.loaded += buffer.len();
        report.batches += 1;
        tracing::debug!(collection, records = buffer.len(), batch = report.batches, "flushed batch");

        buffer.clear();
        Ok(())
    }
}
