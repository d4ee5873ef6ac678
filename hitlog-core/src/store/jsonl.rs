use crate::ingest::LogRecord;
use crate::store::{DocumentStore, Query, StoreError, validate_collection_name};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const EXTENSION: &str = "jsonl";

/// Directory-backed store: `<root>/<database>/<collection>.jsonl`, one JSON
/// document per line, append-only.
#[derive(Debug)]
pub struct JsonLinesStore {
    root: PathBuf,
}

impl JsonLinesStore {
    /// Open (creating if needed) the database directory under `base`.
    pub fn open(base: &Path, database: &str) -> Result<Self, StoreError> {
        validate_collection_name(database)?;

        let root = base.join(database);
        fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.{EXTENSION}"))
    }

    fn read_collection(&self, path: &Path) -> Result<Vec<LogRecord>, StoreError> {
        let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| StoreError::io(path, e))?;
            if line.trim().is_empty() {
                continue;
            }

            let record =
                serde_json::from_str::<LogRecord>(&line).map_err(|e| StoreError::Decode {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    source: e,
                })?;
            records.push(record);
        }
        Ok(records)
    }
}

impl DocumentStore for JsonLinesStore {
    fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.root).map_err(|e| StoreError::io(&self.root, e))?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().is_some_and(|ext| ext == EXTENSION))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .collect();

        names.sort();
        Ok(names)
    }

    fn collection_exists(&self, collection: &str) -> Result<bool, StoreError> {
        if validate_collection_name(collection).is_err() {
            return Ok(false);
        }
        Ok(self.collection_path(collection).is_file())
    }

    fn insert_many(&mut self, collection: &str, records: &[LogRecord]) -> Result<(), StoreError> {
        validate_collection_name(collection)?;
        if records.is_empty() {
            return Ok(());
        }

        // Encode the whole batch first so a bad record leaves the file untouched.
        let mut buf = Vec::new();
        for record in records {
            serde_json::to_writer(&mut buf, record)?;
            buf.push(b'\n');
        }

        let path = self.collection_path(collection);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::io(&path, e))?;

        let mut writer = BufWriter::new(file);
        writer
            .write_all(&buf)
            .and_then(|_| writer.flush())
            .map_err(|e| StoreError::io(&path, e))?;
        Ok(())
    }

    fn find(&self, collection: &str, query: &Query) -> Result<Vec<LogRecord>, StoreError> {
        validate_collection_name(collection)?;

        let path = self.collection_path(collection);
        if !path.is_file() {
            return Ok(Vec::new());
        }

        Ok(query.apply(self.read_collection(&path)?))
    }
}
