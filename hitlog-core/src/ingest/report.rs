use crate::ingest::error::ParseError;
use crate::ingest::loader::MAX_SKIPPED_SAMPLES;
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

/// Outcome of one [`BatchLoader::load`](crate::ingest::BatchLoader::load) run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub collection: String,
    /// The collection exists after the run.
    pub success: bool,
    pub loaded: usize,
    pub skipped: usize,
    pub batches: usize,
    /// First [`MAX_SKIPPED_SAMPLES`] skipped lines.
    pub skipped_lines: Vec<SkippedLine>,
}

impl LoadReport {
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            success: false,
            loaded: 0,
            skipped: 0,
            batches: 0,
            skipped_lines: Vec::new(),
        }
    }

    pub(crate) fn record_skip(&mut self, line: usize, err: &ParseError) {
        self.skipped += 1;
        if self.skipped_lines.len() < MAX_SKIPPED_SAMPLES {
            self.skipped_lines.push(SkippedLine {
                line,
                reason: err.to_string(),
            });
        }
    }

    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_plain(&self) -> String {
        let mut out = format!(
            "{}: loaded={} skipped={} batches={} success={}\n",
            self.collection, self.loaded, self.skipped, self.batches, self.success
        );

        for skip in &self.skipped_lines {
            out.push_str(&format!("line {}: {}\n", skip.line, skip.reason));
        }
        out
    }

    pub fn render_pretty(&self) -> String {
        let mut out = String::new();

        let status = if self.success {
            "ok".green().bold().to_string()
        } else {
            "failed".red().bold().to_string()
        };

        out.push_str(&format!(
            "Load into '{}' {}\n\
             ==========================\n\
             records: {} | batches: {} | skipped lines: {}\n",
            self.collection, status, self.loaded, self.batches, self.skipped
        ));

        if !self.skipped_lines.is_empty() {
            out.push('\n');
            for skip in &self.skipped_lines {
                out.push_str(&format!(
                    "  {} line {}: {}\n",
                    "skipped".yellow().bold(),
                    skip.line,
                    skip.reason
                ));
            }

            let hidden = self.skipped - self.skipped_lines.len();
            if hidden > 0 {
                out.push_str(&format!("  ... and {hidden} more\n"));
            }
        }

        out
    }
}
