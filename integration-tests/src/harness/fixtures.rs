use hitlog_core::conf::types::StoreConfig;
use hitlog_core::enrichment::Enricher;
use hitlog_core::enrichment::geoip::CountryLookup;
use hitlog_core::enrichment::referrer::UrlReferrerClassifier;
use hitlog_core::enrichment::user_agent::{UserAgentInfo, UserAgentLookup};
use hitlog_core::store::{DocumentStore, JsonLinesStore, connect};
use std::path::PathBuf;
use tempfile::TempDir;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

struct FixedCountry;

impl CountryLookup for FixedCountry {
    fn lookup_country(&self, _ip: &str) -> String {
        "Testland".to_string()
    }
}

struct FixedUserAgent;

impl UserAgentLookup for FixedUserAgent {
    fn parse(&self, _ua: &str) -> UserAgentInfo {
        UserAgentInfo {
            device: "Desktop".to_string(),
            os: "TestOS".to_string(),
            browser: "TestBrowser".to_string(),
            browser_major: "42".to_string(),
        }
    }
}

/// Enricher with fixed geo and user-agent answers and the real referrer
/// classifier, so no MaxMind database is needed.
pub fn stub_enricher() -> Enricher {
    Enricher::new(
        Box::new(FixedCountry),
        Box::new(FixedUserAgent),
        Box::new(UrlReferrerClassifier),
    )
}

/// A json-lines store rooted in a temp directory that lives as long as
/// the workspace.
pub struct TestWorkspace {
    dir: TempDir,
    pub store_config: StoreConfig,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store_config = StoreConfig {
            uri: format!("file://{}", dir.path().display()),
            database: "test".to_string(),
        };
        Self { dir, store_config }
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// Fresh connection through the same path the CLI uses.
    pub fn connect(&self) -> Box<dyn DocumentStore> {
        connect(&self.store_config).unwrap()
    }

    pub fn open_direct(&self) -> JsonLinesStore {
        JsonLinesStore::open(self.dir.path(), &self.store_config.database).unwrap()
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
