use crate::enrichment::EnrichmentError;
use maxminddb::PathElement;
use std::net::IpAddr;
use std::path::Path;

/// IP address -> country name.
///
/// Unresolvable input (hostnames, private ranges, addresses missing from the
/// database) yields an empty string rather than an error.
pub trait CountryLookup {
    fn lookup_country(&self, ip: &str) -> String;
}

pub struct MaxMindCountry {
    reader: maxminddb::Reader<maxminddb::Mmap>,
}

impl MaxMindCountry {
    pub fn open(path: &Path) -> Result<Self, EnrichmentError> {
        // Safety note on the memory-mapped GeoIP file...
        // - File is opened read-only
        // - Lifetime is bound to MaxMindCountry
        // - hitlog never mutates the mmdb file
        let reader = unsafe { maxminddb::Reader::open_mmap(path) }.map_err(|e| {
            EnrichmentError::GeoDatabase {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self { reader })
    }
}

impl CountryLookup for MaxMindCountry {
    fn lookup_country(&self, ip: &str) -> String {
        let Ok(addr) = ip.parse::<IpAddr>() else {
            return String::new();
        };

        let Some(lookup) = self.reader.lookup(addr).ok() else {
            return String::new();
        };

        // Country databases and city databases share the `country` record.
        lookup
            .decode_path::<String>(&[
                PathElement::Key("country"),
                PathElement::Key("names"),
                PathElement::Key("en"),
            ])
            .ok()
            .flatten()
            .or_else(|| {
                lookup
                    .decode_path::<String>(&[
                        PathElement::Key("country"),
                        PathElement::Key("iso_code"),
                    ])
                    .ok()
                    .flatten()
            })
            .unwrap_or_default()
    }
}
