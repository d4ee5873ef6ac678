use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static EMBEDDED_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("embedded url pattern is a valid regex"));

/// Punctuation that wraps URLs inside user-agent comments, e.g. `(+http://x/bot.html)`.
const URL_TRAILERS: &[char] = &[')', ';', ','];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Referrer {
    pub scheme: String,
    pub host_and_path: String,
}

/// Absolute URL -> scheme plus host/path. `None` when the URL has no host.
pub trait ReferrerClassifier {
    fn classify(&self, url: &str) -> Option<Referrer>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UrlReferrerClassifier;

impl ReferrerClassifier for UrlReferrerClassifier {
    fn classify(&self, url: &str) -> Option<Referrer> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?;

        let mut host_and_path = match parsed.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        if parsed.path() != "/" {
            host_and_path.push_str(parsed.path());
        }

        Some(Referrer {
            scheme: parsed.scheme().to_string(),
            host_and_path,
        })
    }
}

/// First `http://` or `https://` URL inside a user-agent string.
pub fn find_embedded_url(ua: &str) -> Option<&str> {
    EMBEDDED_URL
        .find(ua)
        .map(|m| m.as_str().trim_end_matches(URL_TRAILERS))
}
