use crate::ingest::LogRecord;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A [`LogRecord`] attribute that aggregates can group by or reduce over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    ClientIp,
    /// The record timestamp; grouping uses the calendar day.
    Date,
    RequestLine,
    Path,
    StatusCode,
    ResponseSize,
    UserAgent,
    Device,
    Os,
    Browser,
    BrowserVersion,
    Referrer,
    Country,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::ClientIp,
        Field::Date,
        Field::RequestLine,
        Field::Path,
        Field::StatusCode,
        Field::ResponseSize,
        Field::UserAgent,
        Field::Device,
        Field::Os,
        Field::Browser,
        Field::BrowserVersion,
        Field::Referrer,
        Field::Country,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::ClientIp => "client_ip",
            Field::Date => "date",
            Field::RequestLine => "request_line",
            Field::Path => "path",
            Field::StatusCode => "status_code",
            Field::ResponseSize => "response_size",
            Field::UserAgent => "user_agent_string",
            Field::Device => "device",
            Field::Os => "os",
            Field::Browser => "browser",
            Field::BrowserVersion => "browser_version",
            Field::Referrer => "referrer",
            Field::Country => "country",
        }
    }

    /// Only these fields can be summed or have a median.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Field::StatusCode | Field::ResponseSize | Field::BrowserVersion
        )
    }

    /// Group key for this field.
    pub fn label(&self, r: &LogRecord) -> String {
        match self {
            Field::ClientIp => r.client_ip.clone(),
            Field::Date => r.timestamp.date().to_string(),
            Field::RequestLine => r.request_line.clone(),
            Field::Path => r.path.clone(),
            Field::StatusCode => r.status_code.to_string(),
            Field::ResponseSize => r.response_size.to_string(),
            Field::UserAgent => r.user_agent_string.clone(),
            Field::Device => r.device.clone(),
            Field::Os => r.os.clone(),
            Field::Browser => r.browser.clone(),
            Field::BrowserVersion => r.browser_version.clone(),
            Field::Referrer => r.referrer.clone(),
            Field::Country => r.country.clone(),
        }
    }

    /// Numeric value, `None` for text fields and for a non-numeric browser version.
    pub fn numeric(&self, r: &LogRecord) -> Option<f64> {
        match self {
            Field::StatusCode => Some(f64::from(r.status_code)),
            Field::ResponseSize => Some(r.response_size as f64),
            Field::BrowserVersion => r.browser_version.parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Whether the record carries a value; empty strings count as missing.
    pub fn is_present(&self, r: &LogRecord) -> bool {
        match self {
            Field::Date | Field::StatusCode | Field::ResponseSize => true,
            _ => !self.label(r).is_empty(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts the record's own field names plus the short names older
    /// exports used (`status`, `request_size`, `referer`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim().to_ascii_lowercase().as_str() {
            "client_ip" | "ip" => Field::ClientIp,
            "date" | "timestamp" => Field::Date,
            "request_line" | "request" => Field::RequestLine,
            "path" => Field::Path,
            "status_code" | "status" => Field::StatusCode,
            "response_size" | "request_size" | "bytes" => Field::ResponseSize,
            "user_agent_string" | "user_agent" | "browser_string" => Field::UserAgent,
            "device" => Field::Device,
            "os" => Field::Os,
            "browser" => Field::Browser,
            "browser_version" => Field::BrowserVersion,
            "referrer" | "referer" => Field::Referrer,
            "country" | "request_country" => Field::Country,
            _ => return Err(UnknownField(s.to_string())),
        };
        Ok(field)
    }
}
