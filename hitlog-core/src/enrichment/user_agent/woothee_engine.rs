use crate::enrichment::user_agent::{DeviceType, OTHER, UserAgentInfo, major_version};
use woothee::parser::Parser;

const UNKNOWN: &str = "UNKNOWN";

pub struct WootheeEngine {
    parser: Parser,
}

impl WootheeEngine {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    pub fn parse(&self, ua: &str) -> UserAgentInfo {
        let Some(result) = self.parser.parse(ua) else {
            return UserAgentInfo::default();
        };

        let device_type = match result.category {
            "pc" => DeviceType::Desktop,
            "smartphone" | "mobilephone" => DeviceType::Mobile,
            "tablet" => DeviceType::Tablet,
            "crawler" => DeviceType::Bot,
            _ => DeviceType::Unknown,
        };

        UserAgentInfo {
            device: device_type.as_str().to_string(),
            os: known_or_other(&result.os),
            browser: known_or_other(&result.name),
            browser_major: major_version(&result.version),
        }
    }
}

fn known_or_other(value: &str) -> String {
    if value.is_empty() || value == UNKNOWN {
        OTHER.to_string()
    } else {
        value.to_string()
    }
}
