use crate::enrichment::user_agent::UserAgentInfo;
use uaparser::{Parser, UserAgentParser};

pub struct UaParserEngine {
    parser: UserAgentParser,
}

impl UaParserEngine {
    pub fn new(regexes_yaml: &[u8]) -> anyhow::Result<Self> {
        let parser = UserAgentParser::from_bytes(regexes_yaml)?;
        Ok(Self { parser })
    }

    pub fn parse(&self, ua: &str) -> UserAgentInfo {
        let client = self.parser.parse(ua);

        UserAgentInfo {
            device: client.device.family.to_string(),
            os: client.os.family.to_string(),
            browser: client.user_agent.family.to_string(),
            browser_major: client
                .user_agent
                .major
                .map(|major| major.to_string())
                .unwrap_or_default(),
        }
    }
}
