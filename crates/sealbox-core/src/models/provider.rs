//! The closed set of supported inference vendors.

use serde::{Deserialize, Serialize};

/// External inference vendors a workspace can hold a key for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "OPENAI")]
    OpenAi,
    #[serde(rename = "ANTHROPIC")]
    Anthropic,
    #[serde(rename = "GEMINI")]
    Gemini,
}

impl Provider {
    /// All providers, in the default fallback order.
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Anthropic, Provider::Gemini];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI",
            Provider::Anthropic => "ANTHROPIC",
            Provider::Gemini => "GEMINI",
        }
    }

    pub fn parse(s: &str) -> Option<Provider> {
        match s {
            "OPENAI" => Some(Provider::OpenAi),
            "ANTHROPIC" => Some(Provider::Anthropic),
            "GEMINI" => Some(Provider::Gemini),
            _ => None,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_all_variants() {
        for provider in Provider::ALL {
            assert_eq!(Provider::parse(provider.as_str()), Some(provider));
        }
        assert_eq!(Provider::parse("MISTRAL"), None);
        assert_eq!(Provider::parse("openai"), None);
    }
}
