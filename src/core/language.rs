//! The fixed target-language enumeration shared with the completion service.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A target language the service can translate into and reply in.
/// English is the default/unset value; the others are user picks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Language {
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "ja")]
    Japanese,
    #[default]
    #[serde(rename = "en")]
    English,
}

/// The languages offered by the picker. English is reachable only as the
/// default, matching the original flag row.
pub const SELECTABLE_LANGUAGES: [Language; 3] =
    [Language::French, Language::Spanish, Language::Japanese];

impl Language {
    /// Two-letter code used in config files and logs.
    pub fn code(self) -> &'static str {
        match self {
            Language::French => "fr",
            Language::Spanish => "es",
            Language::Japanese => "ja",
            Language::English => "en",
        }
    }

    /// Display name embedded literally into outbound instructions.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::Japanese => "Japanese",
            Language::English => "English",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "fr" => Some(Language::French),
            "es" => Some(Language::Spanish),
            "ja" => Some(Language::Japanese),
            "en" => Some(Language::English),
            _ => None,
        }
    }
}
