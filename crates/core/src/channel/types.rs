//! Marketing channel types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Marketing channels supported for incrementality testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// YouTube video campaigns.
    Youtube,
    /// Facebook paid social.
    Facebook,
    /// Google Search ads.
    GoogleSearch,
    /// LinkedIn paid social.
    Linkedin,
    /// Any other channel.
    Other,
}

impl Channel {
    /// Default cost per form for the channel, used when the caller does not
    /// supply one.
    #[must_use]
    pub fn default_cpa(self) -> Decimal {
        match self {
            Self::Youtube => Decimal::new(500, 0),
            Self::Facebook | Self::Other => Decimal::new(200, 0),
            Self::GoogleSearch => Decimal::new(150, 0),
            Self::Linkedin => Decimal::new(300, 0),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Youtube => write!(f, "YouTube"),
            Self::Facebook => write!(f, "Facebook"),
            Self::GoogleSearch => write!(f, "Google Search"),
            Self::Linkedin => write!(f, "LinkedIn"),
            Self::Other => write!(f, "Other"),
        }
    }
}

impl std::str::FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "YouTube" | "youtube" => Ok(Self::Youtube),
            "Facebook" | "facebook" => Ok(Self::Facebook),
            "Google Search" | "google_search" => Ok(Self::GoogleSearch),
            "LinkedIn" | "linkedin" => Ok(Self::Linkedin),
            "Other" | "other" => Ok(Self::Other),
            _ => Err(format!("Unknown channel: {s}")),
        }
    }
}
