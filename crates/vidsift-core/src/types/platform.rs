use std::fmt;

use serde::{Deserialize, Serialize};

/// Video and social media platforms the classifier knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    YouTube,
    Instagram,
    Facebook,
    TikTok,
    Pinterest,
    /// Twitter and X.
    Twitter,
    Snapchat,
    Dailymotion,
    Vimeo,
    Reddit,
}

impl Platform {
    /// All platforms, in lookup order.
    pub const ALL: [Platform; 10] = [
        Self::YouTube,
        Self::Instagram,
        Self::Facebook,
        Self::TikTok,
        Self::Pinterest,
        Self::Twitter,
        Self::Snapchat,
        Self::Dailymotion,
        Self::Vimeo,
        Self::Reddit,
    ];

    /// Registrable domains, including short-link domains.
    #[must_use]
    pub fn domains(self) -> &'static [&'static str] {
        match self {
            Self::YouTube => &["youtube.com", "youtu.be", "youtube-nocookie.com"],
            Self::Instagram => &["instagram.com", "instagr.am"],
            Self::Facebook => &["facebook.com", "fb.watch", "fb.com"],
            Self::TikTok => &["tiktok.com"],
            Self::Pinterest => &["pinterest.com", "pin.it"],
            Self::Twitter => &["twitter.com", "x.com", "t.co"],
            Self::Snapchat => &["snapchat.com"],
            Self::Dailymotion => &["dailymotion.com", "dai.ly"],
            Self::Vimeo => &["vimeo.com"],
            Self::Reddit => &["reddit.com", "redd.it"],
        }
    }

    /// Whether the platform counts as social media for link interception.
    #[must_use]
    pub fn is_social_media(self) -> bool {
        matches!(
            self,
            Self::Instagram
                | Self::Facebook
                | Self::TikTok
                | Self::Pinterest
                | Self::Twitter
                | Self::Snapchat
        )
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YouTube => write!(f, "YouTube"),
            Self::Instagram => write!(f, "Instagram"),
            Self::Facebook => write!(f, "Facebook"),
            Self::TikTok => write!(f, "TikTok"),
            Self::Pinterest => write!(f, "Pinterest"),
            Self::Twitter => write!(f, "Twitter/X"),
            Self::Snapchat => write!(f, "Snapchat"),
            Self::Dailymotion => write!(f, "Dailymotion"),
            Self::Vimeo => write!(f, "Vimeo"),
            Self::Reddit => write!(f, "Reddit"),
        }
    }
}
