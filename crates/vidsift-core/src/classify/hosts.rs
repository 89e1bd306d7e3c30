//! Host allow-list and domain matching helpers.

/// Second-level labels of platforms the extractor is known to handle.
pub const EXTRACTABLE_BASE_DOMAINS: &[&str] = &[
    "youtube",
    "youtu",
    "facebook",
    "fb",
    "instagram",
    "tiktok",
    "twitter",
    "x",
    "soundcloud",
    "twitch",
    "vimeo",
    "dailymotion",
    "dai",
    "reddit",
    "redd",
    "pinterest",
    "pin",
    "snapchat",
    "tumblr",
    "bilibili",
    "vk",
    "linkedin",
    "likee",
    "imdb",
    "ted",
    "bandcamp",
    "mixcloud",
    "streamable",
    "rumble",
    "odysee",
    "9gag",
    "imgur",
    "flickr",
    "threads",
    "bitchute",
    "kick",
];

/// The second-to-last label of `host`, e.g. `youtube` for `www.youtube.com`.
///
/// Single-label hosts (`localhost`) have no base domain.
pub fn base_domain(host: &str) -> Option<&str> {
    let host = host.trim_end_matches('.');
    let mut labels = host.rsplit('.');
    labels.next()?;
    labels.next().filter(|label| !label.is_empty())
}

/// How a URL host is compared against a platform domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HostMatching {
    /// The host contains the domain anywhere (`www.youtube.com.br` is YouTube).
    #[default]
    Contains,
    /// The host is the domain or one of its subdomains (`box.com` is not `x.com`).
    LabelBoundary,
}

impl HostMatching {
    /// Compares `host` with `domain`, ignoring ASCII case.
    pub fn matches(self, host: &str, domain: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        let domain = domain.to_ascii_lowercase();
        match self {
            Self::Contains => host.contains(&domain),
            Self::LabelBoundary => {
                host == domain
                    || host
                        .strip_suffix(domain.as_str())
                        .is_some_and(|prefix| prefix.ends_with('.'))
            }
        }
    }
}
