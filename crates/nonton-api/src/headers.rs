//! Request header sets the upstream expects.
//!
//! Some upstream endpoints reject requests that do not look like a desktop
//! browser, so these values are reproduced exactly.

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const REFERER: &str = "https://api.sansekai.my.id/";
pub const ORIGIN: &str = "https://api.sansekai.my.id";

const BROWSER_EXTRA: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
    ),
    ("Accept-Language", "en-US,en;q=0.9"),
    (
        "Sec-Ch-Ua",
        "\"Not_A Brand\";v=\"8\", \"Chromium\";v=\"120\", \"Google Chrome\";v=\"120\"",
    ),
    ("Sec-Ch-Ua-Mobile", "?0"),
    ("Sec-Ch-Ua-Platform", "\"Windows\""),
    ("Sec-Fetch-Dest", "document"),
    ("Sec-Fetch-Mode", "navigate"),
    ("Sec-Fetch-Site", "none"),
    ("Sec-Fetch-User", "?1"),
    ("Upgrade-Insecure-Requests", "1"),
];

const JSON_CONTENT: (&str, &str) = ("Content-Type", "application/json");

/// Named header set attached to an upstream request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderProfile {
    /// Full desktop-browser fingerprint.
    Browser,
    /// `Browser` plus a JSON content type.
    BrowserJson,
    /// User-Agent, Referer and Origin only.
    Referred,
    #[default]
    UserAgent,
    UserAgentJson,
    /// No extra headers.
    Bare,
}

impl HeaderProfile {
    pub fn headers(self) -> Vec<(&'static str, &'static str)> {
        let mut headers = Vec::new();
        match self {
            Self::Bare => {}
            Self::UserAgent => headers.push(("User-Agent", USER_AGENT)),
            Self::UserAgentJson => {
                headers.push(JSON_CONTENT);
                headers.push(("User-Agent", USER_AGENT));
            }
            Self::Referred => {
                headers.push(("User-Agent", USER_AGENT));
                headers.push(("Referer", REFERER));
                headers.push(("Origin", ORIGIN));
            }
            Self::Browser | Self::BrowserJson => {
                if self == Self::BrowserJson {
                    headers.push(JSON_CONTENT);
                }
                headers.push(("User-Agent", USER_AGENT));
                headers.push(("Referer", REFERER));
                headers.push(("Origin", ORIGIN));
                headers.extend_from_slice(BROWSER_EXTRA);
            }
        }
        headers
    }
}
