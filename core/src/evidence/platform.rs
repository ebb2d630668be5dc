use url::Url;

pub const FALLBACK_PLATFORM: &str = "Source";

#[derive(Debug, Clone, Copy)]
enum HostPattern {
    /// Substring anywhere in the host.
    Contains(&'static str),
    /// Exact host or any subdomain of it.
    Domain(&'static str),
}

struct PlatformEntry {
    label: &'static str,
    patterns: &'static [HostPattern],
}

use HostPattern::{Contains, Domain};

static PLATFORM_TABLE: &[PlatformEntry] = &[
    PlatformEntry { label: "Reddit", patterns: &[Contains("reddit"), Domain("redd.it")] },
    PlatformEntry { label: "X", patterns: &[Contains("twitter"), Domain("x.com"), Domain("t.co")] },
    PlatformEntry { label: "LinkedIn", patterns: &[Contains("linkedin"), Domain("lnkd.in")] },
    PlatformEntry { label: "G2", patterns: &[Domain("g2.com"), Domain("g2crowd.com")] },
    PlatformEntry { label: "Capterra", patterns: &[Contains("capterra")] },
    PlatformEntry { label: "Trustpilot", patterns: &[Contains("trustpilot")] },
    PlatformEntry { label: "Yelp", patterns: &[Contains("yelp")] },
    PlatformEntry { label: "YouTube", patterns: &[Contains("youtube"), Domain("youtu.be")] },
    PlatformEntry { label: "TikTok", patterns: &[Contains("tiktok")] },
    PlatformEntry { label: "Instagram", patterns: &[Contains("instagram")] },
    PlatformEntry { label: "Facebook", patterns: &[Contains("facebook"), Domain("fb.com")] },
    PlatformEntry {
        label: "Hacker News",
        patterns: &[Contains("news.ycombinator"), Contains("hackernews")],
    },
    PlatformEntry { label: "Quora", patterns: &[Contains("quora")] },
    PlatformEntry { label: "Amazon", patterns: &[Contains("amazon")] },
    PlatformEntry { label: "Glassdoor", patterns: &[Contains("glassdoor")] },
    PlatformEntry { label: "Product Hunt", patterns: &[Contains("producthunt")] },
    PlatformEntry { label: "Clutch", patterns: &[Domain("clutch.co")] },
    PlatformEntry { label: "TripAdvisor", patterns: &[Contains("tripadvisor")] },
    PlatformEntry { label: "Stack Overflow", patterns: &[Contains("stackoverflow")] },
    PlatformEntry { label: "GitHub", patterns: &[Contains("github")] },
    PlatformEntry { label: "Medium", patterns: &[Domain("medium.com")] },
];

fn host_matches(host: &str, pattern: HostPattern) -> bool {
    match pattern {
        Contains(needle) => host.contains(needle),
        Domain(domain) => host == domain || host.ends_with(&format!(".{}", domain)),
    }
}

fn text_matches(text: &str, label: &str, pattern: HostPattern) -> bool {
    if text == label.to_ascii_lowercase() {
        return true;
    }
    match pattern {
        Contains(needle) => text.contains(needle),
        Domain(domain) => contains_at_boundary(text, domain),
    }
}

fn contains_at_boundary(text: &str, needle: &str) -> bool {
    text.match_indices(needle).any(|(idx, _)| {
        text[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}

fn lookup_host(host: &str) -> Option<&'static str> {
    PLATFORM_TABLE
        .iter()
        .find(|e| e.patterns.iter().any(|p| host_matches(host, *p)))
        .map(|e| e.label)
}

fn lookup_text(text: &str) -> Option<&'static str> {
    PLATFORM_TABLE
        .iter()
        .find(|e| e.patterns.iter().any(|p| text_matches(text, e.label, *p)))
        .map(|e| e.label)
}

/// Parses a URL, tolerating a missing scheme (`reddit.com/r/saas`).
pub fn parse_host(raw_url: &str) -> Option<String> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = Url::parse(trimmed).or_else(|_| Url::parse(&format!("https://{}", trimmed)));
    let url = parsed.ok()?;
    let host = url.host_str()?.trim_end_matches('.').to_ascii_lowercase();
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// First dot-separated label, ignoring a leading `www.`.
fn first_label(s: &str) -> Option<String> {
    let s = s.strip_prefix("www.").unwrap_or(s);
    let label = s.split('.').next()?.trim();
    if label.is_empty() {
        None
    } else {
        Some(capitalize(label))
    }
}

pub fn platform_from_host(host: &str) -> String {
    lookup_host(host)
        .map(str::to_string)
        .or_else(|| first_label(host))
        .unwrap_or_else(|| FALLBACK_PLATFORM.to_string())
}

pub fn platform_from_text(text: &str) -> Option<String> {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    lookup_text(&lowered).map(str::to_string)
}

/// URL first, then the explicit platform hint, then the free-text source,
/// then `"Source"`.
pub fn extract_platform(url: Option<&str>, platform: Option<&str>, source: Option<&str>) -> String {
    if let Some(host) = url.and_then(parse_host) {
        return platform_from_host(&host);
    }
    if let Some(hint) = platform.map(str::trim).filter(|p| !p.is_empty()) {
        return platform_from_text(hint).unwrap_or_else(|| hint.to_string());
    }
    if let Some(src) = source.map(str::trim).filter(|s| !s.is_empty()) {
        if let Some(label) = platform_from_text(src) {
            return label;
        }
        if let Some(label) = first_label(&src.to_lowercase()) {
            return label;
        }
    }
    FALLBACK_PLATFORM.to_string()
}
