use url::Url;

const DISPLAY_LIMIT: usize = 60;
const DISPLAY_KEEP: usize = 57;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    External,
    Internal,
}

impl LinkKind {
    pub fn label(self) -> &'static str {
        match self {
            LinkKind::External => "External",
            LinkKind::Internal => "Internal",
        }
    }
}

/// A discovered link prepared for the results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRow {
    pub display: String,
    pub target: String,
    pub kind: LinkKind,
}

impl LinkRow {
    pub fn new(job_url: &str, link: &str) -> Self {
        Self {
            display: display_link(link),
            target: resolve_link(job_url, link),
            kind: classify_link(link),
        }
    }
}

/// External when the string opens with a URI scheme (`alpha *( alpha / digit / "+" / "-" / "." ) ":"`).
pub fn classify_link(link: &str) -> LinkKind {
    if has_scheme(link) {
        LinkKind::External
    } else {
        LinkKind::Internal
    }
}

fn has_scheme(link: &str) -> bool {
    let mut chars = link.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    for c in chars {
        match c {
            ':' => return true,
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {}
            _ => return false,
        }
    }
    false
}

/// Scheme, host and non-default port of `url`, e.g. `https://example.com:8443`.
pub fn origin_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let origin = parsed.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

/// Navigable target for a link found on the page at `job_url`.
///
/// Internal links are joined onto the job's origin; if the job URL has no
/// usable origin the link is returned untouched. Protocol-relative links
/// (`//host/path`) have no scheme, so they count as internal and are
/// appended to the origin like any other path.
pub fn resolve_link(job_url: &str, link: &str) -> String {
    if classify_link(link) == LinkKind::External {
        return link.to_string();
    }
    match origin_of(job_url) {
        Some(origin) if link.starts_with('/') => format!("{origin}{link}"),
        Some(origin) => format!("{origin}/{link}"),
        None => link.to_string(),
    }
}

pub fn display_link(link: &str) -> String {
    if link.chars().count() > DISPLAY_LIMIT {
        let kept: String = link.chars().take(DISPLAY_KEEP).collect();
        format!("{kept}...")
    } else {
        link.to_string()
    }
}
