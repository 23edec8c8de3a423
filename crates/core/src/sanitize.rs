//! Input sanitization and shape checks for untrusted request fields.

use std::sync::LazyLock;

use regex::Regex;

/// Longest accepted email address, per RFC 5321 path limits.
pub const MAX_EMAIL_LEN: usize = 254;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex is valid"));

static JS_PROTOCOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript\s*:").expect("protocol regex is valid"));

static EVENT_HANDLER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bon[a-z]+\s*=").expect("handler regex is valid"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Markup and script signatures that are never accepted in email content.
///
/// Each entry pairs the label reported back to the caller with the pattern
/// that detects it. Matching is case-insensitive and tolerates whitespace
/// where browsers do.
static DENYLIST: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("<script", r"(?i)<\s*script"),
        ("javascript:", r"(?i)javascript\s*:"),
        ("inline event handler", r"(?i)<[^>]*\bon[a-z]+\s*="),
        ("data:text/html", r"(?i)data\s*:\s*text/html"),
        ("vbscript:", r"(?i)vbscript\s*:"),
        ("<iframe", r"(?i)<\s*iframe"),
        ("<object", r"(?i)<\s*object"),
        ("<embed", r"(?i)<\s*embed"),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).expect("denylist regex is valid")))
    .collect()
});

/// Strip markup, script protocols, inline handlers and control characters.
///
/// Passes are repeated until the output stops changing, so removing one
/// construct can never reveal another (`<<b>script>` and friends), and
/// `sanitize(sanitize(x)) == sanitize(x)` for every `x`.
pub fn sanitize(input: &str) -> String {
    let mut current = sanitize_once(input);
    loop {
        let next = sanitize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

// Every step only removes characters, so the fixpoint loop terminates.
fn sanitize_once(input: &str) -> String {
    let without_tags = TAG_RE.replace_all(input, "");
    let without_protocol = JS_PROTOCOL_RE.replace_all(&without_tags, "");
    let without_handlers = EVENT_HANDLER_RE.replace_all(&without_protocol, "");

    without_handlers
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Return the label of the first denylisted signature found in `input`.
pub fn find_dangerous_pattern(input: &str) -> Option<&'static str> {
    DENYLIST
        .iter()
        .find(|(_, re)| re.is_match(input))
        .map(|(label, _)| *label)
}

/// Accept only `local@domain.tld`-shaped addresses of at most 254 characters.
pub fn is_valid_email(address: &str) -> bool {
    address.chars().count() <= MAX_EMAIL_LEN && EMAIL_RE.is_match(address)
}

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}
