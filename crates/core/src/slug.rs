//! Slug derivation for storage paths.

/// Longest name slug used for testimonial image filenames.
pub const MAX_NAME_SLUG_CHARS: usize = 30;

const FALLBACK_NAME_SLUG: &str = "testimonial";

/// Normalize a post slug to lowercase ASCII alphanumerics joined by hyphens.
///
/// Every run of other characters collapses to a single `-`, and hyphens are
/// trimmed from both ends: `"My Great Post!!"` becomes `my-great-post`.
/// The result may be empty; callers decide whether that is an error.
pub fn post_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Derive a bounded filename slug from a person's name.
///
/// Keeps ASCII alphanumerics and CJK ideographs, turns whitespace into
/// hyphens and drops everything else. Truncated to
/// [`MAX_NAME_SLUG_CHARS`] characters; falls back to `testimonial` when
/// nothing usable remains.
pub fn name_slug(name: &str) -> String {
    let mut slug = String::new();
    let mut last_was_hyphen = true;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c == '-' {
            if !last_was_hyphen {
                slug.push('-');
                last_was_hyphen = true;
            }
        } else if c.is_ascii_alphanumeric() || is_cjk_ideograph(c) {
            slug.push(c);
            last_was_hyphen = false;
        }
    }

    let truncated: String = slug.chars().take(MAX_NAME_SLUG_CHARS).collect();
    let trimmed = truncated.trim_matches('-');

    if trimmed.is_empty() {
        FALLBACK_NAME_SLUG.to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn is_cjk_ideograph(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_slug_collapses_runs() {
        assert_eq!(post_slug("My Great Post!!"), "my-great-post");
        assert_eq!(post_slug("Hello World"), "hello-world");
        assert_eq!(post_slug("  --Rust & WebAssembly: 2024--  "), "rust-webassembly-2024");
        assert_eq!(post_slug("already-a-slug"), "already-a-slug");
    }

    #[test]
    fn post_slug_is_deterministic_and_stable() {
        let once = post_slug("Ünïcode Tïtle ### 42");
        assert_eq!(once, post_slug("Ünïcode Tïtle ### 42"));
        assert_eq!(post_slug(&once), once);
        assert_eq!(once, "n-code-t-tle-42");
    }

    #[test]
    fn post_slug_can_be_empty() {
        assert_eq!(post_slug("!!! ???"), "");
        assert_eq!(post_slug("你好"), "");
    }

    #[test]
    fn name_slug_keeps_cjk() {
        assert_eq!(name_slug("陳小明"), "陳小明");
        assert_eq!(name_slug("Amy 陳"), "amy-陳");
    }

    #[test]
    fn name_slug_strips_punctuation() {
        assert_eq!(name_slug("Mary-Jane O'Neil, PhD."), "mary-jane-oneil-phd");
        assert_eq!(name_slug("  Ann   Lee  "), "ann-lee");
    }

    #[test]
    fn name_slug_truncates() {
        let long = "a".repeat(45);
        assert_eq!(name_slug(&long).chars().count(), MAX_NAME_SLUG_CHARS);

        let cjk = "字".repeat(40);
        assert_eq!(name_slug(&cjk).chars().count(), MAX_NAME_SLUG_CHARS);
    }

    #[test]
    fn name_slug_falls_back() {
        assert_eq!(name_slug("!!!"), "testimonial");
        assert_eq!(name_slug("Ελένη"), "testimonial");
    }
}
