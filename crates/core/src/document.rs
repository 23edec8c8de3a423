//! Serializers for the two document shapes sitedesk writes: Markdown with a
//! YAML front-matter header, and an append-only YAML list.
//!
//! All quoting goes through [`yaml_scalar`], so escaping rules live in one
//! place regardless of which document a value ends up in.

use std::sync::LazyLock;

use regex::Regex;

/// Characters that change meaning when they start a plain YAML scalar.
const INDICATORS: &[char] = &[
    '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@',
    '`',
];

/// Words a YAML 1.1 parser would read as booleans or null.
const KEYWORDS: &[&str] = &["true", "false", "yes", "no", "on", "off", "y", "n", "null", "~"];

/// Numeric forms a YAML 1.1 parser resolves to ints or floats: hex, octal
/// and binary literals, `_` digit separators, base-60 (`12:30`), `.inf` and
/// `.nan`.
static YAML11_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)^[-+]?(?:
            0x[0-9a-fA-F_]+
            | 0o?[0-7_]+
            | 0b[01_]+
            | [0-9][0-9_]*(?::[0-5]?[0-9])+(?:\.[0-9_]*)?
            | [0-9_]*\.?[0-9_]+(?:[eE][-+]?[0-9]+)?
            | (?i:\.inf|\.nan)
        )$",
    )
    .expect("yaml number regex is valid")
});

/// Render `value` as a YAML scalar, double-quoting only when a plain scalar
/// would be misread.
pub fn yaml_scalar(value: &str) -> String {
    if needs_quotes(value) {
        double_quoted(value)
    } else {
        value.to_owned()
    }
}

fn needs_quotes(value: &str) -> bool {
    if value.is_empty() || value.trim() != value {
        return true;
    }
    if value.starts_with(INDICATORS) || value.ends_with(':') {
        return true;
    }
    if value.contains(": ") || value.contains(" #") || value.chars().any(char::is_control) {
        return true;
    }
    if KEYWORDS.iter().any(|k| value.eq_ignore_ascii_case(k)) {
        return true;
    }
    value.parse::<f64>().is_ok() || YAML11_NUMBER.is_match(value)
}

fn double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Ordered YAML front-matter header for a Markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: Vec<(String, String)>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Fields render in insertion order.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: &str) -> Self {
        self.fields.push((key.into(), yaml_scalar(value)));
        self
    }

    /// Append a field only when `value` is present and not blank.
    #[must_use]
    pub fn optional_field(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    /// Render just the `---` delimited header.
    pub fn render(&self) -> String {
        let mut out = String::from("---\n");
        for (key, value) in &self.fields {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out.push_str("---\n");
        out
    }

    /// Render the header followed by a blank line and `body`, newline-terminated.
    pub fn render_document(&self, body: &str) -> String {
        let mut out = self.render();
        out.push('\n');
        out.push_str(body);
        if !body.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

/// A value inside a YAML list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YamlValue {
    /// Single-line value, quoted as needed.
    Scalar(String),
    /// Multi-line value written as a literal block (`|-`).
    Block(String),
}

impl YamlValue {
    /// Pick [`YamlValue::Block`] for multi-line text, otherwise a scalar.
    pub fn text(value: &str) -> Self {
        if value.contains('\n') {
            Self::Block(value.to_owned())
        } else {
            Self::Scalar(value.to_owned())
        }
    }
}

/// One `- key: value` mapping in a YAML list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YamlEntry {
    fields: Vec<(String, YamlValue)>,
}

impl YamlEntry {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn scalar(mut self, key: impl Into<String>, value: &str) -> Self {
        self.fields
            .push((key.into(), YamlValue::Scalar(value.to_owned())));
        self
    }

    /// Append free text, switching to a literal block when it spans lines.
    #[must_use]
    pub fn text(mut self, key: impl Into<String>, value: &str) -> Self {
        self.fields.push((key.into(), YamlValue::text(value)));
        self
    }

    /// Render as a list item at the top level of a document.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.fields.iter().enumerate() {
            out.push_str(if i == 0 { "- " } else { "  " });
            out.push_str(key);
            out.push(':');
            match value {
                YamlValue::Scalar(s) => {
                    out.push(' ');
                    out.push_str(&yaml_scalar(s));
                    out.push('\n');
                }
                YamlValue::Block(text) => render_block(&mut out, text),
            }
        }
        out
    }
}

// Block lines sit four columns in: two for the list item, two for the value.
fn render_block(out: &mut String, text: &str) {
    let body = text.trim_end_matches('\n');
    out.push_str(" |");
    // An indentation indicator is required when the first line is indented.
    if body.starts_with(' ') {
        out.push('2');
    }
    out.push_str("-\n");
    for line in body.split('\n') {
        let line = line.trim_end_matches('\r');
        if !line.is_empty() {
            out.push_str("    ");
            out.push_str(line);
        }
        out.push('\n');
    }
}

/// An append-only YAML list document.
///
/// Existing content is kept byte for byte; new entries are added at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YamlListDocument {
    text: String,
}

impl YamlListDocument {
    /// Wrap the current document text. Blank text or an empty flow list
    /// (`[]`) starts a fresh document.
    pub fn from_existing(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == "[]" {
            Self::default()
        } else {
            Self {
                text: text.to_owned(),
            }
        }
    }

    pub fn append_entry(&mut self, entry: &YamlEntry) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str(&entry.render());
    }

    pub fn render(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn plain_scalars_stay_plain() {
        assert_eq!(yaml_scalar("Hello"), "Hello");
        assert_eq!(yaml_scalar("2024-01-02"), "2024-01-02");
        assert_eq!(yaml_scalar("https://example.com/a?b=c"), "https://example.com/a?b=c");
        assert_eq!(yaml_scalar("/blog/hello-world/"), "/blog/hello-world/");
        assert_eq!(yaml_scalar("你好，世界"), "你好，世界");
    }

    #[test]
    fn structural_values_are_quoted() {
        assert_eq!(yaml_scalar(""), "\"\"");
        assert_eq!(yaml_scalar("#"), "\"#\"");
        assert_eq!(yaml_scalar("Hello: World"), "\"Hello: World\"");
        assert_eq!(yaml_scalar("C# rocks #1"), "\"C# rocks #1\"");
        assert_eq!(yaml_scalar("- dash"), "\"- dash\"");
        assert_eq!(yaml_scalar("yes"), "\"yes\"");
        assert_eq!(yaml_scalar("NULL"), "\"NULL\"");
        assert_eq!(yaml_scalar("1.5"), "\"1.5\"");
        assert_eq!(yaml_scalar(" padded"), "\" padded\"");
        assert_eq!(yaml_scalar("say \"hi\": now"), r#""say \"hi\": now""#);
        assert_eq!(yaml_scalar("a\\b: c"), r#""a\\b: c""#);
    }

    #[test]
    fn yaml11_numbers_are_quoted() {
        for value in [
            "0x1F", "0o17", "017", "0b101", "1_000", "12:30", "-1:20:30", ".inf", "-.Inf",
            ".NaN", "+12",
        ] {
            assert_eq!(yaml_scalar(value), format!("\"{value}\""), "{value} must be quoted");
        }
        for value in ["2024-01-02", "v1.2", "12:30 pm", "0xZZ", "Room 101"] {
            assert_eq!(yaml_scalar(value), value, "{value} should stay plain");
        }
    }

    #[test]
    fn quoted_values_parse_back() {
        let tricky = [
            "Hello: World",
            "#",
            "yes",
            "say \"hi\": now",
            "back\\slash: x",
            "line\nbreak",
            "tab\there",
            "42",
        ];
        for value in tricky {
            let doc = format!("key: {}\n", yaml_scalar(value));
            let parsed: BTreeMap<String, String> = serde_yaml_ng::from_str(&doc).unwrap();
            assert_eq!(parsed["key"], value, "round-trip failed for {value:?}");
        }
    }

    #[test]
    fn front_matter_renders_in_order() {
        let doc = FrontMatter::new()
            .field("layout", "post")
            .field("title", "Hello")
            .optional_field("image", None)
            .optional_field("external_link", Some("  "))
            .field("date", "2024-01-02")
            .render_document("body");

        assert_eq!(
            doc,
            "---\nlayout: post\ntitle: Hello\ndate: 2024-01-02\n---\n\nbody\n"
        );
    }

    #[test]
    fn front_matter_header_is_valid_yaml() {
        let header = FrontMatter::new()
            .field("title", "Rust: the good parts")
            .field("excerpt", "It's #1, \"really\"")
            .render();
        let inner = header.trim_start_matches("---\n").trim_end_matches("---\n");
        let parsed: BTreeMap<String, String> = serde_yaml_ng::from_str(inner).unwrap();
        assert_eq!(parsed["title"], "Rust: the good parts");
        assert_eq!(parsed["excerpt"], "It's #1, \"really\"");
    }

    #[test]
    fn entry_renders_block_for_multiline_text() {
        let entry = YamlEntry::new()
            .scalar("name", "Ann")
            .text("content", "First line\n\n  indented\nlast")
            .scalar("link", "#");

        assert_eq!(
            entry.render(),
            "- name: Ann\n  content: |-\n    First line\n\n      indented\n    last\n  link: \"#\"\n"
        );
    }

    #[test]
    fn block_with_indented_first_line_gets_indicator() {
        let entry = YamlEntry::new().text("content", "  code\nmore");
        let parsed: Vec<BTreeMap<String, String>> =
            serde_yaml_ng::from_str(&entry.render()).unwrap();
        assert!(entry.render().contains("|2-"));
        assert_eq!(parsed[0]["content"], "  code\nmore");
    }

    #[test]
    fn list_document_appends_and_preserves() {
        let existing = "# testimonials\n- name: Old\n  content: kept";
        let mut doc = YamlListDocument::from_existing(existing);
        doc.append_entry(&YamlEntry::new().scalar("name", "New").text("content", "a\nb"));

        let rendered = doc.render();
        assert!(rendered.starts_with(existing));
        let parsed: Vec<BTreeMap<String, String>> = serde_yaml_ng::from_str(rendered).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["name"], "Old");
        assert_eq!(parsed[1]["name"], "New");
        assert_eq!(parsed[1]["content"], "a\nb");
    }

    #[test]
    fn list_document_starts_fresh_from_blank_or_empty_flow_list() {
        for seed in ["", "  \n", "[]\n"] {
            let mut doc = YamlListDocument::from_existing(seed);
            doc.append_entry(&YamlEntry::new().scalar("name", "Only"));
            assert_eq!(doc.into_string(), "- name: Only\n");
        }
    }

    #[test]
    fn same_entry_twice_gives_two_items() {
        let entry = YamlEntry::new().scalar("name", "Ann").scalar("content", "Great");
        let mut doc = YamlListDocument::default();
        doc.append_entry(&entry);
        doc.append_entry(&entry);
        let parsed: Vec<BTreeMap<String, String>> =
            serde_yaml_ng::from_str(doc.render()).unwrap();
        assert_eq!(parsed.len(), 2);
    }
}
