use std::collections::HashMap;

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn empty_file_gives_defaults() {
    let config = SiteConfig::from_toml("").unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.shutdown_timeout_seconds, 30);
    assert_eq!(config.server.max_body_bytes, 8 * 1024 * 1024);
    assert_eq!(config.email.backend, "resend");
    assert!(config.email.api_key.is_none());
    assert_eq!(config.email.api_base, "https://api.resend.com");
    assert_eq!(config.github.branch, "main");
    assert_eq!(config.github.api_base, "https://api.github.com");
    assert_eq!(config.content.posts_dir, "posts");
    assert_eq!(config.content.testimonials_path, "_data/testimonials.yml");
    assert_eq!(
        config.content.default_testimonial_image,
        "/assets/images/testimonials/default.jpg"
    );
    assert_eq!(config.content.default_testimonial_link, "#");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Text);

    assert!(config.validate().is_ok());
    assert!(!config.email_configured());
    assert!(!config.storage_configured());
}

#[test]
fn full_file() {
    let toml = r#"
        [server]
        host = "0.0.0.0"
        port = 3000
        max_body_bytes = 1048576

        [email]
        api_key = "re_file"
        from_address = "Site <hello@example.com>"
        timeout_seconds = 10

        [github]
        token = "ghp_file"
        repository = "acme/site"
        branch = "gh-pages"

        [content]
        posts_dir = "_posts/"
        permalink_prefix = "/articles"

        [logging]
        level = "debug"
        format = "json"
    "#;

    let config = SiteConfig::from_toml(toml).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.max_body_bytes, 1_048_576);
    assert_eq!(config.email.api_key.as_deref(), Some("re_file"));
    assert_eq!(config.email.timeout_seconds, 10);
    assert_eq!(config.github.branch, "gh-pages");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.validate().is_ok());
    assert!(config.email_configured());
    assert!(config.storage_configured());

    let layout = config.content.post_layout();
    assert_eq!(layout.posts_dir, "_posts");
    assert_eq!(layout.permalink_prefix, "/articles");
    assert_eq!(layout.images_dir, "assets/images/blog");
}

#[test]
fn unknown_log_format_is_rejected() {
    let toml = r#"
        [logging]
        format = "xml"
    "#;
    assert!(matches!(
        SiteConfig::from_toml(toml),
        Err(ServerError::Config(_))
    ));
}

#[test]
fn environment_overrides_file() {
    let toml = r#"
        [email]
        api_key = "re_file"

        [github]
        token = "ghp_file"
        repository = "acme/site"
    "#;
    let mut config = SiteConfig::from_toml(toml).unwrap();
    config
        .apply_env(env(&[
            ("RESEND_API_KEY", "re_env"),
            ("EMAIL_FROM", "site@example.com"),
            ("GITHUB_TOKEN", "ghp_env"),
            ("GITHUB_REPO", "other/repo"),
            ("GITHUB_BRANCH", "drafts"),
            ("SITEDESK_HOST", "0.0.0.0"),
            ("SITEDESK_PORT", "9090"),
        ]))
        .unwrap();

    assert_eq!(config.email.api_key.as_deref(), Some("re_env"));
    assert_eq!(config.email.from_address.as_deref(), Some("site@example.com"));
    assert_eq!(config.github.token.as_deref(), Some("ghp_env"));
    assert_eq!(config.github.repository.as_deref(), Some("other/repo"));
    assert_eq!(config.github.branch, "drafts");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9090);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_environment_values_are_ignored() {
    let mut config = SiteConfig::from_toml("[email]\napi_key = \"re_file\"\n").unwrap();
    config.apply_env(env(&[("RESEND_API_KEY", "")])).unwrap();
    assert_eq!(config.email.api_key.as_deref(), Some("re_file"));
}

#[test]
fn bad_port_in_environment_fails() {
    let mut config = SiteConfig::default();
    let err = config
        .apply_env(env(&[("SITEDESK_PORT", "eighty")]))
        .unwrap_err();
    assert!(err.to_string().contains("SITEDESK_PORT"));
}

#[test]
fn malformed_repository_fails_validation() {
    let mut config = SiteConfig::default();
    config.github.token = Some("ghp_x".into());
    config.github.repository = Some("just-a-name".into());
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("owner/name"), "{err}");
}

#[test]
fn blank_credentials_fail_validation() {
    let mut config = SiteConfig::default();
    config.email.api_key = Some("   ".into());
    assert!(config.validate().is_err());

    let mut config = SiteConfig::default();
    config.github.token = Some(String::new());
    config.github.repository = Some("acme/site".into());
    assert!(config.validate().is_err());
}

#[test]
fn half_configured_github_fails_validation() {
    let mut config = SiteConfig::default();
    config.github.repository = Some("acme/site".into());
    assert!(config.validate().is_err());

    let mut config = SiteConfig::default();
    config.github.token = Some("ghp_x".into());
    assert!(config.validate().is_err());
}

#[test]
fn sender_address_is_validated() {
    let mut config = SiteConfig::default();
    config.email.from_address = Some("Site <hello@example.com>".into());
    assert!(config.validate().is_ok());

    config.email.from_address = Some("not an address".into());
    assert!(config.validate().is_err());
}

#[test]
fn unknown_email_backend_fails_validation() {
    let mut config = SiteConfig::default();
    config.email.backend = "smtp".into();
    assert!(config.validate().is_err());

    config.email.backend = "log".into();
    assert!(config.validate().is_ok());
    assert!(config.email_configured());
}

#[test]
fn debug_output_redacts_secrets() {
    let mut config = SiteConfig::default();
    config.email.api_key = Some("re_test-placeholder".into());
    config.github.token = Some("ghp_test-placeholder".into());
    let debug = format!("{config:?}");
    assert!(debug.contains("[REDACTED]"));
    assert!(!debug.contains("test-placeholder"));
}

#[test]
fn testimonial_defaults_follow_content_section() {
    let toml = r#"
        [content]
        testimonials_path = "/_data/reviews.yml"
        default_testimonial_link = "https://example.com"
    "#;
    let config = SiteConfig::from_toml(toml).unwrap();
    let defaults = config.content.testimonial_defaults();
    assert_eq!(defaults.data_path, "_data/reviews.yml");
    assert_eq!(defaults.default_link, "https://example.com");
    assert_eq!(defaults.images_dir, "assets/images/testimonials");
}
