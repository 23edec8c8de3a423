use serde::{Deserialize, Serialize};

use crate::document::YamlEntry;
use crate::error::{ValidationError, require_fields};
use crate::image::{DecodedImage, ImagePayload};
use crate::sanitize::sanitize;
use crate::slug::name_slug;

/// Body of `POST /api/save-testimonial`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TestimonialRequest {
    #[cfg_attr(feature = "openapi", schema(example = "陳小明"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "coaching"))]
    pub category: Option<String>,
    pub content: Option<String>,
    #[serde(alias = "external_link", alias = "externalLink")]
    pub link: Option<String>,
    pub image: Option<ImagePayload>,
}

/// Where testimonials live and what fills in for omitted fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestimonialDefaults {
    /// The YAML list document holding every testimonial.
    pub data_path: String,
    pub images_dir: String,
    /// Image reference used when no image is uploaded.
    pub default_image: String,
    /// Link used when none is supplied.
    pub default_link: String,
}

impl Default for TestimonialDefaults {
    fn default() -> Self {
        Self {
            data_path: "_data/testimonials.yml".to_owned(),
            images_dir: "assets/images/testimonials".to_owned(),
            default_image: "/assets/images/testimonials/default.jpg".to_owned(),
            default_link: "#".to_owned(),
        }
    }
}

/// A validated testimonial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testimonial {
    pub name: String,
    pub category: String,
    pub content: String,
    pub link: Option<String>,
    pub image: Option<DecodedImage>,
}

impl TestimonialRequest {
    pub fn validate(&self) -> Result<Testimonial, ValidationError> {
        require_fields(&[
            ("name", self.name.as_deref()),
            ("category", self.category.as_deref()),
            ("content", self.content.as_deref()),
        ])?;

        let name = sanitize(self.name.as_deref().unwrap_or_default());
        let category = sanitize(self.category.as_deref().unwrap_or_default());
        let content = sanitize(self.content.as_deref().unwrap_or_default());
        require_fields(&[
            ("name", Some(name.as_str())),
            ("category", Some(category.as_str())),
            ("content", Some(content.as_str())),
        ])?;

        let image = self.image.as_ref().map(ImagePayload::decode).transpose()?;

        Ok(Testimonial {
            name,
            category,
            content,
            link: self
                .link
                .as_deref()
                .map(sanitize)
                .filter(|l| !l.is_empty()),
            image,
        })
    }
}

impl Testimonial {
    /// Filename slug derived from the name. Only used for the image file.
    pub fn name_slug(&self) -> String {
        name_slug(&self.name)
    }

    /// Repository path of the uploaded image, if any.
    pub fn image_path(&self, defaults: &TestimonialDefaults) -> Option<String> {
        self.image
            .as_ref()
            .map(|image| format!("{}/{}", defaults.images_dir, image.file_name(&self.name_slug())))
    }

    /// Build the list entry appended to the testimonials document.
    pub fn to_entry(&self, defaults: &TestimonialDefaults) -> YamlEntry {
        let image = self
            .image_path(defaults)
            .map_or_else(|| defaults.default_image.clone(), |p| format!("/{p}"));
        let link = self.link.as_deref().unwrap_or(&defaults.default_link);

        YamlEntry::new()
            .scalar("name", &self.name)
            .scalar("image", &image)
            .scalar("category", &self.category)
            .text("content", &self.content)
            .scalar("link", link)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::document::YamlListDocument;

    fn request(name: &str, content: &str) -> TestimonialRequest {
        TestimonialRequest {
            name: Some(name.into()),
            category: Some("coaching".into()),
            content: Some(content.into()),
            link: None,
            image: None,
        }
    }

    #[test]
    fn entry_uses_defaults() {
        let testimonial = request("Ann", "Great coach").validate().unwrap();
        let entry = testimonial.to_entry(&TestimonialDefaults::default());
        assert_eq!(
            entry.render(),
            "- name: Ann\n  image: /assets/images/testimonials/default.jpg\n  \
             category: coaching\n  content: Great coach\n  link: \"#\"\n"
        );
    }

    #[test]
    fn entry_uses_image_and_link() {
        let mut req = request("陳小明 Chen", "Line one\nLine two");
        req.link = Some("https://example.com/story".into());
        req.image = Some(ImagePayload {
            data: "aGVsbG8=".into(),
            extension: "jpg".into(),
        });
        let testimonial = req.validate().unwrap();
        let defaults = TestimonialDefaults::default();

        assert_eq!(
            testimonial.image_path(&defaults).as_deref(),
            Some("assets/images/testimonials/陳小明-chen.jpg")
        );

        let rendered = testimonial.to_entry(&defaults).render();
        let parsed: Vec<BTreeMap<String, String>> = serde_yaml_ng::from_str(&rendered).unwrap();
        assert_eq!(parsed[0]["name"], "陳小明 Chen");
        assert_eq!(parsed[0]["image"], "/assets/images/testimonials/陳小明-chen.jpg");
        assert_eq!(parsed[0]["content"], "Line one\nLine two");
        assert_eq!(parsed[0]["link"], "https://example.com/story");
        assert!(rendered.contains("content: |-\n"));
    }

    #[test]
    fn blank_link_falls_back() {
        let mut req = request("Ann", "Nice");
        req.link = Some("   ".into());
        let testimonial = req.validate().unwrap();
        assert!(testimonial.link.is_none());
    }

    #[test]
    fn content_is_sanitized() {
        let testimonial = request("<b>Ann</b>", "Loved it <script>x</script>")
            .validate()
            .unwrap();
        assert_eq!(testimonial.name, "Ann");
        assert_eq!(testimonial.content, "Loved it x");
    }

    #[test]
    fn rejects_missing_fields() {
        let req = TestimonialRequest {
            content: Some("text".into()),
            ..TestimonialRequest::default()
        };
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::MissingFields(vec!["name", "category"])
        );
    }

    #[test]
    fn same_name_appends_twice() {
        let defaults = TestimonialDefaults::default();
        let first = request("Ann", "First").validate().unwrap();
        let second = request("Ann", "Second").validate().unwrap();

        let mut doc = YamlListDocument::from_existing("");
        doc.append_entry(&first.to_entry(&defaults));
        doc.append_entry(&second.to_entry(&defaults));

        let parsed: Vec<BTreeMap<String, String>> = serde_yaml_ng::from_str(doc.render()).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["content"], "First");
        assert_eq!(parsed[1]["content"], "Second");
    }
}
