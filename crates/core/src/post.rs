use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::document::FrontMatter;
use crate::error::{ValidationError, require_fields};
use crate::image::{DecodedImage, ImagePayload};
use crate::sanitize::sanitize;
use crate::slug::post_slug;

/// Body of `POST /api/save-post`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BlogPostRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Hello"))]
    pub title: Option<String>,
    /// ISO date; only the first 10 characters (`YYYY-MM-DD`) are used.
    #[cfg_attr(feature = "openapi", schema(example = "2024-01-02"))]
    pub date: Option<String>,
    /// Free-form slug, normalized before use.
    #[cfg_attr(feature = "openapi", schema(example = "Hello World"))]
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    /// Markdown body, stored verbatim.
    pub content: Option<String>,
    #[serde(alias = "externalLink")]
    pub external_link: Option<String>,
    pub image: Option<ImagePayload>,
}

/// Where posts and their images live in the site repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLayout {
    pub posts_dir: String,
    pub images_dir: String,
    pub layout: String,
    pub permalink_prefix: String,
}

impl Default for PostLayout {
    fn default() -> Self {
        Self {
            posts_dir: "posts".to_owned(),
            images_dir: "assets/images/blog".to_owned(),
            layout: "post".to_owned(),
            permalink_prefix: "/blog".to_owned(),
        }
    }
}

/// A validated blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub title: String,
    /// Normalized `YYYY-MM-DD`.
    pub date: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub external_link: Option<String>,
    pub image: Option<DecodedImage>,
}

impl BlogPostRequest {
    /// Validate the request into a [`BlogPost`].
    ///
    /// The image, when present, is fully decoded here so that a bad upload is
    /// rejected before anything is written.
    pub fn validate(&self) -> Result<BlogPost, ValidationError> {
        require_fields(&[
            ("title", self.title.as_deref()),
            ("date", self.date.as_deref()),
            ("slug", self.slug.as_deref()),
            ("excerpt", self.excerpt.as_deref()),
            ("content", self.content.as_deref()),
        ])?;

        let date = date_prefix(self.date.as_deref().unwrap_or_default())?;

        let slug = post_slug(self.slug.as_deref().unwrap_or_default());
        if slug.is_empty() {
            return Err(ValidationError::EmptySlug);
        }

        let title = sanitize(self.title.as_deref().unwrap_or_default());
        let excerpt = sanitize(self.excerpt.as_deref().unwrap_or_default());
        require_fields(&[
            ("title", Some(title.as_str())),
            ("excerpt", Some(excerpt.as_str())),
        ])?;

        let image = self.image.as_ref().map(ImagePayload::decode).transpose()?;

        Ok(BlogPost {
            title,
            date,
            slug,
            excerpt,
            content: self.content.clone().unwrap_or_default(),
            external_link: self
                .external_link
                .as_deref()
                .map(sanitize)
                .filter(|l| !l.is_empty()),
            image,
        })
    }
}

fn date_prefix(raw: &str) -> Result<String, ValidationError> {
    let prefix: String = raw.trim().chars().take(10).collect();
    NaiveDate::parse_from_str(&prefix, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| ValidationError::InvalidDate(prefix))
}

impl BlogPost {
    /// Repository path of the post document: `<posts_dir>/<date>-<slug>`.
    pub fn storage_path(&self, layout: &PostLayout) -> String {
        format!("{}/{}-{}", layout.posts_dir, self.date, self.slug)
    }

    /// Repository path of the post image, if the post has one.
    pub fn image_path(&self, layout: &PostLayout) -> Option<String> {
        self.image
            .as_ref()
            .map(|image| format!("{}/{}", layout.images_dir, image.file_name(&self.slug)))
    }

    /// Render the Markdown document with its front-matter header.
    pub fn render(&self, layout: &PostLayout) -> String {
        let image_url = self.image_path(layout).map(|p| format!("/{p}"));
        let permalink = format!(
            "{}/{}/",
            layout.permalink_prefix.trim_end_matches('/'),
            self.slug
        );

        FrontMatter::new()
            .field("layout", &layout.layout)
            .field("title", &self.title)
            .field("date", &self.date)
            .optional_field("image", image_url.as_deref())
            .field("excerpt", &self.excerpt)
            .field("permalink", &permalink)
            .optional_field("external_link", self.external_link.as_deref())
            .render_document(&self.content)
    }
}
