use serde::Deserialize;
use sitedesk_core::{PostLayout, TestimonialDefaults};

/// Where content lands in the site repository (`[content]`).
///
/// The defaults match a Jekyll-style layout.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_posts_dir")]
    pub posts_dir: String,
    #[serde(default = "default_blog_images_dir")]
    pub blog_images_dir: String,
    /// Front-matter `layout` value for posts.
    #[serde(default = "default_post_layout")]
    pub post_layout: String,
    /// Posts are published at `<permalink_prefix>/<slug>/`.
    #[serde(default = "default_permalink_prefix")]
    pub permalink_prefix: String,
    /// YAML list holding every testimonial.
    #[serde(default = "default_testimonials_path")]
    pub testimonials_path: String,
    #[serde(default = "default_testimonial_images_dir")]
    pub testimonial_images_dir: String,
    /// Image reference used when a testimonial has no upload.
    #[serde(default = "default_testimonial_image")]
    pub default_testimonial_image: String,
    /// Link used when a testimonial has none.
    #[serde(default = "default_testimonial_link")]
    pub default_testimonial_link: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            posts_dir: default_posts_dir(),
            blog_images_dir: default_blog_images_dir(),
            post_layout: default_post_layout(),
            permalink_prefix: default_permalink_prefix(),
            testimonials_path: default_testimonials_path(),
            testimonial_images_dir: default_testimonial_images_dir(),
            default_testimonial_image: default_testimonial_image(),
            default_testimonial_link: default_testimonial_link(),
        }
    }
}

impl ContentConfig {
    pub fn post_layout(&self) -> PostLayout {
        PostLayout {
            posts_dir: trim_dir(&self.posts_dir),
            images_dir: trim_dir(&self.blog_images_dir),
            layout: self.post_layout.clone(),
            permalink_prefix: self.permalink_prefix.clone(),
        }
    }

    pub fn testimonial_defaults(&self) -> TestimonialDefaults {
        TestimonialDefaults {
            data_path: self.testimonials_path.trim_matches('/').to_owned(),
            images_dir: trim_dir(&self.testimonial_images_dir),
            default_image: self.default_testimonial_image.clone(),
            default_link: self.default_testimonial_link.clone(),
        }
    }
}

fn trim_dir(dir: &str) -> String {
    dir.trim_matches('/').to_owned()
}

fn default_posts_dir() -> String {
    PostLayout::default().posts_dir
}

fn default_blog_images_dir() -> String {
    PostLayout::default().images_dir
}

fn default_post_layout() -> String {
    PostLayout::default().layout
}

fn default_permalink_prefix() -> String {
    PostLayout::default().permalink_prefix
}

fn default_testimonials_path() -> String {
    TestimonialDefaults::default().data_path
}

fn default_testimonial_images_dir() -> String {
    TestimonialDefaults::default().images_dir
}

fn default_testimonial_image() -> String {
    TestimonialDefaults::default().default_image
}

fn default_testimonial_link() -> String {
    TestimonialDefaults::default().default_link
}
