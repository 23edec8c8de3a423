//! Core types and request validation for sitedesk.
//!
//! Everything in this crate is pure: request types are validated into domain
//! values, and domain values are rendered into the documents that end up in
//! the site repository. No I/O happens here.

pub mod document;
pub mod email;
pub mod error;
pub mod image;
pub mod post;
pub mod sanitize;
pub mod slug;
pub mod testimonial;

pub use document::{FrontMatter, YamlEntry, YamlListDocument, YamlValue, yaml_scalar};
pub use email::{EmailRequest, ValidatedEmail};
pub use error::ValidationError;
pub use image::{DecodedImage, ImageExtension, ImagePayload, MAX_IMAGE_BYTES};
pub use post::{BlogPost, BlogPostRequest, PostLayout};
pub use sanitize::{escape_html, find_dangerous_pattern, is_valid_email, sanitize};
pub use slug::{name_slug, post_slug};
pub use testimonial::{Testimonial, TestimonialDefaults, TestimonialRequest};
