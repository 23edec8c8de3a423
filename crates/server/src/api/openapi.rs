#![allow(clippy::needless_for_each)]

use sitedesk_core::{BlogPostRequest, EmailRequest, ImagePayload, TestimonialRequest};

use super::schemas::{
    ErrorResponse, HealthResponse, SaveTestimonialResponse, SavePostResponse, SendEmailResponse,
};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "sitedesk API",
        version = "0.1.0",
        description = "Backend for a statically generated site. Relays contact-form email and commits blog posts and testimonials to the site repository.",
        license(name = "Apache-2.0")
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Email", description = "Contact-form email relay"),
        (name = "Content", description = "Blog posts and testimonials committed to the site repository")
    ),
    paths(
        super::health::health,
        super::email::send_email,
        super::posts::save_post,
        super::testimonials::save_testimonial,
    ),
    components(schemas(
        HealthResponse,
        ErrorResponse,
        EmailRequest,
        SendEmailResponse,
        BlogPostRequest,
        ImagePayload,
        SavePostResponse,
        TestimonialRequest,
        SaveTestimonialResponse,
    ))
)]
pub struct ApiDoc;
