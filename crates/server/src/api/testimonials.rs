use axum::Json;
use axum::extract::State;
use tracing::{info, warn};

use sitedesk_core::{TestimonialRequest, YamlListDocument};

use super::AppState;
use super::extract::ApiJson;
use super::publish::upsert;
use super::schemas::{ErrorResponse, SaveTestimonialResponse};
use crate::error::ServerError;

/// `POST /api/save-testimonial` -- append a testimonial to the site's list.
#[utoipa::path(
    post,
    path = "/api/save-testimonial",
    tag = "Content",
    summary = "Save testimonial",
    description = "Appends one entry to the testimonials YAML list and commits it against the revision that was read. An optional image is committed afterwards; if that write fails the testimonial is still saved.",
    request_body(content = TestimonialRequest, description = "Testimonial to publish"),
    responses(
        (status = 200, description = "Testimonial committed", body = SaveTestimonialResponse),
        (status = 400, description = "Missing or invalid fields, or a bad image", body = ErrorResponse),
        (status = 500, description = "Storage not configured or the write failed", body = ErrorResponse)
    )
)]
pub async fn save_testimonial(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TestimonialRequest>,
) -> Result<Json<SaveTestimonialResponse>, ServerError> {
    let testimonial = request.validate()?;
    let store = state.store()?;
    let defaults = &state.testimonials;

    let (existing, base) = match store.read(&defaults.data_path).await? {
        Some(file) => (file.text(), Some(file.revision)),
        None => (String::new(), None),
    };

    let mut document = YamlListDocument::from_existing(&existing);
    document.append_entry(&testimonial.to_entry(defaults));

    store
        .write(
            &defaults.data_path,
            document.render().as_bytes(),
            base.as_ref(),
            &format!("Add testimonial from {}", testimonial.name),
        )
        .await?;

    // The list entry is the record; a failed image upload leaves it pointing
    // at a missing file until the image is re-uploaded.
    if let (Some(image), Some(image_path)) = (&testimonial.image, testimonial.image_path(defaults))
        && let Err(e) = upsert(
            store.as_ref(),
            &image_path,
            &image.bytes,
            &format!("image for testimonial from {}", testimonial.name),
        )
        .await
    {
        warn!(path = %image_path, error = %e, "testimonial image upload failed");
    }

    info!(path = %defaults.data_path, has_image = testimonial.image.is_some(), "testimonial saved");

    Ok(Json(SaveTestimonialResponse {
        success: true,
        message: "Testimonial saved. It will appear after the next site rebuild.".into(),
    }))
}
