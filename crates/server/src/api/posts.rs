use axum::Json;
use axum::extract::State;
use tracing::info;

use sitedesk_core::BlogPostRequest;

use super::AppState;
use super::extract::ApiJson;
use super::publish::upsert;
use super::schemas::{ErrorResponse, SavePostResponse};
use crate::error::ServerError;

/// `POST /api/save-post` -- commit a Markdown blog post and its image.
#[utoipa::path(
    post,
    path = "/api/save-post",
    tag = "Content",
    summary = "Save blog post",
    description = "Renders the post as Markdown with a front-matter header and commits it to the site repository at posts/<date>-<slug>. An optional image is validated before anything is written and committed after the post.",
    request_body(content = BlogPostRequest, description = "Blog post to publish"),
    responses(
        (status = 200, description = "Post committed", body = SavePostResponse),
        (status = 400, description = "Missing or invalid fields, or a bad image", body = ErrorResponse),
        (status = 500, description = "Storage not configured or the write failed", body = ErrorResponse)
    )
)]
pub async fn save_post(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<BlogPostRequest>,
) -> Result<Json<SavePostResponse>, ServerError> {
    let post = request.validate()?;
    let store = state.store()?;
    let layout = &state.post_layout;

    let path = post.storage_path(layout);
    let document = post.render(layout);
    upsert(
        store.as_ref(),
        &path,
        document.as_bytes(),
        &format!("blog post: {}", post.title),
    )
    .await?;

    if let (Some(image), Some(image_path)) = (&post.image, post.image_path(layout)) {
        upsert(
            store.as_ref(),
            &image_path,
            &image.bytes,
            &format!("image for blog post: {}", post.title),
        )
        .await?;
    }

    info!(path = %path, has_image = post.image.is_some(), "blog post saved");

    Ok(Json(SavePostResponse {
        success: true,
        path,
        message: "Blog post saved. It will appear after the next site rebuild.".into(),
    }))
}
