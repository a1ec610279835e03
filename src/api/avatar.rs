use crate::config::AppConfig;
use crate::services::image_service;
use crate::utils::AppError;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct AvatarPayload {
    /// Imagem em base64; data URI ("data:image/png;base64,...") também vale
    #[validate(length(min = 1, message = "image is required"))]
    pub image: String,
}

#[utoipa::path(
    post,
    path = "/api/company/edit/avatar",
    tag = "Profile",
    request_body = AvatarPayload,
    responses(
        (status = 200, description = "URL of the hosted image, as plain text", body = String, content_type = "text/plain"),
        (status = 400, description = "Body is not valid base64"),
        (status = 500, description = "Image host unavailable")
    )
)]
pub async fn edit_avatar(
    config: web::Data<AppConfig>,
    payload: web::Json<AvatarPayload>,
) -> Result<HttpResponse, AppError> {
    log::info!("🖼️ POST /api/company/edit/avatar");

    payload.validate()?;

    let url = image_service::upload_avatar(&config, &payload.image).await?;

    // o frontend espera a URL crua no corpo, não um envelope JSON
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(url))
}
