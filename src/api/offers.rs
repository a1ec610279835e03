use crate::database::MongoDB;
use crate::middleware::auth::{AuthUser, VerifiedRecruiter};
use crate::services::offer_service::{
    self, CreateOfferResponse, OfferPayload, RespondOfferResponse,
};
use crate::utils::AppError;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct RespondQuery {
    /// offer_id da oferta
    pub id: String,
    /// "true" aceita; qualquer outro valor recusa
    pub response: String,
}

#[utoipa::path(
    post,
    path = "/api/com/offer",
    tag = "Offers",
    request_body = OfferPayload,
    responses(
        (status = 200, description = "Offer created", body = CreateOfferResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "No session"),
        (status = 403, description = "Session is not a verified recruiter"),
        (status = 404, description = "Target user does not exist"),
        (status = 409, description = "An offer to this user already exists")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_offer(
    db: web::Data<MongoDB>,
    recruiter: VerifiedRecruiter,
    payload: web::Json<OfferPayload>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "📝 POST /api/com/offer - {} -> {}",
        recruiter.0.recruiter_id,
        payload.to
    );

    payload.validate()?;

    let response = offer_service::create_offer(&db, &recruiter.0, &payload).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/offer/respond",
    tag = "Offers",
    params(
        ("id" = String, Query, description = "offer_id da oferta"),
        ("response" = String, Query, description = "'true' aceita, qualquer outro valor recusa")
    ),
    responses(
        (status = 200, description = "Offer closed", body = RespondOfferResponse),
        (status = 401, description = "No session"),
        (status = 403, description = "Offer is addressed to someone else"),
        (status = 404, description = "Offer not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn respond_offer(
    db: web::Data<MongoDB>,
    user: AuthUser,
    query: web::Query<RespondQuery>,
) -> Result<HttpResponse, AppError> {
    let accept = query.response == "true";

    log::info!(
        "🔄 GET /api/offer/respond - offer: {}, accept: {}",
        query.id,
        accept
    );

    let response = offer_service::respond_offer(&db, &user.0, &query.id, accept).await?;

    Ok(HttpResponse::Ok().json(response))
}
