// ==================== OFFER MANAGEMENT ====================
// Ofertas de recrutadores verificados para usuários.
// Responder (aceitar ou recusar) encerra a oferta removendo o documento.

use crate::database::{is_duplicate_key, MongoDB};
use crate::models::{Offer, Recruiter, User};
use crate::utils::AppError;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ==================== REQUEST/RESPONSE MODELS ====================

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct OfferPayload {
    /// user_id do destinatário
    #[validate(length(min = 1, message = "to is required"))]
    pub to: String,
    #[validate(length(max = 200, message = "position must be at most 200 characters"))]
    pub position: Option<String>,
    #[validate(length(max = 2000, message = "message must be at most 2000 characters"))]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreateOfferResponse {
    pub ok: bool,
    /// Identificador da oferta criada
    pub offer: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RespondOfferResponse {
    pub ok: bool,
}

// ==================== SERVICE FUNCTIONS ====================

/// POST /api/com/offer - Cria uma oferta para um usuário existente
pub async fn create_offer(
    db: &MongoDB,
    recruiter: &Recruiter,
    payload: &OfferPayload,
) -> Result<CreateOfferResponse, AppError> {
    // 1. Destinatário precisa existir na coleção de usuários
    let users = db.collection::<User>("users");
    users
        .find_one(doc! { "user_id": &payload.to })
        .await?
        .ok_or(AppError::NotFound("user not found"))?;

    // 2. No máximo uma oferta pendente por par (recruiter, user)
    let offers = db.collection::<Offer>("offers");
    let pair = doc! { "from": &recruiter.recruiter_id, "to": &payload.to };
    if offers.find_one(pair).await?.is_some() {
        return Err(AppError::Conflict("an offer to this user already exists"));
    }

    // 3. Insere; o índice único em (from, to) decide corridas
    let offer = Offer {
        id: None,
        offer_id: ObjectId::new().to_hex(),
        from: recruiter.recruiter_id.clone(),
        to: payload.to.clone(),
        position: payload.position.clone(),
        message: payload.message.clone(),
        created_at: Some(BsonDateTime::now()),
    };

    if let Err(e) = offers.insert_one(&offer).await {
        if is_duplicate_key(&e) {
            return Err(AppError::Conflict("an offer to this user already exists"));
        }
        return Err(e.into());
    }

    log::info!(
        "📝 Offer {} created: {} -> {}",
        offer.offer_id,
        offer.from,
        offer.to
    );

    Ok(CreateOfferResponse {
        ok: true,
        offer: offer.offer_id,
    })
}

/// GET /api/offer/respond - Destinatário aceita ou recusa uma oferta
pub async fn respond_offer(
    db: &MongoDB,
    user: &User,
    offer_id: &str,
    accept: bool,
) -> Result<RespondOfferResponse, AppError> {
    let offers = db.collection::<Offer>("offers");

    // 1. Oferta precisa existir
    let offer = offers
        .find_one(doc! { "offer_id": offer_id })
        .await?
        .ok_or(AppError::NotFound("offer not found"))?;

    // 2. Só o destinatário pode responder
    if offer.to != user.user_id {
        return Err(AppError::Forbidden("offer is not addressed to this user"));
    }

    // 3. Aceite e recusa encerram a oferta da mesma forma; o follow-up
    // entre as partes acontece fora do sistema
    offers.delete_one(doc! { "offer_id": offer_id }).await?;

    if accept {
        log::info!("🔄 Offer {} accepted by {}", offer_id, user.user_id);
    } else {
        log::info!("🔄 Offer {} declined by {}", offer_id, user.user_id);
    }

    Ok(RespondOfferResponse { ok: true })
}
