// ==================== PROFILE MANAGEMENT ====================
// Perfil público por user_id + edição do próprio perfil

use crate::database::MongoDB;
use crate::models::User;
use crate::utils::AppError;
use mongodb::bson::{doc, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ==================== REQUEST/RESPONSE MODELS ====================

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PublicProfileResponse {
    /// Caminho da requisição que resolveu este perfil
    #[serde(rename = "profileUrl")]
    pub profile_url: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct EditProfilePayload {
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 60, message = "username must be 1-60 characters"))]
    pub username: Option<String>,
    #[validate(length(max = 1000, message = "bio must be at most 1000 characters"))]
    pub bio: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct EditProfileResponse {
    pub ok: bool,
}

// ==================== SERVICE FUNCTIONS ====================

/// GET /api/profile/{uid} - Perfil público de qualquer usuário
pub async fn public_profile(
    db: &MongoDB,
    uid: &str,
    request_path: &str,
) -> Result<PublicProfileResponse, AppError> {
    let collection = db.collection::<User>("users");

    let user = collection
        .find_one(doc! { "user_id": uid })
        .await?
        .ok_or(AppError::NotFound("user not found"))?;

    Ok(PublicProfileResponse {
        profile_url: request_path.to_string(),
        email: user.email,
        username: user.username,
        bio: user.bio,
    })
}

/// POST /api/edit/profile - Atualiza só os campos permitidos do próprio perfil
pub async fn edit_profile(
    db: &MongoDB,
    user_id: &str,
    payload: &EditProfilePayload,
) -> Result<EditProfileResponse, AppError> {
    let collection = db.collection::<User>("users");

    // Apenas name/username/bio entram no $set; email e password têm fluxo próprio
    let mut set = doc! { "updated_at": BsonDateTime::now() };
    if let Some(name) = &payload.name {
        set.insert("name", name.as_str());
    }
    if let Some(username) = &payload.username {
        set.insert("username", username.as_str());
    }
    if let Some(bio) = &payload.bio {
        set.insert("bio", bio.as_str());
    }

    let result = collection
        .update_one(doc! { "user_id": user_id }, doc! { "$set": set })
        .await?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound("user not found"));
    }

    log::info!("🔧 Profile updated for user {}", user_id);

    Ok(EditProfileResponse { ok: true })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_profile_shape() {
        let response = PublicProfileResponse {
            profile_url: "/api/profile/abc123".to_string(),
            email: "ana@example.com".to_string(),
            username: Some("ana".to_string()),
            bio: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["profileUrl"], "/api/profile/abc123");
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["username"], "ana");
        // campos ausentes ficam fora do corpo em vez de null
        assert!(json.get("bio").is_none());
    }

    #[test]
    fn test_edit_payload_validation() {
        let too_long_bio = EditProfilePayload {
            name: None,
            username: None,
            bio: Some("x".repeat(1001)),
        };
        assert!(too_long_bio.validate().is_err());

        let empty_username = EditProfilePayload {
            name: None,
            username: Some(String::new()),
            bio: None,
        };
        assert!(empty_username.validate().is_err());

        let ok = EditProfilePayload {
            name: Some("Ana Souza".to_string()),
            username: Some("ana".to_string()),
            bio: Some("Rust dev".to_string()),
        };
        assert!(ok.validate().is_ok());
    }
}
