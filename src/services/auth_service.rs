use crate::config::AppConfig;
use crate::database::{is_duplicate_key, MongoDB};
use crate::models::{Recruiter, User};
use crate::utils::{AppError, EMAIL_ALREADY_TAKEN};
use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;
use validator::Validate;

/// Nome do cookie de sessão emitido em POST /api/auth
pub const AUTH_COOKIE: &str = "auth_token";

/// Tipo de conta dono da sessão. Vai dentro do claim `role` e decide
/// em qual coleção o principal é recarregado a cada requisição.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Recruiter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Recruiter => write!(f, "recruiter"),
        }
    }
}

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,           // user_id ou recruiter_id
    pub email: String,
    pub role: Role,
    pub iat: usize,            // issued at
    pub exp: usize,            // expiration
    pub jti: String,           // JWT ID
    pub aud: String,           // audience
    pub iss: String,           // issuer
}

// Request/Response structures
#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct JoinPayload {
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct JoinResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub ok: bool,
    pub token: String,
}

// Generate session token
pub fn issue_token(
    config: &AppConfig,
    principal_id: &str,
    email: &str,
    role: Role,
) -> Result<String, AppError> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::days(config.session_ttl_days)).timestamp() as usize;
    let jti = Uuid::new_v4().to_string();

    let claims = Claims {
        sub: principal_id.to_string(),
        email: email.to_string(),
        role,
        iat,
        exp,
        jti,
        aud: config.jwt_audience.clone(),
        iss: config.jwt_issuer.clone(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )
    .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))
}

// Verify session token
pub fn verify_token(config: &AppConfig, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.jwt_audience.clone()]);

    let mut issuers = HashSet::new();
    issuers.insert(config.jwt_issuer.clone());
    validation.iss = Some(issuers);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("invalid or expired session token"))
}

/// Cookie httpOnly com a mesma validade do token
pub fn session_cookie<'c>(config: &AppConfig, token: &'c str) -> Cookie<'c> {
    Cookie::build(AUTH_COOKIE, token)
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::days(config.session_ttl_days))
        .finish()
}

// User registration
pub async fn join_user(db: &MongoDB, payload: &JoinPayload) -> Result<JoinResponse, AppError> {
    let collection = db.collection::<User>("users");

    let filter = doc! { "email": &payload.email };
    if collection.find_one(filter).await?.is_some() {
        return Ok(JoinResponse {
            ok: false,
            code: Some(EMAIL_ALREADY_TAKEN),
        });
    }

    let new_user = User {
        id: None,
        user_id: ObjectId::new().to_hex(),
        name: payload.name.clone(),
        email: payload.email.clone(),
        password: hash(&payload.password, DEFAULT_COST)?,
        username: None,
        bio: None,
        created_at: Some(BsonDateTime::now()),
        updated_at: Some(BsonDateTime::now()),
    };

    if let Err(e) = collection.insert_one(&new_user).await {
        // corrida perdida: outro join pegou o email entre o find e o insert
        if is_duplicate_key(&e) {
            return Ok(JoinResponse {
                ok: false,
                code: Some(EMAIL_ALREADY_TAKEN),
            });
        }
        return Err(e.into());
    }

    log::info!("✅ User account created: {}", new_user.email);

    Ok(JoinResponse { ok: true, code: None })
}

// Recruiter registration (starts unverified)
pub async fn join_recruiter(db: &MongoDB, payload: &JoinPayload) -> Result<JoinResponse, AppError> {
    let collection = db.collection::<Recruiter>("recruiters");

    let filter = doc! { "email": &payload.email };
    if collection.find_one(filter).await?.is_some() {
        return Ok(JoinResponse {
            ok: false,
            code: Some(EMAIL_ALREADY_TAKEN),
        });
    }

    let new_recruiter = Recruiter {
        id: None,
        recruiter_id: ObjectId::new().to_hex(),
        name: payload.name.clone(),
        email: payload.email.clone(),
        password: hash(&payload.password, DEFAULT_COST)?,
        verified: false,
        created_at: Some(BsonDateTime::now()),
        updated_at: Some(BsonDateTime::now()),
    };

    if let Err(e) = collection.insert_one(&new_recruiter).await {
        if is_duplicate_key(&e) {
            return Ok(JoinResponse {
                ok: false,
                code: Some(EMAIL_ALREADY_TAKEN),
            });
        }
        return Err(e.into());
    }

    log::info!("✅ Recruiter account created: {}", new_recruiter.email);

    Ok(JoinResponse { ok: true, code: None })
}

// Login for either account kind, selected by the `type` query param
pub async fn login(
    db: &MongoDB,
    config: &AppConfig,
    role: Role,
    payload: &LoginPayload,
) -> Result<String, AppError> {
    match role {
        Role::User => {
            let collection = db.collection::<User>("users");
            let user = collection
                .find_one(doc! { "email": &payload.email })
                .await?
                .ok_or(AppError::UnknownEmail)?;

            if !verify(&payload.password, &user.password)? {
                return Err(AppError::PasswordMismatch);
            }

            issue_token(config, &user.user_id, &user.email, Role::User)
        }
        Role::Recruiter => {
            let collection = db.collection::<Recruiter>("recruiters");
            let recruiter = collection
                .find_one(doc! { "email": &payload.email })
                .await?
                .ok_or(AppError::UnknownEmail)?;

            if !verify(&payload.password, &recruiter.password)? {
                return Err(AppError::PasswordMismatch);
            }

            issue_token(
                config,
                &recruiter.recruiter_id,
                &recruiter.email,
                Role::Recruiter,
            )
        }
    }
}
