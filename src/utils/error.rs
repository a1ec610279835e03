use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

// Códigos numéricos estáveis da API, consumidos pelo frontend
pub const EMAIL_ALREADY_TAKEN: u32 = 0x1;
pub const USER_NOT_FOUND: u32 = 0x2;
pub const PASSWORD_DOES_NOT_MATCH: u32 = 0x3;

#[derive(Debug)]
pub enum AppError {
    /// Request payload failed schema validation (400)
    Validation(String),
    /// Missing, expired or undecodable session token (401)
    Unauthorized(&'static str),
    /// Authenticated but not allowed: wrong principal kind, unverified
    /// recruiter, or acting on someone else's record (403)
    Forbidden(&'static str),
    /// Lookup target does not exist (404)
    NotFound(&'static str),
    /// Duplicate offer for the same (recruiter, user) pair (409)
    Conflict(&'static str),
    /// Login with an email no principal has; rendered as `{ok, code: 2}`
    UnknownEmail,
    /// Login with a wrong password; rendered as `{ok, code: 3}`
    PasswordMismatch,
    /// MongoDB driver failure; detail is logged, never echoed
    Database(mongodb::error::Error),
    /// External image host failure; detail is logged, never echoed
    Upstream(String),
    /// Anything else (hashing, token signing); detail is logged, never echoed
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "validation failure: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "conflict: {}", msg),
            AppError::UnknownEmail => write!(f, "no account with this email"),
            AppError::PasswordMismatch => write!(f, "password does not match"),
            AppError::Database(err) => write!(f, "database error: {}", err),
            AppError::Upstream(msg) => write!(f, "upstream error: {}", msg),
            AppError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::Database(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("password hashing failed: {}", err))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) | AppError::PasswordMismatch => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::UnknownEmail => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Upstream(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // 5xx: o detalhe vai para o log, o cliente recebe mensagem genérica
        let body = match self {
            AppError::UnknownEmail => json!({ "ok": false, "code": USER_NOT_FOUND }),
            AppError::PasswordMismatch => json!({ "ok": false, "code": PASSWORD_DOES_NOT_MATCH }),
            AppError::Validation(msg) => json!({ "ok": false, "error": msg }),
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => json!({ "ok": false, "error": msg }),
            AppError::Database(err) => {
                log::error!("💥 Database error: {}", err);
                json!({ "ok": false, "error": "internal server error" })
            }
            AppError::Upstream(msg) => {
                log::error!("💥 Upstream error: {}", msg);
                json!({ "ok": false, "error": "internal server error" })
            }
            AppError::Internal(msg) => {
                log::error!("💥 Internal error: {}", msg);
                json!({ "ok": false, "error": "internal server error" })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("nope").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("missing").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("dup").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::UnknownEmail.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::PasswordMismatch.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_coded_bodies() {
        let resp = AppError::UnknownEmail.error_response();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["ok"], false);
        assert_eq!(body["code"], USER_NOT_FOUND);

        let resp = AppError::PasswordMismatch.error_response();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], PASSWORD_DOES_NOT_MATCH);
    }

    #[actix_web::test]
    async fn test_internal_error_is_generic() {
        let resp = AppError::Internal("secret detail".into()).error_response();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "internal server error");
        assert!(!body.to_string().contains("secret detail"));
    }
}
