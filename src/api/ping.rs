use crate::middleware::auth::{AuthRecruiter, AuthUser, Session};
use crate::models::{RecruiterInfo, UserInfo};
use actix_web::HttpResponse;
use serde_json::json;

/// GET /api/ping/1 - prova de vida de uma sessão de usuário
pub async fn ping_user(session: Session, user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "msg": "PONG",
        "session": session.0,
        "user": UserInfo::from(user.0),
    }))
}

/// GET /api/ping/2 - prova de vida de uma sessão de recrutador
pub async fn ping_recruiter(session: Session, recruiter: AuthRecruiter) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "msg": "PONG",
        "session": session.0,
        "recruiter": RecruiterInfo::from(recruiter.0),
    }))
}
