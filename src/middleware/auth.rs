use crate::config::AppConfig;
use crate::database::MongoDB;
use crate::models::{Recruiter, User};
use crate::services::auth_service::{self, Claims, Role, AUTH_COOKIE};
use crate::utils::AppError;
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use mongodb::bson::doc;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Conta carregada do banco a cada requisição autenticada. Uma sessão cujo
/// dono foi removido deixa de valer mesmo com o token ainda dentro do prazo.
#[derive(Debug, Clone)]
pub enum Principal {
    User(User),
    Recruiter(Recruiter),
}

/// Resolve o token de sessão (cookie ou header), valida o JWT e injeta
/// `Claims` + `Principal` nas extensões da requisição. Rotas embrulhadas
/// por este middleware podem usar os extractors tipados abaixo.
pub struct SessionMiddleware;

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_token(&req) {
                Some(token) => token,
                None => return Err(AppError::Unauthorized("missing session token").into()),
            };

            let config = req
                .app_data::<web::Data<AppConfig>>()
                .ok_or_else(|| AppError::Internal("AppConfig not registered".to_string()))?;

            let claims = auth_service::verify_token(config, &token)?;

            let db = req
                .app_data::<web::Data<MongoDB>>()
                .ok_or_else(|| AppError::Internal("MongoDB not registered".to_string()))?;

            let principal = load_principal(db, &claims).await?;

            log::debug!("🔐 Session resolved: {} ({})", claims.sub, claims.role);

            req.extensions_mut().insert(claims);
            req.extensions_mut().insert(principal);

            service.call(req).await
        })
    }
}

/// Cookie httpOnly primeiro; header Authorization como fallback para
/// clientes sem cookie jar
fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.request().cookie(AUTH_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

async fn load_principal(db: &MongoDB, claims: &Claims) -> Result<Principal, AppError> {
    match claims.role {
        Role::User => {
            let user = db
                .collection::<User>("users")
                .find_one(doc! { "user_id": &claims.sub })
                .await?
                .ok_or(AppError::Unauthorized("session principal no longer exists"))?;
            Ok(Principal::User(user))
        }
        Role::Recruiter => {
            let recruiter = db
                .collection::<Recruiter>("recruiters")
                .find_one(doc! { "recruiter_id": &claims.sub })
                .await?
                .ok_or(AppError::Unauthorized("session principal no longer exists"))?;
            Ok(Principal::Recruiter(recruiter))
        }
    }
}

// ==================== TYPED EXTRACTORS ====================

/// Claims da sessão, para rotas que só precisam saber quem chamou
#[derive(Debug)]
pub struct Session(pub Claims);

impl FromRequest for Session {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.extensions().get::<Claims>() {
            Some(claims) => Ok(Session(claims.clone())),
            None => Err(AppError::Unauthorized("no session")),
        };
        ready(result)
    }
}

/// Sessão de usuário; recrutador autenticado recebe 403 aqui
#[derive(Debug)]
pub struct AuthUser(pub User);

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.extensions().get::<Principal>() {
            Some(Principal::User(user)) => Ok(AuthUser(user.clone())),
            Some(Principal::Recruiter(_)) => {
                Err(AppError::Forbidden("this route requires a user session"))
            }
            None => Err(AppError::Unauthorized("no session")),
        };
        ready(result)
    }
}

/// Sessão de recrutador, verificado ou não
#[derive(Debug)]
pub struct AuthRecruiter(pub Recruiter);

impl FromRequest for AuthRecruiter {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.extensions().get::<Principal>() {
            Some(Principal::Recruiter(recruiter)) => Ok(AuthRecruiter(recruiter.clone())),
            Some(Principal::User(_)) => {
                Err(AppError::Forbidden("this route requires a recruiter session"))
            }
            None => Err(AppError::Unauthorized("no session")),
        };
        ready(result)
    }
}

/// Sessão de recrutador verificado; só esse pode criar ofertas
#[derive(Debug)]
pub struct VerifiedRecruiter(pub Recruiter);

impl FromRequest for VerifiedRecruiter {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.extensions().get::<Principal>() {
            Some(Principal::Recruiter(recruiter)) => {
                if recruiter.verified {
                    Ok(VerifiedRecruiter(recruiter.clone()))
                } else {
                    Err(AppError::Forbidden("recruiter is not verified"))
                }
            }
            Some(Principal::User(_)) => {
                Err(AppError::Forbidden("this route requires a recruiter session"))
            }
            None => Err(AppError::Unauthorized("no session")),
        };
        ready(result)
    }
}
