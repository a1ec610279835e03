use std::env;

/// Configuração do serviço, carregada uma única vez no startup e injetada
/// nas rotas via `web::Data` (nada de estado global mutável).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    /// Validade da sessão (token + cookie), em dias
    pub session_ttl_days: i64,
    /// Origem liberada no CORS (o cookie exige credenciais, então nada de "*")
    pub allowed_origin: String,
    /// Host externo de imagens para upload de avatar
    pub image_api_url: String,
    pub image_api_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "8000".to_string()),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "default-secret-change-me".to_string()),
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "jobboard-service".to_string()),
            jwt_audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "jobboard-api".to_string()),
            session_ttl_days: env::var("SESSION_TTL_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            allowed_origin: env::var("ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            image_api_url: env::var("IMAGE_API_URL")
                .unwrap_or_else(|_| "https://api.imgbb.com/1/upload".to_string()),
            image_api_key: env::var("IMAGE_API_KEY").ok(),
        }
    }

    /// Config fixa para testes de unidade, sem depender do ambiente
    #[cfg(test)]
    pub fn test_defaults() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: "8000".to_string(),
            database_url: "mongodb://localhost:27017/jobboard-test".to_string(),
            jwt_secret: "unit-test-secret".to_string(),
            jwt_issuer: "jobboard-service".to_string(),
            jwt_audience: "jobboard-api".to_string(),
            session_ttl_days: 30,
            allowed_origin: "http://localhost:3000".to_string(),
            image_api_url: "https://api.imgbb.com/1/upload".to_string(),
            image_api_key: Some("unit-test-key".to_string()),
        }
    }
}
