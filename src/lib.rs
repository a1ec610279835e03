pub mod api;
pub mod config;
pub mod database;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use actix_web::web;

/// Tabela de rotas do serviço. Fica fora do `main` para os testes de
/// integração montarem o mesmo App que o binário serve.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check
        .route("/health", web::get().to(api::health::health_check))
        .service(
            web::scope("/api")
                // ==================== PUBLIC ROUTES ====================
                .route("/join", web::post().to(api::auth::join))
                .route("/company/join", web::post().to(api::auth::company_join))
                .route("/auth", web::post().to(api::auth::login))
                .route(
                    "/profile/{uid}",
                    web::get().to(api::profile::public_profile),
                )
                .route(
                    "/company/edit/avatar",
                    web::post().to(api::avatar::edit_avatar),
                )
                // ==================== SESSION ROUTES ====================
                // Tudo aqui dentro passa pelo SessionMiddleware, que valida o
                // token e carrega o principal do banco
                .service(
                    web::scope("")
                        .wrap(middleware::auth::SessionMiddleware)
                        .route("/ping/1", web::get().to(api::ping::ping_user))
                        .route("/ping/2", web::get().to(api::ping::ping_recruiter))
                        .route("/profile", web::get().to(api::profile::my_profile))
                        .route(
                            "/company/profile",
                            web::get().to(api::profile::company_profile),
                        )
                        .route("/edit/profile", web::post().to(api::profile::edit_profile))
                        .route("/com/offer", web::post().to(api::offers::create_offer))
                        .route("/offer/respond", web::get().to(api::offers::respond_offer)),
                ),
        );
}
