use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use jobboard_service::config::AppConfig;
use jobboard_service::database::MongoDB;
use jobboard_service::middleware::SecurityHeaders;
use jobboard_service::{api, configure_routes};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Configuração lida uma vez; o resto do serviço recebe via web::Data
    let config = AppConfig::from_env();

    log::info!("🚀 Starting Jobboard Service...");
    log::info!("📊 Database: {}", config.database_url);

    // Initialize MongoDB connection (also creates the unique indexes)
    let db = MongoDB::new(&config.database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db);
    let config_data = web::Data::new(config.clone());

    log::info!("✅ MongoDB connected successfully");
    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!(
        "📚 Swagger UI available at: http://{}:{}/swagger-ui/",
        config.host,
        config.port
    );
    log::info!(
        "📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json",
        config.host,
        config.port
    );

    let bind_addr = format!("{}:{}", config.host, config.port);

    // Start HTTP server
    HttpServer::new(move || {
        // O cookie de sessão exige credenciais no CORS, então a origem
        // liberada é explícita (supports_credentials não convive com "*")
        let cors = Cors::default()
            .allowed_origin(&config.allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(config_data.clone())
            .wrap(cors)
            .wrap(SecurityHeaders)
            .wrap(Logger::default())
            // Swagger UI
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(configure_routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}
