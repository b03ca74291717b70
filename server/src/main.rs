use actix_web::{middleware as actix_middleware, web, App, HttpServer};
use mongodb::Client;

use techtrend_server::{
    app,
    auth_token::{AuthTokenService, SESSION_TTL},
    config::{AppConfig, StoreBackend},
    db::BlogDbContext,
    handlers::CookiePolicy,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if it exists (for development)
    // Try loading from current directory first, then from server/ directory
    if dotenvy::dotenv().is_err() {
        dotenvy::from_filename("server/.env").ok();
    }

    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        log::error!("{}", e);
        std::process::exit(1);
    });

    let auth_tokens =
        AuthTokenService::new(config.token_secret.clone().into_bytes(), SESSION_TTL)
            .unwrap_or_else(|e| {
                log::error!("ACCESS_TOKEN_SECRET rejected: {}", e);
                std::process::exit(1);
            });

    let db_context = match config.store_backend {
        StoreBackend::MongoDb => {
            log::info!("Connecting to MongoDB (database '{}')...", config.database_name);
            let client = Client::with_uri_str(config.mongodb_uri())
                .await
                .unwrap_or_else(|e| {
                    log::error!("Failed to create MongoDB client: {}", e);
                    std::process::exit(1);
                });
            BlogDbContext::new(client, &config.database_name)
        }
        StoreBackend::Memory => {
            log::warn!("Using the in-memory store; data is lost on restart");
            BlogDbContext::in_memory()
        }
    };

    if let Err(e) = db_context.ping().await {
        log::error!("Failed to reach the document store: {}", e);
        std::process::exit(1);
    }
    log::info!("Pinged your deployment. You successfully connected to the document store!");

    let cookie_policy = CookiePolicy::new(config.cookie_secure);
    let client_origin = config.client_origin.clone();
    if !config.cookie_secure {
        log::warn!("Session cookies are issued without the Secure flag");
    }

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db_context.clone()))
            .app_data(web::Data::new(auth_tokens.clone()))
            .app_data(web::Data::new(cookie_policy.clone()))
            .app_data(app::json_config())
            .wrap(app::cors(&client_origin))
            .wrap(actix_middleware::Logger::default())
            .configure(app::configure)
    })
    .bind(config.bind_address())?;

    log::info!("tech trend is running on port {}", config.port);

    server.run().await
}
