#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use userbridge::{
    handlers::configure_services, settings::BridgeSettings, utils::logging::LoggingHelper,
    CognitoClient, CognitoLegacyAuthenticator, LoginPassThrough, MigrationFinalizer,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from Settings.toml and environment variables
    // This also loads .env file and initializes the logger
    let settings = BridgeSettings::load()
        .map_err(|e| std::io::Error::other(format!("Failed to load settings: {e:#}")))?;

    // One pooled HTTP client shared by both user pools
    let http_client = reqwest::Client::new();

    let legacy_client = CognitoClient::from_settings(&settings.legacy_provider, http_client.clone())
        .map_err(|e| std::io::Error::other(format!("Failed to configure legacy provider: {e}")))?;
    let new_client = CognitoClient::from_settings(&settings.new_provider, http_client)
        .map_err(|e| std::io::Error::other(format!("Failed to configure new provider: {e}")))?;
    LoggingHelper::log_provider_configured("Legacy", legacy_client.name(), legacy_client.endpoint());
    LoggingHelper::log_provider_configured("New", new_client.name(), new_client.endpoint());

    let finalizer = MigrationFinalizer::new(Arc::new(CognitoLegacyAuthenticator::new(legacy_client)));
    let pass_through = LoginPassThrough::new(new_client);

    start_server(finalizer, pass_through, settings).await
}

/// Start the HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Server binding fails
/// - Server fails to start
async fn start_server(
    finalizer: MigrationFinalizer,
    pass_through: LoginPassThrough,
    settings: BridgeSettings,
) -> std::io::Result<()> {
    let bind_address = settings.get_bind_address();
    print_startup_info(&bind_address);

    let cors_origins = settings.get_cors_origins();
    let finalizer = web::Data::new(finalizer);
    let pass_through = web::Data::new(pass_through);

    HttpServer::new(move || {
        let cors_origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                cors_origins
                    .iter()
                    .any(|allowed| allowed == origin.to_str().unwrap_or(""))
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["Authorization", "Content-Type", "Accept"])
            .max_age(3600);

        App::new()
            .app_data(finalizer.clone())
            .app_data(pass_through.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .configure(configure_services)
    })
    .bind(&bind_address)?
    .run()
    .await
}

fn print_startup_info(bind_address: &str) {
    println!(
        "Starting Userbridge {} on http://{bind_address}",
        userbridge::VERSION
    );
    println!();
    println!("Endpoints:");
    println!("  POST /triggers/user-migration - Cognito user migration trigger");
    println!("  POST /login                   - Login pass-through to the new user pool");
    println!("  GET  /ping                    - Health check");
}
