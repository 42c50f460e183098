// HTTP request handlers for the migration bridge
pub mod health;
pub mod login;
pub mod migration;


// Re-export the main handler functions
pub use health::health;
pub use login::login;
pub use migration::user_migration_trigger;

use actix_web::web;

/// Register every bridge route
pub fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route(
            "/triggers/user-migration",
            web::post().to(user_migration_trigger),
        )
        .route("/ping", web::get().to(health));
}
