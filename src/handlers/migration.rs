use crate::migration::{MigrationError, MigrationFinalizer, TriggerEvent};
use crate::utils::response_builder::ResponseBuilder;
use actix_web::{web, HttpResponse, Result};

/// User-migration trigger handler
///
/// Responds with the finalized event, or a 500 the caller must treat as
/// "deny sign-in".
///
/// # Errors
/// Never fails on migration errors; those become a 500 response
pub async fn user_migration_trigger(
    event: web::Json<TriggerEvent>,
    finalizer: web::Data<MigrationFinalizer>,
) -> Result<HttpResponse> {
    match finalizer.finalize(event.into_inner()).await {
        Ok(event) => Ok(HttpResponse::Ok().json(event)),
        Err(MigrationError::Auth(e)) => Ok(ResponseBuilder::server_error(
            "user_migration_failed",
            &e.to_string(),
        )),
        Err(MigrationError::ClaimDecode(_)) => Ok(ResponseBuilder::server_error(
            "user_migration_failed",
            "Legacy identity could not be read",
        )),
    }
}
