// Centralized logging so credential-bearing values never reach a log line
use crate::migration::MigrationError;
use log::{debug, info, warn};

pub struct LoggingHelper;

impl LoggingHelper {
    /// Log the configured providers at startup
    pub fn log_provider_configured(role: &str, name: &str, endpoint: &str) {
        info!("✅ {role} provider {name} configured ({endpoint})");
    }

    /// Log an incoming migration trigger
    pub fn log_trigger_received(trigger_source: &str, user_name: &str) {
        info!("🔔 Migration trigger {trigger_source} received for {user_name}");
    }

    /// Log a trigger source the bridge does not act on
    pub fn log_trigger_passthrough(trigger_source: &str) {
        debug!("Trigger source {trigger_source} is not an authentication migration, passing through");
    }

    /// Log a successful legacy authentication
    pub fn log_legacy_auth_success(user_name: &str, provider: &str) {
        info!("🔑 Legacy authentication succeeded for {user_name} against {provider}");
    }

    /// Log why a legacy authentication failed; the caller only ever sees "User not found"
    pub fn log_legacy_auth_failure(user_name: &str, reason: &str) {
        warn!("Legacy authentication failed for {user_name}: {reason}");
    }

    /// Log a completed migration
    pub fn log_migration_finalized(user_name: &str, attribute_count: usize) {
        info!("✅ Migrated {user_name} with {attribute_count} attributes, status CONFIRMED, message SUPPRESS");
    }

    /// Log an aborted migration
    pub fn log_migration_failed(user_name: &str, error: &MigrationError) {
        warn!("❌ Migration aborted for {user_name}: {error}");
    }

    /// Log a login being forwarded to the new pool
    pub fn log_login_forwarded(user_name: &str, provider: &str) {
        info!("🔄 Forwarding login for {user_name} to {provider}");
    }

    /// Log the upstream status of a forwarded login, `None` on transport failure
    pub fn log_login_result(user_name: &str, status: Option<u16>) {
        match status {
            Some(status) if (200..300).contains(&status) => {
                info!("Login for {user_name} succeeded upstream ({status})");
            }
            Some(status) => warn!("Login for {user_name} rejected upstream ({status})"),
            None => warn!("Login for {user_name} failed: provider unreachable"),
        }
    }
}
