//! Migration finalizer
//!
//! Runs once per user, when the new pool sees a sign-in from a username it
//! does not know. The legacy pool vouches for the password, the legacy
//! identity token supplies the user's attributes, and the event handed back
//! tells the new pool to create the user already confirmed and without a
//! welcome message.

use super::claims::IdentityClaims;
use super::trigger::{FinalUserStatus, MessageAction, TriggerEvent};
use super::{MigrationError, MigrationOutcome};
use crate::legacy::LegacyAuthenticator;
use crate::models::Credential;
use crate::utils::logging::LoggingHelper;
use std::sync::Arc;

#[derive(Clone)]
pub struct MigrationFinalizer {
    authenticator: Arc<dyn LegacyAuthenticator>,
}

impl MigrationFinalizer {
    #[must_use]
    pub fn new(authenticator: Arc<dyn LegacyAuthenticator>) -> Self {
        Self { authenticator }
    }

    /// Process a migration trigger event
    ///
    /// Events for any trigger source other than
    /// `UserMigration_Authentication` are returned untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the legacy provider rejects the credential or its
    /// identity token cannot be decoded. The event is consumed in that case;
    /// nothing about the user is retained.
    pub async fn finalize(&self, mut event: TriggerEvent) -> Result<TriggerEvent, MigrationError> {
        LoggingHelper::log_trigger_received(&event.trigger_source, &event.user_name);
        if !event.is_authentication_migration() {
            LoggingHelper::log_trigger_passthrough(&event.trigger_source);
            return Ok(event);
        }

        let outcome = self.migrate(&event).await.inspect_err(|e| {
            LoggingHelper::log_migration_failed(&event.user_name, e);
        })?;
        outcome.apply_to(&mut event);

        LoggingHelper::log_migration_finalized(&event.user_name, event.response.user_attributes.len());
        Ok(event)
    }

    async fn migrate(&self, event: &TriggerEvent) -> Result<MigrationOutcome, MigrationError> {
        let credential = Credential::new(
            event.user_name.clone(),
            event.request.password.clone().unwrap_or_default(),
        );
        let auth_result = self.authenticator.authenticate(&credential).await?;
        let claims = IdentityClaims::from_id_token(&auth_result.id_token)?;
        log::debug!("Decoded legacy claims for subject {}", claims.subject);

        Ok(MigrationOutcome {
            attributes: claims.to_user_attributes(),
            final_status: FinalUserStatus::Confirmed,
            suppress_message: true,
        })
    }
}

impl MigrationOutcome {
    /// Merge the outcome into the event's response; mapped attributes replace
    /// existing ones with the same key
    pub fn apply_to(self, event: &mut TriggerEvent) {
        let response = &mut event.response;
        response.user_attributes.extend(self.attributes);
        response.final_user_status = Some(self.final_status);
        if self.suppress_message {
            response.message_action = Some(MessageAction::Suppress);
        }
    }
}
