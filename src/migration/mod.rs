//! Legacy-to-new user migration
//!
//! - [`trigger`] - the event exchanged with the new user pool
//! - [`claims`] - legacy identity token claims and attribute mapping
//! - [`finalizer`] - the migration itself

pub mod claims;
pub mod finalizer;
pub mod trigger;

pub use claims::{ClaimDecodeError, IdentityClaims};
pub use finalizer::MigrationFinalizer;
pub use trigger::{FinalUserStatus, MessageAction, TriggerEvent};

use crate::legacy::AuthError;
use std::collections::BTreeMap;
use thiserror::Error;

/// Fatal migration failure; the new pool denies the sign-in
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MigrationError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    ClaimDecode(#[from] ClaimDecodeError),
}

/// Everything the new pool needs to create the migrated user.
///
/// Only built once every claim has been mapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOutcome {
    pub attributes: BTreeMap<String, String>,
    pub final_status: FinalUserStatus,
    pub suppress_message: bool,
}
