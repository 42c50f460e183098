#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the userbridge application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cognito;
pub mod handlers;
pub mod legacy;
pub mod login;
pub mod migration;
pub mod models;
pub mod settings;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use cognito::CognitoClient;
pub use legacy::{AuthError, CognitoLegacyAuthenticator, LegacyAuthenticator};
pub use login::{LoginOutcome, LoginPassThrough};
pub use migration::{MigrationError, MigrationFinalizer, TriggerEvent};
pub use settings::BridgeSettings;
