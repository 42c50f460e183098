//! Testing utilities for userbridge
//!
//! - [`fixtures`] - identity tokens, trigger events and settings
//! - [`mock`] - in-memory [`LegacyAuthenticator`](crate::legacy::LegacyAuthenticator)
//!
//! Available to unit tests and, with the `testing` feature, to the
//! integration tests under `tests/`.

pub mod fixtures;
pub mod mock;

pub use fixtures::TestFixtures;
pub use mock::MockLegacyAuthenticator;

/// Common test constants
pub mod constants {
    pub const TEST_USERNAME: &str = "test@x.com";
    pub const TEST_PASSWORD: &str = "Corr3ct-Horse";
    pub const TEST_SUBJECT: &str = "c31e1b3e-ec66-4212-9aad-f4e246d4c50a";
    pub const TEST_NAME: &str = "Steven";
    pub const TEST_PARTY_CODE: &str = "500412";
    pub const TEST_ACCOUNT_ID: &str = "0011J000017nxD2QAI";
    pub const TEST_CONTACT_ID: &str = "0031J00001ET2FOQA1";
    pub const LEGACY_CLIENT_ID: &str = "70v2ru8d2tc8rnhfdcfaksnlu9";
    pub const NEW_CLIENT_ID: &str = "5q5f5ttrv0bj36gouc972qfb0l";
}
