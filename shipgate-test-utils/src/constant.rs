//! Placeholder credentials & identifiers shared across tests.
//!
//! None of these are real credentials.

/// OAuth client ID configured for every mocked carrier.
pub static TEST_CLIENT_ID: &str = "shipgate_client_id";

/// OAuth client secret configured for every mocked carrier.
pub static TEST_CLIENT_SECRET: &str = "shipgate_client_secret";

/// Redirect URI registered with the mocked carriers.
pub static TEST_REDIRECT_URI: &str = "http://localhost:8080/shipping/callback";

/// API key accepted by the EDI trigger endpoint in tests.
pub static TEST_EDI_API_KEY: &str = "edi_api_key";

pub static TEST_USER_ID: &str = "user-1";

pub static TEST_ACCESS_TOKEN: &str = "access-token";
pub static TEST_REFRESH_TOKEN: &str = "refresh-token";
