//! Carrier OAuth & REST API mock endpoints.

use mockito::{Matcher, Mock};
use serde_json::{json, Value};

use crate::TestSetup;

impl TestSetup {
    pub fn carrier<'a>(&'a mut self, carrier: &str) -> CarrierFixtures<'a> {
        CarrierFixtures {
            setup: self,
            carrier: carrier.to_string(),
        }
    }
}

pub struct CarrierFixtures<'a> {
    setup: &'a mut TestSetup,
    carrier: String,
}

impl<'a> CarrierFixtures<'a> {
    /// Create a mock token endpoint answering one OAuth grant type.
    ///
    /// Matches `POST /{carrier}/oauth/token` with the given `grant_type` form field and
    /// responds with `body` as JSON.
    ///
    /// # Arguments
    /// - `grant_type` - Grant the request must carry, e.g. `authorization_code`
    /// - `status` - HTTP status to respond with
    /// - `body` - JSON response body
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn create_token_endpoint(
        &mut self,
        grant_type: &str,
        status: usize,
        body: Value,
        expected_requests: usize,
    ) -> Mock {
        let token_path = self.setup.carrier_endpoints(&self.carrier).token_path;

        self.setup
            .server
            .mock("POST", token_path.as_str())
            .match_body(Matcher::UrlEncoded(
                "grant_type".to_string(),
                grant_type.to_string(),
            ))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock carrier API endpoint.
    ///
    /// `path` is relative to the carrier's API base, so `/track/v1/trackingnumbers` mounts
    /// at `/{carrier}/track/v1/trackingnumbers`. Any query string is accepted.
    pub fn create_api_endpoint(
        &mut self,
        method: &str,
        path: &str,
        status: usize,
        body: Value,
        expected_requests: usize,
    ) -> Mock {
        let api_path = self.setup.carrier_endpoints(&self.carrier).api_path;

        self.setup
            .server
            .mock(method, format!("{}{}", api_path, path).as_str())
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }
}

/// Build an OAuth token endpoint response body.
///
/// Optional fields are omitted entirely when `None`, as carriers do.
pub fn mock_token_response(
    access_token: &str,
    refresh_token: Option<&str>,
    expires_in: Option<u64>,
) -> Value {
    let mut body = json!({
        "access_token": access_token,
        "token_type": "Bearer",
    });

    if let Some(refresh_token) = refresh_token {
        body["refresh_token"] = json!(refresh_token);
    }
    if let Some(expires_in) = expires_in {
        body["expires_in"] = json!(expires_in);
    }

    body
}
