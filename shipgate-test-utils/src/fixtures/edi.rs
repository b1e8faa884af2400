use mockito::Mock;
use serde_json::Value;

use crate::TestSetup;

impl TestSetup {
    pub fn edi<'a>(&'a mut self) -> EdiFixtures<'a> {
        EdiFixtures { setup: self }
    }
}

pub struct EdiFixtures<'a> {
    setup: &'a mut TestSetup,
}

impl<'a> EdiFixtures<'a> {
    /// Create a mock `GET /edi/updates` endpoint on the partner system.
    pub fn create_updates_endpoint(
        &mut self,
        status: usize,
        body: Value,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", "/edi/updates")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }
}
