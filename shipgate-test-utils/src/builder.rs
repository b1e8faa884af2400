//! Declarative test builder.
//!
//! Queues tables, stored tokens & mock endpoints, then creates them all in `build()`.

use chrono::NaiveDateTime;
use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};
use serde_json::Value;

use crate::{error::TestError, fixtures::carrier::mock_token_response, TestSetup};

struct StoredToken {
    user_id: String,
    carrier: String,
    access_token: String,
    refresh_token: Option<String>,
    expires_at: NaiveDateTime,
}

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    tokens: Vec<StoredToken>,
    mock_builders: Vec<Box<dyn FnOnce(&mut TestSetup) -> Mock>>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            tokens: Vec::new(),
            mock_builders: Vec::new(),
        }
    }

    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Add the carrier token table.
    pub fn with_shipping_tables(self) -> Self {
        self.with_table(entity::prelude::ShippingToken)
    }

    /// Insert a stored carrier token during `build()`.
    pub fn with_stored_token(
        mut self,
        user_id: &str,
        carrier: &str,
        access_token: &str,
        refresh_token: Option<&str>,
        expires_at: NaiveDateTime,
    ) -> Self {
        self.tokens.push(StoredToken {
            user_id: user_id.to_string(),
            carrier: carrier.to_string(),
            access_token: access_token.to_string(),
            refresh_token: refresh_token.map(str::to_string),
            expires_at,
        });
        self
    }

    /// Add a token endpoint for `carrier` answering `grant_type` with a 200 token response.
    pub fn with_token_endpoint(
        self,
        carrier: &str,
        grant_type: &str,
        token_response: Value,
        expected_requests: usize,
    ) -> Self {
        let carrier = carrier.to_string();
        let grant_type = grant_type.to_string();

        self.with_mock(move |setup| {
            setup.carrier(&carrier).create_token_endpoint(
                &grant_type,
                200,
                token_response,
                expected_requests,
            )
        })
    }

    /// Add a client credentials token endpoint issuing `access_token` for an hour.
    pub fn with_client_credentials_endpoint(
        self,
        carrier: &str,
        access_token: &str,
        expected_requests: usize,
    ) -> Self {
        let response = mock_token_response(access_token, None, Some(3600));

        self.with_token_endpoint(carrier, "client_credentials", response, expected_requests)
    }

    /// Add a carrier API endpoint relative to the carrier's API base.
    pub fn with_api_endpoint(
        self,
        carrier: &str,
        method: &str,
        path: &str,
        status: usize,
        body: Value,
        expected_requests: usize,
    ) -> Self {
        let carrier = carrier.to_string();
        let method = method.to_string();
        let path = path.to_string();

        self.with_mock(move |setup| {
            setup
                .carrier(&carrier)
                .create_api_endpoint(&method, &path, status, body, expected_requests)
        })
    }

    /// Add an EDI partner updates endpoint.
    pub fn with_edi_updates_endpoint(
        self,
        status: usize,
        body: Value,
        expected_requests: usize,
    ) -> Self {
        self.with_mock(move |setup| {
            setup
                .edi()
                .create_updates_endpoint(status, body, expected_requests)
        })
    }

    /// Add a custom mock endpoint with full control over the test setup.
    pub fn with_mock<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut TestSetup) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test setup.
    ///
    /// Creates tables first, then inserts stored tokens, then mounts mock endpoints.
    ///
    /// # Returns
    /// - `Ok(TestSetup)` - Configured test environment; call `assert_mocks()` to verify endpoints
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestSetup, TestError> {
        let mut setup = TestSetup::new().await?;

        setup.with_tables(self.tables).await?;

        for token in self.tokens {
            setup
                .token()
                .insert_token(
                    &token.user_id,
                    &token.carrier,
                    &token.access_token,
                    token.refresh_token.as_deref(),
                    token.expires_at,
                )
                .await?;
        }

        for builder in self.mock_builders {
            let mock = builder(&mut setup);
            setup.mocks.push(mock);
        }

        Ok(setup)
    }
}
