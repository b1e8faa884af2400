use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

/// Mock server locations for one carrier.
///
/// Each carrier is namespaced under `/{carrier}` on the shared mock server so that tests can
/// mount endpoints for several carriers at once.
pub struct MockCarrierEndpoints {
    pub auth_url: String,
    pub token_url: String,
    /// Path of the token endpoint, for mounting mocks directly on the server
    pub token_path: String,
    pub api_url: String,
    /// Path prefix of the carrier's REST API
    pub api_path: String,
}

pub struct TestSetup {
    pub server: ServerGuard,
    pub db: DatabaseConnection,
    pub mocks: Vec<Mock>,
}

impl TestSetup {
    pub async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestSetup {
            server,
            db,
            mocks: Vec::new(),
        })
    }

    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    pub fn carrier_endpoints(&self, carrier: &str) -> MockCarrierEndpoints {
        let url = self.server.url();
        let api_path = format!("/{}", carrier);
        let token_path = format!("{}/oauth/token", api_path);

        MockCarrierEndpoints {
            auth_url: format!("{}{}/oauth/authorize", url, api_path),
            token_url: format!("{}{}", url, token_path),
            token_path,
            api_url: format!("{}{}", url, api_path),
            api_path,
        }
    }

    /// Base URL of the mocked EDI partner system.
    pub fn edi_partner_url(&self) -> String {
        format!("{}/edi", self.server.url())
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// Calls `assert()` on all mocks created by the [`TestBuilder`](crate::TestBuilder) to
    /// verify they were invoked the expected number of times.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}

#[macro_export]
macro_rules! test_setup_with_tables {
    () => {{
        TestSetup::new().await
    }};

    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

/// Test setup with the carrier token table created.
#[macro_export]
macro_rules! test_setup_with_shipping_tables {
    () => {{
        $crate::test_setup_with_tables!(entity::prelude::ShippingToken)
    }};
}
