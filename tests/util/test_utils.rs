//! Builds the production AppState against a TestSetup's mock server & database

use std::time::Duration;

use shipgate::server::{
    config::{CarrierConfig, Config, EdiConfig},
    model::{app::AppState, carrier::Carrier},
    startup,
};
use shipgate_test_utils::{constant::*, TestSetup};

fn carrier_config(test: &TestSetup, carrier: Carrier) -> CarrierConfig {
    let endpoints = test.carrier_endpoints(carrier.as_str());

    CarrierConfig {
        client_id: TEST_CLIENT_ID.to_string(),
        client_secret: TEST_CLIENT_SECRET.to_string(),
        redirect_uri: TEST_REDIRECT_URI.to_string(),
        auth_url: endpoints.auth_url,
        token_url: endpoints.token_url,
        api_url: endpoints.api_url,
        account_number: None,
    }
}

/// Extension trait for TestSetup to create the AppState served by the router
pub trait TestSetupExt {
    fn config(&self) -> Config;
    fn into_app_state(&self) -> AppState;
}

impl TestSetupExt for TestSetup {
    fn config(&self) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            carrier_timeout: Duration::from_secs(5),
            fedex: carrier_config(self, Carrier::Fedex),
            ups: carrier_config(self, Carrier::Ups),
            dhl: carrier_config(self, Carrier::Dhl),
            edi: EdiConfig {
                api_key: TEST_EDI_API_KEY.to_string(),
                partner_url: self.edi_partner_url(),
                partner_token: None,
                update_cron: None,
            },
        }
    }

    fn into_app_state(&self) -> AppState {
        startup::build_state(&self.config(), self.db.clone())
            .expect("Failed to build app state for test setup")
    }
}
