//! Shipping facade dispatching pickups & tracking to the carrier adapters.

use sea_orm::DatabaseConnection;
use serde_json::Value;

use crate::server::{
    carrier::CarrierRegistry,
    error::Error,
    model::shipping::{PickupRequest, TrackingQuery},
    service::token::TokenService,
};

pub struct ShippingService<'a> {
    db: &'a DatabaseConnection,
    carriers: &'a CarrierRegistry,
}

impl<'a> ShippingService<'a> {
    /// Creates a new instance of [`ShippingService`]
    pub fn new(db: &'a DatabaseConnection, carriers: &'a CarrierRegistry) -> Self {
        Self { db, carriers }
    }

    /// Schedules a pickup with the requested carrier.
    ///
    /// Resolves an access token first, then forwards the pickup details. Failures are
    /// returned as-is and never retried.
    ///
    /// # Returns
    /// - `Ok(Value)` - Raw carrier confirmation
    /// - `Err(Error::ShippingError)` - Token resolution or the carrier call failed
    /// - `Err(Error::DbErr)` - Token store query failed
    pub async fn schedule_pickup(&self, request: PickupRequest) -> Result<Value, Error> {
        let access_token = TokenService::new(self.db, self.carriers)
            .access_token(request.carrier, request.user_id.as_deref())
            .await?;

        let result = self
            .carriers
            .get(request.carrier)
            .schedule_pickup(&access_token, &request.pickup_details)
            .await?;

        tracing::info!(carrier = %request.carrier, "Scheduled carrier pickup");

        Ok(result)
    }

    /// Fetches the tracking status of a shipment from the requested carrier.
    ///
    /// # Returns
    /// - `Ok(Value)` - Raw carrier tracking payload
    /// - `Err(Error::ShippingError)` - Token resolution or the carrier call failed
    /// - `Err(Error::DbErr)` - Token store query failed
    pub async fn track_shipment(&self, query: TrackingQuery) -> Result<Value, Error> {
        let access_token = TokenService::new(self.db, self.carriers)
            .access_token(query.carrier, query.user_id.as_deref())
            .await?;

        let result = self
            .carriers
            .get(query.carrier)
            .track_shipment(&access_token, &query.tracking_number)
            .await?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use serde_json::json;
    use shipgate_test_utils::prelude::*;

    use super::ShippingService;
    use crate::server::{
        error::{shipping::ShippingError, Error},
        model::{
            carrier::Carrier,
            shipping::{PickupRequest, TrackingQuery},
        },
        util::test::carrier_registry,
    };

    mod schedule_pickup {
        use super::*;

        /// Expect the user's stored token to authorize the pickup request
        #[tokio::test]
        async fn uses_stored_user_token() -> Result<(), TestError> {
            let mut test = test_setup_with_shipping_tables!()?;
            test.token()
                .insert_token(
                    TEST_USER_ID,
                    "dhl",
                    TEST_ACCESS_TOKEN,
                    None,
                    (Utc::now() + TimeDelta::hours(1)).naive_utc(),
                )
                .await?;
            let endpoint = test
                .server
                .mock("POST", "/dhl/pickups")
                .match_header("authorization", format!("Bearer {}", TEST_ACCESS_TOKEN).as_str())
                .with_status(201)
                .with_header("content-type", "application/json")
                .with_body(json!({ "dispatchConfirmationNumbers": ["PRG1"] }).to_string())
                .create();

            let carriers = carrier_registry(&test);
            let service = ShippingService::new(&test.db, &carriers);
            let result = service
                .schedule_pickup(PickupRequest {
                    carrier: Carrier::Dhl,
                    pickup_details: json!({ "plannedPickupDateAndTime": "2025-03-14T09:00:00" }),
                    user_id: Some(TEST_USER_ID.to_string()),
                })
                .await
                .unwrap();

            assert_eq!(result, json!({ "dispatchConfirmationNumbers": ["PRG1"] }));
            endpoint.assert();

            Ok(())
        }

        /// Expect no carrier call when the user has no stored token
        #[tokio::test]
        async fn skips_carrier_without_token() -> Result<(), TestError> {
            let mut test = test_setup_with_shipping_tables!()?;
            let endpoint = test.carrier("ups").create_api_endpoint(
                "POST",
                "/api/pickupcreation/v2409/pickup",
                200,
                json!({}),
                0,
            );

            let carriers = carrier_registry(&test);
            let service = ShippingService::new(&test.db, &carriers);
            let result = service
                .schedule_pickup(PickupRequest {
                    carrier: Carrier::Ups,
                    pickup_details: json!({}),
                    user_id: Some(TEST_USER_ID.to_string()),
                })
                .await;

            assert!(matches!(
                result,
                Err(Error::ShippingError(ShippingError::TokenNotFound { .. }))
            ));
            endpoint.assert();

            Ok(())
        }
    }

    mod track_shipment {
        use super::*;

        /// Expect an application token & the raw tracking payload for anonymous requests
        #[tokio::test]
        async fn tracks_with_application_token() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!()?;
            let token_endpoint = test.carrier("fedex").create_token_endpoint(
                "client_credentials",
                200,
                mock_token_response("app-token", None, Some(3600)),
                1,
            );
            let track_endpoint = test.carrier("fedex").create_api_endpoint(
                "POST",
                "/track/v1/trackingnumbers",
                200,
                json!({ "status": "delivered" }),
                1,
            );

            let carriers = carrier_registry(&test);
            let service = ShippingService::new(&test.db, &carriers);
            let result = service
                .track_shipment(TrackingQuery {
                    carrier: Carrier::Fedex,
                    tracking_number: "999".to_string(),
                    user_id: None,
                })
                .await
                .unwrap();

            assert_eq!(result, json!({ "status": "delivered" }));
            token_endpoint.assert();
            track_endpoint.assert();

            Ok(())
        }

        /// Expect CarrierApi error when the carrier rejects the tracking request
        #[tokio::test]
        async fn relays_carrier_failure() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!()?;
            let token_endpoint = test.carrier("ups").create_token_endpoint(
                "client_credentials",
                200,
                mock_token_response("app-token", None, Some(3600)),
                1,
            );
            let track_endpoint = test.carrier("ups").create_api_endpoint(
                "GET",
                "/api/track/v1/details/1Z",
                500,
                json!({ "response": { "errors": [{ "code": "9999", "message": "Service unavailable" }] } }),
                1,
            );

            let carriers = carrier_registry(&test);
            let service = ShippingService::new(&test.db, &carriers);
            let result = service
                .track_shipment(TrackingQuery {
                    carrier: Carrier::Ups,
                    tracking_number: "1Z".to_string(),
                    user_id: None,
                })
                .await;

            assert!(matches!(
                result,
                Err(Error::ShippingError(ShippingError::CarrierApi { status: Some(500), .. }))
            ));
            token_endpoint.assert();
            track_endpoint.assert();

            Ok(())
        }
    }
}
