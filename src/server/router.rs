//! HTTP routing and OpenAPI documentation configuration.
//!
//! All endpoints are registered here with their OpenAPI specifications. Swagger UI is served
//! at `/api/docs` and the OpenAPI document at `/api/docs/openapi.json`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `POST /shipping/pickup` - Schedule a carrier pickup
/// - `POST /shipping/track` - Track a shipment
/// - `GET /shipping/{carrier}/auth` - Redirect a user to carrier authorization
/// - `GET /shipping/{carrier}/callback` - Carrier OAuth callback
/// - `POST /edi/scheduled-update` - Trigger an EDI update
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "shipgate", description = "Multi-carrier shipping API"), tags(
        (name = controller::shipping::SHIPPING_TAG, description = "Carrier authorization, pickup and tracking routes"),
        (name = controller::edi::EDI_TAG, description = "EDI partner update routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::shipping::schedule_pickup))
        .routes(routes!(controller::shipping::track_shipment))
        .routes(routes!(controller::shipping::authorize))
        .routes(routes!(controller::shipping::callback))
        .routes(routes!(controller::edi::scheduled_update))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
