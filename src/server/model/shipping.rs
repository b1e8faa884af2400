//! Validated shipping requests.
//!
//! Wire DTOs carry every field as optional; converting them into these types performs
//! all validation the facade does before dispatching to a carrier adapter.

use crate::{
    model::shipping::{PickupRequestDto, TrackingRequestDto},
    server::{error::shipping::ShippingError, model::carrier::Carrier},
};

#[derive(Clone, Debug, PartialEq)]
pub struct PickupRequest {
    pub carrier: Carrier,
    pub pickup_details: serde_json::Value,
    pub user_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackingQuery {
    pub carrier: Carrier,
    pub tracking_number: String,
    pub user_id: Option<String>,
}

fn parse_carrier(carrier: Option<String>) -> Result<Carrier, ShippingError> {
    carrier
        .ok_or_else(|| ShippingError::Validation("carrier is required".to_string()))?
        .parse()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<PickupRequestDto> for PickupRequest {
    type Error = ShippingError;

    fn try_from(dto: PickupRequestDto) -> Result<Self, Self::Error> {
        let carrier = parse_carrier(dto.carrier)?;
        let pickup_details = dto
            .pickup_details
            .ok_or_else(|| ShippingError::Validation("pickupDetails is required".to_string()))?;

        Ok(Self {
            carrier,
            pickup_details,
            user_id: non_empty(dto.user_id),
        })
    }
}

impl TryFrom<TrackingRequestDto> for TrackingQuery {
    type Error = ShippingError;

    fn try_from(dto: TrackingRequestDto) -> Result<Self, Self::Error> {
        let carrier = parse_carrier(dto.carrier)?;
        let tracking_number = non_empty(dto.tracking_number)
            .ok_or_else(|| ShippingError::Validation("trackingNumber is required".to_string()))?;

        Ok(Self {
            carrier,
            tracking_number,
            user_id: non_empty(dto.user_id),
        })
    }
}
