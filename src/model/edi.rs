use serde::{Deserialize, Serialize};

/// The response when a triggered EDI update fails
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct EdiFailureDto {
    pub message: String,
    pub error: String,
}
