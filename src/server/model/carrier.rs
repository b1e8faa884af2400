//! Carrier identity and OAuth token types.

use std::{fmt, str::FromStr, time::Duration};

use chrono::{DateTime, Utc};

use crate::server::{
    error::shipping::ShippingError,
    util::time::{is_token_expired, token_expires_at},
};

/// Shipping carriers supported by the integration layer.
///
/// This is a closed set; every dispatch over carriers is an exhaustive `match`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Carrier {
    Fedex,
    Ups,
    Dhl,
}

/// Production endpoints used when the environment does not override them.
pub struct CarrierEndpoints {
    pub auth_url: &'static str,
    pub token_url: &'static str,
    pub api_url: &'static str,
}

impl Carrier {
    pub const ALL: [Carrier; 3] = [Carrier::Fedex, Carrier::Ups, Carrier::Dhl];

    /// Lowercase identifier used on the wire and in the token store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fedex => "fedex",
            Self::Ups => "ups",
            Self::Dhl => "dhl",
        }
    }

    pub fn env_prefix(&self) -> &'static str {
        match self {
            Self::Fedex => "FEDEX",
            Self::Ups => "UPS",
            Self::Dhl => "DHL",
        }
    }

    pub fn default_endpoints(&self) -> CarrierEndpoints {
        match self {
            Self::Fedex => CarrierEndpoints {
                auth_url: "https://apis.fedex.com/oauth/authorize",
                token_url: "https://apis.fedex.com/oauth/token",
                api_url: "https://apis.fedex.com",
            },
            Self::Ups => CarrierEndpoints {
                auth_url: "https://www.ups.com/lasso/signin",
                token_url: "https://onlinetools.ups.com/security/v1/oauth/token",
                api_url: "https://onlinetools.ups.com",
            },
            Self::Dhl => CarrierEndpoints {
                auth_url: "https://api-eu.dhl.com/auth/v1/authorize",
                token_url: "https://api-eu.dhl.com/auth/v1/token",
                api_url: "https://express.api.dhl.com/mydhlapi",
            },
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Carrier {
    type Err = ShippingError;

    /// Parses a carrier name case-insensitively.
    ///
    /// # Returns
    /// - `Err(ShippingError::Validation)` - The name is empty
    /// - `Err(ShippingError::UnknownCarrier)` - The name is not fedex, ups, or dhl
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(ShippingError::Validation("carrier is required".to_string()));
        }

        Carrier::ALL
            .into_iter()
            .find(|carrier| carrier.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ShippingError::UnknownCarrier(name.to_string()))
    }
}

/// Token response returned by a carrier's OAuth token endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<Duration>,
}

/// An OAuth token a user granted this service for one carrier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarrierToken {
    pub user_id: String,
    pub carrier: Carrier,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl CarrierToken {
    /// Builds a token from a grant issued at `issued_at`.
    ///
    /// Fails with [`ShippingError::OAuthExchange`] when the grant has no `expires_in`, since
    /// the expiry could not be checked before later carrier calls.
    pub fn from_grant(
        user_id: &str,
        carrier: Carrier,
        grant: TokenGrant,
        issued_at: DateTime<Utc>,
    ) -> Result<Self, ShippingError> {
        let expires_in = grant.expires_in.ok_or_else(|| ShippingError::OAuthExchange {
            carrier,
            message: "token response did not include expires_in".to_string(),
        })?;

        let expires_at =
            token_expires_at(issued_at, expires_in).ok_or_else(|| ShippingError::OAuthExchange {
                carrier,
                message: format!(
                    "token response expires_in of {} seconds is out of range",
                    expires_in.as_secs()
                ),
            })?;

        Ok(Self {
            user_id: user_id.to_string(),
            carrier,
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        is_token_expired(self.expires_at, now)
    }
}

impl TryFrom<entity::shipping_token::Model> for CarrierToken {
    type Error = ShippingError;

    fn try_from(model: entity::shipping_token::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            carrier: model.carrier.parse()?,
            user_id: model.user_id,
            access_token: model.access_token,
            refresh_token: model.refresh_token,
            expires_at: model.expires_at.and_utc(),
        })
    }
}
