//! OAuth2 client shared by the carrier adapters.
//!
//! Each carrier runs the standard authorization code flow against its own endpoints; what
//! differs between them is the endpoint URLs, the fixed scope, and how client credentials are
//! presented to the token endpoint (HTTP Basic header or form body).

use std::time::Duration;

use oauth2::{
    basic::{
        BasicErrorResponse, BasicRevocationErrorResponse, BasicTokenIntrospectionResponse,
        BasicTokenType,
    },
    helpers,
    url::Url,
    AccessToken, AuthType, AuthUrl, AuthorizationCode, Client, ClientId, ClientSecret, CsrfToken,
    EndpointNotSet, EndpointSet, HttpClientError, RedirectUrl, RefreshToken, RequestTokenError,
    Scope, StandardRevocableToken, TokenResponse, TokenUrl,
};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

use crate::server::{
    config::CarrierConfig,
    error::{config::ConfigError, shipping::ShippingError},
    model::carrier::{Carrier, TokenGrant},
};

type ConfiguredClient = Client<
    BasicErrorResponse,
    CarrierTokenResponse,
    BasicTokenIntrospectionResponse,
    StandardRevocableToken,
    BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

type TokenRequestError = RequestTokenError<HttpClientError<reqwest::Error>, BasicErrorResponse>;

/// Token endpoint response as carriers actually send it.
///
/// UPS reports `expires_in` as a numeric string (`"14399"`) rather than a JSON number.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CarrierTokenResponse {
    access_token: AccessToken,
    #[serde(deserialize_with = "helpers::deserialize_untagged_enum_case_insensitive")]
    token_type: BasicTokenType,
    #[serde(default, deserialize_with = "deserialize_expires_in")]
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<RefreshToken>,
}

impl TokenResponse for CarrierTokenResponse {
    type TokenType = BasicTokenType;

    fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    fn token_type(&self) -> &BasicTokenType {
        &self.token_type
    }

    fn expires_in(&self) -> Option<Duration> {
        self.expires_in.map(Duration::from_secs)
    }

    fn refresh_token(&self) -> Option<&RefreshToken> {
        self.refresh_token.as_ref()
    }

    fn scopes(&self) -> Option<&Vec<Scope>> {
        None
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
    Seconds(u64),
    Text(String),
}

fn deserialize_expires_in<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<ExpiresIn>::deserialize(deserializer)? {
        None => Ok(None),
        Some(ExpiresIn::Seconds(secs)) => Ok(Some(secs)),
        Some(ExpiresIn::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expires_in is not a number: {:?}", text))),
    }
}

pub struct CarrierOAuth {
    carrier: Carrier,
    client: ConfiguredClient,
    http: reqwest::Client,
    scopes: Vec<String>,
}

impl CarrierOAuth {
    /// Creates a new instance of [`CarrierOAuth`]
    ///
    /// # Arguments
    /// - `carrier` - Carrier the client authorizes against, used in errors & logs
    /// - `config` - Client credentials and endpoint URLs for the carrier
    /// - `auth_type` - How client credentials are sent to the token endpoint
    /// - `scopes` - Fixed scopes requested on every authorization
    /// - `http` - HTTP client for token requests, must not follow redirects
    ///
    /// # Returns
    /// - `Ok(CarrierOAuth)` - Client ready for authorization & token requests
    /// - `Err(ConfigError::InvalidEnvValue)` - One of the configured URLs failed to parse
    pub fn new(
        carrier: Carrier,
        config: &CarrierConfig,
        auth_type: AuthType,
        scopes: &[&str],
        http: reqwest::Client,
    ) -> Result<Self, ConfigError> {
        let invalid_url = |var: &str, err: oauth2::url::ParseError| ConfigError::InvalidEnvValue {
            var: format!("{}_{}", carrier.env_prefix(), var),
            reason: err.to_string(),
        };

        let client: ConfiguredClient = Client::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_auth_uri(
                AuthUrl::new(config.auth_url.clone()).map_err(|e| invalid_url("AUTH_URL", e))?,
            )
            .set_token_uri(
                TokenUrl::new(config.token_url.clone()).map_err(|e| invalid_url("TOKEN_URL", e))?,
            )
            .set_redirect_uri(
                RedirectUrl::new(config.redirect_uri.clone())
                    .map_err(|e| invalid_url("REDIRECT_URI", e))?,
            )
            .set_auth_type(auth_type);

        Ok(Self {
            carrier,
            client,
            http,
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Builds the URL the user is redirected to in order to authorize this service.
    ///
    /// Sets `response_type=code`, `client_id`, `redirect_uri`, `scope`, and `state` on the
    /// carrier's authorization URL. No network request is made.
    pub fn authorization_url(&self, state: &str) -> Url {
        let state = state.to_string();
        let (url, _) = self
            .client
            .authorize_url(move || CsrfToken::new(state))
            .add_scopes(self.scopes.iter().cloned().map(Scope::new))
            .url();

        url
    }

    /// Exchanges an authorization code returned to the callback for a token.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant, ShippingError> {
        let response = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| self.exchange_error(e))?;

        Ok(token_grant(response))
    }

    /// Trades a refresh token for a new access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, ShippingError> {
        let refresh_token = RefreshToken::new(refresh_token.to_string());
        let response = self
            .client
            .exchange_refresh_token(&refresh_token)
            .request_async(&self.http)
            .await
            .map_err(|e| self.exchange_error(e))?;

        Ok(token_grant(response))
    }

    /// Requests an application token with the client credentials grant.
    ///
    /// Used for carrier calls made without a user context.
    pub async fn client_credentials(&self) -> Result<TokenGrant, ShippingError> {
        let response = self
            .client
            .exchange_client_credentials()
            .add_scopes(self.scopes.iter().cloned().map(Scope::new))
            .request_async(&self.http)
            .await
            .map_err(|e| self.exchange_error(e))?;

        Ok(token_grant(response))
    }

    fn exchange_error(&self, err: TokenRequestError) -> ShippingError {
        let message = match err {
            RequestTokenError::ServerResponse(response) => response.to_string(),
            other => other.to_string(),
        };

        ShippingError::OAuthExchange {
            carrier: self.carrier,
            message,
        }
    }
}

fn token_grant(response: CarrierTokenResponse) -> TokenGrant {
    TokenGrant {
        access_token: response.access_token().secret().to_string(),
        refresh_token: response.refresh_token().map(|t| t.secret().to_string()),
        expires_in: response.expires_in(),
    }
}
