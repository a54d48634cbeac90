use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;

use crate::{
    appsettings::OAuthSettings,
    error::{ReminderError, ReminderResult, Service},
    models::token::BearerToken,
};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Turns an OAuth2 authorization code into a bearer token.
#[async_trait]
pub trait AuthorizationProvider: Send + Sync + 'static {
    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> ReminderResult<BearerToken>;
}

pub struct OAuthClient {
    client: Client,
    settings: OAuthSettings,
}

impl OAuthClient {
    pub fn new(client: Client, settings: OAuthSettings) -> Self {
        Self { client, settings }
    }

    /// First leg of the three-legged handshake: where to send the user.
    pub fn authorize_url(&self, redirect_uri: &str) -> ReminderResult<Url> {
        let scopes = self.settings.scopes.join(" ");
        Url::parse_with_params(
            &self.settings.authorize_url,
            &[
                ("response_type", "code"),
                ("client_id", self.settings.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("scope", scopes.as_str()),
            ],
        )
        .map_err(|e| ReminderError::AuthorizationFailed(format!("invalid authorize url: {e}")))
    }

    fn token_request(&self, code: &str, redirect_uri: &str) -> RequestBuilder {
        self.client
            .post(&self.settings.access_token_url)
            .basic_auth(&self.settings.client_id, Some(&self.settings.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
            ])
    }
}

#[async_trait]
impl AuthorizationProvider for OAuthClient {
    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> ReminderResult<BearerToken> {
        let response = self
            .token_request(code, redirect_uri)
            .send()
            .await
            .map_err(|e| ReminderError::service_unreachable(Service::Authorization, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Authorization code exchange failed. [status = {status}]");
            return Err(ReminderError::AuthorizationFailed(format!("HTTP {status}: {body}")));
        }

        let token = response.json::<TokenResponse>().await.map_err(|e| {
            ReminderError::AuthorizationFailed(format!("unexpected token response: {e}"))
        })?;

        log::info!("Exchanged authorization code for an access token");
        Ok(BearerToken::new(token.access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oauth_client() -> OAuthClient {
        oauth_client_with_token_url("https://login.example.com/oauth/v2/token")
    }

    fn oauth_client_with_token_url(access_token_url: &str) -> OAuthClient {
        OAuthClient::new(
            Client::new(),
            OAuthSettings {
                client_id: "client-id".to_owned(),
                client_secret: "client-secret".to_owned(),
                authorize_url: "https://login.example.com/oauth/v2/authorize".to_owned(),
                access_token_url: access_token_url.to_owned(),
                scopes: vec!["profile".to_owned(), "request".to_owned()],
            },
        )
    }

    #[test]
    fn authorize_url_asks_for_a_code() {
        let url = oauth_client()
            .authorize_url("http://localhost:7000/submit")
            .unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(url.host_str(), Some("login.example.com"));
        assert_eq!(
            pairs,
            vec![
                ("response_type".to_owned(), "code".to_owned()),
                ("client_id".to_owned(), "client-id".to_owned()),
                ("redirect_uri".to_owned(), "http://localhost:7000/submit".to_owned()),
                ("scope".to_owned(), "profile request".to_owned()),
            ]
        );
    }

    #[test]
    fn token_request_uses_basic_auth_and_form_body() {
        let request = oauth_client()
            .token_request("the-code", "http://localhost:7000/submit")
            .build()
            .unwrap();

        let body = std::str::from_utf8(request.body().unwrap().as_bytes().unwrap()).unwrap();

        assert_eq!(request.url().path(), "/oauth/v2/token");
        assert!(
            request
                .headers()
                .get(reqwest::header::AUTHORIZATION)
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("Basic ")
        );
        assert_eq!(
            body,
            "grant_type=authorization_code&code=the-code&redirect_uri=http%3A%2F%2Flocalhost%3A7000%2Fsubmit"
        );
    }

    #[test]
    fn token_response_only_needs_the_access_token() {
        let response: TokenResponse = serde_json::from_str(
            r#"{ "access_token": "abc", "token_type": "Bearer", "expires_in": 2592000 }"#,
        )
        .unwrap();

        assert_eq!(response.access_token, "abc");
    }

    #[tokio::test]
    async fn rejected_code_is_an_authorization_failure() {
        let base_url =
            crate::http::stub_server::respond_once("400 Bad Request", r#"{"error":"invalid_grant"}"#)
                .await;
        let client = oauth_client_with_token_url(&format!("{base_url}/oauth/v2/token"));

        let error = client
            .exchange_code("stale-code", "http://localhost:7000/submit")
            .await
            .unwrap_err();

        assert_eq!(
            error,
            ReminderError::AuthorizationFailed(
                r#"HTTP 400 Bad Request: {"error":"invalid_grant"}"#.to_owned()
            )
        );
    }

    #[tokio::test]
    async fn granted_code_yields_the_access_token() {
        let base_url =
            crate::http::stub_server::respond_once("200 OK", r#"{"access_token":"abc"}"#).await;
        let client = oauth_client_with_token_url(&format!("{base_url}/oauth/v2/token"));

        let token = client
            .exchange_code("the-code", "http://localhost:7000/submit")
            .await
            .unwrap();

        assert_eq!(token.secret(), "abc");
    }
}
