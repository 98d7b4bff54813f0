use super::error::{self, Error, ErrorResp};
use super::{login, register};
use serde::de::DeserializeOwned;
use url::Url;

/// Where the authentication server lives if nobody says otherwise.
pub const DEFAULT_SERVER: &str = "http://localhost:8000";

/// Client for the authentication API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// The server to connect to. Should only be the protocol and domain, e.g.
    /// `http://localhost:8000`.
    pub server: String,
}

impl Client {
    /// Construct a new client
    pub fn new(server: String) -> Self {
        Self { server }
    }

    /// Exchange credentials for an `AuthResult`.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    #[tracing::instrument(skip(self, client, req), fields(server = %self.server, email = %req.email))]
    pub async fn login(
        &self,
        client: &reqwest::Client,
        req: &login::Req,
    ) -> error::Result<login::AuthResult> {
        let url = self.url(login::PATH)?;

        Self::handle_response(client.post(url).json(req)).await
    }

    /// Create a new account on the server.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    #[tracing::instrument(skip(self, client, req), fields(server = %self.server, email = %req.email))]
    pub async fn register(
        &self,
        client: &reqwest::Client,
        req: &register::Req,
    ) -> error::Result<register::Resp> {
        let url = self.url(register::PATH)?;

        Self::handle_response(client.post(url).json(req)).await
    }

    fn url(&self, path: &str) -> error::Result<Url> {
        Ok(Url::parse(&self.server)?.join(path)?)
    }

    /// Convert an HTTP response into a result, interpreting errors in a
    /// standard way.
    ///
    /// ## Errors
    ///
    /// - `Ok(..)` if the server returned a success (2xx) with a body we could
    ///   decode
    /// - `Error::Rejected` if the server returned any other status. The body
    ///   is read for a `detail` message but is allowed to be garbage.
    /// - `Error::Transport` if the request didn't complete or a success body
    ///   didn't decode. An empty success body (e.g. a 204) counts as one that
    ///   didn't decode, since the login contract always returns JSON.
    async fn handle_response<T>(req: reqwest::RequestBuilder) -> error::Result<T>
    where
        T: DeserializeOwned,
    {
        let resp = req.send().await?;

        let status = resp.status();
        tracing::debug!(%status, "got response");

        if status.is_success() {
            Ok(resp.json().await?)
        } else {
            let body = resp.bytes().await?;

            Err(Error::Rejected {
                status,
                detail: ErrorResp::detail_from_body(&body),
            })
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{unreachable_server, MockServer};
    use axum::http::StatusCode;
    use serde_json::json;

    fn req() -> login::Req {
        login::Req {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_login_success() {
        let server = MockServer::json(StatusCode::OK, json!({"token": "abc"})).await;

        let resp = Client::new(server.base())
            .login(&reqwest::Client::new(), &req())
            .await
            .unwrap();

        assert_eq!(resp, login::AuthResult(json!({"token": "abc"})));
    }

    #[test_log::test(tokio::test)]
    async fn test_login_sends_json_credentials() {
        let server = MockServer::json(StatusCode::OK, json!({})).await;

        Client::new(server.base())
            .login(&reqwest::Client::new(), &req())
            .await
            .unwrap();

        let seen = server.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path, login::PATH);
        assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
        assert_eq!(seen[0].body, json!({"email": "a@b.com", "password": "x"}));
    }

    #[test_log::test(tokio::test)]
    async fn test_login_rejected_with_detail() {
        let server = MockServer::json(
            StatusCode::UNAUTHORIZED,
            json!({"detail": "invalid credentials"}),
        )
        .await;

        let err = Client::new(server.base())
            .login(&reqwest::Client::new(), &req())
            .await
            .unwrap_err();

        match err {
            Error::Rejected { status, detail } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(detail.as_deref(), Some("invalid credentials"));
            }
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_login_rejected_with_garbage_body() {
        let server = MockServer::raw(StatusCode::INTERNAL_SERVER_ERROR, "oh no").await;

        let err = Client::new(server.base())
            .login(&reqwest::Client::new(), &req())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Rejected { detail: None, .. }));
    }

    #[test_log::test(tokio::test)]
    async fn test_login_success_with_garbage_body() {
        let server = MockServer::raw(StatusCode::OK, "not json").await;

        let err = Client::new(server.base())
            .login(&reqwest::Client::new(), &req())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
    }

    #[test_log::test(tokio::test)]
    async fn test_login_success_with_empty_body() {
        let server = MockServer::raw(StatusCode::NO_CONTENT, "").await;

        let err = Client::new(server.base())
            .login(&reqwest::Client::new(), &req())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(err.user_message(), error::TRANSPORT_FALLBACK);
    }

    #[test_log::test(tokio::test)]
    async fn test_login_unreachable() {
        let err = Client::new(unreachable_server().await)
            .login(&reqwest::Client::new(), &req())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
    }

    #[test_log::test(tokio::test)]
    async fn test_login_bad_server_url() {
        let err = Client::new("not a url".to_string())
            .login(&reqwest::Client::new(), &req())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UrlParse(_)));
    }

    #[test_log::test(tokio::test)]
    async fn test_register_success() {
        let server = MockServer::json(
            StatusCode::OK,
            json!({"message": "User created successfully"}),
        )
        .await;

        let resp = Client::new(server.base())
            .register(&reqwest::Client::new(), &req())
            .await
            .unwrap();

        assert_eq!(resp.message, "User created successfully");
        assert_eq!(server.requests()[0].path, register::PATH);
    }

    #[test_log::test(tokio::test)]
    async fn test_register_already_exists() {
        let server = MockServer::json(
            StatusCode::BAD_REQUEST,
            json!({"detail": "Email already registered"}),
        )
        .await;

        let err = Client::new(server.base())
            .register(&reqwest::Client::new(), &req())
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Email already registered");
    }
}
