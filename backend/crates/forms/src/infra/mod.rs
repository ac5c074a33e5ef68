//! Infrastructure Layer
//!
//! HTTP implementations of the domain ports, sharing one `reqwest::Client`
//! whose timeout bounds every outbound call.

pub mod recaptcha;
pub mod relay;

use std::time::Duration;

use crate::domain::ports::{CaptchaError, RelayError};

/// Build the shared outbound client.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("forms/", env!("CARGO_PKG_VERSION")))
        .build()
}

impl From<reqwest::Error> for CaptchaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CaptchaError::Timeout
        } else if err.is_decode() {
            CaptchaError::InvalidResponse(err.to_string())
        } else {
            CaptchaError::Transport(err.to_string())
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::Timeout
        } else {
            RelayError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    use axum::Router;
    use std::net::SocketAddr;

    /// Serve `router` on an ephemeral local port.
    pub async fn spawn(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }
}
