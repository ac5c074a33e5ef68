//! HTTP form relay
//!
//! Forwards submitted fields, unchanged, as `multipart/form-data` to a
//! per-form endpoint (a hosted form-to-email service) and expects a JSON
//! answer.

use std::collections::HashMap;

use reqwest::header;
use reqwest::multipart;

use crate::application::config::FormsConfig;
use crate::domain::entities::{FormFields, FormKind};
use crate::domain::ports::{FormRelay, RelayError, RelayReceipt};

#[derive(Debug, Clone)]
pub struct HttpFormRelay {
    client: reqwest::Client,
    endpoints: HashMap<FormKind, String>,
}

impl HttpFormRelay {
    pub fn new(client: reqwest::Client, endpoints: HashMap<FormKind, String>) -> Self {
        Self { client, endpoints }
    }

    /// Endpoints from each form's policy; forms without one are left unset.
    pub fn from_config(client: reqwest::Client, config: &FormsConfig) -> Self {
        let endpoints = FormKind::ALL
            .into_iter()
            .filter_map(|form| {
                config
                    .policy(form)
                    .relay_url
                    .clone()
                    .filter(|url| !url.trim().is_empty())
                    .map(|url| (form, url))
            })
            .collect();

        Self::new(client, endpoints)
    }

    pub fn endpoint(&self, form: FormKind) -> Option<&str> {
        self.endpoints.get(&form).map(String::as_str)
    }
}

impl FormRelay for HttpFormRelay {
    async fn relay(&self, form: FormKind, fields: &FormFields) -> Result<RelayReceipt, RelayError> {
        let endpoint = self
            .endpoint(form)
            .ok_or(RelayError::NotConfigured(form))?;

        let body = fields
            .iter()
            .fold(multipart::Form::new(), |body, (name, value)| {
                body.text(name.clone(), value.clone())
            });

        let response = self
            .client
            .post(endpoint)
            .header(header::ACCEPT, "application/json")
            .multipart(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(RelayError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        // A 2xx body only has to be JSON; its content never changes the outcome
        let body = serde_json::from_str(&text)
            .map_err(|e| RelayError::InvalidBody(e.to_string()))?;

        Ok(RelayReceipt {
            status: status.as_u16(),
            body,
        })
    }
}
