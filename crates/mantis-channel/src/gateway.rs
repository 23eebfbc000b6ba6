//! HTTP client for the WhatsApp gateway bridge.
//!
//! The gateway owns the authenticated WhatsApp session and exposes a
//! small JSON API: send message, react, group metadata, and a long-poll
//! event feed. Every response uses the same `{ok, result, description}`
//! envelope.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use mantis_types::{GatewayConfig, Jid};

use crate::client::{ChannelError, EventSource, GroupMetadata, MessagingClient};
use crate::event::{MessageEvent, MessageKey};

/// Response envelope used by all gateway endpoints.
///
/// `result` and `description` are plain `Option` fields: serde treats a
/// missing field as `None` without requiring `T: Default`.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionInfo {
    jid: Jid,
}

/// HTTP implementation of [`MessagingClient`] and [`EventSource`].
#[derive(Debug)]
pub struct WhatsappGateway {
    client: Client,
    base_url: String,
    auth_token: String,
    poll_timeout_secs: u64,
    self_jid: Jid,
}

impl WhatsappGateway {
    /// Connect to the gateway and resolve the authenticated account's jid.
    pub async fn connect(config: GatewayConfig) -> Result<Self, ChannelError> {
        let client = Client::new();
        let base_url = config.api_url.trim_end_matches('/').to_string();

        let resp = client
            .get(format!("{base_url}/v1/me"))
            .bearer_auth(&config.auth_token)
            .send()
            .await?;
        let info: SessionInfo = unwrap_envelope(resp.json().await?)?;

        debug!(jid = %info.jid, "gateway session resolved");

        Ok(Self {
            client,
            base_url,
            auth_token: config.auth_token,
            poll_timeout_secs: config.poll_timeout_secs,
            self_jid: info.jid,
        })
    }
}

/// Extract the result from a gateway envelope, mapping failures to
/// [`ChannelError::Api`].
fn unwrap_envelope<T>(resp: ApiResponse<T>) -> Result<T, ChannelError> {
    if !resp.ok {
        let desc = resp.description.unwrap_or_default();
        warn!("gateway call failed: {desc}");
        return Err(ChannelError::Api(desc));
    }
    resp.result
        .ok_or_else(|| ChannelError::Api("missing result in gateway response".to_string()))
}

#[async_trait]
impl MessagingClient for WhatsappGateway {
    fn self_jid(&self) -> &Jid {
        &self.self_jid
    }

    async fn send_text(
        &self,
        chat: &Jid,
        text: &str,
        quote: Option<&MessageKey>,
    ) -> Result<(), ChannelError> {
        let mut body = json!({
            "chat": chat,
            "text": text,
        });
        if let Some(key) = quote {
            body["quote"] = serde_json::to_value(key)
                .map_err(|e| ChannelError::Other(format!("serialize quote key: {e}")))?;
        }

        debug!(chat = %chat, "sending text message");

        let resp = self
            .client
            .post(format!("{}/v1/messages/send", self.base_url))
            .bearer_auth(&self.auth_token)
            .json(&body)
            .send()
            .await?;
        unwrap_envelope::<serde_json::Value>(resp.json().await?)?;
        Ok(())
    }

    async fn react(&self, chat: &Jid, key: &MessageKey, emoji: &str) -> Result<(), ChannelError> {
        let body = json!({
            "chat": chat,
            "key": key,
            "emoji": emoji,
        });

        let resp = self
            .client
            .post(format!("{}/v1/messages/react", self.base_url))
            .bearer_auth(&self.auth_token)
            .json(&body)
            .send()
            .await?;
        unwrap_envelope::<serde_json::Value>(resp.json().await?)?;
        Ok(())
    }

    async fn group_metadata(&self, chat: &Jid) -> Result<GroupMetadata, ChannelError> {
        let resp = self
            .client
            .get(format!("{}/v1/groups/{}/metadata", self.base_url, chat))
            .bearer_auth(&self.auth_token)
            .send()
            .await?;
        unwrap_envelope(resp.json().await?)
    }
}

#[async_trait]
impl EventSource for WhatsappGateway {
    async fn next_events(&self) -> Result<Vec<MessageEvent>, ChannelError> {
        let resp = self
            .client
            .get(format!("{}/v1/events", self.base_url))
            .query(&[("timeout_secs", self.poll_timeout_secs)])
            .bearer_auth(&self.auth_token)
            .send()
            .await?;
        unwrap_envelope(resp.json().await?)
    }
}
