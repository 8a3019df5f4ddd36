// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat webhook delivery as an adaptive card

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use wd_core::Alert;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts alerts to an incoming-webhook URL
#[derive(Clone)]
pub struct WebhookNotifier {
    url: String,
    agent: ureq::Agent,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(WEBHOOK_TIMEOUT))
            .http_status_as_error(false)
            .build();
        Self {
            url: url.into(),
            agent: config.into(),
        }
    }
}

/// Message body for an adaptive-card webhook
pub fn teams_card(alert: &Alert) -> Value {
    let mut body = vec![json!({
        "type": "TextBlock",
        "size": "Medium",
        "weight": "Bolder",
        "text": alert.title,
        "style": {"borderTopWidth": 1, "borderTopColor": "#D2042D"},
    })];
    if let Some(detail) = &alert.detail {
        body.push(json!({"type": "TextBlock", "text": detail}));
    }

    json!({
        "type": "message",
        "attachments": [{
            "contentType": "application/vnd.microsoft.card.adaptive",
            "content": {
                "type": "AdaptiveCard",
                "body": body,
                "$schema": "http://adaptivecards.io/schemas/adaptive-card.json",
                "version": "1.0",
            },
        }],
    })
}

#[async_trait]
impl NotifyAdapter for WebhookNotifier {
    async fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        let card = teams_card(alert);
        let agent = self.agent.clone();
        let url = self.url.clone();

        tokio::task::spawn_blocking(move || {
            let response = agent
                .post(&url)
                .send_json(&card)
                .map_err(|e| NotifyError::Transport(e.to_string()))?;
            let status = response.status().as_u16();
            if (200..300).contains(&status) {
                Ok(())
            } else {
                Err(NotifyError::Status(status))
            }
        })
        .await
        .map_err(|e| NotifyError::Transport(e.to_string()))?
    }
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
