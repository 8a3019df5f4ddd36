// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alert emission shared by the runner, registry and dispatcher

use wd_adapters::NotifyAdapter;
use wd_core::{Alert, AlertLevel};

/// Log an alert and deliver it; delivery failures are only logged
pub(crate) async fn emit<N: NotifyAdapter>(notify: &N, alert: Alert) {
    let detail = alert.detail.as_deref().unwrap_or("");
    match alert.level {
        AlertLevel::Info => tracing::info!(title = %alert.title, detail, "alert"),
        AlertLevel::Error => tracing::error!(title = %alert.title, detail, "alert"),
    }

    if let Err(e) = notify.send(&alert).await {
        tracing::warn!(title = %alert.title, error = %e, "alert delivery failed");
    }
}
