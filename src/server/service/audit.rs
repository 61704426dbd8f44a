//! Security audit trail.
//!
//! Sensitive dashboard actions are always written to the log. When
//! `AUDIT_WEBHOOK_URL` is set they are also posted as embeds to that Discord
//! webhook; delivery happens in a spawned task and never fails the request.

use std::{net::IpAddr, sync::Arc};

use serde_json::{json, Value};
use serenity::all::{CreateEmbed, CreateEmbedFooter, Timestamp};

use crate::server::model::user::User;

const FOOTER: &str = "Ticketdesk Audit Log";
/// Discord's limit for an embed field value.
const FIELD_LIMIT: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEvent {
    Login,
    LoginFailed,
    Logout,
    Register,
    BotCreated,
    BotDeleted,
    BotStarted,
    BotStopped,
    UserBanned,
    UserUnbanned,
    UserDeleted,
    InviteCreated,
    PanelDeleted,
    SettingsChanged,
}

impl AuditEvent {
    pub fn name(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::LoginFailed => "Login Failed",
            Self::Logout => "Logout",
            Self::Register => "New Registration",
            Self::BotCreated => "Bot Created",
            Self::BotDeleted => "Bot Deleted",
            Self::BotStarted => "Bot Started",
            Self::BotStopped => "Bot Stopped",
            Self::UserBanned => "User Banned",
            Self::UserUnbanned => "User Unbanned",
            Self::UserDeleted => "User Deleted",
            Self::InviteCreated => "Invite Created",
            Self::PanelDeleted => "Panel Deleted",
            Self::SettingsChanged => "Settings Changed",
        }
    }

    fn emoji(self) -> &'static str {
        match self {
            Self::Login => "🔐",
            Self::LoginFailed => "⛔",
            Self::Logout => "🚪",
            Self::Register => "📝",
            Self::BotCreated => "🤖",
            Self::BotDeleted => "🗑️",
            Self::BotStarted => "▶️",
            Self::BotStopped => "⏹️",
            Self::UserBanned => "🔨",
            Self::UserUnbanned => "✅",
            Self::UserDeleted => "❌",
            Self::InviteCreated => "🎟️",
            Self::PanelDeleted => "📋",
            Self::SettingsChanged => "⚙️",
        }
    }

    pub fn color(self) -> u32 {
        match self {
            Self::Login | Self::BotCreated | Self::BotStarted | Self::UserUnbanned => 0x22C55E,
            Self::LoginFailed | Self::BotDeleted | Self::UserBanned | Self::UserDeleted => 0xEF4444,
            Self::Register | Self::InviteCreated => 0x3B82F6,
            Self::BotStopped | Self::PanelDeleted => 0xF59E0B,
            Self::Logout | Self::SettingsChanged => 0x6B7280,
        }
    }
}

/// Who did what to which target.
#[derive(Debug, Clone, Default)]
pub struct AuditEntry {
    pub user_id: Option<i32>,
    pub username: Option<String>,
    pub target: Option<String>,
    pub ip: Option<IpAddr>,
    pub details: Option<String>,
}

impl AuditEntry {
    /// Entry for an action taken by `user`.
    pub fn by(user: &User) -> Self {
        Self {
            user_id: Some(user.id),
            username: Some(user.username.clone()),
            ..Default::default()
        }
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn ip(mut self, ip: IpAddr) -> Self {
        self.ip = Some(ip);
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Hides the host part of an address; only the network prefix is kept.
pub fn mask_ip(ip: IpAddr) -> String {
    let ip = match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
        v4 => v4,
    };

    match ip {
        IpAddr::V4(v4) => {
            let [a, b, _, _] = v4.octets();
            format!("{}.{}.xxx.xxx", a, b)
        }
        IpAddr::V6(v6) => {
            let segments = v6.segments();
            format!("{:x}:{:x}:xxxx:xxxx", segments[0], segments[1])
        }
    }
}

/// Webhook body carrying one audit embed.
pub fn webhook_payload(event: AuditEvent, entry: &AuditEntry) -> Value {
    let mut embed = CreateEmbed::new()
        .title(format!("{} {}", event.emoji(), event.name()))
        .color(event.color())
        .footer(CreateEmbedFooter::new(FOOTER))
        .timestamp(Timestamp::now());

    let user = match (&entry.username, entry.user_id) {
        (Some(name), Some(id)) => Some(format!("{} (`{}`)", name, id)),
        (Some(name), None) => Some(name.clone()),
        (None, Some(id)) => Some(format!("`{}`", id)),
        (None, None) => None,
    };
    if let Some(user) = user {
        embed = embed.field("👤 User", user, true);
    }
    if let Some(target) = &entry.target {
        embed = embed.field("🎯 Target", target, true);
    }
    if let Some(ip) = entry.ip {
        embed = embed.field("🌐 IP Address", format!("`{}`", mask_ip(ip)), true);
    }
    if let Some(details) = &entry.details {
        let details: String = details.chars().take(FIELD_LIMIT).collect();
        embed = embed.field("📝 Details", details, false);
    }

    json!({ "embeds": [embed] })
}

#[derive(Clone)]
pub struct AuditLog {
    client: reqwest::Client,
    webhook_url: Option<Arc<str>>,
}

impl AuditLog {
    pub fn new(client: reqwest::Client, webhook_url: Option<String>) -> Self {
        Self {
            client,
            webhook_url: webhook_url.map(Arc::from),
        }
    }

    /// Logs the event and, with a webhook configured, posts it in the background.
    pub fn record(&self, event: AuditEvent, entry: AuditEntry) {
        tracing::info!(
            "Audit {}: user {:?}, target {:?}: {}",
            event.name(),
            entry.user_id,
            entry.target,
            entry.details.as_deref().unwrap_or("-")
        );

        let Some(url) = self.webhook_url.clone() else {
            return;
        };
        let payload = webhook_payload(event, &entry);
        let client = self.client.clone();

        tokio::spawn(async move {
            let sent = client
                .post(url.as_ref())
                .json(&payload)
                .send()
                .await
                .and_then(|response| response.error_for_status());
            if let Err(e) = sent {
                tracing::warn!("Failed to deliver audit event {}: {}", event.name(), e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn masks_host_part_of_addresses() {
        assert_eq!(
            mask_ip(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7))),
            "203.0.xxx.xxx"
        );
        assert_eq!(
            mask_ip(IpAddr::V6(Ipv4Addr::new(10, 1, 2, 3).to_ipv6_mapped())),
            "10.1.xxx.xxx"
        );
        assert_eq!(
            mask_ip(IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 1, 2, 3, 4, 5, 6))),
            "2001:db8:xxxx:xxxx"
        );
    }

    #[test]
    fn payload_lists_present_fields_only() {
        let entry = AuditEntry {
            user_id: Some(3),
            username: Some("alice".to_string()),
            ip: Some(IpAddr::V4(Ipv4Addr::new(198, 51, 100, 20))),
            ..Default::default()
        }
        .target("Support Bot");

        let payload = webhook_payload(AuditEvent::BotDeleted, &entry);
        let embed = &payload["embeds"][0];
        let fields = embed["fields"].as_array().unwrap();

        assert_eq!(embed["title"], "🗑️ Bot Deleted");
        assert_eq!(embed["color"], 0xEF4444);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0]["value"], "alice (`3`)");
        assert_eq!(fields[1]["value"], "Support Bot");
        assert_eq!(fields[2]["value"], "`198.51.xxx.xxx`");
    }

    #[test]
    fn long_details_are_cut_to_field_limit() {
        let entry = AuditEntry::default().details("é".repeat(FIELD_LIMIT + 10));

        let payload = webhook_payload(AuditEvent::SettingsChanged, &entry);
        let value = payload["embeds"][0]["fields"][0]["value"].as_str().unwrap();

        assert_eq!(value.chars().count(), FIELD_LIMIT);
    }
}
