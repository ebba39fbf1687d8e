//! Telegram Bot API notifier.
//!
//! Implements [`NotificationPort`] with a single `sendMessage` call per
//! notification. The agent-wide timeout bounds every delivery attempt.

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::app::ports::NotificationPort;
use crate::config::NotifierConfig;
use crate::error::NotifyError;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramNotifier {
    agent: ureq::Agent,
    /// Carries the bot token; never put it in an error or log line.
    endpoint: String,
    bot_token: String,
    chat_id: i64,
}

impl TelegramNotifier {
    pub fn new(config: &NotifierConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            endpoint: send_message_url(&config.api_base, &config.bot_token),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id,
        }
    }
}

fn send_message_url(api_base: &str, bot_token: &str) -> String {
    format!("{}/bot{}/sendMessage", api_base.trim_end_matches('/'), bot_token)
}

/// Transport failure text without the request URL. `Transport`'s own
/// `Display` includes the URL, and with it the bot token.
fn describe_transport(t: &ureq::Transport, bot_token: &str) -> String {
    let text = match t.message() {
        Some(m) => format!("{}: {m}", t.kind()),
        None => t.kind().to_string(),
    };
    if bot_token.is_empty() {
        text
    } else {
        text.replace(bot_token, "<redacted>")
    }
}

impl NotificationPort for TelegramNotifier {
    fn notify(&mut self, message: &str) -> Result<(), NotifyError> {
        let body = SendMessage {
            chat_id: self.chat_id,
            text: message,
        };

        let reply: ApiReply = match self.agent.post(&self.endpoint).send_json(&body) {
            Ok(resp) => resp
                .into_json()
                .map_err(|e| NotifyError::Transport(format!("unreadable reply: {e}")))?,
            Err(ureq::Error::Status(status, resp)) => {
                let reason = resp
                    .into_json::<ApiReply>()
                    .ok()
                    .and_then(|r| r.description)
                    .unwrap_or_else(|| "no description".into());
                return Err(NotifyError::Rejected { status, reason });
            }
            Err(ureq::Error::Transport(t)) => {
                return Err(NotifyError::Transport(describe_transport(&t, &self.bot_token)));
            }
        };

        if !reply.ok {
            return Err(NotifyError::Rejected {
                status: 200,
                reason: reply.description.unwrap_or_default(),
            });
        }
        debug!("notification delivered to chat {}", self.chat_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_layout() {
        assert_eq!(
            send_message_url("https://api.telegram.org/", "123:abc"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn body_shape() {
        let body = SendMessage {
            chat_id: 42,
            text: "🚨 Gas Leak Detected! Level: 250\n",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"chat_id": 42, "text": "🚨 Gas Leak Detected! Level: 250\n"})
        );
    }

    #[test]
    fn transport_error_never_carries_the_token() {
        let mut n = TelegramNotifier::new(&NotifierConfig {
            api_base: "http://127.0.0.1:9".into(),
            bot_token: "SECRET-TOKEN-123".into(),
            timeout_secs: 1,
            ..NotifierConfig::default()
        });
        let err = n.notify("x").unwrap_err();
        assert!(matches!(err, NotifyError::Transport(_)));
        let text = err.to_string();
        assert!(!text.contains("SECRET-TOKEN-123"), "{text}");
        assert!(!text.contains("/bot"), "{text}");
    }

    #[test]
    fn unreachable_endpoint_is_transport_error() {
        let mut n = TelegramNotifier::new(&NotifierConfig {
            api_base: "http://127.0.0.1:9".into(),
            bot_token: "t".into(),
            timeout_secs: 1,
            ..NotifierConfig::default()
        });
        assert!(matches!(n.notify("x"), Err(NotifyError::Transport(_))));
    }
}
