//! Line-based stand-in for a chat transport.
//!
//! Input lines:
//! - `/start` is a command,
//! - `!checkout` presses the button with that callback data on the last message,
//! - anything else is free text,
//! - a leading `@<id>` acts as another operator, e.g. `@42 /start`.

use std::sync::atomic::{AtomicI64, Ordering};
use async_trait::async_trait;
use dashmap::DashMap;
use tokio::io::AsyncWriteExt;
use crate::channel::{ChannelError, ChatChannel, Inbound, Keyboard, MessageRef, Outbound};
use crate::domain::OperatorId;

pub struct ConsoleChannel {
    next_ref: AtomicI64,
    last_ref: AtomicI64,
    /// What each printed message currently shows.
    shown: DashMap<MessageRef, (String, Option<Keyboard>)>,
}

impl Default for ConsoleChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleChannel {
    pub fn new() -> Self {
        Self {
            next_ref: AtomicI64::new(1),
            last_ref: AtomicI64::new(0),
            shown: DashMap::new(),
        }
    }

    pub fn last_message(&self) -> MessageRef {
        self.last_ref.load(Ordering::SeqCst)
    }

    pub fn parse_line(&self, line: &str, default_operator: OperatorId) -> Option<Inbound> {
        parse_line(line, default_operator, self.last_message())
    }
}

pub fn parse_line(line: &str, default_operator: OperatorId, last_message: MessageRef) -> Option<Inbound> {
    let mut rest = line.trim();
    let mut operator = default_operator;

    if let Some(tail) = rest.strip_prefix('@') {
        let (id, remainder) = tail.split_once(char::is_whitespace).unwrap_or((tail, ""));
        operator = id.parse().ok()?;
        rest = remainder.trim();
    }
    if rest.is_empty() {
        return None;
    }

    let inbound = if let Some(name) = rest.strip_prefix('/') {
        Inbound::Command {
            name: name.split_whitespace().next().unwrap_or_default().to_lowercase(),
            operator,
        }
    } else if let Some(data) = rest.strip_prefix('!') {
        Inbound::ButtonPress {
            data: data.trim().to_string(),
            operator,
            message: last_message,
        }
    } else {
        Inbound::Text {
            content: rest.to_string(),
            operator,
        }
    };
    Some(inbound)
}

fn format_effect(effect: &Outbound, message: MessageRef) -> String {
    let (operator, header) = match effect {
        Outbound::SendMessage { operator, .. } => (*operator, format!("[#{message}]")),
        Outbound::EditMessage { operator, message, .. } => (*operator, format!("[#{message} edited]")),
    };
    let mut out = format!("\n── to {operator} {header} ──\n{}\n", effect.text());
    if let Some(keyboard) = effect.keyboard() {
        for row in &keyboard.rows {
            let row: Vec<String> = row.iter().map(|b| format!("[{}] !{}", b.label, b.data)).collect();
            out.push_str(&row.join("   "));
            out.push('\n');
        }
    }
    out
}

#[async_trait]
impl ChatChannel for ConsoleChannel {
    async fn deliver(&self, effect: Outbound) -> Result<(), ChannelError> {
        let message = match &effect {
            Outbound::SendMessage { .. } => self.next_ref.fetch_add(1, Ordering::SeqCst),
            Outbound::EditMessage { message, .. } => *message,
        };
        let content = (effect.text().to_string(), effect.keyboard().cloned());
        if matches!(effect, Outbound::EditMessage { .. })
            && self.shown.get(&message).is_some_and(|current| *current == content)
        {
            return Err(ChannelError::NotModified);
        }
        let rendered = format_effect(&effect, message);

        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(rendered.as_bytes())
            .await
            .map_err(|e| ChannelError::Delivery(e.to_string()))?;
        stdout.flush().await.map_err(|e| ChannelError::Delivery(e.to_string()))?;

        self.shown.insert(message, content);
        self.last_ref.store(message, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("/Start now", 1, 0),
            Some(Inbound::Command { name: "start".into(), operator: 1 })
        );
        assert_eq!(
            parse_line("!pay:cash", 1, 7),
            Some(Inbound::ButtonPress { data: "pay:cash".into(), operator: 1, message: 7 })
        );
        assert_eq!(
            parse_line("@42 Budi Santoso", 1, 0),
            Some(Inbound::Text { content: "Budi Santoso".into(), operator: 42 })
        );
        assert_eq!(parse_line("   ", 1, 0), None);
        assert_eq!(parse_line("@x /start", 1, 0), None);
    }

    #[tokio::test]
    async fn test_sends_get_fresh_refs_and_edits_keep_theirs() {
        let channel = ConsoleChannel::new();
        let send = Outbound::SendMessage { operator: 1, text: "hi".into(), keyboard: None };
        channel.deliver(send.clone()).await.unwrap();
        channel.deliver(send).await.unwrap();
        assert_eq!(channel.last_message(), 2);

        let edit = Outbound::EditMessage { operator: 1, message: 1, text: "hey".into(), keyboard: None };
        channel.deliver(edit.clone()).await.unwrap();
        assert_eq!(channel.last_message(), 1);

        // Same text and keyboard again: nothing to change on screen.
        assert_eq!(channel.deliver(edit).await, Err(ChannelError::NotModified));
    }
}
