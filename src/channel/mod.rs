//! The messaging port.
//!
//! The chat transport itself lives outside this crate. It hands us [`Inbound`] events and
//! executes the [`Outbound`] effects we give back through a [`ChatChannel`].

pub mod console;

use async_trait::async_trait;
use thiserror::Error;
use crate::domain::OperatorId;

/// Identifies a message already shown to an operator, so it can be edited in place.
pub type MessageRef = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Inline keyboard: rows of buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    pub fn single(button: Button) -> Self {
        Self { rows: vec![vec![button]] }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    pub fn has_data(&self, data: &str) -> bool {
        self.buttons().any(|b| b.data == data)
    }
}

/// Events delivered by the messaging channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Command { name: String, operator: OperatorId },
    Text { content: String, operator: OperatorId },
    ButtonPress { data: String, operator: OperatorId, message: MessageRef },
}

impl Inbound {
    pub fn operator(&self) -> OperatorId {
        match self {
            Inbound::Command { operator, .. }
            | Inbound::Text { operator, .. }
            | Inbound::ButtonPress { operator, .. } => *operator,
        }
    }

    /// The message a reply should replace, if the event came from a button.
    pub fn origin(&self) -> Option<MessageRef> {
        match self {
            Inbound::ButtonPress { message, .. } => Some(*message),
            _ => None,
        }
    }
}

/// Effects the channel must carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    SendMessage {
        operator: OperatorId,
        text: String,
        keyboard: Option<Keyboard>,
    },
    EditMessage {
        operator: OperatorId,
        message: MessageRef,
        text: String,
        keyboard: Option<Keyboard>,
    },
}

impl Outbound {
    pub fn text(&self) -> &str {
        match self {
            Outbound::SendMessage { text, .. } | Outbound::EditMessage { text, .. } => text,
        }
    }

    pub fn keyboard(&self) -> Option<&Keyboard> {
        match self {
            Outbound::SendMessage { keyboard, .. } | Outbound::EditMessage { keyboard, .. } => keyboard.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChannelError {
    /// The edit would not change anything on screen.
    #[error("Message is not modified")]
    NotModified,
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait ChatChannel: Send + Sync {
    async fn deliver(&self, effect: Outbound) -> Result<(), ChannelError>;
}
