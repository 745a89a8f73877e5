//! Detail view: labelled fields of a single record.

use console::measure_text_width;
use serde::Serialize;

use super::{Detail, Message, MessageLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailField {
    pub label: String,
    pub value: String,
}

/// Template context for the detail template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub fields: Vec<DetailField>,
    pub label_width: usize,
    pub messages: Vec<Message>,
}

impl DetailView {
    pub fn of<T: Detail>(item: &T) -> Self {
        let fields: Vec<DetailField> = item
            .fields()
            .into_iter()
            .map(|(label, value)| DetailField {
                label: label.to_string(),
                value,
            })
            .collect();
        let label_width = fields
            .iter()
            .map(|f| measure_text_width(&f.label))
            .max()
            .unwrap_or(0);
        DetailView {
            title: Some(item.title()),
            fields,
            label_width,
            messages: Vec::new(),
        }
    }

    /// A view with only messages, for commands that return nothing.
    pub fn messages_only(messages: Vec<Message>) -> Self {
        DetailView {
            messages,
            ..DetailView::default()
        }
    }

    pub fn with_message(mut self, level: MessageLevel, text: impl Into<String>) -> Self {
        self.messages.push(Message::new(level, text));
        self
    }
}
