//! Transcript - append-only message history for one session

use crate::error::Result;
use crate::llm::{Message, Role};

use super::step::Step;

/// Ordered message history. Messages are never removed; an optional window
/// limits how many non-system messages go into each request.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    window: Option<usize>,
}

impl Transcript {
    /// Start a transcript with the system prompt
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
            window: None,
        }
    }

    pub fn with_window(mut self, window: Option<usize>) -> Self {
        self.window = window;
        self
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append a step as an assistant message
    pub fn push_step(&mut self, step: &Step) -> Result<()> {
        self.push(Message::assistant(step.to_json()?));
        Ok(())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Last message, if any
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Messages to send: all system messages, then the most recent `window`
    /// conversation messages in order
    pub fn request_messages(&self) -> Vec<Message> {
        let (system, conversation): (Vec<&Message>, Vec<&Message>) =
            self.messages.iter().partition(|m| m.role == Role::System);

        let skip = match self.window {
            Some(window) => conversation.len().saturating_sub(window),
            None => 0,
        };

        system
            .into_iter()
            .chain(conversation.into_iter().skip(skip))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::step::StepKind;

    #[test]
    fn test_new_starts_with_system_prompt() {
        let transcript = Transcript::new("rules");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0], Message::system("rules"));
    }

    #[test]
    fn test_push_step_serializes_as_assistant() {
        let mut transcript = Transcript::new("rules");
        transcript.push_step(&Step::new(StepKind::Plan, "scaffold")).unwrap();

        let last = transcript.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(Step::parse(&last.content).unwrap().content, "scaffold");
    }

    #[test]
    fn test_request_messages_unbounded() {
        let mut transcript = Transcript::new("rules");
        for i in 0..5 {
            transcript.push(Message::user(format!("q{}", i)));
        }
        assert_eq!(transcript.request_messages().len(), 6);
    }

    #[test]
    fn test_request_messages_windowed() {
        let mut transcript = Transcript::new("rules").with_window(Some(2));
        for i in 0..5 {
            transcript.push(Message::user(format!("q{}", i)));
        }

        let sent = transcript.request_messages();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].role, Role::System);
        assert_eq!(sent[1].content, "q3");
        assert_eq!(sent[2].content, "q4");

        // stored history is untouched
        assert_eq!(transcript.len(), 6);
    }

    #[test]
    fn test_window_larger_than_history() {
        let mut transcript = Transcript::new("rules").with_window(Some(10));
        transcript.push(Message::user("only"));
        assert_eq!(transcript.request_messages().len(), 2);
    }
}
