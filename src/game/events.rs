//! Events and session logging

use serde::{Deserialize, Serialize};

use crate::core::types::Round;
use crate::game::systems::{LastResort, PassAction, TerminalReason};

/// Something noteworthy that happened during a session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub round: Round,
    pub event_type: EventType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventType {
    RandomEvent { message: String },
    PassAction { action: PassAction },
    LastResort { action: LastResort },
    CrisisStarted { reason: TerminalReason },
    CrisisAverted,
    GameOver { reason: TerminalReason },
}

impl EventType {
    /// Display line for the event
    pub fn message(&self) -> String {
        match self {
            EventType::RandomEvent { message } => message.clone(),
            EventType::PassAction { action } => action.label().to_string(),
            EventType::LastResort { action } => format!("Last resort: {}", action.label()),
            EventType::CrisisStarted { reason } => format!("Crisis: {}", reason.description()),
            EventType::CrisisAverted => "Company saved".to_string(),
            EventType::GameOver { reason } => format!("Game over: {}", reason.description()),
        }
    }
}

/// The complete event log of a session
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<Event>,
    next_event_id: u32,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, event_type: EventType, round: Round) -> u32 {
        let id = self.next_event_id;
        self.next_event_id += 1;

        self.events.push(Event {
            id,
            round,
            event_type,
        });

        id
    }

    pub fn events_for_round(&self, round: Round) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.round == round)
    }

    /// Messages of every random event that fired, oldest first
    pub fn random_event_messages(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|e| match &e.event_type {
            EventType::RandomEvent { message } => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_ids_are_sequential() {
        let mut log = EventLog::new();
        let a = log.add_event(EventType::CrisisAverted, 1);
        let b = log.add_event(
            EventType::RandomEvent {
                message: "boom".into(),
            },
            2,
        );
        assert_eq!((a, b), (0, 1));
        assert_eq!(log.events_for_round(2).count(), 1);
        assert_eq!(log.random_event_messages().collect::<Vec<_>>(), vec!["boom"]);
    }
}
