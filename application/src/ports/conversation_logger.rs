//! Debate event log port
//!
//! Every step the round controller takes (a candidate generated, a score
//! read, a round closed or abandoned, the final decision) is reported as a
//! [`ConversationEvent`] tagged with where in the debate it happened. The
//! `tracing` output stays human-oriented; this stream is the machine-readable
//! record of the debate as it unfolds.

use debate_domain::{AgentId, CandidateId};
use serde_json::Value;

/// What happened in the debate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebateEventKind {
    DebateStarted,
    CandidateGenerated,
    CandidateScored,
    RoundClosed,
    RoundAbandoned,
    DebateResolved,
}

impl DebateEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebateEventKind::DebateStarted => "debate_started",
            DebateEventKind::CandidateGenerated => "candidate_generated",
            DebateEventKind::CandidateScored => "candidate_scored",
            DebateEventKind::RoundClosed => "round_closed",
            DebateEventKind::RoundAbandoned => "round_abandoned",
            DebateEventKind::DebateResolved => "debate_resolved",
        }
    }
}

impl std::fmt::Display for DebateEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One debate event, located by round and agent where that applies
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEvent {
    pub kind: DebateEventKind,
    /// `None` for debate-wide events
    pub round: Option<usize>,
    /// Set only for per-candidate events
    pub agent: Option<AgentId>,
    /// Event-specific fields, without the location
    pub details: Value,
}

impl ConversationEvent {
    /// An event about the whole debate
    pub fn debate(kind: DebateEventKind, details: Value) -> Self {
        Self {
            kind,
            round: None,
            agent: None,
            details,
        }
    }

    /// An event about one round
    pub fn round(kind: DebateEventKind, round: usize, details: Value) -> Self {
        Self {
            kind,
            round: Some(round),
            agent: None,
            details,
        }
    }

    /// An event about one candidate
    pub fn candidate(kind: DebateEventKind, id: CandidateId, details: Value) -> Self {
        Self {
            kind,
            round: Some(id.round),
            agent: Some(id.agent),
            details,
        }
    }
}

/// Sink for debate events.
///
/// `log` never fails: a broken log must not interrupt a debate.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every event
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_event_carries_location() {
        let id = CandidateId::new(2, AgentId(1));
        let event = ConversationEvent::candidate(
            DebateEventKind::CandidateScored,
            id,
            json!({"logic": 8.0}),
        );
        assert_eq!(event.round, Some(2));
        assert_eq!(event.agent, Some(AgentId(1)));
        assert_eq!(event.kind.to_string(), "candidate_scored");
    }

    #[test]
    fn test_debate_and_round_events() {
        let started = ConversationEvent::debate(DebateEventKind::DebateStarted, json!({}));
        assert_eq!((started.round, started.agent), (None, None));

        let closed = ConversationEvent::round(DebateEventKind::RoundClosed, 3, Value::Null);
        assert_eq!((closed.round, closed.agent), (Some(3), None));
        assert_eq!(closed.kind.as_str(), "round_closed");
    }
}
