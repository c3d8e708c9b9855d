//! Debate domain
//!
//! Entities and value objects for one multi-agent debate over a problem.
//!
//! ```text
//! Problem ─▶ RoundRecord(1) ─▶ … ─▶ RoundRecord(R) ─▶ Transcript ─▶ Resolver ─▶ FinalDecision
//!               │
//!               ├─ Candidate × N   (answer pulled out of free text by `extraction`)
//!               └─ Score × N       (critic rubric read by `rubric`)
//! ```

pub mod answer;
pub mod candidate;
pub mod context;
pub mod decision;
pub mod extraction;
pub mod round;
pub mod rubric;
pub mod state;
pub mod strategy;
pub mod transcript;

pub use answer::{Answer, AnswerValue, NormalizedValue};
pub use candidate::{AgentId, Candidate, CandidateId};
pub use context::DebateContext;
pub use decision::{AnswerTally, FinalDecision, ResolutionMethod};
pub use extraction::{Extraction, extract_answer, scan_answer};
pub use round::{RoundRecord, answers_disagree};
pub use rubric::{RUBRIC_MAX, RUBRIC_MIN, RubricReading, Score, parse_rubric};
pub use state::{DebatePhase, DebateState};
pub use strategy::StrategyTag;
pub use transcript::{Transcript, TranscriptExport};
