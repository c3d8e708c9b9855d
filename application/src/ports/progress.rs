//! Progress notification port
//!
//! Defines the interface for reporting progress during a debate.

use debate_domain::{AgentId, DebatePhase, FinalDecision};

/// Callback for progress updates during a debate
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain text, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase of a round starts
    fn on_phase_start(&self, round: usize, phase: DebatePhase, total_tasks: usize);

    /// Called when one agent's call completes within a phase
    fn on_task_complete(&self, round: usize, phase: DebatePhase, agent: AgentId, success: bool);

    /// Called when a phase of a round completes
    fn on_phase_complete(&self, round: usize, phase: DebatePhase);

    /// Called when the round in flight was abandoned
    fn on_cancelled(&self, _round: usize) {}

    /// Called once the final decision is known
    fn on_resolved(&self, _decision: &FinalDecision) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _round: usize, _phase: DebatePhase, _total_tasks: usize) {}
    fn on_task_complete(&self, _round: usize, _phase: DebatePhase, _agent: AgentId, _success: bool) {}
    fn on_phase_complete(&self, _round: usize, _phase: DebatePhase) {}
}
