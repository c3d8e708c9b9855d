//! Progress reporting for debate execution

use colored::Colorize;
use debate_application::ports::progress::ProgressNotifier;
use debate_domain::{AgentId, DebatePhase, FinalDecision};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a debate with one progress bar per phase
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn phase_display_name(round: usize, phase: DebatePhase) -> String {
        match phase {
            DebatePhase::Generating => format!("Round {}: Generating", round),
            DebatePhase::Scoring => format!("Round {}: Scoring", round),
            DebatePhase::Resolving => "Resolving".to_string(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, round: usize, phase: DebatePhase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_display_name(round, phase));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _round: usize, _phase: DebatePhase, agent: AgentId, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), agent)
            } else {
                format!("{} {}", "x".red(), agent)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, _round: usize, phase: DebatePhase) {
        if let Some(pb) = self.phase_bar.lock().ok().and_then(|mut slot| slot.take()) {
            pb.finish_with_message(format!("{} complete", phase.as_str().green()));
        }
    }

    fn on_cancelled(&self, round: usize) {
        if let Some(pb) = self.phase_bar.lock().ok().and_then(|mut slot| slot.take()) {
            pb.abandon_with_message(format!("{} round {} discarded", "cancelled:".yellow(), round));
        }
    }

    fn on_resolved(&self, decision: &FinalDecision) {
        let _ = self.multi.println(format!(
            "{} {} ({})",
            "->".cyan(),
            decision.answer.to_string().bold(),
            decision.method
        ));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, round: usize, phase: DebatePhase, total_tasks: usize) {
        let phase_name = ProgressReporter::phase_display_name(round, phase);
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            phase_name.bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _round: usize, _phase: DebatePhase, agent: AgentId, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), agent);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), agent);
        }
    }

    fn on_phase_complete(&self, _round: usize, _phase: DebatePhase) {}

    fn on_cancelled(&self, round: usize) {
        eprintln!("{} round {} discarded", "Cancelled:".yellow(), round);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_display_name() {
        assert_eq!(
            ProgressReporter::phase_display_name(2, DebatePhase::Scoring),
            "Round 2: Scoring"
        );
        assert_eq!(
            ProgressReporter::phase_display_name(3, DebatePhase::Resolving),
            "Resolving"
        );
    }

    #[test]
    fn test_reporter_tolerates_events_without_phase() {
        let reporter = ProgressReporter::new();
        reporter.on_task_complete(1, DebatePhase::Generating, AgentId(0), true);
        reporter.on_phase_complete(1, DebatePhase::Generating);
        reporter.on_cancelled(1);
    }
}
