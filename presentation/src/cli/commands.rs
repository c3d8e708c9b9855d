//! CLI command definitions

use clap::Parser;
use debate_domain::{OutputFormat, ResolverKind, StrategyTag};
use std::path::PathBuf;

/// CLI arguments for math-debate
#[derive(Parser, Debug)]
#[command(name = "math-debate")]
#[command(author, version, about = "Multi-agent debate for math word problems")]
#[command(long_about = r#"
math-debate asks several agents to solve a math problem, has a critic grade
every solution on logic and computation, and lets the agents revise over a
fixed number of rounds. A resolver then picks one final answer.

Each round has two phases:
1. Generating: every agent proposes a solution ending in \boxed{answer}
2. Scoring: the critic grades every solution on a 0-10 rubric

Configuration files are loaded from (in priority order):
1. MATH_DEBATE_* environment variables
2. --config <path>     Explicit config file
3. ./debate.toml       Project-level config
4. ~/.config/math-debate/config.toml   Global config

Example:
  math-debate "A train travels 120 km in 1.5 hours. What is its speed?"
  math-debate --agents 4 --rounds 3 --resolver weighted "..."
  math-debate --replay run.json --resolver weighted
"#)]
pub struct Cli {
    /// The problem to debate (not required with --replay)
    pub problem: Option<String>,

    /// Number of agents in the pool
    #[arg(short, long, value_name = "N")]
    pub agents: Option<usize>,

    /// Number of rounds
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<usize>,

    /// Strategy per agent, in agent order (can be specified multiple times)
    #[arg(short, long, value_name = "STRATEGY")]
    pub strategy: Vec<StrategyTag>,

    /// Per-call oracle timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Resolution policy: majority or weighted
    #[arg(long, value_name = "POLICY")]
    pub resolver: Option<ResolverKind>,

    /// Output format: full, decision, markdown or json
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Save the transcript export as JSON
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Re-resolve a saved transcript without calling the oracle
    #[arg(long, value_name = "FILE", conflicts_with = "problem")]
    pub replay: Option<PathBuf>,

    /// Write debate events as JSONL
    #[arg(long, value_name = "FILE")]
    pub conversation_log: Option<PathBuf>,

    /// Also write diagnostic logs to a daily rolling file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_debate_flags() {
        let cli = Cli::try_parse_from([
            "math-debate",
            "--agents",
            "2",
            "--rounds",
            "3",
            "-s",
            "direct",
            "-s",
            "code",
            "--resolver",
            "weighted",
            "-o",
            "md",
            "-vv",
            "What is 2 + 2?",
        ])
        .unwrap();

        assert_eq!(cli.problem.as_deref(), Some("What is 2 + 2?"));
        assert_eq!(cli.agents, Some(2));
        assert_eq!(cli.rounds, Some(3));
        assert_eq!(
            cli.strategy,
            vec![StrategyTag::Direct, StrategyTag::Programmatic]
        );
        assert_eq!(cli.resolver, Some(ResolverKind::Weighted));
        assert_eq!(cli.output, Some(OutputFormat::Markdown));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_replay_conflicts_with_problem() {
        assert!(Cli::try_parse_from(["math-debate", "--replay", "run.json", "2+2?"]).is_err());
        let cli = Cli::try_parse_from(["math-debate", "--replay", "run.json"]).unwrap();
        assert_eq!(cli.replay, Some(PathBuf::from("run.json")));
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        assert!(Cli::try_parse_from(["math-debate", "-s", "poetic", "x"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
