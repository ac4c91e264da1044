use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod common;
pub use common::*;


#[derive(Parser)]
#[command(
    name = "interleave",
    version,
    about = "Scoring for interleaved multi-image VQA: multiple-choice accuracy, ROUGE-L and judge ratings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score a JSONL file of model predictions
    Score(ScoreArgs),
    /// Print the prompts sent to the model under evaluation
    Prompt(PromptArgs),
    /// Print the resolved judge configuration (API key redacted)
    JudgeConfig(JudgeConfigArgs),
    Version,
}

#[derive(clap::Args, Clone, Debug)]
pub struct ScoreArgs {
    /// JSONL rows: dataset fields plus the model output under `prediction`
    #[arg(long)]
    pub results: PathBuf,

    /// Task YAML; supplies judge metadata when --judge is set
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub judge: JudgeArgs,

    /// Write per-record rows (with judge verdicts) to this file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Clone, Debug)]
pub struct PromptArgs {
    /// Dataset JSONL
    #[arg(long)]
    pub dataset: PathBuf,

    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Model name used to select prompt suffixes from the task file
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(clap::Args, Clone, Debug)]
pub struct JudgeConfigArgs {
    #[arg(long)]
    pub config: PathBuf,
}
