//! Shared argument types.

#[derive(clap::Args, Clone, Debug, Default)]
pub struct JudgeArgs {
    /// Rate open-ended answers with the remote judge
    #[arg(long)]
    pub judge: bool,

    /// Judge model identifier; overrides metadata.gpt_eval_model_name
    #[arg(long, env = "INTERLEAVE_JUDGE_MODEL")]
    pub judge_model: Option<String>,

    /// Provider profile: openai or azure. Anything else disables judge calls.
    /// Overrides metadata.api_type
    #[arg(long, env = "INTERLEAVE_JUDGE_API_TYPE")]
    pub judge_api_type: Option<String>,

    /// Attempts per judge call
    /// Default: 5
    #[arg(long, env = "INTERLEAVE_JUDGE_MAX_ATTEMPTS")]
    pub max_attempts: Option<u32>,

    /// Seconds to wait between attempts
    /// Default: 10
    #[arg(long, env = "INTERLEAVE_JUDGE_WAIT_SECS")]
    pub wait_secs: Option<f64>,
}
