use anyhow::Context;
use interleave_core::config::{JudgeConfig, RetryPolicy, TaskConfig};
use interleave_core::JudgeService;
use interleave_metrics::process::{process_results, row_predictions};
use interleave_metrics::{score_records, RougeL};
use std::time::Duration;

use super::input::{load_task, read_jsonl};
use crate::cli::args::{JudgeArgs, ScoreArgs};
use crate::exit_codes;

pub async fn run(args: ScoreArgs) -> anyhow::Result<i32> {
    let task = load_task(args.config.as_deref())?;
    let rows = read_jsonl(&args.results)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let processed = row_predictions(row)
            .and_then(|predictions| process_results(row, &predictions))
            .with_context(|| format!("{}: row {}", args.results.display(), i + 1))?;
        records.push(processed.into_record());
    }

    let judge = if args.judge.judge {
        Some(build_judge(&args.judge, &task)?)
    } else {
        None
    };

    let (summary, scored) = score_records(records, &RougeL, judge.as_ref()).await;

    if let Some(path) = &args.output {
        let body = serde_json::to_string_pretty(&scored)?;
        std::fs::write(path, body)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(exit_codes::OK)
}

/// Flags take precedence over the task file's metadata block.
fn build_judge(args: &JudgeArgs, task: &TaskConfig) -> anyhow::Result<JudgeService> {
    let model = match &args.judge_model {
        Some(m) => m.clone(),
        None => task
            .judge_model_name()
            .context("--judge needs --judge-model or metadata.gpt_eval_model_name")?
            .to_string(),
    };
    let api_type = match &args.judge_api_type {
        Some(t) => t.clone(),
        None => task
            .api_type()
            .context("--judge needs --judge-api-type or metadata.api_type")?
            .to_string(),
    };

    let defaults = RetryPolicy::default();
    let wait = match args.wait_secs {
        Some(s) => Duration::try_from_secs_f64(s)
            .map_err(|e| anyhow::anyhow!("--wait-secs {s} is not a usable wait: {e}"))?,
        None => defaults.wait,
    };
    let retry = RetryPolicy::new(args.max_attempts.unwrap_or(defaults.max_attempts), wait);

    let cfg = JudgeConfig::from_process_env(model, &api_type).with_retry(retry);
    tracing::info!(
        model = %cfg.model,
        api_type = %cfg.api_type,
        max_attempts = cfg.retry.max_attempts,
        "judge enabled"
    );
    JudgeService::from_config(cfg)
}
