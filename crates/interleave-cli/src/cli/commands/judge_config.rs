use anyhow::Context;
use interleave_core::config::JudgeConfig;
use serde_json::Value;

use super::input::load_task;
use crate::cli::args::JudgeConfigArgs;
use crate::exit_codes;

pub fn run(args: JudgeConfigArgs) -> anyhow::Result<i32> {
    let task = load_task(Some(&args.config))?;
    let cfg = JudgeConfig::from_task(&task, |k| std::env::var(k).ok())
        .context("task file does not name a judge")?;
    cfg.validate()?;

    println!("{}", serde_json::to_string_pretty(&redacted(&cfg)?)?);
    Ok(exit_codes::OK)
}

/// Serialized config with the key replaced by a marker.
fn redacted(cfg: &JudgeConfig) -> anyhow::Result<Value> {
    let mut v = serde_json::to_value(cfg)?;
    if let Some(obj) = v.as_object_mut() {
        let marker = if cfg.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        obj.insert("api_key".into(), Value::from(marker));
    }
    Ok(v)
}
