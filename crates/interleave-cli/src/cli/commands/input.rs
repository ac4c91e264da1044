use anyhow::Context;
use interleave_core::config::TaskConfig;
use serde_json::Value;
use std::path::Path;

/// Parse a JSONL file; blank lines are skipped.
pub(crate) fn read_jsonl(path: &Path) -> anyhow::Result<Vec<Value>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("{}:{}: invalid JSON", path.display(), i + 1))
        })
        .collect()
}

pub(crate) fn load_task(path: Option<&Path>) -> anyhow::Result<TaskConfig> {
    match path {
        Some(p) => TaskConfig::from_file(p)
            .with_context(|| format!("failed to load task config {}", p.display())),
        None => Ok(TaskConfig::default()),
    }
}
