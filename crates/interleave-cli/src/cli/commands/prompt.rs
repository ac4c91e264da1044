use interleave_core::model::EvalRecord;
use interleave_core::prompt::{conversation, render_prompt};
use interleave_core::visual::{collect_visuals, ReferenceDecoder};
use serde_json::json;

use super::input::{load_task, read_jsonl};
use crate::cli::args::PromptArgs;
use crate::exit_codes;

/// One JSON line per dataset row: rendered prompt plus image references.
pub fn run(args: PromptArgs) -> anyhow::Result<i32> {
    let task = load_task(args.config.as_deref())?;
    let options = task.prompt_options(args.model.as_deref());
    let rows = read_jsonl(&args.dataset)?;

    for row in &rows {
        let record = EvalRecord::from_doc(row, "")?;
        let mut line = json!({
            "sample_id": record.sample_id,
            "prompt": render_prompt(&record, &options),
            "images": collect_visuals(row, &ReferenceDecoder),
        });
        if row.get("conversations").is_some() {
            line["turns"] = serde_json::to_value(conversation(row)?)?;
        }
        println!("{line}");
    }
    tracing::info!(rows = rows.len(), "rendered prompts");
    Ok(exit_codes::OK)
}
