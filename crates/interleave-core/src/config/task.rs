//! Task YAML loading.
//!
//! Task files carry custom `!function` tags pointing at harness callbacks.
//! Those lines are dropped before parsing; only `metadata` and
//! `model_specific_prompt_kwargs` are read here.

use crate::errors::ConfigError;
use crate::prompt::PromptOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct TaskConfig {
    #[serde(default)]
    pub task: Option<String>,

    #[serde(default)]
    pub metadata: Option<TaskMetadata>,

    /// Prompt suffixes keyed by model name; `default` applies to every model.
    #[serde(default)]
    pub model_specific_prompt_kwargs: BTreeMap<String, PromptOptions>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TaskMetadata {
    /// Judge model identifier sent in every rating request.
    pub gpt_eval_model_name: Option<String>,

    /// Provider selector: `openai`, `azure`, anything else disables the judge.
    #[serde(default)]
    pub api_type: Option<String>,
}

impl TaskConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let safe: String = raw
            .lines()
            .filter(|line| !line.contains("!function"))
            .map(|line| format!("{line}\n"))
            .collect();
        if safe.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&safe)?)
    }

    pub fn judge_model_name(&self) -> Result<&str, ConfigError> {
        self.metadata
            .as_ref()
            .and_then(|m| m.gpt_eval_model_name.as_deref())
            .ok_or(ConfigError::MissingMetadata("gpt_eval_model_name"))
    }

    pub fn api_type(&self) -> Result<&str, ConfigError> {
        self.metadata
            .as_ref()
            .and_then(|m| m.api_type.as_deref())
            .ok_or(ConfigError::MissingMetadata("api_type"))
    }

    /// Prompt options for `model`, falling back to the `default` entry.
    pub fn prompt_options(&self, model: Option<&str>) -> PromptOptions {
        model
            .and_then(|m| self.model_specific_prompt_kwargs.get(m))
            .or_else(|| self.model_specific_prompt_kwargs.get("default"))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"
dataset_path: lmms-lab/llava-interleave-bench
output_type: generate_until
doc_to_visual: !function utils.doc_to_visual
doc_to_text: !function utils.doc_to_text
doc_to_target: "answer"
model_specific_prompt_kwargs:
  default:
    oe_post_prompt: "Answer briefly."
    mcq_post_prompt: "Answer with the option's letter."
  llava:
    mcq_post_prompt: "Letter only."
metadata:
  version: 0.0
  api_type: openai
  gpt_eval_model_name: gpt-4o-2024-05-13
"#;

    #[test]
    fn function_tags_are_dropped_before_parsing() {
        let cfg = TaskConfig::from_yaml(TEMPLATE).unwrap();
        assert_eq!(cfg.judge_model_name().unwrap(), "gpt-4o-2024-05-13");
        assert_eq!(cfg.api_type().unwrap(), "openai");
    }

    #[test]
    fn prompt_options_fall_back_to_default() {
        let cfg = TaskConfig::from_yaml(TEMPLATE).unwrap();
        let llava = cfg.prompt_options(Some("llava"));
        assert_eq!(llava.mcq_post_prompt, "Letter only.");
        assert_eq!(llava.oe_post_prompt, "");

        let other = cfg.prompt_options(Some("qwen"));
        assert_eq!(other.oe_post_prompt, "Answer briefly.");
        assert_eq!(cfg.prompt_options(None), other);
    }

    #[test]
    fn missing_metadata_is_reported() {
        let cfg = TaskConfig::from_yaml("task: x\n").unwrap();
        let err = cfg.judge_model_name().unwrap_err();
        assert!(err.to_string().contains("gpt_eval_model_name"));
    }

    #[test]
    fn from_file_reads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("task.yaml");
        std::fs::write(&path, TEMPLATE).unwrap();
        let cfg = TaskConfig::from_file(&path).unwrap();
        assert!(cfg.metadata.is_some());
    }

    #[test]
    fn unreadable_file_is_a_read_error() {
        let err = TaskConfig::from_file(Path::new("/nonexistent/task.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
