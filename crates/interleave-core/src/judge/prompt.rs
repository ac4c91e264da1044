pub(crate) const EVAL_PROMPT: &str = "
[Question]
{question}

[Assistant Response]
{model_response}

[Ground Truth Response]
{ground_truth}

[System]
Rate whether the assistant response correctly matches the ground truth, it's about a question towards a sequence of images shared by the user.
The rating should be 1-5, where 1 is incorrect and 5 is correct.
Your response should be in the format:
Explanation: (your explanation)
Rating: (int)
";

/// Rating prompt with the three inputs embedded verbatim.
///
/// Substitution is single-pass so braces inside the inputs are left alone.
pub fn build_judge_prompt(question: &str, model_response: &str, ground_truth: &str) -> String {
    let mut out = String::with_capacity(
        EVAL_PROMPT.len() + question.len() + model_response.len() + ground_truth.len(),
    );
    let mut rest = EVAL_PROMPT;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let (value, len) = if tail.starts_with("{question}") {
            (question, "{question}".len())
        } else if tail.starts_with("{model_response}") {
            (model_response, "{model_response}".len())
        } else if tail.starts_with("{ground_truth}") {
            (ground_truth, "{ground_truth}".len())
        } else {
            ("{", 1)
        };
        out.push_str(value);
        rest = &tail[len..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_inputs_verbatim() {
        let p = build_judge_prompt("What moved?", "The {cup}", "The cup moved.");
        assert!(p.contains("[Question]\nWhat moved?\n"));
        assert!(p.contains("[Assistant Response]\nThe {cup}\n"));
        assert!(p.contains("[Ground Truth Response]\nThe cup moved.\n"));
        assert!(p.contains("Explanation: (your explanation)\nRating: (int)\n"));
        assert!(!p.contains("{question}"));
    }

    #[test]
    fn placeholder_text_inside_inputs_is_not_expanded() {
        let p = build_judge_prompt("{ground_truth}", "a", "REF");
        assert!(p.contains("[Question]\n{ground_truth}\n"));
        assert_eq!(p.matches("REF").count(), 1);
    }
}
