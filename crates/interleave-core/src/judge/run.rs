use crate::judge::JudgeService;

/// Send `prompt` until one attempt succeeds or the retry budget is spent.
///
/// Waits `retry.wait` between attempts, never after the last one.
pub(crate) async fn request_with_retry(svc: &JudgeService, prompt: &str) -> Option<String> {
    let policy = svc.config.retry;
    for attempt in 1..=policy.max_attempts {
        match svc.client.complete(prompt).await {
            Ok(resp) => return Some(resp.text),
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %e,
                    "judge request failed on attempt {attempt}"
                );
                if attempt < policy.max_attempts {
                    tokio::time::sleep(policy.wait).await;
                }
            }
        }
    }
    tracing::error!(
        max_attempts = policy.max_attempts,
        model = %svc.config.model,
        "failed to get judge response after {} attempts",
        policy.max_attempts
    );
    None
}
