use crate::config::{JudgeConfig, RetryPolicy};
use crate::judge::JudgeService;
use crate::model::{EvalRecord, JudgeOutcome, QuestionType};
use crate::providers::llm::fake::FakeClient;
use std::sync::Arc;
use std::time::Duration;

fn config(retry: RetryPolicy) -> JudgeConfig {
    JudgeConfig::resolve("gpt-judge", "openai", |_| None).with_retry(retry)
}

fn service(client: Arc<FakeClient>, retry: RetryPolicy) -> JudgeService {
    JudgeService::new(config(retry), client)
}

fn record(question_type: QuestionType, answer: &str) -> EvalRecord {
    EvalRecord {
        sample_id: "s-1".into(),
        sub_task: "Spot_the_Diff".into(),
        question: "What changed?".into(),
        question_type,
        answer: answer.into(),
        prediction: "The cup moved.".into(),
    }
}

#[tokio::test]
async fn successful_reply_yields_parsed_rating() {
    let client = Arc::new(FakeClient::new("m").then_ok("Explanation: Good match\nRating: 4\n"));
    let svc = service(client.clone(), RetryPolicy::immediate(5));

    let v = svc.rate("What changed?", "cup moved", "The cup moved.").await;

    assert_eq!(v.explanation, "Good match");
    assert_eq!(v.rating, Some(4));
    assert_eq!(v.model, "gpt-judge");
    assert_eq!(v.outcome, JudgeOutcome::Rated);
    assert_eq!(client.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_degrade_after_max_attempts() {
    let mut fake = FakeClient::new("m");
    for _ in 0..5 {
        fake = fake.then_err("connection refused");
    }
    let client = Arc::new(fake);
    let svc = service(client.clone(), RetryPolicy::new(5, Duration::from_secs(10)));

    let start = tokio::time::Instant::now();
    let v = svc.rate("q", "a", "ref").await;
    let waited = start.elapsed();

    assert_eq!(v.rating, None);
    assert_eq!(v.rating_or_zero(), 0);
    assert_eq!(v.explanation, "");
    assert_eq!(v.model, "gpt-judge");
    assert_eq!(v.outcome, JudgeOutcome::Unavailable);
    assert_eq!(client.calls(), 5);
    // four inter-attempt waits, none after the final failure
    assert_eq!(waited, Duration::from_secs(40));
}

#[tokio::test(start_paused = true)]
async fn transient_failure_then_success() {
    let client = Arc::new(
        FakeClient::new("m")
            .then_err("status 503")
            .then_err("timeout")
            .then_ok("Explanation: Partially right.\nRating: 3\n"),
    );
    let svc = service(client.clone(), RetryPolicy::new(5, Duration::from_secs(10)));

    let start = tokio::time::Instant::now();
    let v = svc.rate("q", "a", "ref").await;

    assert_eq!(v.rating, Some(3));
    assert_eq!(client.calls(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(20));
}

#[tokio::test]
async fn parse_failure_is_not_retried() {
    let client = Arc::new(
        FakeClient::new("m")
            .then_ok("I think it is mostly right.")
            .then_ok("Explanation: never reached\nRating: 5\n"),
    );
    let svc = service(client.clone(), RetryPolicy::immediate(5));

    let v = svc.rate("q", "a", "ref").await;

    assert_eq!(v.rating, None);
    assert_eq!(v.explanation, "");
    assert_eq!(v.model, "gpt-judge");
    assert_eq!(v.outcome, JudgeOutcome::ParseFailed);
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn off_scale_rating_degrades_to_parse_failure() {
    let client = Arc::new(FakeClient::new("m").then_ok("Explanation: great\nRating: 10\n"));
    let svc = service(client.clone(), RetryPolicy::immediate(5));

    let scored = svc.judge_record(record(QuestionType::OpenEnded, "The cup moved.")).await;
    let v = scored.verdict.unwrap();

    assert_eq!(v.rating, None);
    assert_eq!(v.outcome, JudgeOutcome::ParseFailed);
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn multiple_choice_record_never_calls_judge() {
    let client = Arc::new(FakeClient::new("m").with_response("Explanation: x\nRating: 5\n"));
    let svc = service(client.clone(), RetryPolicy::immediate(5));

    let scored = svc.judge_record(record(QuestionType::MultipleChoice, "A")).await;

    assert!(scored.verdict.is_none());
    assert!(scored.judge_input.is_none());
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn empty_reference_never_calls_judge() {
    let client = Arc::new(FakeClient::new("m").with_response("Explanation: x\nRating: 5\n"));
    let svc = service(client.clone(), RetryPolicy::immediate(5));

    let scored = svc.judge_record(record(QuestionType::OpenEnded, "")).await;

    assert!(scored.verdict.is_none());
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn judged_record_keeps_prompt_and_verdict() {
    let client = Arc::new(FakeClient::new("m").with_response("Explanation: Exact.\nRating: 5\n"));
    let svc = service(client.clone(), RetryPolicy::immediate(5));

    let scored = svc
        .judge_record(record(QuestionType::OpenEnded, "The cup moved."))
        .await;

    let input = scored.judge_input.as_deref().unwrap();
    assert!(input.contains("[Assistant Response]\nThe cup moved.\n"));
    assert_eq!(scored.verdict.unwrap().rating, Some(5));
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn single_attempt_policy_does_not_wait() {
    let client = Arc::new(FakeClient::new("m").then_err("boom"));
    let svc = service(client.clone(), RetryPolicy::new(1, Duration::from_secs(3600)));

    let v = tokio::time::timeout(Duration::from_secs(1), svc.rate("q", "a", "r"))
        .await
        .expect("a single failed attempt must not sleep");

    assert_eq!(v.outcome, JudgeOutcome::Unavailable);
    assert_eq!(client.calls(), 1);
}
