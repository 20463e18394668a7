//! Tests for priority-ordered dispatch and the mock fallback
//!
//! These tests drive the registry with scripted providers that count their
//! invocations, so the order and number of attempts can be asserted exactly.

use async_trait::async_trait;
use fitcoach_core::protocol::{ConversationMessage, GenerationResult};
use fitcoach_core::providers::{
    DispatchError, Provider, ProviderError, ProviderRegistry, ProviderResult, MOCK_CONTENT,
    MOCK_MODEL, MOCK_PROVIDER,
};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;

#[derive(Clone, Copy, Debug)]
enum Behavior {
    Succeed,
    Fail,
    Unavailable,
    Hang,
}

struct ScriptedProvider {
    name: String,
    behavior: Behavior,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    fn new(name: &str, behavior: Behavior) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                name: name.to_string(),
                behavior,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        !matches!(self.behavior, Behavior::Unavailable)
    }

    async fn call(&self, conversation: &[ConversationMessage]) -> ProviderResult<GenerationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Succeed => Ok(GenerationResult::new(
                format!("{} answered {} messages", self.name, conversation.len()),
                self.name.clone(),
                format!("{}-model", self.name.to_lowercase()),
            )),
            Behavior::Fail => Err(ProviderError::Server {
                status: 500,
                message: format!("{} is down", self.name),
            }),
            Behavior::Unavailable => Err(ProviderError::Configuration(
                "called while unavailable".to_string(),
            )),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(ProviderError::Timeout("never finished".to_string()))
            }
        }
    }
}

fn registry(script: &[(&str, Behavior)]) -> (ProviderRegistry, Vec<Arc<AtomicUsize>>) {
    let mut providers: Vec<Box<dyn Provider>> = Vec::new();
    let mut counters = Vec::new();
    for (name, behavior) in script {
        let (provider, calls) = ScriptedProvider::new(name, *behavior);
        providers.push(Box::new(provider));
        counters.push(calls);
    }
    (ProviderRegistry::new(providers), counters)
}

fn calls(counters: &[Arc<AtomicUsize>]) -> Vec<usize> {
    counters.iter().map(|c| c.load(Ordering::SeqCst)).collect()
}

fn hello() -> Vec<ConversationMessage> {
    vec![ConversationMessage::user("hello")]
}

#[tokio::test]
async fn test_empty_registry_returns_mock() {
    let registry = ProviderRegistry::empty();
    assert!(registry.is_mock());

    let result = registry.call(&hello()).await.unwrap();
    assert_eq!(result.provider(), MOCK_PROVIDER);
    assert_eq!(result.model(), MOCK_MODEL);
    assert_eq!(result.content(), MOCK_CONTENT);
}

#[tokio::test]
async fn test_first_fails_second_succeeds() {
    let (registry, counters) = registry(&[("X", Behavior::Fail), ("Y", Behavior::Succeed)]);

    let result = registry.call(&hello()).await.unwrap();

    assert_eq!(result.provider(), "Y");
    assert_eq!(calls(&counters), vec![1, 1]);
}

#[tokio::test]
async fn test_first_success_stops_dispatch() {
    let (registry, counters) = registry(&[
        ("X", Behavior::Succeed),
        ("Y", Behavior::Succeed),
        ("Z", Behavior::Fail),
    ]);

    let result = registry.call(&hello()).await.unwrap();

    assert_eq!(result.provider(), "X");
    assert_eq!(calls(&counters), vec![1, 0, 0]);
}

#[tokio::test]
async fn test_all_fail_exhausts_without_mock() {
    let (registry, counters) = registry(&[("X", Behavior::Fail), ("Y", Behavior::Fail)]);

    let err = registry.call(&hello()).await.unwrap_err();

    match &err {
        DispatchError::Exhausted {
            attempted,
            configured,
            ..
        } => {
            assert_eq!(*attempted, 2);
            assert_eq!(*configured, 2);
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
    // The last failure is kept as the source
    assert!(err.last_provider_error().unwrap().to_string().contains("Y is down"));
    assert_eq!(calls(&counters), vec![1, 1]);
}

#[tokio::test]
async fn test_unavailable_provider_is_skipped() {
    let (registry, counters) =
        registry(&[("X", Behavior::Unavailable), ("Y", Behavior::Succeed)]);

    let result = registry.call(&hello()).await.unwrap();

    assert_eq!(result.provider(), "Y");
    assert_eq!(calls(&counters), vec![0, 1]);
    assert_eq!(registry.available_providers(), vec!["Y"]);
}

#[tokio::test]
async fn test_all_unavailable_exhausts_with_no_source() {
    let (registry, counters) = registry(&[("X", Behavior::Unavailable)]);

    let err = registry.call(&hello()).await.unwrap_err();

    assert!(err.is_exhausted());
    assert!(err.last_provider_error().is_none());
    assert_eq!(err.to_string(), "No available LLM provider among 1 configured");
    assert_eq!(calls(&counters), vec![0]);
}

#[tokio::test]
async fn test_priority_is_construction_order() {
    let (registry, _) = registry(&[
        ("Zeta", Behavior::Succeed),
        ("Alpha", Behavior::Succeed),
        ("Mid", Behavior::Succeed),
    ]);

    assert_eq!(registry.providers(), vec!["Zeta", "Alpha", "Mid"]);
    assert_eq!(registry.call(&hello()).await.unwrap().provider(), "Zeta");
}

#[tokio::test]
async fn test_status_reports_each_provider() {
    let (registry, _) = registry(&[("X", Behavior::Unavailable), ("Y", Behavior::Succeed)]);

    let status = registry.status();
    assert_eq!(status.total_providers, 2);
    assert_eq!(status.available_providers, vec!["Y".to_string()]);
    assert_eq!(
        status.provider_status,
        vec![("X".to_string(), false), ("Y".to_string(), true)]
    );
}

#[tokio::test]
async fn test_whole_conversation_reaches_provider() {
    let (registry, _) = registry(&[("X", Behavior::Succeed)]);
    let conversation = vec![
        ConversationMessage::system("You are a coach"),
        ConversationMessage::user("Plan my week"),
        ConversationMessage::assistant("Sure"),
        ConversationMessage::user("Thanks"),
    ];

    let result = registry.call(&conversation).await.unwrap();
    assert_eq!(result.content(), "X answered 4 messages");
}

#[tokio::test]
async fn test_concurrent_calls_share_registry() {
    let (registry, counters) = registry(&[("X", Behavior::Fail), ("Y", Behavior::Succeed)]);
    let registry = Arc::new(registry);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            tokio::spawn(async move { registry.call(&hello()).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().provider(), "Y");
    }
    assert_eq!(calls(&counters), vec![8, 8]);
}

#[tokio::test]
async fn test_cancel_stops_later_providers() {
    let (registry, counters) = registry(&[("Slow", Behavior::Hang), ("Y", Behavior::Succeed)]);
    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
    let conversation = hello();

    let call = registry.call_with_cancel(&conversation, async {
        let _ = cancel_rx.await;
    });
    let trigger = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        let _ = cancel_tx.send(());
    };

    let (result, ()) = tokio::join!(call, trigger);

    assert!(matches!(result, Err(DispatchError::Cancelled)));
    assert_eq!(calls(&counters), vec![1, 0]);
}

#[tokio::test]
async fn test_deadline_cancels_hung_provider() {
    let (registry, counters) = registry(&[("Slow", Behavior::Hang), ("Y", Behavior::Succeed)]);

    let deadline = Instant::now() + Duration::from_millis(50);
    let err = registry.call_with_deadline(&hello(), deadline).await.unwrap_err();

    assert!(matches!(err, DispatchError::Cancelled));
    assert_eq!(calls(&counters), vec![1, 0]);
}

#[tokio::test]
async fn test_already_cancelled_attempts_nothing() {
    let (registry, counters) = registry(&[("X", Behavior::Succeed)]);

    let err = registry
        .call_with_cancel(&hello(), std::future::ready(()))
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Cancelled));
    // Cancellation is polled first, so the provider future never runs
    assert_eq!(calls(&counters), vec![0]);
}

#[tokio::test]
async fn test_span_does_not_change_outcome() {
    let subscriber = tracing_subscriber::fmt().with_test_writer().finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let (registry, _) = registry(&[("X", Behavior::Fail), ("Y", Behavior::Succeed)]);
    let registry = registry.with_span(tracing::info_span!("dispatch", request = "test"));

    assert_eq!(registry.call(&hello()).await.unwrap().provider(), "Y");
}

fn behavior() -> impl Strategy<Value = Behavior> {
    prop_oneof![
        Just(Behavior::Succeed),
        Just(Behavior::Fail),
        Just(Behavior::Unavailable),
    ]
}

proptest! {
    #[test]
    fn prop_first_available_success_wins(behaviors in prop::collection::vec(behavior(), 1..6)) {
        let script: Vec<(String, Behavior)> = behaviors
            .iter()
            .enumerate()
            .map(|(i, b)| (format!("P{i}"), *b))
            .collect();
        let borrowed: Vec<(&str, Behavior)> =
            script.iter().map(|(n, b)| (n.as_str(), *b)).collect();
        let (registry, counters) = registry(&borrowed);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let outcome = runtime.block_on(registry.call(&hello()));

        let winner = behaviors.iter().position(|b| matches!(b, Behavior::Succeed));
        let observed = calls(&counters);

        match winner {
            Some(k) => {
                let result = outcome.unwrap();
                prop_assert_eq!(result.provider(), format!("P{k}"));
                for (i, count) in observed.iter().enumerate() {
                    let expected = usize::from(i <= k && !matches!(behaviors[i], Behavior::Unavailable));
                    prop_assert_eq!(*count, expected);
                }
            }
            None => {
                let err = outcome.unwrap_err();
                prop_assert!(err.is_exhausted());
                let attempted = behaviors
                    .iter()
                    .filter(|b| !matches!(b, Behavior::Unavailable))
                    .count();
                prop_assert_eq!(observed.iter().sum::<usize>(), attempted);
            }
        }
    }
}
