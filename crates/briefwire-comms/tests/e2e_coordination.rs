//! End-to-end coordination tests
//!
//! Exercises the mailbox, correlator, and aggregator together the way
//! the pipeline stages use them.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;

use briefwire_comms::{
    fan_out, AgentAddress, CommsError, Correlator, Envelope, InMemoryMailbox, InProcessTransport,
    Mailbox, MailboxHub, Operation, OperationRegistry, OperationSchema, Result, SignalStatus,
    SubOperation,
};

struct StaticOperation {
    name: &'static str,
    value: Value,
}

#[async_trait]
impl Operation for StaticOperation {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "Returns a fixed value"
    }

    fn parameters_schema(&self) -> OperationSchema {
        OperationSchema::new()
    }

    async fn invoke(&self, _args: Value) -> Result<Value> {
        Ok(self.value.clone())
    }
}

struct FailingOperation;

#[async_trait]
impl Operation for FailingOperation {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Always fails"
    }

    fn parameters_schema(&self) -> OperationSchema {
        OperationSchema::new()
    }

    async fn invoke(&self, _args: Value) -> Result<Value> {
        Err(CommsError::operation("weather upstream unavailable"))
    }
}

#[tokio::test]
async fn test_post_then_await_returns_payload() {
    let mailbox = Arc::new(InMemoryMailbox::new());

    mailbox
        .post(Envelope::new(
            "contextualist",
            "scout",
            "task-1",
            SignalStatus::DataGathered,
            serde_json::json!({"x": 1}),
        ))
        .await;

    let correlator = Correlator::new(mailbox.clone());
    let envelope = correlator
        .await_envelope("task-1", SignalStatus::DataGathered, Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(envelope.sender, "contextualist");
    assert_eq!(envelope.recipient, "scout");
    assert_eq!(envelope.payload["x"], 1);
}

#[tokio::test]
async fn test_await_sees_envelope_posted_from_another_task() {
    let mailbox = Arc::new(InMemoryMailbox::new());
    let correlator =
        Correlator::new(mailbox.clone()).with_poll_interval(Duration::from_millis(50));

    let writer = mailbox.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(120)).await;
        writer
            .post(Envelope::new(
                "contextualist",
                "scout",
                "task-2",
                SignalStatus::DataGathered,
                serde_json::json!({"topic": "energy"}),
            ))
            .await;
    });

    let envelope = correlator
        .await_envelope("task-2", SignalStatus::DataGathered, Duration::from_secs(2))
        .await
        .unwrap();

    assert_eq!(envelope.payload["topic"], "energy");
}

#[tokio::test]
async fn test_await_times_out_within_one_poll_interval() {
    let mailbox = Arc::new(InMemoryMailbox::new());
    let correlator =
        Correlator::new(mailbox).with_poll_interval(Duration::from_millis(100));

    let timeout = Duration::from_millis(300);
    let start = Instant::now();
    let result = correlator
        .await_envelope("task-absent", SignalStatus::DataGathered, timeout)
        .await;
    let elapsed = start.elapsed();

    assert!(matches!(result, Err(CommsError::CorrelationTimeout { .. })));
    assert!(elapsed >= timeout);
    assert!(elapsed < timeout + Duration::from_millis(200));
}

#[tokio::test]
async fn test_hub_partitions_stay_isolated_across_cycles() {
    let hub = MailboxHub::new();

    let first = hub.partition("cycle-1");
    let second = hub.partition("cycle-2");

    first
        .post(Envelope::new(
            "contextualist",
            "scout",
            "cycle-1",
            SignalStatus::DataGathered,
            serde_json::json!({"cycle": 1}),
        ))
        .await;
    second
        .post(Envelope::new(
            "contextualist",
            "scout",
            "cycle-2",
            SignalStatus::DataGathered,
            serde_json::json!({"cycle": 2}),
        ))
        .await;

    let correlator = Correlator::new(hub.partition("cycle-2"));
    let envelope = correlator
        .await_envelope("cycle-2", SignalStatus::DataGathered, Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(envelope.payload["cycle"], 2);

    first.clear().await;
    assert!(first.read_all().await.is_empty());
    assert_eq!(second.read_all().await.len(), 1);
}

#[tokio::test]
async fn test_fan_out_with_one_failing_collaborator() {
    let transport = InProcessTransport::new();

    let news = OperationRegistry::new();
    news.register(StaticOperation {
        name: "search_news",
        value: serde_json::json!({"headline": "Grid upgrade approved"}),
    })
    .unwrap();
    transport.register_agent("news", news);

    let weather = OperationRegistry::new();
    weather.register(FailingOperation).unwrap();
    transport.register_agent("weather", weather);

    let fx = OperationRegistry::new();
    fx.register(StaticOperation {
        name: "get_fx_rate",
        value: serde_json::json!({"conversion_rate": 0.79, "target_code": "GBP"}),
    })
    .unwrap();
    transport.register_agent("fx", fx);

    let merged = fan_out(
        &transport,
        vec![
            SubOperation::new(
                "news_context",
                AgentAddress::local("news"),
                "search_news",
                serde_json::json!({"topic": "energy"}),
            ),
            SubOperation::new(
                "weather_context",
                AgentAddress::local("weather"),
                "get_weather",
                serde_json::json!({"city": "London"}),
            ),
            SubOperation::new(
                "financial_context",
                AgentAddress::local("fx"),
                "get_fx_rate",
                serde_json::json!({"location": "london"}),
            ),
        ],
    )
    .await;

    assert_eq!(merged["news_context"]["headline"], "Grid upgrade approved");
    assert_eq!(merged["financial_context"]["target_code"], "GBP");
    assert!(merged["weather_context"]["error"]
        .as_str()
        .unwrap()
        .contains("weather upstream unavailable"));
}

#[tokio::test]
async fn test_gather_then_signal_round() {
    // A contextualist-shaped round: fan out, post the merged result,
    // then a waiting scout correlates on it.
    let transport = InProcessTransport::new();

    let news = OperationRegistry::new();
    news.register(StaticOperation {
        name: "search_news",
        value: serde_json::json!({"headline": "Port traffic rebounds"}),
    })
    .unwrap();
    transport.register_agent("news", news);

    let mailbox = Arc::new(InMemoryMailbox::new());

    let merged = fan_out(
        &transport,
        vec![SubOperation::new(
            "news_context",
            AgentAddress::local("news"),
            "search_news",
            serde_json::json!({"topic": "shipping"}),
        )],
    )
    .await;

    mailbox
        .post(Envelope::new(
            "contextualist",
            "scout",
            "task-3",
            SignalStatus::DataGathered,
            merged,
        ))
        .await;

    let correlator = Correlator::new(mailbox);
    let envelope = correlator
        .await_envelope("task-3", SignalStatus::DataGathered, Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(
        envelope.payload["news_context"]["headline"],
        "Port traffic rebounds"
    );
    assert!(envelope.timestamp.is_some());
}
