//! Shared server state wiring the hosted agents together

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use dashmap::DashMap;

use briefwire_agents::{
    ContextualistStage, ContextualizeOperation, PublishBriefOperation, PublisherStage,
    ScoutOperation, ScoutStage,
};
use briefwire_comms::{
    AgentAddress, AgentTransport, InProcessTransport, MailboxHub, OperationRegistry,
};
use briefwire_core::BriefwireConfig;
use briefwire_llm::OpenAIProvider;
use briefwire_tools::{
    GetFxRateOperation, GetWeatherOperation, SearchImagesOperation, SearchNewsOperation,
};

/// Shared application state
///
/// Holds every hosted agent's registry. The same registries are wired
/// into an in-process transport, so co-hosted stages reach each other
/// without going back through HTTP.
#[derive(Clone)]
pub struct AppState {
    /// Hosted agents (agent_id -> operations)
    pub agents: Arc<DashMap<String, OperationRegistry>>,
}

impl AppState {
    /// Wire up the data agents and pipeline stages
    ///
    /// Requires `NEWSAPI_KEY`, `OPENWEATHER_API_KEY`,
    /// `EXCHANGE_RATE_API_KEY`, `PEXELS_API_KEY`, and `OPENAI_API_KEY`
    /// in the environment.
    pub fn build(config: &BriefwireConfig) -> anyhow::Result<Self> {
        let transport = InProcessTransport::new();
        let hub = MailboxHub::new();
        let agents: Arc<DashMap<String, OperationRegistry>> = Arc::new(DashMap::new());

        let world_data = OperationRegistry::new();
        world_data.register(SearchNewsOperation::from_env()?)?;
        world_data.register(GetWeatherOperation::from_env()?)?;
        install(&transport, &agents, "world-data", world_data);

        let finance = OperationRegistry::new();
        finance.register(GetFxRateOperation::from_env()?)?;
        install(&transport, &agents, "finance", finance);

        let media = OperationRegistry::new();
        media.register(SearchImagesOperation::from_env()?)?;
        install(&transport, &agents, "media", media);

        let transport_dyn: Arc<dyn AgentTransport> = Arc::new(transport.clone());

        let contextualist = Arc::new(ContextualistStage::new(
            Arc::clone(&transport_dyn),
            AgentAddress::local("world-data"),
            AgentAddress::local("finance"),
            hub.clone(),
        ));
        let ctx_registry = OperationRegistry::new();
        ctx_registry.register(ContextualizeOperation::new(contextualist))?;
        install(&transport, &agents, "contextualist", ctx_registry);

        let scout = Arc::new(
            ScoutStage::new(
                Arc::clone(&transport_dyn),
                AgentAddress::local("contextualist"),
                AgentAddress::local("media"),
                hub,
            )
            .with_correlation_timeout(Duration::from_secs(
                config.pipeline.correlation_timeout_secs,
            ))
            .with_poll_interval(Duration::from_secs(config.pipeline.poll_interval_secs)),
        );
        let scout_registry = OperationRegistry::new();
        scout_registry.register(ScoutOperation::new(scout))?;
        install(&transport, &agents, "scout", scout_registry);

        let api_key =
            std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;
        let provider = OpenAIProvider::new(api_key, &config.llm.brief_model)?;
        let publisher = Arc::new(PublisherStage::new(Arc::new(provider)));
        let publisher_registry = OperationRegistry::new();
        publisher_registry.register(PublishBriefOperation::new(publisher))?;
        install(&transport, &agents, "publisher", publisher_registry);

        tracing::info!("Hosting {} agents", agents.len());

        Ok(Self { agents })
    }

    /// Look up one hosted agent's registry
    pub fn registry(&self, agent_id: &str) -> Option<OperationRegistry> {
        self.agents.get(agent_id).map(|entry| entry.value().clone())
    }
}

fn install(
    transport: &InProcessTransport,
    agents: &DashMap<String, OperationRegistry>,
    agent_id: &str,
    registry: OperationRegistry,
) {
    transport.register_agent(agent_id, registry.clone());
    agents.insert(agent_id.to_string(), registry);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_test_keys() {
        std::env::set_var("NEWSAPI_KEY", "test-news-key");
        std::env::set_var("OPENWEATHER_API_KEY", "test-weather-key");
        std::env::set_var("EXCHANGE_RATE_API_KEY", "test-fx-key");
        std::env::set_var("PEXELS_API_KEY", "test-pexels-key");
        std::env::set_var("OPENAI_API_KEY", "test-openai-key");
    }

    #[test]
    fn test_build_hosts_all_agents() {
        set_test_keys();

        let state = AppState::build(&BriefwireConfig::default()).unwrap();

        let mut ids: Vec<String> =
            state.agents.iter().map(|entry| entry.key().clone()).collect();
        ids.sort();
        assert_eq!(
            ids,
            vec!["contextualist", "finance", "media", "publisher", "scout", "world-data"]
        );

        let world = state.registry("world-data").unwrap();
        assert!(world.has_operation("search_news"));
        assert!(world.has_operation("get_weather"));
        assert!(state.registry("scout").unwrap().has_operation("scout"));
        assert!(state.registry("publisher").unwrap().has_operation("publish_brief"));
    }

    #[test]
    fn test_registry_lookup_misses_unknown_agent() {
        set_test_keys();

        let state = AppState::build(&BriefwireConfig::default()).unwrap();
        assert!(state.registry("archivist").is_none());
    }
}
