//! LLM provider client and streaming implementation.
//!
//! Contains the [`Provider`] struct which wraps rig-core provider clients
//! behind enum dispatch and implements [`CompletionTransport`] on top of
//! rig's streaming prompt API.

use anyhow::{Context, Result};
use futures::stream::{self, Stream, StreamExt};
use rig::agent::MultiTurnStreamItem;
use rig::client::CompletionClient;
use rig::message::Text;
use rig::providers::{anthropic, openai, openrouter};
use rig::streaming::{StreamedAssistantContent, StreamingPrompt};
use tracing::info;

use super::kind::ProviderKind;
use super::resolve::ModelSelection;
use crate::config::Config;
use crate::transport::{CompletionRequest, CompletionTransport, FragmentStream, TransportError};

/// Internal enum wrapping provider-specific clients.
enum ClientKind {
    OpenAI(openai::Client),
    Anthropic(anthropic::Client),
    OpenRouter(openrouter::Client),
    Ollama(openai::Client),
}

/// A configured LLM provider ready to stream completions.
///
/// Wraps a rig-core provider client and the target model name. Agents are
/// constructed per request since each prompt command carries its own system
/// prompt.
pub struct Provider {
    client: ClientKind,
    model: String,
}

/// Builds an agent from the given client, model, and system prompt,
/// then executes the provided block with the agent bound to `$agent`.
macro_rules! with_agent {
    ($client:expr, $model:expr, $sys:expr, |$agent:ident| $body:expr) => {{
        let $agent = $client
            .agent($model)
            .preamble($sys)
            .max_tokens(crate::constants::MAX_TOKENS)
            .build();
        $body
    }};
}

/// Dispatches an operation across provider-specific clients.
///
/// Matches on [`ClientKind`] and executes the same block for each variant,
/// letting the compiler monomorphize per provider.
macro_rules! dispatch {
    ($self:expr, |$client:ident| $body:expr) => {
        match &$self.client {
            ClientKind::OpenAI($client) => $body,
            ClientKind::Anthropic($client) => $body,
            ClientKind::OpenRouter($client) => $body,
            ClientKind::Ollama($client) => $body,
        }
    };
}

impl Provider {
    /// Creates a new [`Provider`] from the loaded application config.
    ///
    /// Resolves the API key and base URL through the config precedence chain
    /// (env var → config file) and builds the appropriate provider client.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is found for the selected provider
    /// or if client construction fails.
    pub fn from_config(config: &Config, selection: &ModelSelection) -> Result<Self> {
        let name = selection.provider.name();
        let client = match selection.provider {
            ProviderKind::OpenAI => {
                let api_key = config
                    .resolve_api_key(name)
                    .context("No API key found for OpenAI. Set OPENAI_API_KEY or configure it in config.toml")?;
                let client = match config.resolve_base_url(name) {
                    Some(base_url) => openai::Client::builder()
                        .api_key(api_key.as_str())
                        .base_url(base_url)
                        .build()
                        .context("Failed to create OpenAI client")?,
                    None => {
                        openai::Client::new(&api_key).context("Failed to create OpenAI client")?
                    }
                };
                ClientKind::OpenAI(client)
            }
            ProviderKind::Anthropic => {
                let api_key = config
                    .resolve_api_key(name)
                    .context("No API key found for Anthropic. Set ANTHROPIC_API_KEY or configure it in config.toml")?;
                let client = anthropic::Client::new(&api_key)
                    .context("Failed to create Anthropic client")?;
                ClientKind::Anthropic(client)
            }
            ProviderKind::OpenRouter => {
                let api_key = config
                    .resolve_api_key(name)
                    .context("No API key found for OpenRouter. Set OPENROUTER_API_KEY or configure it in config.toml")?;
                let client = openrouter::Client::new(&api_key)
                    .context("Failed to create OpenRouter client")?;
                ClientKind::OpenRouter(client)
            }
            ProviderKind::Ollama => {
                let base_url = config
                    .resolve_base_url(name)
                    .unwrap_or_else(|| crate::constants::OLLAMA_DEFAULT_BASE_URL.to_string());
                let client = openai::Client::builder()
                    .api_key("ollama")
                    .base_url(format!("{}/v1", base_url))
                    .build()
                    .context("Failed to create Ollama client")?;
                ClientKind::Ollama(client)
            }
        };

        info!(
            "Initializing {} client with model: {}",
            name, selection.model
        );
        Ok(Self {
            client,
            model: selection.model.clone(),
        })
    }
}

#[async_trait::async_trait(?Send)]
impl CompletionTransport for Provider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn open_stream(
        &self,
        request: CompletionRequest,
    ) -> Result<FragmentStream, TransportError> {
        let CompletionRequest {
            model,
            system_prompt,
            user_prompt,
        } = request;

        let fragments = dispatch!(self, |client| {
            let response = with_agent!(client, &model, &system_prompt, |agent| {
                agent.stream_prompt(user_prompt.clone()).await
            });
            text_fragments(response)
        });
        peek_open(fragments).await
    }
}

/// Waits for the first item so a request that never opened fails as such.
///
/// rig sends the HTTP request on the first poll, so an error before any
/// fragment is an open failure. Later errors stay stream failures.
async fn peek_open(mut fragments: FragmentStream) -> Result<FragmentStream, TransportError> {
    match fragments.next().await {
        Some(Err(TransportError::Stream(message))) => Err(TransportError::Open(message)),
        Some(first) => Ok(stream::once(async move { first })
            .chain(fragments)
            .boxed_local()),
        None => Ok(stream::empty().boxed_local()),
    }
}

/// Keeps the assistant text from a rig stream, mapping its errors.
///
/// Final responses, reasoning and tool items carry no display text and are
/// skipped.
fn text_fragments<S, R, E>(stream: S) -> FragmentStream
where
    S: Stream<Item = Result<MultiTurnStreamItem<R>, E>> + 'static,
    R: 'static,
    E: std::fmt::Display + 'static,
{
    stream
        .filter_map(|item| async move {
            match item {
                Ok(MultiTurnStreamItem::StreamAssistantItem(StreamedAssistantContent::Text(
                    Text { text },
                ))) => Some(Ok(text)),
                Ok(_) => None,
                Err(err) => Some(Err(TransportError::Stream(err.to_string()))),
            }
        })
        .boxed_local()
}
