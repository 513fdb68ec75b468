//! LLM provider abstraction for ai.
//!
//! Wraps rig-core's provider clients behind a [`Provider`] struct with enum
//! dispatch and exposes it as a [`CompletionTransport`](crate::transport::CompletionTransport).
//! Supports OpenAI (and compatible endpoints), Anthropic, OpenRouter and
//! Ollama via [`kind::ProviderKind`].

mod client;
mod kind;
mod resolve;

pub use client::Provider;
pub use resolve::resolve_model;
