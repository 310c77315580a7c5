//! GigaChat API client.
//!
//! Implements the `ChatClient` trait via the chat-completions endpoint and
//! the `TokenTransport` trait via the OAuth token-exchange endpoint. The two
//! endpoints live on different hosts, so the config carries both base URLs.

mod api;
mod client;
mod config;

pub use client::GigaChatClient;
pub use config::GigaChatConfig;
