//! OpenAI Assistants API client and run orchestration.
//!
//! A conversation with the assistant is a *thread* on the backend; one
//! user turn is a *run* that must be polled to a terminal status before
//! the reply can be read. This crate provides the REST client, a lazy
//! per-chat thread registry, and the orchestrator that drives a full turn
//! with bounded polling and cancellation.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod client;
pub mod error;
pub mod orchestrator;
pub mod registry;
pub mod types;

pub use client::AssistantClient;
pub use error::{AssistantError, AssistantResult};
pub use orchestrator::{FALLBACK_REPLY, RunConfig, RunOrchestrator};
pub use registry::ThreadRegistry;
pub use types::RunStatus;
