//! CurateIt Telegram Bot.
//!
//! Bridges Telegram, the CurateIt curation API, and the OpenAI Assistants
//! backend: users log into their CurateIt account through a chat dialogue,
//! save links as gems, search saved gems, and chat with an assistant that
//! keeps per-chat conversation context.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod bot;
pub mod config;
pub mod error;
pub mod handler;
pub mod links;
pub mod login;
pub mod session;
