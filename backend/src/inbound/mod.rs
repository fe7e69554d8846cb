//! Inbound adapters translating HTTP requests into registration commands.

pub mod http;
