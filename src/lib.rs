//! Waste classification relay
//!
//! Accepts a waste-item description and/or photo over HTTP, asks an Azure
//! OpenAI deployment for a structured disposal classification, and relays the
//! model's JSON back to the caller.

pub mod ai;
pub mod error;
pub mod models;
pub mod prompts;
pub mod server;

pub use error::{Error, Result};
