pub mod classify;
pub mod client;
pub mod types;

pub use classify::AzureClassifier;
pub use client::AzureOpenAiHttpClient;
