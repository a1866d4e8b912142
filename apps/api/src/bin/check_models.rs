//! Standalone diagnostic: lists the generation-capable models the configured
//! GEMINI_API_KEY can call. Run with `cargo run --bin check-models`.

use anyhow::{Context, Result};
use serde::Deserialize;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let api_key = std::env::var("GEMINI_API_KEY")
        .context("GEMINI_API_KEY is not set")?;

    println!("--- CHECKING AVAILABLE MODELS ---");

    let response = reqwest::Client::new()
        .get(format!("{GEMINI_API_BASE}/models"))
        .query(&[("key", api_key.as_str())])
        .send()
        .await?
        .error_for_status()?;

    let listing: ListModelsResponse = response.json().await?;

    for model in listing.models {
        if model
            .supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
        {
            println!("AVAILABLE: {}", model.name);
        }
    }

    println!("--- END OF LIST ---");
    Ok(())
}
