//! Models command - list what the Ollama server can run.

use wingman_core::{models, OllamaClient, OllamaError};

pub(crate) async fn run() -> miette::Result<()> {
    let client = OllamaClient::new();

    match client.list_models().await {
        Ok(names) => {
            if names.is_empty() {
                println!("No models installed. Pull one with: ollama pull {}", wingman_core::DEFAULT_MODEL);
                return Ok(());
            }

            println!("Models available at {}:\n", client.base_url());
            for name in names {
                // Mark models Wingman carries tuned defaults for.
                if models::profile(&name).is_some() {
                    println!("  {name} (defaults available)");
                } else {
                    println!("  {name}");
                }
            }
        }
        Err(OllamaError::ServerNotRunning(url)) => {
            println!("Could not reach Ollama at {url}. Start it with: ollama serve");
        }
        Err(e) => return Err(miette::miette!("Failed to list models: {}", e)),
    }

    Ok(())
}
