//! Command orchestration - one short-lived pipeline per invocation.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::command::CommandKind;
use crate::context;
use crate::ollama::{
    FailureKind, InferenceResult, OllamaClient, CONNECT_FAILED_TEXT, NO_RESPONSE_TEXT,
};
use crate::prompt::{self, PromptRequest};
use crate::settings::{self, PartialSettings};

/// Pipeline stage; transitions are logged, nothing outlives the invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    CollectingContext,
    BuildingPrompt,
    Querying,
    Done,
    Errored,
}

/// Runs the collect -> resolve -> build -> query pipeline.
///
/// Holds no mutable state: settings and context are re-resolved from scratch
/// on every run, so concurrent invocations are independent.
pub struct Engine {
    client: OllamaClient,
    project_root: PathBuf,
}

impl Engine {
    pub fn new(client: OllamaClient, project_root: impl Into<PathBuf>) -> Self {
        Self {
            client,
            project_root: project_root.into(),
        }
    }

    /// Run one command invocation to completion.
    ///
    /// Always returns text to place into the document: the model's reply, or
    /// a clearly marked failure comment. Faults never escape to the shell.
    pub async fn run(
        &self,
        command: CommandKind,
        file_path: &str,
        selection: &str,
        document: &str,
        persisted: Option<&PartialSettings>,
    ) -> String {
        info!("Running {} for {}", command.name(), file_path);
        let mut stage = Stage::Idle;

        // Settings are a snapshot for this invocation only; a concurrent
        // save does not affect a query already in flight.
        let settings = settings::resolve(persisted);

        transition(&mut stage, Stage::CollectingContext);
        let context = context::collect(&self.project_root);

        transition(&mut stage, Stage::BuildingPrompt);
        let request = PromptRequest::new(command, file_path, selection, document, context);
        let prompt = prompt::build(&request, &settings);

        transition(&mut stage, Stage::Querying);
        let result = self.client.query(&prompt, &settings).await;

        let text = match result {
            InferenceResult::Success { text } => {
                transition(&mut stage, Stage::Done);
                text
            }
            InferenceResult::Failure { kind, message } => {
                transition(&mut stage, Stage::Errored);
                warn!("{} failed ({kind:?}): {message}", command.name());
                match kind {
                    FailureKind::Network => CONNECT_FAILED_TEXT.to_string(),
                    FailureKind::MalformedResponse => NO_RESPONSE_TEXT.to_string(),
                    FailureKind::Configuration => {
                        format!("// Wingman configuration error: {message}")
                    }
                }
            }
        };

        // Errored is terminal for the invocation but never for the engine.
        if stage == Stage::Errored {
            transition(&mut stage, Stage::Idle);
        }

        text
    }
}

fn transition(stage: &mut Stage, next: Stage) {
    debug!("{:?} -> {:?}", stage, next);
    *stage = next;
}
