//! Prompt assembly for the inference endpoint.
//!
//! Output is pure and deterministic given its inputs; the only upstream
//! non-determinism is the context blob's file order.

use crate::command::CommandKind;
use crate::settings::EffectiveSettings;

/// Constant system preamble identifying the assistant's role.
pub const SYSTEM_PREAMBLE: &str =
    "You are an AI programming assistant embedded in a code editor.";

/// Prefix substituted ahead of the whole document when nothing is selected.
pub const CONTINUATION_MARKER: &str = "Continue this code:\n";

/// Everything one invocation sends to the model, built fresh per invocation
/// and immutable once constructed.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub command: CommandKind,
    pub file_path: String,
    /// The selection, or the whole document behind a continuation marker.
    /// Never empty.
    pub code: String,
    pub context: String,
}

impl PromptRequest {
    /// Build a request from the user's selection. An empty or whitespace-only
    /// selection substitutes the whole document, prefixed with
    /// [`CONTINUATION_MARKER`].
    pub fn new(
        command: CommandKind,
        file_path: impl Into<String>,
        selection: &str,
        document: &str,
        context: impl Into<String>,
    ) -> Self {
        let code = if selection.trim().is_empty() {
            format!("{CONTINUATION_MARKER}{document}")
        } else {
            selection.to_string()
        };

        Self {
            command,
            file_path: file_path.into(),
            code,
            context: context.into(),
        }
    }
}

/// Produce the exact prompt string sent to the model.
///
/// Fixed order: preamble, project context, file path, then the command's
/// instruction and the code. A non-empty `prompt_template` replaces the
/// instruction-and-code tail, with `{instruction}` and `{code}` interpolated,
/// so differently shaped models can be served without changing callers.
pub fn build(request: &PromptRequest, settings: &EffectiveSettings) -> String {
    let task = if settings.prompt_template.is_empty() {
        format!("{}\n{}", request.command.instruction(), request.code)
    } else {
        settings
            .prompt_template
            .replace("{instruction}", request.command.instruction())
            .replace("{code}", &request.code)
    };

    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Project context:\n{}\n\n\
         File: {}\n\n\
         {}",
        request.context, request.file_path, task
    )
}
