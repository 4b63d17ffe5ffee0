//! Static per-model inference defaults.
//!
//! One entry per known model, read-only for the life of the process. Adding
//! support for a new model means adding an entry here; nothing is learned at
//! runtime. The first entry is the designated fallback profile.

/// Model used when no settings were ever saved or the saved model is unknown.
pub const DEFAULT_MODEL: &str = "qwen2.5-coder:1.5b";

/// Default inference parameters and prompt template for one model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelProfile {
    /// Ollama model identifier, including the tag.
    pub model_id: &'static str,
    /// Context window in tokens (`num_ctx`).
    pub context: u32,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub min_p: f32,
    pub repeat_penalty: f32,
    /// Maximum tokens to generate (`num_predict`).
    pub num_predict: i32,
    /// Layers offloaded to the GPU (`num_gpu`).
    pub num_gpu: i32,
    pub history_enabled: bool,
    pub thinking_enabled: bool,
    /// Prompt template with `{instruction}` / `{code}` placeholders.
    /// Empty means the default instruction-then-code shape.
    pub prompt_template: &'static str,
}

/// The model defaults table. The entry for [`DEFAULT_MODEL`] comes first.
pub const MODEL_DEFAULTS: &[ModelProfile] = &[
    ModelProfile {
        model_id: "qwen2.5-coder:1.5b",
        context: 32768,
        temperature: 0.2,
        top_k: 40,
        top_p: 0.9,
        min_p: 0.05,
        repeat_penalty: 1.1,
        num_predict: 2048,
        num_gpu: 0,
        history_enabled: false,
        thinking_enabled: false,
        prompt_template: "",
    },
    ModelProfile {
        model_id: "qwen2.5-coder:0.5b",
        context: 32768,
        temperature: 0.2,
        top_k: 40,
        top_p: 0.9,
        min_p: 0.05,
        repeat_penalty: 1.1,
        num_predict: 1024,
        num_gpu: 0,
        history_enabled: false,
        thinking_enabled: false,
        prompt_template: "",
    },
    ModelProfile {
        model_id: "qwen2.5-coder:3b",
        context: 32768,
        temperature: 0.2,
        top_k: 40,
        top_p: 0.9,
        min_p: 0.05,
        repeat_penalty: 1.1,
        num_predict: 2048,
        num_gpu: 0,
        history_enabled: false,
        thinking_enabled: false,
        prompt_template: "",
    },
    ModelProfile {
        model_id: "qwen2.5-coder:7b",
        context: 32768,
        temperature: 0.2,
        top_k: 40,
        top_p: 0.8,
        min_p: 0.05,
        repeat_penalty: 1.05,
        num_predict: 4096,
        num_gpu: 1,
        history_enabled: false,
        thinking_enabled: false,
        prompt_template: "",
    },
    ModelProfile {
        model_id: "deepseek-coder:6.7b",
        context: 16384,
        temperature: 0.3,
        top_k: 40,
        top_p: 0.95,
        min_p: 0.05,
        repeat_penalty: 1.1,
        num_predict: 4096,
        num_gpu: 1,
        history_enabled: false,
        thinking_enabled: false,
        // DeepSeek-Coder follows Alpaca-style instructions better than the
        // bare instruction-then-code shape.
        prompt_template: "### Instruction:\n{instruction}\n\n{code}\n\n### Response:\n",
    },
    ModelProfile {
        model_id: "codellama:7b",
        context: 16384,
        temperature: 0.2,
        top_k: 40,
        top_p: 0.9,
        min_p: 0.05,
        repeat_penalty: 1.1,
        num_predict: 2048,
        num_gpu: 1,
        history_enabled: false,
        thinking_enabled: false,
        prompt_template: "",
    },
];

/// Look a profile up by model identifier.
pub fn profile(model_id: &str) -> Option<&'static ModelProfile> {
    MODEL_DEFAULTS.iter().find(|p| p.model_id == model_id)
}

/// The fallback profile, used when nothing is persisted or the persisted
/// model is unknown.
pub fn default_profile() -> &'static ModelProfile {
    &MODEL_DEFAULTS[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_is_first_entry() {
        assert_eq!(default_profile().model_id, DEFAULT_MODEL);
        assert!(profile(DEFAULT_MODEL).is_some());
    }

    #[test]
    fn test_model_ids_unique() {
        for (i, a) in MODEL_DEFAULTS.iter().enumerate() {
            for b in &MODEL_DEFAULTS[i + 1..] {
                assert_ne!(a.model_id, b.model_id);
            }
        }
    }

    #[test]
    fn test_unknown_model_not_found() {
        assert!(profile("gpt-4").is_none());
    }

    #[test]
    fn test_templates_interpolate_both_placeholders() {
        for p in MODEL_DEFAULTS {
            if !p.prompt_template.is_empty() {
                assert!(p.prompt_template.contains("{instruction}"));
                assert!(p.prompt_template.contains("{code}"));
            }
        }
    }
}
