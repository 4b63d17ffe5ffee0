//! Settings commands - show, save and reset the persisted record.

use wingman_core::{models, resolve_settings, SettingsStore};

use crate::{SaveArgs, SettingsAction};

pub(crate) fn run(action: SettingsAction) -> miette::Result<()> {
    let store = SettingsStore::new(SettingsStore::default_path());

    match action {
        SettingsAction::Show => show(&store),
        SettingsAction::Save(args) => save(&store, args),
        SettingsAction::Reset { model } => reset(&store, &model),
    }
}

fn show(store: &SettingsStore) -> miette::Result<()> {
    let persisted = store.load();
    let effective = resolve_settings(persisted.as_ref());

    if persisted.is_none() {
        println!("No saved settings; showing defaults for {}.\n", effective.model_id);
    }
    println!("{}", serde_json::to_string_pretty(&effective).unwrap());
    Ok(())
}

fn save(store: &SettingsStore, args: SaveArgs) -> miette::Result<()> {
    // Saving is verbatim: the record stores exactly what the user gave and
    // the resolver deals with unknown models at invocation time.
    if let Some(model) = &args.model {
        if models::profile(model).is_none() {
            eprintln!(
                "Warning: '{model}' has no defaults entry; generation will fall back to {}.",
                wingman_core::DEFAULT_MODEL
            );
        }
    }

    let mut settings = store.load().unwrap_or_default();
    if args.model.is_some() {
        settings.model_id = args.model;
    }
    if args.context.is_some() {
        settings.context = args.context;
    }
    if args.temperature.is_some() {
        settings.temperature = args.temperature;
    }
    if args.top_k.is_some() {
        settings.top_k = args.top_k;
    }
    if args.top_p.is_some() {
        settings.top_p = args.top_p;
    }
    if args.min_p.is_some() {
        settings.min_p = args.min_p;
    }
    if args.repeat_penalty.is_some() {
        settings.repeat_penalty = args.repeat_penalty;
    }
    if args.num_predict.is_some() {
        settings.num_predict = args.num_predict;
    }
    if args.num_gpu.is_some() {
        settings.num_gpu = args.num_gpu;
    }
    if args.thinking.is_some() {
        settings.thinking_enabled = args.thinking;
    }
    if args.history.is_some() {
        settings.history_enabled = args.history;
    }

    store
        .save(&settings)
        .map_err(|e| miette::miette!("Failed to save settings: {}", e))?;

    println!("Settings saved to {}.", store.path().display());
    Ok(())
}

fn reset(store: &SettingsStore, model: &str) -> miette::Result<()> {
    let settings = store
        .reset(model)
        .map_err(|e| miette::miette!("Failed to reset settings: {}", e))?;

    println!("Settings reset to the defaults for {}:\n", settings.model_id);
    println!("{}", serde_json::to_string_pretty(&settings).unwrap());
    Ok(())
}
