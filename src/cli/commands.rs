//! Command implementations for the autofaq CLI.

use std::time::Instant;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{self, store::default_store};
use crate::skill::{IntentMatchingOptions, IntentMatchingSkill, Lifecycle, build_model_config};

/// Execute a CLI command.
pub fn execute_command(args: AutofaqArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args, &args),
        Command::Ask(ask_args) => ask(ask_args, &args),
        Command::Config(config_args) => show_config(config_args, &args),
    }
}

/// Turn the shared model flags into skill options.
pub fn skill_options(model: &ModelArgs, lifecycle: Lifecycle) -> Result<IntentMatchingOptions> {
    let mut options = IntentMatchingOptions {
        data_path: model.data_path.clone(),
        x_col_name: model.x_col_name.clone(),
        y_col_name: model.y_col_name.clone(),
        edit_dict: None,
        save_load_path: model.save_load_path.clone(),
        lifecycle,
    };

    if let Some(edit) = &model.edit_dict {
        let edit_dict: Value =
            serde_json::from_str(edit).context("--edit is not a valid JSON document")?;
        options = options.edit_dict(edit_dict);
    }

    Ok(options)
}

/// Train a model and report where it was saved.
fn train(args: &TrainArgs, cli_args: &AutofaqArgs) -> Result<()> {
    let options = skill_options(&args.model, Lifecycle::Train)?;
    if cli_args.verbosity() > 1 {
        match &options.data_path {
            Some(path) => println!("Training on: {path}"),
            None => println!("Training on the template's default dataset"),
        }
    }

    let start_time = Instant::now();
    let skill = IntentMatchingSkill::new(options).context("failed to train the model")?;
    let saved_to = skill
        .saved_to()
        .map(|path| path.display().to_string())
        .unwrap_or_default();

    output_result(
        "Model trained successfully",
        &TrainResult {
            saved_to,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )?;

    Ok(())
}

/// Load a saved model and answer the given utterances.
fn ask(args: &AskArgs, cli_args: &AutofaqArgs) -> Result<()> {
    let options = skill_options(&args.model, Lifecycle::Load)?;
    let skill = IntentMatchingSkill::new(options).context("failed to load the model")?;

    let start_time = Instant::now();
    let history = vec![Vec::new(); args.utterances.len()];
    let (answers, confidences) = skill.respond(&args.utterances, &history, None)?;

    output_answers(
        &AskResults::new(
            &args.utterances,
            answers,
            confidences,
            start_time.elapsed().as_millis() as u64,
        ),
        cli_args,
    )?;

    Ok(())
}

/// Print the merged model configuration.
fn show_config(args: &ConfigArgs, cli_args: &AutofaqArgs) -> Result<()> {
    let options = skill_options(&args.model, Lifecycle::default())?;
    let mut document = build_model_config(&default_store(), &options)?;
    if args.resolved {
        document = config::resolve(&document)?;
    }

    output_document(&document, cli_args)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_skill_options_from_flags() {
        let args = AutofaqArgs::try_parse_from([
            "autofaq",
            "train",
            "--data-path",
            "faq.csv",
            "--y-col-name",
            "A",
            "--edit",
            r#"{"dataset_reader": {"delimiter": ";"}}"#,
        ])
        .unwrap();
        let Command::Train(train_args) = args.command else {
            panic!("Expected Train command");
        };

        let options = skill_options(&train_args.model, Lifecycle::Train).unwrap();
        assert_eq!(options.data_path.as_deref(), Some("faq.csv"));
        assert_eq!(options.y_col_name.as_deref(), Some("A"));
        assert_eq!(
            options.edit_dict,
            Some(serde_json::json!({"dataset_reader": {"delimiter": ";"}}))
        );
        assert_eq!(options.lifecycle, Lifecycle::Train);
    }

    #[test]
    fn test_invalid_edit_document() {
        let model = ModelArgs {
            edit_dict: Some("{not json".to_string()),
            ..ModelArgs::default()
        };
        let err = skill_options(&model, Lifecycle::Load).unwrap_err();
        assert!(err.to_string().contains("--edit"));
    }
}
