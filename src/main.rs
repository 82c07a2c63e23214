use anyhow::Context;
use car_editor::utils::{logger, validation::Validate};
use car_editor::{
    CliConfig, CodecRegistry, ConsoleInput, ConsoleOutput, EditorConfig, InteractiveEditor,
    LocalStorage, PersistenceManager,
};
use clap::Parser;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => EditorConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path))?,
        None => EditorConfig::default(),
    };
    config.validate().context("invalid configuration")?;

    logger::init_cli_logger(
        cli.verbose,
        &config.logging.level,
        cli.json_logs || config.logging.json,
    );

    tracing::info!("Starting car-editor");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let registry = CodecRegistry::from_settings(&config.formats);
    let persistence = PersistenceManager::with_registry(LocalStorage::new(), registry);
    tracing::debug!(
        "Supported formats: {}",
        persistence.registry().extensions().join(", ")
    );

    let stdin = std::io::stdin();
    let mut editor = InteractiveEditor::new(
        &persistence,
        ConsoleInput::new(stdin.lock()),
        ConsoleOutput::new(std::io::stdout()),
    );

    let input_path = cli
        .input
        .clone()
        .or_else(|| config.storage.default_input.clone())
        .or_else(|| editor.prompt("Enter the path to the file:"));

    let mut records = match input_path.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => editor.open(Path::new(path)),
        _ => {
            tracing::info!("No input file given, starting with an empty list");
            Vec::new()
        }
    };

    editor.run(&mut records);

    // Unsaved edits are discarded on exit.
    tracing::info!("Exiting with {} records in memory", records.len());
    Ok(())
}
