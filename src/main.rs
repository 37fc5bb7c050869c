use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};

use pinnotes::{
    App, BackendNoteRepository, Cli, ColorfgbgScheme, Config, FileStore, NoteStore, Result,
    StorageBackend, TerminalDialog, ThemeState,
};

fn initialize_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.data_dir)?;
    info!("Using data directory: {}", config.data_dir.display());

    let backend: Arc<dyn StorageBackend> = Arc::new(FileStore::open(&config.data_dir)?);
    let store = NoteStore::open(Box::new(BackendNoteRepository::new(Arc::clone(&backend))))?;
    let theme = ThemeState::load(backend, Arc::new(ColorfgbgScheme))?;

    let mut app = App::new(store, theme, Box::new(TerminalDialog));
    app.run(cli.command)
}

fn main() -> ExitCode {
    initialize_logger();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
