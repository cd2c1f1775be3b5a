use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use log::LevelFilter;
use ratatui::layout::Rect;

mod app;
mod cli;

use app::App;
use cli::Args;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.resolve_config()?;
    log::info!(
        "starting with theme={} fps={} reduced_motion={}",
        config.theme,
        config.fps(),
        config.reduced_motion
    );

    let terminal = ratatui::init();
    let result = run(terminal, &config, args.settings_path());
    if let Err(e) = execute!(stdout(), DisableMouseCapture) {
        log::warn!("failed to disable mouse capture: {e}");
    }
    ratatui::restore();
    result
}

fn run(
    terminal: ratatui::DefaultTerminal,
    config: &galaxy_config::Config,
    settings_path: Option<PathBuf>,
) -> color_eyre::Result<()> {
    execute!(stdout(), EnableMouseCapture)?;
    let size = terminal.size()?;
    let app = App::new(
        config,
        Rect::new(0, 0, size.width, size.height),
        settings_path,
    );
    app.run(terminal)
}

/// Send logs to `--log-file` if one was given. Without it nothing is logged,
/// since stderr belongs to the terminal UI.
fn init_logging(args: &Args) -> color_eyre::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
