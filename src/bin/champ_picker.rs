use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use champ_picker::app::App;
use champ_picker::config::{ConfigLoader, ResolvedConfig};
use champ_picker::ddragon::DataDragonHttpClient;
use champ_picker::domain::ChampionId;
use champ_picker::error::PickerError;
use champ_picker::output::JsonOutput;
use champ_picker::store::Store;
use champ_picker::tui::Tui;

#[derive(Parser)]
#[command(name = "champ-picker")]
#[command(about = "Random champion picker backed by a local Data Dragon icon cache")]
#[command(version, author)]
struct Cli {
    /// Path to a champ-picker.json config file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Fetch the latest roster and cache every icon")]
    Sync,
    #[command(about = "Cache icons, then draw a random selection")]
    Pick(PickArgs),
    #[command(about = "Cache icons, then lay out the full roster")]
    List,
    #[command(about = "Show details for one champion")]
    Info(InfoArgs),
    #[command(about = "Remove every cached icon")]
    Clear,
}

#[derive(Args)]
struct PickArgs {
    count: usize,
}

#[derive(Args)]
struct InfoArgs {
    id: String,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<PickerError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &PickerError) -> u8 {
    match error {
        PickerError::InvalidArgument(_)
        | PickerError::InvalidChampionId(_)
        | PickerError::ChampionNotFound(_) => 2,
        err if err.is_network() => 3,
        PickerError::DataFormat(_) => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConfigLoader::resolve(cli.config.as_deref())?;
    let store = match &config.cache_dir {
        Some(dir) => Store::new_with_root(dir.clone()),
        None => Store::new()?,
    };

    match cli.command {
        None => run_interactive(store, &config),
        Some(Commands::Clear) => {
            let app = build_app(store, &config)?;
            let result = app.clear()?;
            JsonOutput::print_clear(&result).into_diagnostic()
        }
        Some(Commands::Sync) => {
            let mut app = build_app(store, &config)?;
            let result = app.sync(&JsonOutput)?;
            JsonOutput::print_sync(&result).into_diagnostic()
        }
        Some(Commands::Pick(args)) => {
            let mut app = build_app(store, &config)?;
            app.startup(&JsonOutput)?;
            let result = app.pick(args.count)?;
            JsonOutput::print_grid(&result).into_diagnostic()
        }
        Some(Commands::List) => {
            let mut app = build_app(store, &config)?;
            app.startup(&JsonOutput)?;
            let result = app.list()?;
            JsonOutput::print_grid(&result).into_diagnostic()
        }
        Some(Commands::Info(args)) => {
            let id = args.id.parse::<ChampionId>()?;
            let mut app = build_app(store, &config)?;
            app.initialize(&JsonOutput)?;
            let result = app.info(id)?;
            JsonOutput::print_info(&result).into_diagnostic()
        }
    }
}

fn build_app(store: Store, config: &ResolvedConfig) -> miette::Result<App<DataDragonHttpClient>> {
    let client = DataDragonHttpClient::new(config)?;
    Ok(App::new(store, client, config))
}

fn run_interactive(store: Store, config: &ResolvedConfig) -> miette::Result<()> {
    let app = build_app(store, config)?;
    let mut tui = Tui::new(config.locale.to_string());
    tui.run(app)
}
