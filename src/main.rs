mod cli;
mod config;

use anyhow::bail;
use chrono::{NaiveDate, NaiveTime};
use cli::{Args, Command};
use config::{discover_config, load_config_from_path, ConfigFile, CONFIG_FILENAME};
use fleet_inventory::adapters::outbound::clock::{FixedClock, SystemClock};
use fleet_inventory::adapters::outbound::console::StderrProgressReporter;
use fleet_inventory::adapters::outbound::filesystem::{
    FileSystemWriter, FileTokenStore, SeedFileReader,
};
use fleet_inventory::adapters::outbound::memory::{IdStrategy, InMemoryInventory};
use fleet_inventory::adapters::outbound::network::{
    ApiClient, HttpInventory, DEFAULT_API_BASE_URL, DEFAULT_LOGIN_ROUTE,
};
use fleet_inventory::application::dto::{OutputFormat, ReportRequest, ReportView};
use fleet_inventory::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use fleet_inventory::application::use_cases::{DashboardUseCase, PlatformRegistryUseCase};
use fleet_inventory::inventory::domain::{InventorySnapshot, PlatformDraft};
use fleet_inventory::inventory::services::{
    ComponentFilter, PlatformFilter, VersionFilter, DEFAULT_RECENT_DAYS,
};
use fleet_inventory::ports::inbound::DashboardPort;
use fleet_inventory::ports::outbound::{
    ChangeEvent, ChangeNotifier, Clock, InventoryStore, OutputPresenter, ProgressReporter,
    SeedReader,
};
use fleet_inventory::shared::{ExitCode, Result};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "FLEET_INVENTORY_LOG";

fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Logs go to stderr. `--verbose` wins over the environment filter.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(format!("{}=debug,warn", env!("CARGO_CRATE_NAME")))
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Effective options after merging CLI flags, the config file and defaults
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    format: OutputFormat,
    data: Option<PathBuf>,
    output: Option<PathBuf>,
    recent_days: u32,
    as_of: Option<NaiveDate>,
    id_strategy: IdStrategy,
    api_base_url: String,
    token_path: PathBuf,
    login_route: String,
    fail_on_critical: bool,
    quiet: bool,
}

/// CLI flag > config file > built-in default
fn resolve_settings(args: &Args, config: ConfigFile) -> Settings {
    let fail_on_critical_flag = matches!(
        args.command,
        Command::Summary {
            fail_on_critical: true
        }
    );

    Settings {
        format: args.format.or(config.format).unwrap_or_default(),
        data: args.data.clone().or(config.data),
        output: args.output.clone(),
        recent_days: args
            .recent_days
            .or(config.recent_days)
            .unwrap_or(DEFAULT_RECENT_DAYS),
        as_of: args.as_of,
        id_strategy: args.id_strategy.or(config.id_strategy).unwrap_or_default(),
        api_base_url: args
            .api_url
            .clone()
            .or(config.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        token_path: config
            .token_path
            .unwrap_or_else(FileTokenStore::default_path),
        login_route: config
            .login_route
            .unwrap_or_else(|| DEFAULT_LOGIN_ROUTE.to_string()),
        fail_on_critical: fail_on_critical_flag || config.fail_on_critical.unwrap_or(false),
        quiet: args.quiet,
    }
}

fn load_config(args: &Args) -> Result<ConfigFile> {
    match &args.config {
        Some(path) => load_config_from_path(path),
        None => {
            let cwd = std::env::current_dir()?;
            let discovered = discover_config(&cwd)?;
            if discovered.is_some() {
                progress_reporter(args.quiet).report(&format!(
                    "📋 Auto-discovered config file: {}",
                    cwd.join(CONFIG_FILENAME).display()
                ));
            }
            Ok(discovered.unwrap_or_default())
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(&args)?;
    let settings = resolve_settings(&args, config);

    if let Command::RegisterPlatform { save: true, .. } = args.command {
        if args.remote || settings.data.is_none() {
            bail!(
                "--save rewrites a local seed file and needs --data (or `data` in the config file).\n\n\
                 💡 Hint: Remote registrations are stored by the backend and need no --save."
            );
        }
    }

    if args.remote {
        let tokens = FileTokenStore::new(settings.token_path.clone());
        let client = ApiClient::new(&settings.api_base_url, &settings.login_route, tokens)?;
        progress_reporter(settings.quiet).report(&format!(
            "🌐 Using inventory backend at {}",
            client.base_url()
        ));
        return execute(args.command, HttpInventory::new(client), &settings);
    }

    let snapshot = match &settings.data {
        Some(path) => {
            progress_reporter(settings.quiet)
                .report(&format!("📂 Loading seed file: {}", path.display()));
            SeedFileReader::new().read_snapshot(path)?
        }
        None => {
            progress_reporter(settings.quiet).report("📂 Loading built-in demo fleet");
            InventorySnapshot::demo()?
        }
    };
    let store =
        InMemoryInventory::from_snapshot(snapshot, settings.id_strategy, clock(settings.as_of))?;
    execute(args.command, store, &settings)
}

fn execute<S>(command: Command, store: S, settings: &Settings) -> Result<ExitCode>
where
    S: InventoryStore + ChangeNotifier,
{
    let view = match command {
        Command::RegisterPlatform {
            name,
            urn,
            platform_type,
            project,
            release,
            component,
            save,
        } => {
            let mut draft = PlatformDraft::new(name, urn, platform_type, project);
            if let Some(release) = release {
                draft = draft.with_application_version(release);
            }
            if let Some(component) = component {
                draft = draft.with_component(component);
            }
            return register_platform(store, draft, save, settings);
        }
        Command::Summary { .. } => ReportView::Summary,
        Command::Platforms {
            query,
            project,
            platform_type,
            group_by,
        } => ReportView::Platforms {
            filter: PlatformFilter::new()
                .with_text(&query)
                .with_project(project)
                .with_type(platform_type),
            grouping: group_by,
        },
        Command::Components {
            query,
            component_type,
        } => ReportView::Components {
            filter: ComponentFilter::new()
                .with_text(&query)
                .with_type(component_type),
        },
        Command::Versions {
            query,
            platform,
            status,
        } => ReportView::Versions {
            filter: VersionFilter::new()
                .with_text(&query)
                .with_platform(platform)
                .with_status(status),
        },
        Command::Duplicates => ReportView::Duplicates,
        Command::Releases { family } => ReportView::Releases { family },
    };

    let use_case = DashboardUseCase::new(
        store,
        clock(settings.as_of),
        progress_reporter(settings.quiet),
    );
    let request = ReportRequest::new(view).with_recent_days(settings.recent_days);
    let response = use_case.build_report(request)?;

    progress_reporter(settings.quiet).report(FormatterFactory::progress_message(settings.format));
    let formatter = FormatterFactory::create(settings.format);
    let formatted_output = formatter.format(&response.report)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(settings.output.clone()));
    presenter.present(&formatted_output)?;

    if settings.fail_on_critical && response.has_critical_issues() {
        return Ok(ExitCode::CriticalIssuesDetected);
    }
    Ok(ExitCode::Success)
}

fn register_platform<S>(
    mut store: S,
    draft: PlatformDraft,
    save: bool,
    settings: &Settings,
) -> Result<ExitCode>
where
    S: InventoryStore + ChangeNotifier,
{
    let quiet = settings.quiet;
    store.subscribe(Box::new(move |event: &ChangeEvent| {
        progress_reporter(quiet).report_completion(&format!(
            "✅ {} {} {}",
            event.kind, event.id, event.op
        ));
    }));

    let mut registry = PlatformRegistryUseCase::new(store);
    let registration = registry.register_platform(draft)?;
    if let Some(warning) = &registration.warning {
        progress_reporter(quiet).report_error(&format!("⚠️  Warning: {}", warning));
    }

    let presenter = PresenterFactory::create(PresenterType::from_output(settings.output.clone()));
    presenter.present(&serde_json::to_string_pretty(&registration.platform)?)?;

    if save {
        if let Some(path) = &settings.data {
            let snapshot = registry.store().snapshot()?;
            FileSystemWriter::new(path.clone()).present(&serde_json::to_string_pretty(&snapshot)?)?;
        }
    }

    Ok(ExitCode::Success)
}

fn progress_reporter(quiet: bool) -> StderrProgressReporter {
    if quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    }
}

/// Pinned to midnight UTC of `--as-of` when given
fn clock(as_of: Option<NaiveDate>) -> Box<dyn Clock> {
    match as_of {
        Some(date) => Box::new(FixedClock::new(date.and_time(NaiveTime::MIN).and_utc())),
        None => Box::new(SystemClock),
    }
}
