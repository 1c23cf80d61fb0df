use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use companion_core::export::ExportFormat;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock, CompanionController, ExportService};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://companion.sqlite3";
const DEFAULT_EXPORT_DIR: &str = "exports";
const DEFAULT_LOG_FILTER: &str = "warn,app=info,services=info,storage=info";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { name: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidFormat { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { name } => write!(f, "missing argument: {name}"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidFormat { raw } => {
                write!(f, "invalid --format value: {raw} (expected txt or json)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn companion(&self) -> CompanionController {
        self.services.controller()
    }

    fn exports(&self) -> Arc<ExportService> {
        self.services.exports()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [ui] [--db <sqlite_url>] [--export-dir <dir>]");
    eprintln!("  app export --format txt|json [--db <sqlite_url>] [--export-dir <dir>]");
    eprintln!("  app import <file.json> [--db <sqlite_url>]");
    eprintln!("  app reset [--db <sqlite_url>]");
    eprintln!("  app progress [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --export-dir {DEFAULT_EXPORT_DIR}");
    eprintln!("  --format txt");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  COMPANION_DB_URL, COMPANION_EXPORT_DIR, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Export,
    Import,
    Reset,
    Progress,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "export" => Some(Self::Export),
            "import" => Some(Self::Import),
            "reset" => Some(Self::Reset),
            "progress" => Some(Self::Progress),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    export_dir: PathBuf,
    format: ExportFormat,
    import_path: Option<PathBuf>,
}

impl Args {
    fn from_env() -> Self {
        Self {
            db_url: std::env::var("COMPANION_DB_URL")
                .ok()
                .map_or_else(|| normalize_sqlite_url(DEFAULT_DB_URL.into()), normalize_sqlite_url),
            export_dir: std::env::var_os("COMPANION_EXPORT_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR), PathBuf::from),
            format: ExportFormat::Text,
            import_path: None,
        }
    }

    fn parse(
        mut self,
        cmd: Command,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    self.db_url = normalize_sqlite_url(value);
                }
                "--export-dir" if matches!(cmd, Command::Ui | Command::Export) => {
                    self.export_dir = PathBuf::from(require_value(args, "--export-dir")?);
                }
                "--format" if cmd == Command::Export => {
                    let value = require_value(args, "--format")?;
                    self.format = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidFormat { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if cmd == Command::Import
                    && self.import_path.is_none()
                    && !arg.starts_with("--") =>
                {
                    self.import_path = Some(PathBuf::from(arg));
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if cmd == Command::Import && self.import_path.is_none() {
            return Err(ArgsError::MissingArgument { name: "<file.json>" });
        }
        Ok(self)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::from_env().parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    tracing::info!(db = %parsed.db_url, command = ?cmd, "starting");
    let services =
        AppServices::new_sqlite(&parsed.db_url, Clock::default_clock(), &parsed.export_dir).await?;

    match cmd {
        Command::Ui => {
            let context = build_app_context(&(Arc::new(DesktopApp { services }) as Arc<dyn UiApp>));

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            // Explicitly disable it so the app doesn't behave like a modal window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Was ist ein Mensch?")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Export => {
            let companion = services.controller();
            let file = match parsed.format {
                ExportFormat::Text => companion.export_text(),
                ExportFormat::Json => companion.export_json()?,
            };
            let path = services.exports().write(&file).await?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Import => {
            let path = parsed
                .import_path
                .ok_or(ArgsError::MissingArgument { name: "<file.json>" })?;
            services.controller().import_file(&path).await?;
            println!("Import erfolgreich. Der Stand wurde übernommen.");
            Ok(())
        }
        Command::Reset => {
            services.controller().reset().await?;
            println!("Alle Daten wurden zurückgesetzt.");
            Ok(())
        }
        Command::Progress => {
            let progress = services.controller().progress();
            println!(
                "{}/{} ({}%)",
                progress.done_count, progress.total, progress.pct
            );
            Ok(())
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
