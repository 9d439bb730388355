mod astro;
mod catalog;
mod input;
mod output;
mod predict;
mod site;
mod web;

use clap::{Args, Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::astro::AstroObject;
use crate::catalog::CatalogFilter;
use crate::input::InputError;
use crate::output::OutputFormat;
use crate::predict::{compute_visibility, quick_check, TimeRange};

#[derive(Parser)]
#[command(name = "stargazer")]
#[command(about = "When can I see this tonight, through the gap above the fence")]
struct Cli {
    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute visibility windows over a time range
    Visibility {
        #[command(flatten)]
        objects: ObjectArgs,
        #[command(flatten)]
        configs: ConfigArgs,
        /// Start time, RFC 3339 with offset
        #[arg(long)]
        start: String,
        /// End time, RFC 3339 with offset
        #[arg(long)]
        end: String,
        /// Sampling step, e.g. 5m
        #[arg(long, default_value = "5m")]
        step: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Check whether objects can ever be seen, without a time range
    Check {
        #[command(flatten)]
        objects: ObjectArgs,
        #[command(flatten)]
        configs: ConfigArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List catalog entries matching a filter
    Catalog {
        path: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Serve the visibility API over HTTP
    Serve {
        /// Server configuration (YAML)
        #[arg(long)]
        config: PathBuf,
    },
}

#[derive(Args)]
struct ObjectArgs {
    /// JSON file with one object or a list of objects
    #[arg(long)]
    objects: Option<PathBuf>,
    /// Objects as a literal JSON string
    #[arg(long)]
    objects_json: Option<String>,
    /// Semicolon-delimited catalog to take objects from
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[command(flatten)]
    filter: FilterArgs,
}

#[derive(Args)]
struct ConfigArgs {
    /// JSON file with one site config or a list of them
    #[arg(long)]
    configs: Option<PathBuf>,
    /// Site configs as a literal JSON string
    #[arg(long)]
    configs_json: Option<String>,
}

#[derive(Args)]
struct FilterArgs {
    /// Catalog object type, e.g. G, PN, OCl
    #[arg(long = "type")]
    kind: Option<String>,
    /// Minimum size in arcminutes
    #[arg(long)]
    min_size: Option<f64>,
    /// Maximum size in arcminutes
    #[arg(long)]
    max_size: Option<f64>,
    /// Faintest V magnitude to keep
    #[arg(long)]
    faintest: Option<f64>,
    /// Brightest V magnitude to keep
    #[arg(long)]
    brightest: Option<f64>,
}

impl FilterArgs {
    fn to_filter(&self) -> CatalogFilter {
        CatalogFilter {
            kind: self.kind.clone(),
            min_size_arcmin: self.min_size,
            max_size_arcmin: self.max_size,
            faintest_magnitude: self.faintest,
            brightest_magnitude: self.brightest,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref());

    let result = match cli.command {
        Commands::Visibility {
            objects,
            configs,
            start,
            end,
            step,
            format,
        } => visibility(&objects, &configs, &start, &end, &step, format),
        Commands::Check {
            objects,
            configs,
            format,
        } => check(&objects, &configs, format),
        Commands::Catalog {
            path,
            filter,
            format,
        } => list_catalog(&path, &filter, format),
        Commands::Serve { config } => return serve(&config),
    };

    match result {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(log_file: Option<&Path>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if let Some(path) = log_file {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Error opening log file {}: {}", path.display(), e),
        }
    }

    builder.init();
}

fn visibility(
    objects: &ObjectArgs,
    configs: &ConfigArgs,
    start: &str,
    end: &str,
    step: &str,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let objects = load_objects(objects)?;
    let configs = load_configs(configs)?;
    let start = input::parse_instant(start)?;
    let end = input::parse_instant(end)?;
    let range = TimeRange::new(start, end, input::parse_step_minutes(step)?)?;

    let infos = compute_visibility(&objects, &configs, &range);
    Ok(output::render_visibility(&infos, format)?)
}

fn check(
    objects: &ObjectArgs,
    configs: &ConfigArgs,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let objects = load_objects(objects)?;
    let configs = load_configs(configs)?;

    let checks: Vec<_> = configs
        .iter()
        .flat_map(|config| objects.iter().map(move |object| quick_check(object, config)))
        .collect();
    Ok(output::render_quick_checks(&checks, format)?)
}

fn list_catalog(
    path: &Path,
    filter: &FilterArgs,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let rows = catalog::read_catalog(path, &filter.to_filter())?;
    let objects = catalog::to_astro_objects(&rows)?;
    Ok(output::render_objects(&objects, format)?)
}

fn serve(path: &Path) -> ExitCode {
    let config = match web::Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading server config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_objects(args: &ObjectArgs) -> Result<Vec<AstroObject>, InputError> {
    match &args.catalog {
        Some(_) if args.objects.is_some() || args.objects_json.is_some() => {
            Err(InputError::Conflicting("objects"))
        }
        Some(path) => {
            let rows = catalog::read_catalog(path, &args.filter.to_filter())?;
            Ok(catalog::to_astro_objects(&rows)?)
        }
        None => {
            let json = input::read_input(
                args.objects.as_deref(),
                args.objects_json.as_deref(),
                "objects",
            )?;
            input::parse_objects(&json)
        }
    }
}

fn load_configs(args: &ConfigArgs) -> Result<Vec<site::SiteConfig>, InputError> {
    let json = input::read_input(
        args.configs.as_deref(),
        args.configs_json.as_deref(),
        "site config",
    )?;
    input::parse_site_configs(&json)
}
