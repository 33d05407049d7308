use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use monosv::output::{self, ReportFormat, ReportRow};
use monosv::{discover_projects, CalculatorConfig, Error, GitRepoSource};
use proc_exit::{Code, ExitResult};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(flatten)]
    logging: clap_verbosity_flag::Verbosity,
    /// Prefix string to identify version number tags
    #[arg(short, long, default_value = "v")]
    prefix: String,
    /// Path to the repository root
    #[arg(short, long, default_value = ".")]
    repo: PathBuf,
    /// Calculate versions for test projects instead of skipping them
    #[arg(long)]
    include_tests: bool,
    /// Calculate versions for non-packable projects instead of skipping them
    #[arg(long)]
    include_non_packable: bool,
    /// Use this version for every project instead of calculating
    #[arg(short, long)]
    force: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the calculated version for every project
    Report {
        /// Output format
        #[arg(short = 'F', long, value_enum, default_value = "text")]
        format: ReportFormat,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Calculate and print the version of a single project
    Version {
        /// Project name (case-insensitive)
        project: String,
    },
}

fn main() {
    let result = run();
    proc_exit::exit(result);
}

fn run() -> ExitResult {
    let args = Cli::parse();

    let mut builder = get_logging(args.logging.log_level_filter());
    builder.init();

    let repo = GitRepoSource::open(&args.repo)?;

    let level = args.logging.log_level_filter();
    let mut config = CalculatorConfig::new()
        .set_prefix(&args.prefix)
        .set_skip_tests(!args.include_tests)
        .set_skip_non_packable(!args.include_non_packable)
        .set_debug(level >= log::LevelFilter::Debug)
        .set_extra_debug(level >= log::LevelFilter::Trace);
    if let Some(force) = &args.force {
        config = config.set_force_version(force);
    }

    let projects = discover_projects(&args.repo, &repo)?;
    log::info!("calculating versions for {} projects", projects.len());

    match args.command {
        Commands::Report { format, output } => {
            let mut rows = Vec::with_capacity(projects.len());
            for project in &projects {
                let calculator = config.clone().build_calculator(&repo, project)?;
                let decision = calculator.decision();
                rows.push(ReportRow {
                    project: project.name.clone(),
                    path: project.relative_path.clone(),
                    version: decision.version.clone(),
                    changed: decision.changed,
                    rationale: decision.rationale.clone(),
                });
            }
            let rendered = output::render(&rows, format)?;
            match output {
                Some(path) => fs::write(path, rendered + "\n").map_err(Error::Io)?,
                None => println!("{rendered}"),
            }
        }
        Commands::Version { project } => {
            let wanted = project.to_lowercase();
            let found = projects
                .iter()
                .find(|candidate| candidate.name.to_lowercase() == wanted)
                .ok_or_else(|| Error::UnknownProject(project.clone()))?;
            let calculator = config.build_calculator(&repo, found)?;
            println!("{}", calculator.report());
        }
    }

    Code::SUCCESS.ok()
}

fn get_logging(level: log::LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    builder.filter(None, level);

    builder.format_timestamp_secs().format_module_path(false);

    builder
}
