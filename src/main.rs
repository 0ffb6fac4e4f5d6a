use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use ac_export::config::{ORGANIZATION_VAR, PAT_VAR, PROJECT_VAR};
use ac_export::export::DEFAULT_OUTPUT_DIR;
use ac_export::{
    AzureDevOpsClient, Config, ExportError, ExportOptions, WorkItemId, WorkItemSource,
    generate_filename, write_work_item,
};

/// Export a work item's acceptance criteria from Azure DevOps to a text file.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Work item ID. Prompted for when omitted.
    #[arg(value_name = "ID")]
    id: Option<String>,

    /// Directory the export is written to.
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Custom filename instead of the generated one. Skips the filename prompt.
    #[arg(short, long, value_name = "NAME")]
    filename: Option<String>,

    /// Product prefix for generated filenames (overrides PRODUCT_PREFIX).
    #[arg(short, long, value_name = "PREFIX")]
    prefix: Option<String>,

    /// Write a file even when the work item has no acceptance criteria.
    #[arg(short, long)]
    yes: bool,

    /// Load environment variables from this file instead of `.env`.
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

/// Line-oriented prompts over any buffered reader.
struct Prompter<R> {
    input: R,
}

impl<R: BufRead> Prompter<R> {
    /// Print `prompt` and read one trimmed line. End of input yields "".
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, falling
/// back to warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::builder()
            .with_default_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
            .from_env_lossy()
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Load `--env-file` or `.env` into the process environment.
///
/// Runs before logging is set up so `RUST_LOG` from the file is honoured.
fn load_env(env_file: Option<&Path>) -> Result<(), ExitCode> {
    match env_file {
        Some(path) => {
            if let Err(e) = dotenvy::from_path(path) {
                eprintln!("error: {}: {e}", path.display());
                return Err(ExitCode::from(2));
            }
        }
        None => {
            if let Err(e) = dotenvy::dotenv()
                && !e.not_found()
            {
                eprintln!("warning: failed to load .env: {e}");
            }
        }
    }
    Ok(())
}

fn report_error(err: &ExportError) {
    eprintln!("error: {err}");
    if let ExportError::MissingConfig { .. } = err {
        eprintln!("Please ensure your environment or .env file contains:");
        for name in [ORGANIZATION_VAR, PROJECT_VAR, PAT_VAR] {
            eprintln!("  - {name}");
        }
    }
}

fn run<R: BufRead>(cli: &Cli, prompter: &mut Prompter<R>) -> Result<ExitCode, ExportError> {
    println!("Azure DevOps Acceptance Criteria Exporter");
    println!("{}", "=".repeat(50));

    let mut config = Config::from_env()?;
    if let Some(prefix) = &cli.prefix {
        config = config.with_product_prefix(prefix.clone());
    }
    tracing::debug!(?config, "loaded configuration");

    let raw_id = match &cli.id {
        Some(id) => id.clone(),
        None => prompter.ask("\nEnter User Story ID: ")?,
    };
    let id = WorkItemId::parse(&raw_id)?;

    println!("\nFetching work item {id}...");
    let client = AzureDevOpsClient::new(&config);
    let item = client.fetch(&id)?;

    println!("Work Item Type: {}", item.work_item_type);
    println!("Title: {}", item.title);

    if item.criteria().is_empty() {
        println!("\nWarning: No acceptance criteria found for this work item.");
        if !cli.yes {
            let answer = prompter.ask("Do you want to create an empty file? (y/n): ")?;
            if !answer.eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(ExitCode::SUCCESS);
            }
        }
    }

    let default_filename = generate_filename(&id, &item.title, &config.product_prefix);
    println!("\nDefault filename: {default_filename}");
    let filename = match &cli.filename {
        Some(name) => name.clone(),
        None => prompter.ask("Press Enter to use default, or type a custom filename: ")?,
    };

    let options = ExportOptions {
        output_dir: cli.output_dir.clone(),
        product_prefix: config.product_prefix.clone(),
        filename: Some(filename),
    };
    let result = write_work_item(&item, &options)?;

    println!("\n✓ Successfully exported to: {}", result.path.display());
    println!("  File size: {} bytes", result.bytes_written);

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(code) = load_env(cli.env_file.as_deref()) {
        return code;
    }
    init_logging(cli.verbose);

    let mut prompter = Prompter {
        input: io::stdin().lock(),
    };
    match run(&cli, &mut prompter) {
        Ok(code) => code,
        Err(e) => {
            report_error(&e);
            if e.is_usage() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}
