use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Read;
use std::path::PathBuf;

mod build;
mod config;
mod index;
mod pages;
mod runner;

#[derive(Parser)]
#[command(name = "empdoc", version, about = "Docs viewer tooling for the EMP language")]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Show debug logging
    #[arg(long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Repository root holding empdoc.json
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum RenderFormat {
    Html,
    Terminal,
    Json,
}

/// Output format for prediction reports.
#[derive(Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Html,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markdown page
    Render {
        /// Path to the .md file
        file: String,

        /// Output format
        #[arg(long, value_enum, default_value = "html")]
        format: RenderFormat,
    },

    /// Explain which syntax features and compiler passes .em files exercise
    Predict {
        /// Path(s) to .em files, or `-` for stdin
        #[arg(required = true)]
        files: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "terminal")]
        format: ReportFormat,
    },

    /// Run the predictor over files from the .em index
    Runner {
        /// Group filter (tests, examples, stdlib, emp_mods, misc, all)
        #[arg(long)]
        group: Option<String>,

        /// Repo-relative path of the file to explain
        #[arg(long, conflicts_with = "all")]
        file: Option<String>,

        /// Explain every file in the group
        #[arg(long)]
        all: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "terminal")]
        format: ReportFormat,
    },

    /// List manifest pages
    Pages {
        /// Case-insensitive title filter
        #[arg(long)]
        search: Option<String>,

        /// Location hash to resolve the current page from
        #[arg(long)]
        hash: Option<String>,
    },

    /// Regenerate the .em file index
    Index {
        /// Output path (default: from empdoc.json)
        #[arg(long)]
        out: Option<String>,
    },

    /// Build the static docs site
    Build {
        /// Output directory (default: from empdoc.json)
        #[arg(long)]
        out: Option<String>,

        /// Page title
        #[arg(long)]
        title: Option<String>,

        /// Watch the docs directory and rebuild on changes
        #[arg(long)]
        watch: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    match cli.command {
        Commands::Render { file, format } => {
            handle_render(&file, format)?;
        }
        Commands::Predict { files, format } => {
            handle_predict(&files, format)?;
        }
        Commands::Runner {
            group,
            file,
            all,
            format,
        } => {
            let config = config::load_config(&cli.root)?;
            let opts = runner::RunnerOpts {
                group,
                file,
                all,
                format,
            };
            runner::run(&cli.root, &config, &opts)?;
        }
        Commands::Pages { search, hash } => {
            let config = config::load_config(&cli.root)?;
            pages::list_pages(&cli.root, &config, search.as_deref(), hash.as_deref())?;
        }
        Commands::Index { out } => {
            let config = config::load_config(&cli.root)?;
            let out_path = match out {
                Some(p) => PathBuf::from(p),
                None => config.index_path(&cli.root),
            };
            index::write_index(&cli.root, &config, &out_path, cli.quiet)?;
        }
        Commands::Build { out, title, watch } => {
            let config = config::load_config(&cli.root)?;
            let out_dir = match out {
                Some(p) => PathBuf::from(p),
                None => config.out_path(&cli.root),
            };
            let opts = build::BuildOpts {
                out_dir,
                title,
                quiet: cli.quiet,
            };
            build::handle_build(&cli.root, &config, &opts)?;
            if watch {
                build::watch_and_rebuild(&cli.root, &config, &opts)?;
            }
        }
    }

    Ok(())
}

fn init_logging(quiet: bool, verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else if quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn handle_render(file: &str, format: RenderFormat) -> Result<()> {
    let content =
        std::fs::read_to_string(file).with_context(|| format!("Failed to read '{file}'"))?;

    let result = empdoc::parse(&content);

    // Print parse diagnostics to stderr
    for diag in &result.diagnostics {
        let line_info = match diag.span {
            Some(span) => format!("{}:{}", file, span.start_line),
            None => file.to_string(),
        };
        eprintln!("{}: {}", line_info, diag.message.yellow());
    }

    let output = match format {
        RenderFormat::Html => result.doc.to_html(),
        RenderFormat::Terminal => result.doc.to_terminal(),
        RenderFormat::Json => serde_json::to_string_pretty(&result)?,
    };

    println!("{output}");
    Ok(())
}

fn handle_predict(files: &[String], format: ReportFormat) -> Result<()> {
    let mut predictions = Vec::with_capacity(files.len());

    for file in files {
        let prediction = if file == "-" {
            let mut src = String::new();
            std::io::stdin()
                .read_to_string(&mut src)
                .context("Failed to read stdin")?;
            empdoc::predict(&src, None)
        } else {
            let src = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read '{file}'"))?;
            empdoc::predict(&src, Some(file.replace('\\', "/").as_str()))
        };
        predictions.push(prediction);
    }

    match format {
        ReportFormat::Json => {
            let json = match predictions.as_slice() {
                [single] => serde_json::to_string_pretty(single)?,
                many => serde_json::to_string_pretty(many)?,
            };
            println!("{json}");
        }
        ReportFormat::Terminal | ReportFormat::Html => {
            for (i, prediction) in predictions.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{}", runner::format_report(prediction, format)?);
            }
        }
    }

    Ok(())
}
