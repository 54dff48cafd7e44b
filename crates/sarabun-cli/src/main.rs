//! Sarabun CLI
//!
//! Command-line interface for:
//! - Extracting structured fields from receipt images (`receipt`)
//! - Extracting project budgets from Thai proposal PDFs (`budget`)
//! - Reviewing and listing saved budget records (`records`)
//!
//! The extraction oracle credential comes from `GROQ_API_KEY`; persistence
//! is gated by `SARABUN_ENABLE_SAVE`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use sarabun_llm::{BudgetReview, GroqClient, OracleConfig, PromptTemplate};
use sarabun_store::{ProjectStore, StoreConfig};
use std::path::PathBuf;

mod pipeline;

#[derive(Parser)]
#[command(name = "sarabun")]
#[command(
    author,
    version,
    about = "Sarabun: receipt and Thai budget-document extraction"
)]
struct Cli {
    /// Verbose (debug-level) logging.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract structured fields from a receipt image (JPEG or PNG).
    Receipt {
        /// Path to the receipt image.
        image: PathBuf,
        /// Write the extracted JSON to a file as well as stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Replace the built-in instruction prompt with this file's content.
        #[arg(long)]
        prompt_file: Option<PathBuf>,
    },
    /// Extract a project budget from a Thai project-proposal PDF.
    Budget {
        /// Path to the proposal PDF.
        pdf: PathBuf,
        /// Persist the reviewed record (requires SARABUN_ENABLE_SAVE=1).
        #[arg(long)]
        save: bool,
        /// Override the extracted project name before review/save.
        #[arg(long)]
        project_name: Option<String>,
        /// Override the extracted responsible person before review/save.
        #[arg(long)]
        responsible: Option<String>,
        /// Database path (defaults to SARABUN_DB or ./sarabun.db).
        #[arg(long)]
        db: Option<PathBuf>,
        /// Replace the built-in instruction prompt with this file's content.
        #[arg(long)]
        prompt_file: Option<PathBuf>,
    },
    /// List saved project records with their budget items.
    Records {
        /// Database path (defaults to SARABUN_DB or ./sarabun.db).
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Commands::Receipt {
            image,
            output,
            prompt_file,
        } => run_receipt(image, output, prompt_file).await,
        Commands::Budget {
            pdf,
            save,
            project_name,
            responsible,
            db,
            prompt_file,
        } => run_budget(pdf, save, project_name, responsible, db, prompt_file).await,
        Commands::Records { db } => run_records(db),
    }
}

fn load_template(default: PromptTemplate, prompt_file: Option<PathBuf>) -> Result<PromptTemplate> {
    match prompt_file {
        Some(path) => {
            let instruction = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read prompt file {}", path.display()))?;
            Ok(PromptTemplate::new(instruction))
        }
        None => Ok(default),
    }
}

fn store_config(db: Option<PathBuf>) -> StoreConfig {
    let mut config = StoreConfig::from_env();
    if let Some(path) = db {
        config.db_path = path;
    }
    config
}

async fn run_receipt(
    image: PathBuf,
    output: Option<PathBuf>,
    prompt_file: Option<PathBuf>,
) -> Result<()> {
    let oracle = GroqClient::new(OracleConfig::from_env()?);
    let template = load_template(PromptTemplate::receipt(), prompt_file)?;

    let extraction = pipeline::extract_receipt(&oracle, &template, &image).await?;
    let json = serde_json::to_string_pretty(&extraction)?;

    println!("{}", "Extracted receipt data".green().bold());
    println!("{json}");

    if let Some(path) = output {
        std::fs::write(&path, &json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("{} {}", "Wrote".green(), path.display());
    }
    Ok(())
}

async fn run_budget(
    pdf: PathBuf,
    save: bool,
    project_name: Option<String>,
    responsible: Option<String>,
    db: Option<PathBuf>,
    prompt_file: Option<PathBuf>,
) -> Result<()> {
    let oracle = GroqClient::new(OracleConfig::from_env()?);
    let template = load_template(PromptTemplate::budget(), prompt_file)?;

    let (extraction, job) = pipeline::extract_budget(&oracle, &template, &pdf).await?;
    println!(
        "{} {}: {} pages, forwarded {:?}",
        "Scanned".green(),
        job.source.display(),
        job.pages.len(),
        job.selected
    );

    let mut review: BudgetReview = extraction.into();
    if let Some(name) = project_name {
        review.project_name = name;
    }
    if let Some(person) = responsible {
        review.responsible_person = person;
    }

    print_review(&review);

    if save {
        let mut store = ProjectStore::open(&store_config(db))?;
        let id = store.save_review(&review)?;
        println!("{} project {}", "Saved".green().bold(), id);
    }
    Ok(())
}

fn run_records(db: Option<PathBuf>) -> Result<()> {
    let store = ProjectStore::open(&store_config(db))?;
    let projects = store.list_projects()?;

    if projects.is_empty() {
        println!("{}", "No saved records".yellow());
        return Ok(());
    }
    for project in projects {
        println!(
            "{} {} — {} ({})",
            project.id.to_string().dimmed(),
            project.project_name.bold(),
            project.responsible_person,
            project.created_at.format("%Y-%m-%d %H:%M")
        );
        for item in &project.items {
            println!(
                "    {} — {}: {:.2}",
                item.activity_name, item.description, item.amount
            );
        }
    }
    Ok(())
}

fn print_review(review: &BudgetReview) {
    println!("{}", "Extracted budget".green().bold());
    println!("  {}: {}", "Project".bold(), review.project_name);
    println!("  {}: {}", "Responsible".bold(), review.responsible_person);
    for item in &review.items {
        println!(
            "    {} — {}: {:.2}",
            item.activity_name, item.description, item.amount
        );
    }
    println!("  {}: {:.2}", "Total".bold(), review.total_amount());
}
