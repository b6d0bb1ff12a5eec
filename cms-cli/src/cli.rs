//! Command definitions and dispatch.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use cms_content::{SchemaSet, SourceConfig, output, validate_content};
use cms_curriculum::{CurriculumClient, CurriculumView, Phase};

#[derive(Parser)]
#[command(
    name = "cms",
    version,
    about = "Content validation and curriculum tools for the course site"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate every content record against its collection schema
    Validate {
        /// Content root directory
        #[arg(default_value = "content")]
        root: PathBuf,

        /// Exclude patterns (glob format), repeatable
        #[arg(long)]
        exclude: Vec<String>,

        /// Report format
        #[arg(long, value_enum, default_value_t = Format::Human)]
        format: Format,
    },

    /// Fetch and print a course curriculum
    Curriculum {
        /// Course slug (path segment of the internal endpoint)
        slug: String,

        /// Base URL of the site serving the internal API
        #[arg(long, default_value = "http://localhost:4321")]
        base_url: String,

        /// Print every section instead of the collapsed preview
        #[arg(long)]
        expanded: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Human,
    Json,
}

/// Parse arguments and run the selected command.
///
/// # Errors
///
/// Returns an error when validation finds issues (publishing must be
/// blocked with a non-zero exit) or when a curriculum fetch fails.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);

    match cli.command {
        Command::Validate {
            root,
            exclude,
            format,
        } => run_validate(root, exclude, format),
        Command::Curriculum {
            slug,
            base_url,
            expanded,
        } => run_curriculum(&slug, &base_url, expanded).await,
    }
}

fn run_validate(root: PathBuf, exclude: Vec<String>, format: Format) -> Result<()> {
    let mut source = SourceConfig::new(root);
    source.exclude = exclude;
    let schemas = SchemaSet::builtin();

    let report = validate_content(&source, &schemas)?;

    let mut stdout = std::io::stdout().lock();
    match format {
        Format::Json => output::write_json(&report, &mut stdout)?,
        Format::Human => {
            output::write_human(&report, &mut stdout)?;
            stdout.flush()?;
            if report.ok {
                println!("{}", "Content is publishable".green().bold());
            } else {
                println!("{}", "Publishing blocked".red().bold());
            }
        }
    }

    if report.ok {
        Ok(())
    } else {
        anyhow::bail!(
            "content validation failed: {} issue(s), {} unloadable file(s)",
            report.issues_count(),
            report.failed_files
        )
    }
}

async fn run_curriculum(slug: &str, base_url: &str, expanded: bool) -> Result<()> {
    let client = CurriculumClient::new(base_url)?;
    let mut view = CurriculumView::new();
    view.refresh(&client, slug).await;

    if let Phase::Failed(message) = view.phase() {
        anyhow::bail!("could not fetch curriculum for '{slug}': {message}");
    }
    if expanded {
        view.expand();
    }

    println!("{}", format!("Curriculum for {slug}").bold());
    for section in view.visible_sections() {
        println!();
        println!("  {}", section.name.cyan().bold());
        for lecture in &section.lectures {
            println!("    - {}", lecture.name);
        }
    }

    let hidden = view.section_count() - view.visible_sections().len();
    if hidden > 0 {
        println!();
        println!(
            "{}",
            format!("... {hidden} more section(s) hidden; pass --expanded to show all").dimmed()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_validate_defaults() {
        let cli = Cli::parse_from(["cms", "validate"]);
        let Command::Validate { root, exclude, .. } = cli.command else {
            panic!("expected validate command");
        };
        assert_eq!(root, PathBuf::from("content"));
        assert!(exclude.is_empty());
    }
}
