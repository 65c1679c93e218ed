//! Command-line interface for the draft parser.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;

use crate::config::{ParseOptions, DEFAULT_MAX_DEPTH};
use crate::draft::{DraftNode, UuidGenerator};
use crate::error::Result;
use crate::pipeline::xml_to_draft_with;

/// Draft Parser - Convert learning-content XML into draft node trees.
#[derive(Parser)]
#[command(name = "xml-to-draft")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Serialization format for the converted tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an XML document and print the draft tree.
    Convert {
        /// XML document to convert
        file: PathBuf,

        /// Assign an identifier to every node
        #[arg(long)]
        ids: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write the tree to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum element nesting depth
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Parse an XML document and report whether it converts.
    Check {
        /// XML document to check
        file: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            file,
            ids,
            format,
            output,
            max_depth,
        } => {
            let options = ParseOptions::new(ids).with_max_depth(max_depth);
            convert_command(&file, &options, format, output.as_deref())
        }
        Commands::Check { file } => check_command(&file),
    }
}

fn load(file: &Path, options: &ParseOptions) -> Result<DraftNode> {
    let xml = std::fs::read_to_string(file)?;
    xml_to_draft_with(&xml, options, &mut UuidGenerator)
}

/// Serialize a draft tree in the requested format.
///
/// # Errors
/// Returns a serialization error from serde_json or serde_yaml_ng.
pub fn render(draft: &DraftNode, format: OutputFormat) -> Result<String> {
    let mut text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(draft)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(draft)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

/// Execute the convert command.
fn convert_command(
    file: &Path,
    options: &ParseOptions,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let draft = load(file, options)?;
    let rendered = render(&draft, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            eprintln!(
                "{} {} ({} nodes)",
                style("Saved to:").green().bold(),
                path.display(),
                draft.count()
            );
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Execute the check command.
fn check_command(file: &Path) -> Result<()> {
    let draft = load(file, &ParseOptions::default())?;

    println!(
        "{} {}",
        style("OK").green().bold(),
        style(file.display()).cyan()
    );
    println!("  Root: {}", draft.node_type);
    println!("  Nodes: {}", draft.count());

    Ok(())
}
