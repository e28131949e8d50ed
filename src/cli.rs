//! CLI module - Command-line interface definition and handler

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io;
use std::path::PathBuf;

use crate::catalog::AsciidocScanner;
use crate::core::model::{InventoryConfig, RootDocument, DEFAULT_DELIMITER};
use crate::inventory::write_inventory;

/// list-content - list content included in AsciiDoc files.
#[derive(Parser, Debug)]
#[command(name = "list-content")]
#[command(
    author,
    version,
    about,
    disable_version_flag = true,
    long_about = r#"List the files (and optionally images) included in the supplied AsciiDoc
files, following nested includes, one path per line.

Paths are printed relative to the current directory unless --relative-to is
given. Optional fields are printed before the path, separated by the
delimiter, in this order: source file, prefix type, attribute type.

Content types:
- prefix type: derived from the file name (con_, proc_, ref_, assembly_)
- attribute type: the value of the :_content-type: attribute in the file
- NONE when no type could be determined, IMAGE for images

Examples:
    list-content master.adoc
    list-content -f -t master.adoc
    list-content -i -d , -r docs docs/*/master.adoc
"#
)]
pub struct Cli {
    /// List included images in addition to included files.
    #[arg(short, long)]
    pub images: bool,

    /// Include the name of the main file in the output.
    #[arg(short = 'f', long)]
    pub with_filename: bool,

    /// Include the content type determined from the file prefix in the output.
    #[arg(short = 't', long)]
    pub with_prefix_type: bool,

    /// Include the content type determined from the attribute in the output.
    #[arg(short = 'T', long)]
    pub with_attribute_type: bool,

    /// Use STRING as the field delimiter.
    #[arg(
        short,
        long,
        default_value = DEFAULT_DELIMITER,
        value_name = "STRING",
        allow_hyphen_values = true
    )]
    pub delimiter: String,

    /// Print file paths relative to DIR.
    #[arg(
        short,
        long,
        value_name = "DIR",
        long_help = "Print file paths relative to DIR instead of the current directory.\n\n\
DIR must exist and be a directory."
    )]
    pub relative_to: Option<PathBuf>,

    /// Display the version and exit.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// AsciiDoc files to list the content of.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Fold the parsed flags into the run configuration
    pub fn config(&self) -> Result<InventoryConfig> {
        let mut config = match &self.relative_to {
            Some(dir) => InventoryConfig::relative_to(dir)?,
            None => {
                let cwd = std::env::current_dir().context("Cannot determine current directory")?;
                InventoryConfig::relative_to(&cwd)?
            }
        };

        config.images = self.images;
        config.with_filename = self.with_filename;
        config.with_prefix_type = self.with_prefix_type;
        config.with_attribute_type = self.with_attribute_type;
        config.delimiter = self.delimiter.clone();
        Ok(config)
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.config()?;
    log::debug!("paths relative to {}", config.base.display());

    let roots = cli
        .files
        .iter()
        .map(|file| RootDocument::open(file, &config.base))
        .collect::<Result<Vec<_>, _>>()?;

    let count = write_inventory(&AsciidocScanner::new(), &roots, &config, io::stdout().lock())?;
    log::info!("listed {} entries from {} files", count, roots.len());
    Ok(())
}
