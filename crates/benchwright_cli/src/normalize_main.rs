//! Benchwright runtime parameter normalizer.
//!
//! Invoked by the synthesized command text inside the tool's container:
//! reads the platform's raw parameter dump, writes the cleaned record the
//! wrapped function consumes. The flag vocabulary here must stay literally
//! consistent with `benchwright_core::contract`; tests below pin it.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use indexmap::IndexMap;

use benchwright_normalize::{NormalizeOptions, normalize_file, unescape_separator};

#[derive(Parser)]
#[command(name = "benchwright-normalize", version)]
#[command(about = "Normalize a submitted parameter record", long_about = None)]
struct Cli {
    /// Raw parameter record (JSON object)
    src: PathBuf,
    /// Destination for the cleaned record
    dst: PathBuf,
    /// Keys to coerce to booleans
    #[arg(long = "bool-values", num_args = 0.., value_name = "KEY")]
    bool_values: Vec<String>,
    /// Keys to unpack as lists (bare names, without `_repeat`)
    #[arg(long = "list-values", num_args = 0.., value_name = "KEY")]
    list_values: Vec<String>,
    /// Separator for delimited free-text fields; `\n` and `\t` are unescaped
    #[arg(long = "list-sep", default_value = ";", value_name = "SEP")]
    list_sep: String,
    /// Which list keys parse as delimited text instead of repeat containers
    #[arg(long = "list-fields", num_args = 0.., value_name = "KEY")]
    list_fields: Vec<String>,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> NormalizeOptions {
        let separator = unescape_separator(&self.list_sep);
        let mut delimited = IndexMap::new();
        for key in &self.list_fields {
            delimited.insert(key.clone(), separator.clone());
        }
        NormalizeOptions {
            bool_keys: self.bool_values.clone(),
            list_keys: self.list_values.clone(),
            delimited,
            outputs: None,
            inject_outputs: false,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    benchwright_cli::logging::init(cli.verbose);

    match normalize_file(&cli.src, &cli.dst, &cli.options()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("benchwright-normalize: {}", err);
            ExitCode::from(1)
        }
    }
}
