//! Hack VM Translator Driver
//!
//! Command-line entry point: reads one `.vm` file or a directory of
//! `.vm` files, translates them, and writes a single `.asm` file for the
//! downstream assembler.

use clap::Parser;
use hvt_codegen::{render, Translator};
use hvt_common::TranslateError;
use hvt_parser::{parse_unit, TranslationUnit};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hvt")]
#[command(about = "Hack VM to assembly translator")]
#[command(version = "0.1.0")]
struct Cli {
    /// Input .vm file, or a directory of .vm files
    input: PathBuf,

    /// Output assembly file (default: input with .asm extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the bootstrap prologue (single-unit output only)
    #[arg(long)]
    no_bootstrap: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), TranslateError> {
    let units = collect_units(&cli.input)?;
    info!("loaded {} translation unit(s)", units.len());

    let mut translator = Translator::new();
    let instructions = if cli.no_bootstrap {
        let mut code = Vec::new();
        for unit in &units {
            code.extend(translator.translate_unit(unit)?);
        }
        code
    } else {
        translator.translate_program(&units)?
    };

    let out_path = match &cli.output {
        Some(path) => path.clone(),
        None => default_output_path(&cli.input),
    };
    fs::write(&out_path, render(&instructions))?;
    info!("assembly written to {}", out_path.display());
    Ok(())
}

/// Read the input into translation units. Directory entries are sorted by
/// file name so the output is identical from run to run.
fn collect_units(input: &Path) -> Result<Vec<TranslationUnit>, TranslateError> {
    if input.is_dir() {
        let mut paths: Vec<PathBuf> = fs::read_dir(input)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "vm"))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(TranslateError::Io {
                message: format!("no .vm files in {}", input.display()),
            });
        }

        paths.iter().map(|path| load_unit(path)).collect()
    } else {
        Ok(vec![load_unit(input)?])
    }
}

fn load_unit(path: &Path) -> Result<TranslationUnit, TranslateError> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| TranslateError::Io {
            message: format!("invalid file name: {}", path.display()),
        })?;
    let source = fs::read_to_string(path)?;
    parse_unit(name, &source)
}

/// `Foo.vm` becomes `Foo.asm`; a directory becomes `<dir>/<dir>.asm`.
fn default_output_path(input: &Path) -> PathBuf {
    if input.is_dir() {
        let base = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "out".to_string());
        input.join(format!("{}.asm", base))
    } else {
        input.with_extension("asm")
    }
}
