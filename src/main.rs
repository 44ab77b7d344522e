//! PJson converter CLI.
//!
//! Converts between JSON and PJson from literal text, stdin, a single
//! file, or a directory scan. Directory mode is best-effort: a file that
//! fails to convert is reported and the batch continues.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pjson")]
#[command(about = "Convert between JSON and PJson", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert PJson to JSON
    ToJson(ConvertArgs),
    /// Convert JSON to PJson
    ToPjson(ConvertArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// Literal text to convert (omit all inputs to read stdin)
    text: Option<String>,

    /// Convert a single file, writing the converted sibling
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Convert every matching file in a directory
    #[arg(short, long, conflicts_with_all = ["text", "file"])]
    dir: Option<PathBuf>,

    /// Recurse into subdirectories (directory mode)
    #[arg(short, long, requires = "dir")]
    recursive: bool,

    /// Overwrite existing output files without prompting
    #[arg(short = 'y', long)]
    yes: bool,
}

#[derive(Clone, Copy)]
enum Direction {
    ToJson,
    ToPjson,
}

impl Direction {
    fn convert(self, input: &str) -> pjson::Result<String> {
        match self {
            // The checked variant: never write a file that does not parse.
            Direction::ToJson => pjson::from_pjson_checked(input),
            Direction::ToPjson => pjson::to_pjson(input),
        }
    }

    fn matches_input(self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        match self {
            Direction::ToJson => ext.eq_ignore_ascii_case("pjson"),
            Direction::ToPjson => ext.eq_ignore_ascii_case("json"),
        }
    }

    fn output_path(self, input: &Path) -> PathBuf {
        match self {
            Direction::ToPjson => input.with_extension("pjson"),
            Direction::ToJson => {
                let name = input.file_name().unwrap_or_default().to_string_lossy();
                let stem = if name.to_ascii_lowercase().ends_with(".pjson") {
                    &name[..name.len() - ".pjson".len()]
                } else {
                    &name[..]
                };
                input.with_file_name(format!("{stem}.json"))
            }
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Direction::ToJson => "PJson",
            Direction::ToPjson => "JSON",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let (direction, args) = match cli.command {
        Commands::ToJson(args) => (Direction::ToJson, args),
        Commands::ToPjson(args) => (Direction::ToPjson, args),
    };

    let outcome = if let Some(text) = args.text.as_deref() {
        convert_text(direction, text)
    } else if let Some(file) = args.file.as_deref() {
        convert_single_file(direction, file, args.yes)
    } else if let Some(dir) = args.dir.as_deref() {
        convert_directory(direction, dir, args.recursive)
    } else {
        convert_stdin(direction)
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn convert_text(direction: Direction, text: &str) -> pjson::Result<()> {
    let output = direction.convert(text)?;
    println!("{output}");
    Ok(())
}

fn convert_stdin(direction: Direction) -> pjson::Result<()> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let output = direction.convert(&input)?;
    println!("{output}");
    Ok(())
}

fn read_and_convert(direction: Direction, path: &Path) -> pjson::Result<String> {
    let input = fs::read(path)?;
    let text = std::str::from_utf8(&input).map_err(pjson::Error::from)?;
    direction.convert(text)
}

fn convert_single_file(direction: Direction, path: &Path, overwrite: bool) -> pjson::Result<()> {
    let output = read_and_convert(direction, path)?;

    let out_path = direction.output_path(path);
    if out_path.exists() && !overwrite && !confirm_overwrite(&out_path)? {
        println!("Conversion cancelled.");
        return Ok(());
    }

    fs::write(&out_path, output)?;
    println!("Converted: {} -> {}", path.display(), out_path.display());
    Ok(())
}

fn convert_directory(direction: Direction, dir: &Path, recursive: bool) -> pjson::Result<()> {
    let mut files = Vec::new();
    collect_files(dir, recursive, direction, &mut files)?;
    files.sort();

    if files.is_empty() {
        println!("No {} files found in {}.", direction.noun(), dir.display());
        return Ok(());
    }
    println!("Found {} {} file(s).", files.len(), direction.noun());

    let mut converted = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for path in &files {
        match convert_batch_item(direction, path) {
            Ok(BatchOutcome::Converted(out_path)) => {
                println!("  converted: {} -> {}", path.display(), out_path.display());
                converted += 1;
            }
            Ok(BatchOutcome::UpToDate) => {
                println!("  up-to-date: {}", path.display());
                skipped += 1;
            }
            Err(err) => {
                // Best-effort: report and keep going.
                eprintln!("  failed: {}: {err}", path.display());
                failed += 1;
            }
        }
    }

    println!(
        "Done: {} total, {converted} converted, {skipped} up-to-date, {failed} failed.",
        files.len()
    );
    Ok(())
}

enum BatchOutcome {
    Converted(PathBuf),
    UpToDate,
}

fn convert_batch_item(direction: Direction, path: &Path) -> pjson::Result<BatchOutcome> {
    let output = read_and_convert(direction, path)?;

    let out_path = direction.output_path(path);
    if let Ok(existing) = fs::read(&out_path) {
        if existing == output.as_bytes() {
            return Ok(BatchOutcome::UpToDate);
        }
    }

    fs::write(&out_path, &output)?;
    Ok(BatchOutcome::Converted(out_path))
}

fn collect_files(
    dir: &Path,
    recursive: bool,
    direction: Direction,
    files: &mut Vec<PathBuf>,
) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if recursive {
                collect_files(&path, recursive, direction, files)?;
            }
        } else if direction.matches_input(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn confirm_overwrite(path: &Path) -> io::Result<bool> {
    print!("File '{}' already exists. Overwrite? (y/n): ", path.display());
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
