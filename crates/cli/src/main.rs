//! CLI tool for extracting text outlines from PowerPoint files.

use anyhow::{Context, Result};
use clap::Parser;
use outline_core::{ReportFormatter, SlideAssembler};
use outline_pptx::PptxParser;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// ZIP local-file-header magic (PPTX container).
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// OLE/CFB magic (legacy .ppt, not supported).
const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Extract a structured text outline from PowerPoint files.
#[derive(Parser, Debug)]
#[command(name = "pptx-outline")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file(s) (.pptx)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Emit slide records as JSON instead of the text report
    #[arg(short, long)]
    json: bool,

    /// Exclude speaker notes from the report
    #[arg(long)]
    no_notes: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let assembler = SlideAssembler::new();
    let formatter = ReportFormatter::new().with_notes(!args.no_notes);

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &assembler, &formatter) {
            Ok(output) => {
                if args.print {
                    print!("{}", output);
                } else {
                    let output_path = get_output_path(input_path, args.output.as_ref(), args.json)?;
                    write_output(&output_path, &output)?;
                    if args.verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

/// Process a single PowerPoint file into its report or JSON output.
fn process_file(
    input_path: &Path,
    args: &Args,
    assembler: &SlideAssembler,
    formatter: &ReportFormatter,
) -> Result<String> {
    let file = File::open(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;
    let mut reader = BufReader::new(file);

    // Read magic bytes to validate the container format
    let mut magic = [0u8; 8];
    reader
        .read_exact(&mut magic)
        .with_context(|| "Failed to read file header")?;

    if magic.starts_with(&OLE_MAGIC) {
        anyhow::bail!("Legacy .ppt (OLE) files are not supported; convert to .pptx first");
    }
    if !magic.starts_with(&ZIP_MAGIC) {
        anyhow::bail!("Not a PPTX file (missing ZIP header)");
    }

    // Re-open for parsing from the start
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let filename = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    log::debug!("Parsing as PPTX");
    let parser = PptxParser::new();
    let document = parser
        .parse(reader, filename)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if args.verbose {
        eprintln!("  Found {} slides", document.slides.len());
    }

    let records = assembler.assemble_all(&document);

    if args.json {
        let json = serde_json::to_string_pretty(&records)
            .with_context(|| "Failed to serialize slide records")?;
        Ok(format!("{}\n", json))
    } else {
        Ok(formatter.format_with_newline(&records))
    }
}

/// Determine the output path for a processed file.
fn get_output_path(input_path: &Path, output_dir: Option<&PathBuf>, json: bool) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let extension = if json { "json" } else { "txt" };
    let output_filename = format!("{}.{}", stem, extension);

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(output_filename)
            } else {
                PathBuf::from(output_filename)
            }
        }
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
