// src/main.rs
//
// rawprobe CLI - guess the sample format, byte order, and channel count
// of headerless PCM files.
//
// This is a thin wrapper around the rawprobe library; all classification
// logic lives in the `core` module.

use anyhow::Result;
use clap::Parser;
use colorful::Colorful;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use rawprobe::core::FormatClassifier;
use rawprobe::detection::CandidateScore;

#[derive(Parser, Debug)]
#[command(name = "rawprobe")]
#[command(version = "0.1.0")]
#[command(about = "Guess the sample format, endianness, and channel count of headerless PCM audio")]
struct Args {
    /// Input file or directory (defaults to current directory)
    #[arg(default_value = ".")]
    input: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Print the per-candidate feature table
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let files = collect_raw_files(&args.input)?;

    if files.is_empty() {
        if !args.json {
            println!("{}", "No raw audio files found!".red());
        }
        return Ok(());
    }

    if !args.json {
        println!("Found {} raw file(s)\n", files.len());
    }

    let mut all_results = Vec::new();

    for file_path in files {
        match process_file(&file_path, &args) {
            Ok(entry) => all_results.push(entry),
            Err(e) => {
                if !args.json {
                    eprintln!("{}: {:#}", "Error probing".red(), e);
                }
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({
            "files_probed": all_results.len(),
            "results": all_results,
        }))?);
    }

    Ok(())
}

/// Collect the input file, or recurse a directory over raw-ish extensions
fn collect_raw_files(path: &Path) -> Result<Vec<PathBuf>> {
    let raw_extensions = ["raw", "pcm", "dat", "bin", "sw", "sb"];
    let mut files = Vec::new();

    if path.is_file() {
        // An explicitly named file is probed regardless of extension
        files.push(path.to_path_buf());
    } else if path.is_dir() {
        for entry in WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let entry_path = entry.path();
            if !entry_path.is_file() {
                continue;
            }
            if let Some(ext) = entry_path.extension() {
                if raw_extensions.contains(&ext.to_str().unwrap_or("").to_lowercase().as_str()) {
                    files.push(entry_path.to_path_buf());
                }
            }
        }
    }

    Ok(files)
}

fn process_file(file_path: &Path, args: &Args) -> Result<serde_json::Value> {
    if !args.json {
        println!("Probing: {}", file_path.display().to_string().cyan());
    }

    let classifier = FormatClassifier::new(file_path)?;
    let result = classifier.result();

    if !args.json {
        println!("  Format: {}", result.class.to_string().green());
        println!("  Channels: {}", result.channels);
        println!(
            "  Decode hint: {}",
            format!("-f {} -ac {}", result.codec_tag(), result.channels).yellow()
        );

        if args.verbose {
            println!("  Signal start: byte {}", classifier.signal_start());
            print_candidate_table(&classifier.candidate_scores());
        }

        println!();
    }

    let mut entry = serde_json::json!({
        "file": file_path.display().to_string(),
        "format": result.class.format,
        "endianness": result.class.endian,
        "channels": result.channels,
        "codec_tag": result.codec_tag(),
    });

    if args.verbose {
        entry["signal_start"] = serde_json::json!(classifier.signal_start());
        entry["candidates"] = serde_json::json!(classifier.candidate_scores());
    }

    Ok(entry)
}

fn print_candidate_table(scores: &[CandidateScore]) {
    println!("\n  {} Candidate features:", "▸".cyan());
    for score in scores {
        println!(
            "    {:6}  mono {:>10.3}  stereo {:>10.3}  pLo {:>8.3}  pHiM {:>7.1} dB  pHiS {:>7.1} dB",
            score.class.codec_tag(),
            score.mono_feat,
            score.stereo_feat,
            score.p_lo,
            10.0 * score.p_hi_mono.log10(),
            10.0 * score.p_hi_stereo.log10(),
        );
    }
}
