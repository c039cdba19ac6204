//! Batch extraction command implementation

use anyhow::{bail, Context, Result};
use folio_core::extract::{extract_file, extractor_for_extension};
use folio_core::ReadOptions;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Extract every supported document in a directory to JSON files
pub fn batch(input_dir: &str, output_dir: &str, options: &ReadOptions, jobs: usize) -> Result<()> {
    let input_path = Path::new(input_dir);
    let output_path = Path::new(output_dir);

    fs::create_dir_all(output_path)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;

    let mut files: Vec<_> = fs::read_dir(input_path)
        .with_context(|| format!("Failed to read input directory: {}", input_dir))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|ext| extractor_for_extension(ext).is_some())
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    if files.is_empty() {
        println!("No supported files found in {}", input_dir);
        return Ok(());
    }

    println!("Found {} files to extract", files.len());

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("##-"),
    );

    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to start worker pool")?;

    pool.install(|| {
        files.par_iter().for_each(|file_path| {
            match process_file(file_path, output_path, options) {
                Ok(()) => {
                    success_count.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    error_count.fetch_add(1, Ordering::Relaxed);
                    tracing::error!("Failed to extract {:?}: {:#}", file_path, e);
                }
            }
            progress.inc(1);
        });
    });

    progress.finish();

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    println!("\nBatch extraction complete:");
    println!("  Success: {}", success);
    println!("  Errors:  {}", errors);

    if errors > 0 {
        bail!("Batch extraction completed with {} errors", errors);
    }

    Ok(())
}

fn process_file(input_path: &Path, output_dir: &Path, options: &ReadOptions) -> Result<()> {
    let extracted = extract_file(input_path, options)?;

    // chapter.xhtml and chapter.opf must not collide
    let file_name = input_path
        .file_name()
        .and_then(|s| s.to_str())
        .context("Could not determine output filename from input")?;
    let output_file = output_dir.join(format!("{}.json", file_name));

    let json = serde_json::to_string_pretty(&extracted)?;
    fs::write(&output_file, json)
        .with_context(|| format!("Failed to write {:?}", output_file))?;

    tracing::info!("Extracted {:?} -> {:?}", input_path, output_file);

    Ok(())
}
