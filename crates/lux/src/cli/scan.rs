//! The `lux scan` command.

use clap::Args;
use lux_core::config::ScanConfig;
use lux_core::scan::ProgressFn;
use lux_core::{Config, Scanner};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the `scan` command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory (or single file) to scan. Defaults to the current directory.
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Number of worker tasks (0 = one per available core)
    #[arg(short, long, default_value = "0")]
    pub workers: usize,

    /// File extensions to check, overriding the configured set
    #[arg(short, long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Where to write the CSV report (defaults to <root>/Bad_Images.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the scan command.
pub async fn execute(args: ScanArgs) -> anyhow::Result<()> {
    let root = ScanConfig::expand_root(&args.root);
    if !root.exists() {
        anyhow::bail!(
            "Scan root does not exist: {:?}\n\n  Hint: Check the path and try again.",
            root
        );
    }

    // Load configuration and apply CLI overrides
    let mut config = Config::load()?;
    config.scan.workers = args.workers;
    if !args.extensions.is_empty() {
        config.scan.extensions = args.extensions.clone();
    }

    let scanner = Scanner::new(&config);
    let files = scanner.discover(&root);
    if files.is_empty() {
        tracing::warn!("No candidate image files found under {:?}", root);
        return Ok(());
    }
    tracing::info!("Found {} image file(s) under {:?}", files.len(), root);

    // Progress bar ticked from the workers, one increment per checked file
    let total = files.len();
    let progress = create_progress_bar(total as u64);
    let progress_tick: ProgressFn = {
        let progress = progress.clone();
        Arc::new(move || progress.inc(1))
    };

    let start_time = std::time::Instant::now();
    let report = scanner.check_paths(files, Some(progress_tick)).await;
    let elapsed = start_time.elapsed();
    progress.finish_and_clear();

    // Persist the CSV next to the scanned tree (or wherever --output says)
    let csv_path = args
        .output
        .unwrap_or_else(|| root.join(&config.report.csv_name));
    let written = report.write_csv(&csv_path)?;
    if written {
        tracing::info!("Report written to {:?}", csv_path);
    }

    print_summary(&report, elapsed);
    Ok(())
}

/// Create a progress bar for the scan.
fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message("checking...");
    pb
}

/// Print a formatted summary table after the scan.
fn print_summary(report: &lux_core::ScanReport, elapsed: std::time::Duration) {
    let failed = report.failures.len();
    let rate = if elapsed.as_secs_f64() > 0.0 {
        report.total as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Checked:      {:>8}", report.total);
    eprintln!("    Readable:     {:>8}", report.total - failed);
    if failed > 0 {
        eprintln!("    Unreadable:   {:>8}", failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Duration:     {:>7.1}s", elapsed.as_secs_f64());
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("  ====================================");

    if failed == 0 {
        eprintln!("\n  All images loaded successfully. No errors detected.");
    } else {
        eprintln!("\n  {failed} image(s) could not be loaded.");
    }
}
