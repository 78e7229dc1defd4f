// main.rs - CLI entry point

use std::path::{Path, PathBuf};
use std::time::Instant;
use pairdiv::cli::Config;
use pairdiv::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        println!("{}", Config::generate_sample());
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
        println!("📄 Loaded configuration from: {}", config_path);
    }

    init_logging(args.verbose);

    let input = PathBuf::from(args.input.as_ref().ok_or("--input is required")?);
    let output = args
        .output
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(&input));

    let validation_result = validate_args(&args)?;

    println!("🚀 pairdiv v{}", env!("CARGO_PKG_VERSION"));

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Threads: {}", n);
    } else {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    let scoring = &validation_result.scoring;
    println!(
        "🎯 Scoring: match {}, mismatch {}, gap open {}, gap extend {}",
        scoring.match_score, scoring.mismatch_score, scoring.gap_open, scoring.gap_extend
    );
    if let Some(limit) = validation_result.max_cells {
        println!("📏 DP cell limit per alignment: {}", limit);
    }

    let total_start = Instant::now();

    // Input errors are the only fatal ones
    println!("🧬 Loading sequences from: {}", input.display());
    let records = read_fasta(&input).map_err(|e| e.to_string())?;
    let groups = SpecimenGroups::from_records(records).filtered(&validation_result.filter);
    println!(
        "✅ Loaded {} records for {} specimens",
        groups.total_records(),
        groups.len()
    );

    if args.dry_run {
        let pairs = groups.iter().filter(|g| g.len() == 2).count();
        let singletons = groups.iter().filter(|g| g.len() == 1).count();
        let oversized = groups.iter().filter(|g| g.len() > 2).count();
        println!("✅ Dry run completed successfully");
        println!(
            "📊 {} pairs to compare, {} single-sequence specimens, {} specimens with more than two sequences",
            pairs, singletons, oversized
        );
        return Ok(());
    }

    let aligner = PairwiseAligner::new(validation_result.scoring.clone())
        .with_max_cells(validation_result.max_cells);
    let engine = DivergenceEngine::new(aligner).with_progress(!args.quiet);

    println!("🔄 Aligning specimen pairs...");
    let compute_start = Instant::now();
    let report = engine.run(groups);
    println!(
        "✅ {} pairs compared in {:.2}s ({} ok, {} failed, {} oversized groups, {} singletons skipped)",
        report.results.len(),
        compute_start.elapsed().as_secs_f64(),
        report.success_count(),
        report.failure_count(),
        report.group_errors.len(),
        report.singletons.len()
    );

    let written = write_table(&output, &report).map_err(|e| e.to_string())?;
    println!("✅ Divergence table written to: {} ({} specimens)", output.display(), written);

    if let Some(path) = &args.save_alignments {
        let saved = write_alignments(Path::new(path), &report).map_err(|e| e.to_string())?;
        println!("💾 Saved {} alignments to: {}", saved, path);
    }

    if let Some(path) = &args.summary {
        let summary = RunSummary::from_report(
            &report,
            &validation_result.scoring,
            validation_result.max_cells,
            &input,
            &output,
            &command_line,
            total_start.elapsed().as_secs_f64(),
        );
        summary.write(Path::new(path)).map_err(|e| e.to_string())?;
        println!("💾 Run summary saved to: {}", path);
    }

    println!("⏱️  Total time: {:.2}s", total_start.elapsed().as_secs_f64());
    Ok(())
}
