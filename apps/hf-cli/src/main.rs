use clap::{Parser, Subcommand};
use hf_app::{
    AppError, AppResult, HistoryScope, StoredEvaluation, evaluate_and_store, evaluate_batch,
    evaluate_request_full, list_history, load_record, load_settings, summarize,
};
use hf_core::units::{gpm, inches, to_kpa, to_liters_per_second, to_millimeters};
use hf_flowtest::{FlowTestResult, NfpaClass};
use hf_record::{FlowTestRecord, FlowTestResponse, OutletDef};
use hf_results::ResultStore;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "hf-cli")]
#[command(about = "HydrantFlow CLI - NFPA 291 hydrant flow-test evaluation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a flow-test record file
    Validate {
        /// Path to the record (.yaml, .yml or .json)
        record_path: PathBuf,
    },
    /// Evaluate a flow-test record
    Evaluate {
        /// Path to the record (.yaml, .yml or .json)
        record_path: PathBuf,
        /// Evaluator calibration YAML (defaults to NFPA 291 conventions)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Print the response body as JSON
        #[arg(long)]
        json: bool,
        /// Also print SI figures
        #[arg(long)]
        si: bool,
    },
    /// Evaluate several records in parallel
    Batch {
        /// Record files
        #[arg(required = true)]
        record_paths: Vec<PathBuf>,
        /// Evaluator calibration YAML
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Classify an available fire flow in gpm
    Classify {
        /// Available fire flow at 20 psi residual (gpm)
        gpm: f64,
    },
    /// Evaluate a record and persist the result
    Store {
        /// Path to the record (.yaml, .yml or .json)
        record_path: PathBuf,
        /// Result store directory (defaults to .hydrantflow/results beside the record)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Evaluator calibration YAML
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Skip cache and force re-evaluation
        #[arg(long)]
        no_cache: bool,
    },
    /// List stored results for a hydrant or an organization
    History {
        /// Result store directory
        #[arg(long)]
        root: PathBuf,
        /// Hydrant UUID
        #[arg(long)]
        hydrant: Option<Uuid>,
        /// Organization UUID
        #[arg(long)]
        organization: Option<Uuid>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { record_path } => cmd_validate(&record_path),
        Commands::Evaluate {
            record_path,
            settings,
            json,
            si,
        } => cmd_evaluate(&record_path, settings.as_deref(), json, si),
        Commands::Batch {
            record_paths,
            settings,
        } => cmd_batch(&record_paths, settings.as_deref()),
        Commands::Classify { gpm } => cmd_classify(gpm),
        Commands::Store {
            record_path,
            root,
            settings,
            no_cache,
        } => cmd_store(&record_path, root, settings.as_deref(), !no_cache),
        Commands::History {
            root,
            hydrant,
            organization,
        } => cmd_history(root, hydrant, organization),
    }
}

fn cmd_validate(record_path: &Path) -> AppResult<()> {
    println!("Validating record: {}", record_path.display());
    let record = load_record(record_path)?;
    println!("✓ Record is valid");
    print_record_header(&record);
    Ok(())
}

fn cmd_evaluate(
    record_path: &Path,
    settings_path: Option<&Path>,
    json: bool,
    si: bool,
) -> AppResult<()> {
    let settings = load_settings(settings_path)?;
    let record = load_record(record_path)?;
    let result = evaluate_request_full(&record.test, &settings)?;

    if json {
        let response = FlowTestResponse::from(&result);
        let body = serde_json::to_string_pretty(&response)
            .map_err(|e| AppError::Record(format!("Failed to serialize response: {}", e)))?;
        println!("{}", body);
        return Ok(());
    }

    print_record_header(&record);
    print_result(&result, &record.test.outlets, si);
    Ok(())
}

fn cmd_batch(record_paths: &[PathBuf], settings_path: Option<&Path>) -> AppResult<()> {
    let settings = load_settings(settings_path)?;

    let mut requests = Vec::new();
    let mut loaded_paths = Vec::new();
    for path in record_paths {
        match load_record(path) {
            Ok(record) => {
                requests.push(record.test);
                loaded_paths.push(path);
            }
            Err(e) => println!("✗ {}: {}", path.display(), e),
        }
    }

    let responses = evaluate_batch(&requests, &settings);
    let mut failures = record_paths.len() - loaded_paths.len();
    for (path, response) in loaded_paths.iter().zip(responses) {
        match response {
            Ok(r) => println!(
                "✓ {}: class {} ({:.0} gpm at {:.0} psi), quality {}",
                path.display(),
                r.nfpa_class,
                r.available_fire_flow_gpm,
                r.calculations.results.target_residual_psi,
                r.calculations.validation.quality_score
            ),
            Err(e) => {
                failures += 1;
                println!("✗ {}: {}", path.display(), e);
            }
        }
    }

    if failures > 0 {
        return Err(AppError::InvalidInput(format!(
            "{} of {} records failed",
            failures,
            record_paths.len()
        )));
    }
    Ok(())
}

fn cmd_classify(gpm: f64) -> AppResult<()> {
    if !gpm.is_finite() || gpm < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "flow must be non-negative and finite, got {}",
            gpm
        )));
    }
    let class = NfpaClass::from_flow_gpm(gpm);
    println!("Class: {}", class);
    println!("  {}", class.description());
    match class.marking_color() {
        Some(color) => println!("  Marking: {}", color),
        None => println!("  Marking: none"),
    }
    Ok(())
}

fn cmd_store(
    record_path: &Path,
    root: Option<PathBuf>,
    settings_path: Option<&Path>,
    use_cache: bool,
) -> AppResult<()> {
    let settings = load_settings(settings_path)?;
    let record = load_record(record_path)?;
    let store = match root {
        Some(dir) => ResultStore::new(dir)?,
        None => ResultStore::for_record(record_path)?,
    };

    let StoredEvaluation {
        manifest,
        response,
        loaded_from_cache,
    } = evaluate_and_store(&record, &settings, &store, use_cache)?;

    if loaded_from_cache {
        println!("✓ Loaded from store: {}", manifest.result_id);
    } else {
        println!("✓ Evaluated and stored: {}", manifest.result_id);
    }
    println!(
        "  Class {} ({:.0} gpm), quality {}",
        response.nfpa_class,
        response.available_fire_flow_gpm,
        response.calculations.validation.quality_score
    );
    println!("  Store: {}", store.root_dir().display());
    Ok(())
}

fn cmd_history(
    root: PathBuf,
    hydrant: Option<Uuid>,
    organization: Option<Uuid>,
) -> AppResult<()> {
    let scope = match (hydrant, organization) {
        (Some(id), None) => HistoryScope::Hydrant(id),
        (None, Some(id)) => HistoryScope::Organization(id),
        _ => {
            return Err(AppError::InvalidInput(
                "pass exactly one of --hydrant or --organization".to_string(),
            ));
        }
    };

    let store = ResultStore::new(root)?;
    let manifests = list_history(&store, scope)?;

    if manifests.is_empty() {
        println!("No stored results found");
        return Ok(());
    }

    println!("Stored results:");
    for m in &manifests {
        println!(
            "  {}  hydrant {}  class {:<12} {:>7.0} gpm  quality {:>3}  {}",
            m.tested_on,
            m.hydrant_id,
            m.nfpa_class,
            m.available_fire_flow_gpm,
            m.quality_score,
            short_id(&m.result_id)
        );
    }

    let summary = summarize(&manifests)?;
    println!("\nSummary:");
    println!("  Tests: {}", summary.test_count);
    println!(
        "  Compliant: {}/{}",
        summary.compliant_count, summary.test_count
    );
    println!(
        "  Best / worst class: {} / {}",
        summary.best_class, summary.worst_class
    );
    println!("  Mean quality score: {:.1}", summary.mean_quality_score);
    println!(
        "  Latest: {} (class {})",
        summary.latest.tested_on, summary.latest.nfpa_class
    );
    Ok(())
}

fn print_record_header(record: &FlowTestRecord) {
    println!("  Record: {}", record.id);
    println!("  Organization: {}", record.organization_id);
    println!("  Hydrant: {}", record.hydrant_id);
    println!("  Tested on: {}", record.tested_on);
    if let Some(by) = &record.tested_by {
        println!("  Tested by: {}", by);
    }
}

/// Leading characters of a result id for tabular output.
fn short_id(result_id: &str) -> &str {
    result_id
        .char_indices()
        .nth(12)
        .map_or(result_id, |(end, _)| &result_id[..end])
}

fn print_result(result: &FlowTestResult, outlets: &[OutletDef], si: bool) {
    println!("\nOutlets:");
    for (i, (q, outlet)) in result.per_outlet_flow_gpm.iter().zip(outlets).enumerate() {
        let d = outlet.size.inches();
        if si {
            println!(
                "  #{}: {} in ({:.1} mm), pitot {} psi: {:.1} gpm ({:.1} L/s)",
                i,
                d,
                to_millimeters(inches(d)),
                outlet.pitot_pressure,
                q,
                to_liters_per_second(gpm(*q))
            );
        } else {
            println!(
                "  #{}: {} in, pitot {} psi: {:.1} gpm",
                i, d, outlet.pitot_pressure, q
            );
        }
    }
    println!("\nTotal flow:          {:.1} gpm", result.total_flow_gpm);
    println!(
        "Available fire flow: {:.1} gpm at {:.0} psi residual",
        result.available_fire_flow_gpm, result.target_residual_psi
    );
    if result.below_target_residual {
        println!("  (static pressure at or below target residual; measured flow reported)");
    }
    if si {
        println!(
            "  = {:.1} L/s, pressure drop {:.1} kPa",
            to_liters_per_second(result.available_fire_flow()),
            to_kpa(result.pressure_drop())
        );
    }
    println!(
        "NFPA 291 class:      {} ({})",
        result.nfpa_class,
        result.nfpa_class.description()
    );
    println!(
        "Meets NFPA 291:      {}",
        if result.meets_nfpa_291 { "yes" } else { "no" }
    );
    println!("Quality score:       {}/100", result.quality_score);
    for issue in &result.quality_issues {
        println!("  - {}", issue);
    }
}
