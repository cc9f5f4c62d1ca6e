use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use ta_app::report::{format_bindings, format_channels, format_field_map, format_sessions};
use ta_app::{AnalysisRequest, AppResult, analysis_service};
use ta_config::AlignModel;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tagalign")]
#[command(about = "TagAlign - AprilTag alignment performance analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment a log into alignment sessions and report their metrics
    Analyze {
        /// Decoded log file (.json channel dump or long-format .csv)
        log_path: PathBuf,
        /// Alignment model: A, B, C or main
        #[arg(short, long, default_value = "main")]
        model: AlignModel,
        /// Analysis settings (YAML, or JSON by extension)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the JSON report to this path
        #[arg(short, long)]
        export: Option<PathBuf>,
        /// Write one resampled series CSV per session into this directory
        #[arg(long)]
        series_dir: Option<PathBuf>,
    },
    /// List the channels in a log
    Channels {
        /// Decoded log file
        log_path: PathBuf,
    },
    /// Show which channels each model reads
    Fields {
        /// Only show this model
        #[arg(short, long)]
        model: Option<AlignModel>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            log_path,
            model,
            config,
            export,
            series_dir,
        } => cmd_analyze(
            &log_path,
            model,
            config.as_deref(),
            export.as_deref(),
            series_dir.as_deref(),
        ),
        Commands::Channels { log_path } => cmd_channels(&log_path),
        Commands::Fields { model } => cmd_fields(model),
    }
}

fn cmd_analyze(
    log_path: &Path,
    model: AlignModel,
    config_path: Option<&Path>,
    export_path: Option<&Path>,
    series_dir: Option<&Path>,
) -> AppResult<()> {
    println!("Loading log file: {}", log_path.display());

    let request = AnalysisRequest {
        config_path,
        export_path,
        series_dir,
        ..AnalysisRequest::new(log_path, model)
    };
    let response = analysis_service::run_analysis(&request)?;

    println!();
    print!("{}", format_bindings(model, &response.analysis.bindings));
    println!();
    print!(
        "{}",
        format_sessions(&response.analysis, &response.report.sessions)
    );

    if let Some(path) = &response.exported_report {
        println!("\nMetrics exported to: {}", path.display());
    }
    if !response.series_files.is_empty() {
        println!("Series written:");
        for path in &response.series_files {
            println!("  {}", path.display());
        }
    }

    let timing = &response.timing;
    println!(
        "\nReport {} (load {:.3}s, analyze {:.3}s, export {:.3}s)",
        response.report_id, timing.load_s, timing.analyze_s, timing.export_s
    );

    Ok(())
}

fn cmd_channels(log_path: &Path) -> AppResult<()> {
    let channels = analysis_service::list_channels(log_path)?;
    if channels.is_empty() {
        println!("No channels found in {}", log_path.display());
    } else {
        print!("{}", format_channels(&channels));
    }
    Ok(())
}

fn cmd_fields(model: Option<AlignModel>) -> AppResult<()> {
    let models = match model {
        Some(model) => vec![model],
        None => AlignModel::ALL.to_vec(),
    };
    for (i, model) in models.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", format_field_map(*model));
    }
    tracing::debug!(models = models.len(), "listed field maps");
    Ok(())
}
