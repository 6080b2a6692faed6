use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use instamood::analysis::EventFilter;
use instamood::config::Config;
use instamood::models::Source;
use instamood::processing::{load_sources, MoodAnalyzer};
use instamood::report::{render_anomalies, render_summary, save_anomalies_json, save_summary_csv};
use instamood::sentiment::ClassifierProvider;

#[derive(Parser)]
#[command(name = "instamood")]
#[command(about = "Daily mood trends and anomalies from exported social activity logs")]
struct Args {
    /// Directory holding the source exports
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// First date to analyze (YYYY-MM-DD, inclusive)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last date to analyze (YYYY-MM-DD, inclusive)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Only analyze these sources; repeat for several
    #[arg(long = "source")]
    sources: Vec<Source>,

    /// Write the per-day summary table here as CSV
    #[arg(long)]
    summary_csv: Option<PathBuf>,

    /// Write the anomaly list here as JSON
    #[arg(long)]
    anomalies_json: Option<PathBuf>,

    /// Skip the text report on stdout
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "instamood=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    if let Some(dir) = args.data_dir {
        config.data.dir = dir;
    }
    if args.summary_csv.is_some() {
        config.report.summary_csv = args.summary_csv;
    }
    config.validate()?;

    if let (Some(from), Some(to)) = (args.from, args.to) {
        if from > to {
            anyhow::bail!("--from {from} is after --to {to}");
        }
    }

    let provider = ClassifierProvider::new(&config.classifier);
    if !provider.is_available() {
        let textless: Vec<&str> = Source::ALL
            .iter()
            .filter(|source| source.is_textless())
            .map(|source| source.as_str())
            .collect();
        tracing::warn!(
            "Sentiment classifier unavailable - only {} will produce events",
            textless.join(", ")
        );
    }

    let selected: Vec<Source> = if args.sources.is_empty() {
        Source::ALL.to_vec()
    } else {
        args.sources.clone()
    };

    tracing::info!("Loading sources from {}...", config.data.dir.display());
    let loaded = load_sources(&config.data, &selected);

    let analyzer = MoodAnalyzer::new(Arc::new(provider), config.detection);
    let batch = analyzer.normalize(&loaded);
    for failure in &batch.failures {
        tracing::warn!("Source {} skipped: {}", failure.source, failure.reason);
    }

    let mut filter = EventFilter::new();
    if let Some(from) = args.from {
        filter = filter.from_date(from);
    }
    if let Some(to) = args.to {
        filter = filter.to_date(to);
    }
    if !args.sources.is_empty() {
        filter = filter.with_sources(args.sources);
    }

    let run = analyzer.analyze(&batch.events, &filter)?;

    if !args.quiet {
        println!("{}", render_summary(&run.report));
        print!("{}", render_anomalies(&run.report));
    }

    if let Some(path) = &config.report.summary_csv {
        save_summary_csv(&run.report.summary_table, path)?;
        tracing::info!("Summary table written to {}", path.display());
    }

    if let Some(path) = &args.anomalies_json {
        save_anomalies_json(&run.report.anomalies, path)?;
        tracing::info!("Anomalies written to {}", path.display());
    }

    Ok(())
}
