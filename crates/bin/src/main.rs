//! Tenor CLI binary.
//!
//! Drives the analysis workflow end to end: load cleaned holdings CSVs,
//! run every engine query, and either print the results or export them as
//! flat report files for downstream BI tools. When several portfolios are
//! exported together, the fixed-shape reports are additionally combined
//! into `ALL_Portfolios_*` tables.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use tenor_analytics::{DEFAULT_TOP_N, Distribution, PortfolioAnalyzer};
use tenor_output::{
    DistributionReport, DurationReport, ExportFormat, KrdReport, ReportTable, SummaryReport,
    TopHoldingsReport, write_combined_csv, write_report,
};
use tenor_table::{load_holdings, normalize};

#[derive(Parser)]
#[command(name = "tenor")]
#[command(about = "Tenor: fixed-income portfolio analytics", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze holdings files and print every report
    Analyze {
        /// Paths to cleaned holdings CSVs
        #[arg(required = true)]
        holdings: Vec<PathBuf>,

        /// Portfolio label per file (defaults to the file stem)
        #[arg(long = "name")]
        names: Vec<String>,

        /// Evaluation date for maturity metrics (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,

        /// Entries kept in top-holdings and categorical breakdown reports
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,
    },

    /// Export analysis reports into a directory
    Export {
        /// Paths to cleaned holdings CSVs
        #[arg(required = true)]
        holdings: Vec<PathBuf>,

        /// Portfolio label per file (defaults to the file stem)
        #[arg(long = "name")]
        names: Vec<String>,

        /// Output directory for report files
        #[arg(long)]
        out: PathBuf,

        /// Output format (csv, json, or pretty-json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Evaluation date for maturity metrics (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,

        /// Entries kept in top-holdings and categorical breakdown reports
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            holdings,
            names,
            as_of,
            top,
        } => {
            for analyzer in load_analyzers(&holdings, &names, as_of)? {
                analyze(&analyzer, top)?;
            }
            Ok(())
        }
        Commands::Export {
            holdings,
            names,
            out,
            format,
            as_of,
            top,
        } => export(&holdings, &names, &out, &format, as_of, top),
    }
}

fn load_analyzers(
    paths: &[PathBuf],
    names: &[String],
    as_of: Option<NaiveDate>,
) -> Result<Vec<PortfolioAnalyzer>, Box<dyn std::error::Error>> {
    if !names.is_empty() && names.len() != paths.len() {
        return Err(format!(
            "{} --name labels given for {} holdings files",
            names.len(),
            paths.len()
        )
        .into());
    }

    let mut analyzers = Vec::with_capacity(paths.len());
    for (index, path) in paths.iter().enumerate() {
        let name = names.get(index).cloned().unwrap_or_else(|| {
            path.file_stem()
                .map_or_else(|| "Portfolio".to_string(), |stem| stem.to_string_lossy().into_owned())
        });
        let table = normalize(load_holdings(path)?)?;
        let mut analyzer = PortfolioAnalyzer::new(table, name)?;
        if let Some(as_of) = as_of {
            analyzer = analyzer.with_evaluation_date(as_of);
        }
        analyzers.push(analyzer);
    }
    Ok(analyzers)
}

fn analyze(analyzer: &PortfolioAnalyzer, top: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", format!("PORTFOLIO ANALYSIS: {}", analyzer.name()));
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!(
        "Positions: {}   Evaluation date: {}\n",
        analyzer.positions(),
        analyzer.evaluation_date()
    );

    let summary = analyzer.summary()?;
    print_section("Summary");
    println!(
        "  Total Market Value:       {:.2}",
        summary.total_market_value
    );
    println!(
        "  Weighted Yield to Worst:  {}",
        fmt_stat(summary.weighted_yield_to_worst)
    );
    println!(
        "  Average Maturity (yrs):   {}",
        fmt_stat(summary.average_maturity_years)
    );

    let duration = analyzer.duration()?;
    println!(
        "  Weighted Duration:        {}",
        fmt_stat(duration.weighted_duration)
    );

    print_section("Credit Quality (Composite Rating)");
    print_distribution(&analyzer.credit_distribution()?);

    for (column, dist) in analyzer.rating_distributions()? {
        print_section(&format!("Credit Quality ({})", column));
        print_distribution(&dist);
    }

    print_section("Sector Exposure");
    print_distribution(&analyzer.sector_exposure()?);

    print_section("Currency Exposure");
    print_distribution(&analyzer.currency_exposure()?);

    print_section("Maturity Buckets");
    print_distribution(&analyzer.maturity_buckets()?);

    print_section("KRD Profile");
    let profile = analyzer.krd_profile()?;
    if profile.is_empty() {
        println!("  none found");
    }
    for tenor in &profile {
        println!("  {:<24} {:>10.4}", tenor.tenor, tenor.contribution);
    }

    print_section(&format!("Top {} Holdings", top));
    let holdings = analyzer.top_holdings(top)?;
    if holdings.is_empty() {
        println!("  none found");
    }
    for holding in &holdings {
        println!(
            "  {:<32} {:>14.2}",
            holding.issuer.as_deref().unwrap_or("(unclassified)"),
            holding.market_value
        );
    }

    for (column, dist) in analyzer.categorical_breakdowns(top)? {
        print_section(&format!("Breakdown: {}", column));
        print_distribution(&dist);
    }

    println!();
    Ok(())
}

/// Fixed-shape per-portfolio reports that can be combined across portfolios.
#[derive(Default)]
struct CombinedSets {
    summaries: Vec<SummaryReport>,
    durations: Vec<DurationReport>,
    credits: Vec<DistributionReport>,
    sectors: Vec<DistributionReport>,
    currencies: Vec<DistributionReport>,
    maturities: Vec<DistributionReport>,
    krds: Vec<KrdReport>,
    top_holdings: Vec<TopHoldingsReport>,
}

fn export(
    paths: &[PathBuf],
    names: &[String],
    out: &Path,
    format: &str,
    as_of: Option<NaiveDate>,
    top: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = parse_format(format)?;
    let analyzers = load_analyzers(paths, names, as_of)?;
    std::fs::create_dir_all(out)?;

    let per_portfolio: Vec<_> = analyzers
        .iter()
        .map(|analyzer| {
            Ok((
                analyzer.rating_distributions()?,
                analyzer.categorical_breakdowns(top)?,
            ))
        })
        .collect::<Result<_, tenor_analytics::AnalyticsError>>()?;

    let combine = analyzers.len() > 1 && format == ExportFormat::Csv;
    let total: usize = per_portfolio
        .iter()
        .map(|(ratings, breakdowns)| 8 + ratings.len() + breakdowns.len())
        .sum::<usize>()
        + if combine { 8 } else { 0 };

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("█▓░"),
    );
    pb.set_message("Exporting reports...");

    let write = |prefix: &str,
                 stem: &str,
                 report: &dyn ErasedReport|
     -> Result<(), Box<dyn std::error::Error>> {
        let file_path = out.join(format!("{}_{}.{}", prefix, stem, format.extension()));
        let file = File::create(&file_path)?;
        report.write_to(file, format)?;
        pb.inc(1);
        Ok(())
    };

    let mut combined = CombinedSets::default();
    for (analyzer, (rating_dists, breakdowns)) in analyzers.iter().zip(per_portfolio) {
        let name = analyzer.name();
        let prefix = name.replace(' ', "_");

        let summary = SummaryReport::new(analyzer.summary()?);
        write(&prefix, "summary", &summary)?;
        combined.summaries.push(summary);

        let duration = DurationReport::new(analyzer.duration()?);
        write(&prefix, "duration", &duration)?;
        combined.durations.push(duration);

        let credit = DistributionReport::new("Rating", name, analyzer.credit_distribution()?);
        write(&prefix, "credit_distribution", &credit)?;
        combined.credits.push(credit);

        for (column, dist) in rating_dists {
            write(
                &prefix,
                &format!("{}_distribution", column.replace(' ', "_")),
                &DistributionReport::new("Rating", name, dist),
            )?;
        }

        let sector = DistributionReport::new("Sector", name, analyzer.sector_exposure()?);
        write(&prefix, "sector_exposure", &sector)?;
        combined.sectors.push(sector);

        let currency = DistributionReport::new("Currency", name, analyzer.currency_exposure()?);
        write(&prefix, "currency_exposure", &currency)?;
        combined.currencies.push(currency);

        let maturity =
            DistributionReport::new("Maturity Bucket", name, analyzer.maturity_buckets()?);
        write(&prefix, "maturity_buckets", &maturity)?;
        combined.maturities.push(maturity);

        let krd = KrdReport::new(name, analyzer.krd_profile()?);
        write(&prefix, "krd_profile", &krd)?;
        combined.krds.push(krd);

        let top_report = TopHoldingsReport::new(name, analyzer.top_holdings(top)?);
        write(&prefix, "top_holdings", &top_report)?;
        combined.top_holdings.push(top_report);

        for (column, dist) in breakdowns {
            write(
                &prefix,
                &format!("{}_breakdown", column.replace(' ', "_")),
                &DistributionReport::new(&column, name, dist),
            )?;
        }
    }

    if combine {
        write_combined(out, "summary", &combined.summaries, &pb)?;
        write_combined(out, "duration", &combined.durations, &pb)?;
        write_combined(out, "credit_distribution", &combined.credits, &pb)?;
        write_combined(out, "sector_exposure", &combined.sectors, &pb)?;
        write_combined(out, "currency_exposure", &combined.currencies, &pb)?;
        write_combined(out, "maturity_buckets", &combined.maturities, &pb)?;
        write_combined(out, "krd_profile", &combined.krds, &pb)?;
        write_combined(out, "top_holdings", &combined.top_holdings, &pb)?;
    }

    pb.finish_with_message(format!("Exported {} reports to {}", total, out.display()));
    Ok(())
}

fn write_combined<R: ReportTable>(
    out: &Path,
    stem: &str,
    reports: &[R],
    pb: &ProgressBar,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(out.join(format!("ALL_Portfolios_{}.csv", stem)))?;
    write_combined_csv(reports, file)?;
    pb.inc(1);
    Ok(())
}

/// Object-safe adapter over [`write_report`] so the export loop can treat
/// heterogeneous report types uniformly.
trait ErasedReport {
    fn write_to(&self, file: File, format: ExportFormat) -> Result<(), tenor_output::ExportError>;
}

impl<R: ReportTable + Serialize> ErasedReport for R {
    fn write_to(&self, file: File, format: ExportFormat) -> Result<(), tenor_output::ExportError> {
        write_report(self, file, format)
    }
}

fn parse_format(format: &str) -> Result<ExportFormat, Box<dyn std::error::Error>> {
    match format {
        "csv" => Ok(ExportFormat::Csv),
        "json" => Ok(ExportFormat::Json),
        "pretty-json" => Ok(ExportFormat::PrettyJson),
        other => {
            Err(format!("unknown format '{}', expected csv, json, or pretty-json", other).into())
        }
    }
}

fn print_section(title: &str) {
    println!("\n{}", title);
    println!("{}", "-".repeat(64));
}

fn print_distribution(dist: &Distribution) {
    if dist.is_empty() {
        println!("  none found");
        return;
    }
    for entry in &dist.entries {
        println!(
            "  {:<32} {:>8.2}%",
            entry.label.as_deref().unwrap_or("(unclassified)"),
            entry.weight_pct
        );
    }
}

fn fmt_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
}
