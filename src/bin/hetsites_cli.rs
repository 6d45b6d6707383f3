use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use hetsites::{find_heterogeneous_sites, SiteResults};

/// Find heterogeneous sites in aligned sequences.
#[derive(Debug, Parser)]
#[command(name = "hetsites", version, about, long_about = None)]
struct Cli {
    /// Aligned FASTA or FASTQ files, optionally gzipped.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// If the share of the most common symbol at a site is bigger than this
    /// value, the site is considered homogeneous.
    #[arg(long = "homogen-fraction", default_value_t = 1.0)]
    homogen_fraction: f64,

    /// Also report the site where the most common symbol has the smallest share.
    #[arg(long)]
    best_site: bool,

    /// Write the report to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of worker threads (defaults to the number of CPUs).
    #[arg(short, long)]
    threads: Option<usize>,

    /// Analyse columns on a single thread.
    #[arg(long, conflicts_with = "threads")]
    sequential: bool,

    /// Suppress warnings.
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbosity. Can be given multiple times.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Off
        } else {
            match self.verbose {
                0 => log::LevelFilter::Warn,
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            }
        }
    }

    fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        if let Err(e) = env_logger::Builder::new()
            .filter_level(self.log_level())
            .target(env_logger::Target::Stderr)
            .format(|buf, record| {
                let level = record.level().as_str().to_lowercase();
                writeln!(buf, "[hetsites {level:>5}] {}", record.args())
            })
            .try_init()
        {
            eprintln!("failed to setup logger: {e}");
        }

        if let Some(threads) = self.threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()?;
        }

        // 1. Load and analyse
        let load_spinner = spinner("blue", self.quiet);
        load_spinner.set_message(format!("Analysing {} file(s)...", self.inputs.len()));

        let results = find_heterogeneous_sites(self.inputs, self.homogen_fraction, !self.sequential)?;

        load_spinner.finish_with_message(format!(
            "Found {} heterogeneous site(s) in {} sequences of length {}.",
            results.sites.len(),
            results.sequence_count,
            results.length
        ));

        // 2. Write the report
        let spinner = spinner("yellow", self.quiet);
        spinner.set_message("Writing report...");

        let report = render_report(&results, self.best_site);

        match &self.output {
            Some(path) => fs::write(path, report)?,
            None => std::io::stdout().write_all(report.as_bytes())?,
        }

        spinner.finish_with_message("All done!");
        Ok(())
    }
}

/// Site blocks, optionally followed by the most balanced site.
fn render_report(results: &SiteResults, best_site: bool) -> String {
    let mut report = results.get_site_report();
    if best_site {
        report.push_str(&results.get_best_site_report());
    }
    report
}

/// Spinner drawn on stderr, hidden when running quietly.
fn spinner(color: &str, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    let template = format!("{{spinner:.{color}}} {{msg}}");
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template(&template)
    {
        spinner.set_style(style);
    }
    spinner
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
