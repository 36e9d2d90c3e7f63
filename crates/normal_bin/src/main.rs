use anyhow::{Context, bail};
use clap::Parser;
use log::info;
use rayon::prelude::*;

use input::Job;
use report::Report;

mod input;
mod report;

/// normal-mode analysis of Cartesian Hessians
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML job files to run
    #[arg(value_parser, required = true)]
    infiles: Vec<String>,

    /// Writes the output in JSON format for use by other programs. The
    /// reports are written as a list in the same order as the job files.
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Set the maximum number of threads to use. Defaults to 0, which means to
    /// use as many threads as there are CPUS.
    #[arg(short, long, default_value_t = 0)]
    threads: usize,
}

/// set the maximum number of threads used by rayon. a value of 0 lets rayon
/// decide
fn max_threads(n: usize) {
    let _ = rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .build_global();
}

fn run(infile: &str) -> anyhow::Result<Report> {
    let record = Job::load(infile)?.into_record()?;
    let report = Report::new(infile, &record)
        .with_context(|| format!("normal-mode analysis of {infile} failed"))?;
    info!("finished {infile}");
    Ok(report)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    max_threads(args.threads);

    let results: Vec<_> = args.infiles.par_iter().map(|f| run(f)).collect();

    let mut reports = Vec::with_capacity(results.len());
    let mut failed = 0;
    for (infile, res) in args.infiles.iter().zip(results) {
        match res {
            Ok(r) => {
                for e in &r.errors {
                    eprintln!("{infile}: {e}");
                }
                reports.push(r);
            }
            Err(e) => {
                eprintln!("{infile}: {e:#}");
                failed += 1;
            }
        }
    }

    if args.json {
        let data = serde_json::to_string_pretty(&reports)?;
        println!("{data}");
    } else {
        let mut stdout = std::io::stdout().lock();
        for report in &reports {
            report.write_output(&mut stdout)?;
        }
    }

    if failed > 0 {
        bail!("{failed} of {} jobs failed", args.infiles.len());
    }
    Ok(())
}
