use clap::Parser;
use log::{Level, error, info};
use simple_logger::init_with_level;
use std::io::{self, BufWriter, Write};

use utr_coverage::{
    cli::Args,
    model::{CoverageModel, HotstartComparison},
    sweep::{SweepAxes, SweepResult, run_sweep},
};

fn main() {
    let start = std::time::Instant::now();
    let args: Args = Args::parse();
    let level = if args.verbose { Level::Debug } else { Level::Info };
    init_with_level(level).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    run(&args).unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    let elapsed = start.elapsed();
    info!("Elapsed time: {:?}", elapsed);
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let model = args.model()?;
    let axes = args.axes()?;
    let mut out = BufWriter::new(io::stdout().lock());

    if args.hotstart_compare {
        let rows = hotstart_rows(&model, &axes)?;
        write_hotstart(&mut out, &rows)?;
    } else {
        info!(
            "Sweeping {} transcripts x {} taus x {} lags",
            axes.transcript_lens().len(),
            axes.taus().len(),
            axes.lag_times().len()
        );
        let result = run_sweep(&model, &axes, &args.sweep_options())?;
        write_sweep(&mut out, &result)?;
    }
    out.flush()?;
    Ok(())
}

fn hotstart_rows(
    model: &CoverageModel, axes: &SweepAxes,
) -> Result<Vec<HotstartComparison>, Box<dyn std::error::Error>> {
    let mut rows = Vec::with_capacity(axes.taus().len() * axes.transcript_lens().len());
    for &tau in axes.taus() {
        for &len in axes.transcript_lens() {
            rows.push(model.compare_hotstart(len, tau)?);
        }
    }
    Ok(rows)
}

fn write_sweep<W: Write>(out: &mut W, result: &SweepResult) -> io::Result<()> {
    writeln!(out, "transcript_len\ttau\tlag_time\tfraction")?;
    for cell in result.cells() {
        writeln!(
            out,
            "{}\t{}\t{}\t{:.6}",
            cell.transcript_len, cell.tau, cell.lag_time, cell.fraction
        )?;
    }
    Ok(())
}

fn write_hotstart<W: Write>(out: &mut W, rows: &[HotstartComparison]) -> io::Result<()> {
    writeln!(out, "transcript_len\ttau\thotstart\tnon_hotstart\tgain")?;
    for row in rows {
        writeln!(
            out,
            "{}\t{}\t{:.6}\t{:.6}\t{:.6}",
            row.transcript_len,
            row.tau,
            row.hotstart,
            row.non_hotstart,
            row.gain()
        )?;
    }
    Ok(())
}
