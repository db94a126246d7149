//! cli — command-line arguments of the `utr-coverage` binary.

use crate::{
    model::{
        errors::CoverageResult,
        params::{
            DEFAULT_ACQUISITION_LIMIT, DEFAULT_FIVE_PRIME_UTR, DEFAULT_HAIRPIN,
            DEFAULT_MIN_MAP_BASES, DEFAULT_POLYMERASE_RATE, DEFAULT_THREE_PRIME_UTR,
        },
        pipeline::CoverageModel,
        start_position::DEFAULT_WRAPS,
    },
    sweep::{SweepAxes, SweepOptions},
    utils::build_coverage_model,
};
use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "utr-coverage",
    about = "Probability that a single SMRT read covers both UTRs of a transcript"
)]
pub struct Args {
    #[arg(
        long = "rate",
        help = "Polymerase rate in bases per second",
        value_name = "BASES_PER_SEC",
        default_value_t = DEFAULT_POLYMERASE_RATE
    )]
    pub rate: f64,

    #[arg(
        long = "acquisition",
        help = "Acquisition window in seconds",
        value_name = "SECONDS",
        default_value_t = DEFAULT_ACQUISITION_LIMIT
    )]
    pub acquisition: f64,

    #[arg(
        long = "five-prime-utr",
        help = "Bases that must be read at the 5' end",
        value_name = "BASES",
        default_value_t = DEFAULT_FIVE_PRIME_UTR
    )]
    pub five_prime_utr: usize,

    #[arg(
        long = "three-prime-utr",
        help = "Bases that must be read at the 3' end",
        value_name = "BASES",
        default_value_t = DEFAULT_THREE_PRIME_UTR
    )]
    pub three_prime_utr: usize,

    #[arg(
        long = "hairpin",
        help = "Hairpin adapter length",
        value_name = "BASES",
        default_value_t = DEFAULT_HAIRPIN
    )]
    pub hairpin: usize,

    #[arg(
        long = "min-map-bases",
        help = "Bases needed to map a read to a strand",
        value_name = "BASES",
        default_value_t = DEFAULT_MIN_MAP_BASES
    )]
    pub min_map_bases: usize,

    #[arg(
        long = "wraps",
        help = "Template laps summed in the start-position mixture",
        value_name = "N",
        default_value_t = DEFAULT_WRAPS
    )]
    pub wraps: usize,

    #[arg(
        short = 'l',
        long = "transcripts",
        value_name = "LENGTHS",
        value_delimiter = ',',
        num_args = 1..,
        help = "Transcript lengths delimited by comma [default: 500..5000 step 250]"
    )]
    pub transcripts: Vec<usize>,

    #[arg(
        short = 'k',
        long = "taus",
        value_name = "TAUS",
        value_delimiter = ',',
        num_args = 1..,
        help = "Read-length taus delimited by comma [default: 1000..10000 step 1000]"
    )]
    pub taus: Vec<f64>,

    #[arg(
        short = 'g',
        long = "lags",
        value_name = "SECONDS",
        value_delimiter = ',',
        num_args = 1..,
        help = "Lag times in seconds delimited by comma [default: 10,60,300,600,900]"
    )]
    pub lags: Vec<f64>,

    #[arg(
        short = 't',
        long = "threads",
        help = "Number of threads (0 uses all cores)",
        value_name = "THREADS",
        default_value_t = 0
    )]
    pub threads: usize,

    #[arg(
        long = "hotstart-compare",
        help = "Print hotstart vs non-hotstart fractions instead of the lag sweep",
        action = ArgAction::SetTrue
    )]
    pub hotstart_compare: bool,

    #[arg(short = 'v', long = "verbose", help = "Log debug messages", action = ArgAction::SetTrue)]
    pub verbose: bool,
}

impl Args {
    /// Validated model from the instrument flags.
    pub fn model(&self) -> CoverageResult<CoverageModel> {
        build_coverage_model(
            self.rate,
            self.acquisition,
            self.five_prime_utr,
            self.three_prime_utr,
            self.hairpin,
            self.min_map_bases,
            self.wraps,
        )
    }

    /// Sweep axes; each axis left empty on the command line falls back to
    /// the reference grid.
    pub fn axes(&self) -> CoverageResult<SweepAxes> {
        let reference = SweepAxes::reference();
        let pick_usize = |given: &[usize], fallback: &[usize]| {
            if given.is_empty() { fallback.to_vec() } else { given.to_vec() }
        };
        let pick_f64 = |given: &[f64], fallback: &[f64]| {
            if given.is_empty() { fallback.to_vec() } else { given.to_vec() }
        };
        SweepAxes::new(
            pick_usize(&self.transcripts, reference.transcript_lens()),
            pick_f64(&self.taus, reference.taus()),
            pick_f64(&self.lags, reference.lag_times()),
        )
    }

    pub fn sweep_options(&self) -> SweepOptions {
        SweepOptions::new(self.threads, self.threads != 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::errors::CoverageError;

    #[test]
    // Purpose
    // -------
    // Verify defaults map onto the default model and the reference axes.
    //
    // Expect
    // ------
    // - `CoverageModel::default()`, `SweepAxes::reference()`, parallel
    //   sweep on the rayon default pool.
    fn defaults_map_to_reference_configuration() {
        // Act
        let args = Args::parse_from(["utr-coverage"]);

        // Assert
        assert_eq!(args.model(), Ok(CoverageModel::default()));
        assert_eq!(args.axes(), Ok(SweepAxes::reference()));
        assert_eq!(args.sweep_options(), SweepOptions::default());
        assert!(!args.hotstart_compare);
    }

    #[test]
    // Purpose
    // -------
    // Check comma-delimited axes and instrument overrides.
    //
    // Expect
    // ------
    // - Given axes are used verbatim; unspecified lags fall back to the
    //   reference lags; one thread runs serially.
    fn overrides_are_applied() {
        // Act
        let args = Args::parse_from([
            "utr-coverage",
            "--transcripts",
            "1000,3500",
            "--taus",
            "2000",
            "--threads",
            "1",
            "--five-prime-utr",
            "100",
        ]);
        let axes = args.axes().expect("valid axes");
        let model = args.model().expect("valid model");

        // Assert
        assert_eq!(axes.transcript_lens(), &[1000, 3500]);
        assert_eq!(axes.taus(), &[2000.0]);
        assert_eq!(axes.lag_times(), SweepAxes::reference().lag_times());
        assert_eq!(model.instrument().five_prime_utr(), 100);
        assert!(!args.sweep_options().parallel());
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid flag values surface as model errors.
    //
    // Expect
    // ------
    // - `--taus 0` gives `InvalidAxisValue`; `--rate -1` gives `InvalidRate`.
    fn invalid_values_are_reported() {
        // Act
        let bad_tau = Args::parse_from(["utr-coverage", "--taus", "0"]);
        let bad_rate = Args::parse_from(["utr-coverage", "--rate=-1"]);

        // Assert
        assert_eq!(
            bad_tau.axes(),
            Err(CoverageError::InvalidAxisValue { axis: "tau", value: 0.0 })
        );
        assert_eq!(bad_rate.model(), Err(CoverageError::InvalidRate { value: -1.0 }));
    }
}
