//! Integration tests for the UTR coverage model and the parameter sweep.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: from validated instrument and cell
//!   parameters, through geometry, start-position mass, required bases,
//!   histogram and read-length survival, to the covered fraction.
//! - Exercise the sweep over the reference grid and its lookups.
//!
//! Coverage
//! --------
//! - `model::pipeline::CoverageModel`: `evaluate`, `fraction`,
//!   `compare_hotstart` on the reference scenario.
//! - `sweep`: `SweepAxes::reference`, `run_sweep`, `SweepResult` lookups.
//!
//! Exclusions
//! ----------
//! - Boundary cases of the individual stages (case partition, trapezoid
//!   CDF, scatter-add bounds); those are covered by unit tests.
//! - Python bindings.
use utr_coverage::{
    model::{CellParams, CoverageModel, InstrumentParams, StartModelOptions},
    sweep::{SweepAxes, SweepOptions, run_sweep},
};

/// Reference scenario: default instrument, 3500-base transcript, tau 3000,
/// non-hotstart lag of 15 minutes.
fn reference_cell() -> CellParams {
    CellParams::new(3500, 3000.0, 900.0).expect("reference cell parameters are valid")
}

#[test]
// Purpose
// -------
// Check the shapes and probability invariants of every intermediate on the
// reference scenario.
//
// Given
// -----
// - Default `CoverageModel`, transcript 3500, tau 3000, lag 900 s.
//
// Expect
// ------
// - Half cycle 3924; position grid of length 2h = 7848; histogram and
//   survival of length 7705.
// - Start mass and histogram each sum to 1; survival starts at 1 and is
//   non-increasing within [0, 1].
// - The fraction lies in [0, 1] and equals `histogram · survival`.
fn reference_scenario_intermediates_are_consistent() {
    let model = CoverageModel::default();
    let outcome = model.evaluate(&reference_cell()).expect("reference evaluation succeeds");

    assert_eq!(outcome.geometry.half_cycle, 3924);
    assert_eq!(outcome.start_mass.len(), 7848);
    assert_eq!(outcome.required_bases.len(), 7848);
    assert_eq!(outcome.cases.len(), 7848);
    assert_eq!(outcome.histogram.len(), 7705);
    assert_eq!(outcome.survival.len(), 7705);

    assert!((outcome.start_mass.sum() - 1.0).abs() < 1e-9);
    assert!((outcome.histogram.sum() - 1.0).abs() < 1e-9);
    assert_eq!(outcome.survival[0], 1.0);
    assert!(outcome.survival.iter().all(|s| (0.0..=1.0).contains(s)));
    assert!(outcome.survival.windows(2).into_iter().all(|w| w[1] <= w[0]));

    assert!((0.0..=1.0).contains(&outcome.fraction));
    let recomputed = outcome.histogram.dot(&outcome.survival);
    assert!((recomputed - outcome.fraction).abs() < 1e-15);
}

#[test]
// Purpose
// -------
// Ensure repeated evaluations are bit-for-bit identical.
//
// Expect
// ------
// - Same fraction bits across two independent model instances.
fn evaluation_is_deterministic() {
    let a = CoverageModel::default().fraction(&reference_cell()).expect("evaluation succeeds");
    let b = CoverageModel::default().fraction(&reference_cell()).expect("evaluation succeeds");
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
// Purpose
// -------
// Pin the reference-scenario fractions so a numerical change in any stage
// is noticed.
//
// Given
// -----
// - Default instrument, transcript 3500, tau 3000, lags 900 s and 10 s.
//
// Expect
// ------
// - 0.04288468997236376 at 900 s and 0.19789229993974405 at 10 s, within
//   1e-9.
fn reference_fractions_match_known_values() {
    let model = CoverageModel::default();
    let at_lag = |lag: f64| {
        model
            .fraction(&CellParams::new(3500, 3000.0, lag).expect("valid cell"))
            .expect("evaluation succeeds")
    };

    let non_hotstart = at_lag(900.0);
    let hotstart = at_lag(10.0);

    assert!((non_hotstart - 0.04288468997236376).abs() < 1e-9, "got {non_hotstart}");
    assert!((hotstart - 0.19789229993974405).abs() < 1e-9, "got {hotstart}");
}

#[test]
// Purpose
// -------
// Verify the qualitative behavior of the fraction across parameters.
//
// Given
// -----
// - Default model, lag 900 s.
//
// Expect
// ------
// - Non-decreasing in tau for a fixed transcript length.
// - Shorter transcripts are covered more often than long ones.
// - A vanishing tau gives a vanishing fraction.
fn fraction_responds_to_tau_and_length() {
    let model = CoverageModel::default();
    let at = |len: usize, tau: f64| {
        model
            .fraction(&CellParams::new(len, tau, 900.0).expect("valid cell"))
            .expect("evaluation succeeds")
    };

    let by_tau: Vec<f64> = (1..10).map(|k| at(3500, 1000.0 * k as f64)).collect();
    assert!(by_tau.windows(2).all(|w| w[1] >= w[0] - 1e-12));

    assert!(at(500, 3000.0) > at(4750, 3000.0));
    assert!(at(3500, 1.0) < 1e-12);
}

#[test]
// Purpose
// -------
// Confirm starting acquisition early helps on the reference scenario.
//
// Expect
// ------
// - Hotstart fraction ≥ non-hotstart fraction; gain is their difference.
fn hotstart_is_at_least_non_hotstart() {
    let cmp = CoverageModel::default()
        .compare_hotstart(3500, 3000.0)
        .expect("hotstart comparison succeeds");
    assert!(cmp.hotstart >= cmp.non_hotstart);
    assert!((cmp.gain() - (cmp.hotstart - cmp.non_hotstart)).abs() < 1e-15);
}

#[test]
// Purpose
// -------
// Run the full reference sweep and cross-check its lookups.
//
// Expect
// ------
// - Table shape (9, 18, 5) with every entry in [0, 1].
// - `lookup` by value matches a direct evaluation and `fraction` by index.
// - `lag_slice` yields the (9, 18) per-lag table; `cells` yields 810 records.
fn reference_sweep_lookups_agree() {
    let model = CoverageModel::default();
    let axes = SweepAxes::reference();
    let result = run_sweep(&model, &axes, &SweepOptions::default()).expect("sweep succeeds");

    assert_eq!(result.fractions().dim(), (9, 18, 5));
    assert!(result.fractions().iter().all(|f| (0.0..=1.0).contains(f)));

    let direct = model.fraction(&reference_cell()).expect("evaluation succeeds");
    let by_value = result.lookup(3500, 3000.0, 900.0).expect("reference cell is on the axes");
    // transcript 3500 is index 12, tau 3000 index 2, lag 900 index 4.
    let by_index = result.fraction(12, 2, 4);
    assert_eq!(by_value.to_bits(), direct.to_bits());
    assert_eq!(by_index.to_bits(), direct.to_bits());

    let slice = result.lag_slice(4);
    assert_eq!(slice.dim(), (9, 18));
    assert_eq!(slice[[2, 12]].to_bits(), direct.to_bits());
    assert_eq!(result.cells().count(), 810);
}

#[test]
// Purpose
// -------
// Check a non-default instrument and wrap count flow through the pipeline.
//
// Given
// -----
// - Faster polymerase (3.0 b/s), shorter 3′ UTR (150), wraps = 5.
//
// Expect
// ------
// - A valid fraction in [0, 1], differing from the default model.
fn custom_instrument_flows_through() {
    let instrument =
        InstrumentParams::new(3.0, 3000.0, 130, 150, 44, 80).expect("valid instrument");
    let options = StartModelOptions::new(5).expect("valid wraps");
    let custom = CoverageModel::new(instrument, options);

    let f = custom.fraction(&reference_cell()).expect("evaluation succeeds");
    let f_default = CoverageModel::default().fraction(&reference_cell()).expect("succeeds");

    assert!((0.0..=1.0).contains(&f));
    assert!(f != f_default);
}
