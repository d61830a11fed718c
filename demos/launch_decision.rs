//! Launch Decision Example
//!
//! Plans a two-variant experiment, draws synthetic outcomes, evaluates the
//! launch rule, and estimates the design's empirical power.
//!
//! Run with: RUST_LOG=ab_verdict=debug cargo run --example launch_decision

use ab_verdict::{
    required_sample_size, simulate, BernoulliProvider, Experiment, ExperimentParams,
    SimulationDesign,
};
use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    println!("=== ab-verdict Launch Decision ===\n");

    // -------------------------------------------------------------------------
    // 1. Design the experiment
    // -------------------------------------------------------------------------
    let params = ExperimentParams::from_json(
        r#"{"mde": 0.04, "baseline_conversion_rate": 0.12, "alpha": 0.05, "power": 0.8}"#,
    )
    .context("invalid experiment parameters")?;
    let planned = required_sample_size(&params)?;

    println!("1. Design");
    println!("   MDE: {}", params.mde());
    println!("   Baseline conversion rate: {}", params.baseline_conversion_rate());
    println!("   Alpha: {}  Power: {}", params.alpha(), params.power());
    println!("   Planned sample size per variant: {planned}");

    // -------------------------------------------------------------------------
    // 2. Run one experiment on synthetic outcomes
    // -------------------------------------------------------------------------
    println!("\n2. Single evaluation");

    let design = SimulationDesign::balanced(1078, 0.603, 0.701);
    let experiment = Experiment::new(params);
    let analysis = experiment
        .run(&mut BernoulliProvider::seeded(2023), &design)
        .context("experiment evaluation failed")?;

    println!("{analysis}");

    // -------------------------------------------------------------------------
    // 3. Hand the plain statistics to a reporting collaborator
    // -------------------------------------------------------------------------
    println!("\n3. JSON report");
    println!("{}", analysis.to_json()?);

    // -------------------------------------------------------------------------
    // 4. Estimate power with a simulation sweep
    // -------------------------------------------------------------------------
    println!("\n4. Simulation sweep");

    for (label, design) in [
        ("clear winner", design),
        ("no difference", SimulationDesign::balanced(1078, 0.603, 0.603)),
    ] {
        let summary = simulate(&params, &design, 1_000, 7)?;
        println!(
            "   {label:<14} launch rate {:.3} ({} of {} runs, {} degenerate)",
            summary.launch_rate(),
            summary.launches,
            summary.runs,
            summary.degenerate
        );
    }

    Ok(())
}
