//! # Beam Analysis CLI
//!
//! Terminal front end for `beam_core`.
//!
//! ```text
//! beam_cli job.json    # analyze a JSON job file
//! beam_cli             # prompt for a beam and one of the standard load cases
//! ```
//!
//! Set `RUST_LOG=debug` to see the engine's stage-by-stage log.

mod job;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use beam_core::units::{
    Gigapascals, KilonewtonMeters, Kilonewtons, KilonewtonsPerMeter, Megapascals, Meters,
    Millimeters, NewtonMeters, Newtons, NewtonsPerMeter, Pascals,
};
use beam_core::{analyze_with, AnalysisResult, AnalysisSettings, Beam, CalcError, Load};
use log::info;

use crate::job::Job;

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    Some(input.trim().to_string())
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn prompt_yes(prompt: &str, default: bool) -> bool {
    match prompt_line(prompt).as_deref() {
        Some("y") | Some("Y") | Some("yes") => true,
        Some("n") | Some("N") | Some("no") => false,
        _ => default,
    }
}

/// Build a job from interactive prompts, in the units engineers type.
fn prompt_job() -> Result<Job, CalcError> {
    println!("Beam properties");
    let length = prompt_f64("  Beam length L (m) [6.0]: ", 6.0);
    let e_gpa = prompt_f64("  Young's modulus E (GPa) [200.0]: ", 200.0);
    let inertia = prompt_f64("  Moment of inertia I (m^4) [5e-5]: ", 5e-5);
    let modulus = prompt_f64("  Section modulus Z (m^3) [5e-4]: ", 5e-4);

    let e: Pascals = Gigapascals(e_gpa).into();
    let beam = Beam::new(length, e.value(), inertia, modulus)?;

    println!();
    println!("Loading");
    let mut loads = Vec::new();
    if prompt_yes("  Uniformly distributed load instead of point loads? [y/N]: ", false) {
        let w_kn = prompt_f64("  UDL intensity w (kN/m) [5.0]: ", 5.0);
        let w: NewtonsPerMeter = KilonewtonsPerMeter(w_kn).into();
        loads.push(Load::uniform_full(w.value(), length));
    } else {
        let p_kn = prompt_f64("  Point load P (kN) [10.0]: ", 10.0);
        let a = prompt_f64(&format!("  Distance a from left support (m) [{}]: ", length / 2.0), length / 2.0);
        let p: Newtons = Kilonewtons(p_kn).into();
        loads.push(Load::point(p.value(), a));

        if prompt_yes("  Add second point load? [y/N]: ", false) {
            let p2_kn = prompt_f64("  Second load P2 (kN) [5.0]: ", 5.0);
            let default_a2 = length * 3.0 / 4.0;
            let a2 = prompt_f64(&format!("  Distance a2 from left support (m) [{}]: ", default_a2), default_a2);
            let p2: Newtons = Kilonewtons(p2_kn).into();
            loads.push(Load::point(p2.value(), a2));
        }
    }

    println!();
    let points = prompt_f64("Plot resolution (points) [500]: ", 500.0);
    let settings = AnalysisSettings::default().with_sample_points(points.max(2.0) as usize);

    Ok(Job { beam, loads, settings })
}

fn kilonewtons(n: f64) -> f64 {
    Kilonewtons::from(Newtons(n)).value()
}

fn kilonewton_meters(nm: f64) -> f64 {
    KilonewtonMeters::from(NewtonMeters(nm)).value()
}

fn print_report(job: &Job, result: &AnalysisResult) {
    let beam = &job.beam;
    let e: Gigapascals = Pascals(beam.elastic_modulus()).into();

    println!("═══════════════════════════════════════");
    println!("  BEAM ANALYSIS RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Span:     {:.3} m", beam.length());
    println!("  E:        {:.1} GPa", e.value());
    println!("  I:        {:.4e} m^4", beam.moment_of_inertia());
    println!("  Z:        {:.4e} m^3", beam.section_modulus());
    for load in &job.loads {
        match *load {
            Load::Point { magnitude, position } => {
                println!("  {}: {:.3} kN at {:.3} m", load.display_name(), kilonewtons(magnitude), position);
            }
            Load::Distributed { intensity, start, end } => {
                println!(
                    "  {}: {:.3} kN/m from {:.3} m to {:.3} m",
                    load.display_name(),
                    KilonewtonsPerMeter::from(NewtonsPerMeter(intensity)).value(),
                    start,
                    end
                );
            }
        }
    }
    println!();
    println!("Reactions:");
    println!("  R_left  = {:.3} kN", kilonewtons(result.reactions.left));
    println!("  R_right = {:.3} kN", kilonewtons(result.reactions.right));
    println!();
    println!("Internal forces:");
    println!(
        "  V_max = {:.3} kN at x = {:.3} m",
        kilonewtons(result.shear_range.max.value),
        result.shear_range.max.position
    );
    println!(
        "  V_min = {:.3} kN at x = {:.3} m",
        kilonewtons(result.shear_range.min.value),
        result.shear_range.min.position
    );
    println!(
        "  M_max = {:.3} kN·m at x = {:.3} m",
        kilonewton_meters(result.moment_range.max.value),
        result.moment_range.max.position
    );
    println!(
        "  M_min = {:.3} kN·m at x = {:.3} m",
        kilonewton_meters(result.moment_range.min.value),
        result.moment_range.min.position
    );
    println!();
    let delta: Millimeters = Meters(result.max_deflection.value).into();
    let stress: Megapascals = Pascals(result.max_stress.value).into();
    println!("Deflection and stress:");
    println!("  δ_max = {:.3} mm at x = {:.3} m", delta.value(), result.max_deflection.position);
    if let Some(ratio) = result.span_deflection_ratio() {
        println!("  L/δ   = {:.0}", ratio);
    }
    println!("  σ_max = {:.3} MPa at x = {:.3} m", stress.value(), result.max_stress.position);
    println!("═══════════════════════════════════════");
}

fn print_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn main() -> ExitCode {
    env_logger::init();

    println!("Beam Analysis - Simply Supported Beam Calculator");
    println!("================================================");
    println!();

    let job = match std::env::args().nth(1) {
        Some(path) => match Job::load(Path::new(&path)) {
            Ok(job) => {
                info!("loaded job file {}", path);
                job
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => match prompt_job() {
            Ok(job) => job,
            Err(e) => {
                print_error(&e);
                return ExitCode::FAILURE;
            }
        },
    };

    println!();
    match analyze_with(&job.beam, &job.loads, &job.settings) {
        Ok(result) => {
            print_report(&job, &result);
            println!();
            println!("JSON Output:");
            if let Ok(json) = serde_json::to_string_pretty(&result) {
                println!("{}", json);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}
