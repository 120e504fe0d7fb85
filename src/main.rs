//! Example runner for the 2D dot engine.
//!
//! Walks through basic vector operations, a few fluid dynamics uses and a
//! small flow field analysis. With `--monitor` every call is recorded by
//! the process-wide safety monitor and a report is printed at the end.

mod flow;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use dot_engine::Vector2D;
use dot_engine::monitor::{LogObserver, Monitored, OperationObserver, global_monitor};

use crate::flow::{default_field, force_component, random_field};

/// Width of the section rules.
const RULE_WIDTH: usize = 50;

#[derive(Parser, Debug)]
#[command(name = "dot-engine")]
#[command(about = "Examples for the 2D vector dot engine")]
struct Args {
    /// Two vectors to compare, written as "x,y".
    #[arg(num_args = 2, value_names = ["V1", "V2"], allow_hyphen_values = true)]
    vectors: Vec<Vector2D>,

    /// Record every operation with the safety monitor and print its report.
    #[arg(short, long)]
    monitor: bool,

    /// Number of random flow samples to analyse.
    #[arg(short, long, default_value = "4")]
    samples: usize,

    /// Random seed for the flow samples.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the monitor records to this JSON file (implies --monitor).
    #[arg(long)]
    export: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!("Navier-Stokes Equation Dot Engine - Examples");
    println!("{}", "=".repeat(RULE_WIDTH));

    if args.monitor || args.export.is_some() {
        let monitor = global_monitor();
        let startup = monitor.check_safety("system_startup");
        println!("Safety status: {}", startup.status);

        run(&Monitored::global(), &args)?;

        let status = monitor.check_safety("system_completion");
        let report = monitor.report();
        section("Monitor Report");
        println!("Final safety status: {}", status.status);
        for recommendation in &status.recommendations {
            println!("  - {recommendation}");
        }
        println!("Operations monitored: {}", report.total_operations);
        if let Some(score) = report.average_safety_score {
            println!("Average safety score: {score:.2}");
        }
        if let Some(path) = &args.export {
            let path = monitor.export_states_to_path(Some(path))?;
            println!("Exported records to {}", path.display());
        }
    } else {
        run(&Monitored::new(LogObserver), &args)?;
    }

    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Examples completed successfully!");
    Ok(())
}

fn run<O: OperationObserver>(math: &Monitored<O>, args: &Args) -> Result<()> {
    basic_operations(math)?;
    fluid_dynamics(math)?;
    special_relationships(math)?;
    flow_field(math, args)?;
    if let [v1, v2] = args.vectors.as_slice() {
        compare(math, *v1, *v2)?;
    }
    Ok(())
}

fn section(title: &str) {
    println!();
    println!("{title}:");
    println!("{}", "-".repeat(title.len() + 1));
}

fn basic_operations<O: OperationObserver>(math: &Monitored<O>) -> Result<()> {
    section("1. Basic Vector Operations");
    let v1 = [3.0, 4.0];
    let v2 = [1.0, 2.0];
    let angle = math.angle_between(v1, v2)?;

    println!("Vector 1: {v1:?}");
    println!("Vector 2: {v2:?}");
    println!("Dot product: {}", math.dot(v1, v2)?);
    println!("Magnitude of v1: {}", math.magnitude(v1)?);
    println!("Magnitude of v2: {}", math.magnitude(v2)?);
    println!(
        "Angle between vectors: {angle:.4} radians ({:.2}°)",
        angle.to_degrees()
    );
    Ok(())
}

fn fluid_dynamics<O: OperationObserver>(math: &Monitored<O>) -> Result<()> {
    section("2. Fluid Dynamics Applications");
    let velocity = Vector2D::new(2.5, 1.8)?;
    println!("Velocity vector: {velocity} m/s");
    println!("Speed (magnitude): {:.2} m/s", math.magnitude(velocity)?);

    let pressure_gradient = Vector2D::new(-100.0, -50.0)?;
    let area_normal = Vector2D::new(1.0, 0.0)?;
    let force = force_component(math, pressure_gradient, area_normal)?;
    println!("Pressure gradient: {pressure_gradient} Pa/m");
    println!("Area normal: {area_normal}");
    println!("Force component: {force} Pa");
    Ok(())
}

fn special_relationships<O: OperationObserver>(math: &Monitored<O>) -> Result<()> {
    section("3. Special Vector Relationships");
    let (ortho1, ortho2) = ([1.0, 0.0], [0.0, 1.0]);
    println!("Orthogonal vectors: {ortho1:?} and {ortho2:?}");
    println!("Dot product (should be 0): {}", math.dot(ortho1, ortho2)?);
    println!(
        "Angle (should be 90°): {:.1}°",
        math.angle_between(ortho1, ortho2)?.to_degrees()
    );

    let (parallel1, parallel2) = ([2.0, 3.0], [4.0, 6.0]);
    println!("Parallel vectors: {parallel1:?} and {parallel2:?}");
    println!("Dot product: {}", math.dot(parallel1, parallel2)?);
    println!(
        "Angle (should be 0°): {:.6}°",
        math.angle_between(parallel1, parallel2)?.to_degrees()
    );
    Ok(())
}

fn flow_field<O: OperationObserver>(math: &Monitored<O>, args: &Args) -> Result<()> {
    section("4. Flow Field Analysis");
    let mut field = default_field()?;
    if args.samples > field.len() {
        let seed = args.seed.unwrap_or_else(rand::random);
        println!("Random samples seeded with {seed}");
        let mut rng = StdRng::seed_from_u64(seed);
        field.extend(random_field(&mut rng, args.samples - field.len())?);
    } else {
        field.truncate(args.samples);
    }

    println!("Flow field velocity analysis:");
    let mut total_kinetic_energy = 0.0;
    for sample in &field {
        let speed = sample.speed(math)?;
        let kinetic_energy = sample.kinetic_energy(math)?;
        total_kinetic_energy += kinetic_energy;
        println!(
            "  Point {}: velocity {}, speed {speed:.3}, KE {kinetic_energy:.3}",
            sample.position, sample.velocity
        );
    }
    println!("Total kinetic energy per unit mass: {total_kinetic_energy:.3}");
    Ok(())
}

fn compare<O: OperationObserver>(math: &Monitored<O>, v1: Vector2D, v2: Vector2D) -> Result<()> {
    section("5. Your Vectors");
    println!("Vectors: {v1} and {v2}");
    println!("Dot product: {}", math.dot(v1, v2)?);
    match math.angle_between(v1, v2) {
        Ok(angle) => println!("Angle: {angle:.4} radians ({:.2}°)", angle.to_degrees()),
        Err(error) => println!("Angle: {error}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_come_in_pairs() {
        let args = Args::try_parse_from(["dot-engine", "-1,2", "(3, 4)"]).unwrap();
        assert_eq!(
            args.vectors,
            vec![Vector2D::new(-1.0, 2.0).unwrap(), Vector2D::new(3.0, 4.0).unwrap()]
        );

        let args = Args::try_parse_from(["dot-engine", "--samples", "6"]).unwrap();
        assert!(args.vectors.is_empty());
        assert_eq!(args.samples, 6);

        assert!(Args::try_parse_from(["dot-engine", "1,2"]).is_err());
        assert!(Args::try_parse_from(["dot-engine", "1,2", "3,4", "5,6"]).is_err());
    }

    #[test]
    fn test_invalid_vector_is_rejected() {
        assert!(Args::try_parse_from(["dot-engine", "1,2,3", "3,4"]).is_err());
        assert!(Args::try_parse_from(["dot-engine", "1,x", "3,4"]).is_err());
    }
}
