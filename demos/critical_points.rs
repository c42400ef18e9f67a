//! Critical and Inflection Points
//!
//! This example scans a few polynomials for the zeros of their first and
//! second derivatives.
//!
//! Run with: RUST_LOG=critpoly=debug cargo run --example critical_points

use critpoly::{find_points, Order, PointFinder, Poly, ScanConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Point Search on [-10, 10] ===\n");

    let samples = [
        Poly::from_terms([(1.0, 2.0)])?,
        Poly::from_terms([(1.0, 3.0), (-3.0, 1.0)])?,
        Poly::from_terms([(1.0, 4.0), (-8.0, 2.0)])?,
        Poly::from_terms([(2.0, 1.0), (1.0, 0.0)])?,
    ];

    for f in &samples {
        println!("f(x) = {}", f);
        println!("  critical:   {:?}", find_points(f, 1)?);
        println!("  inflection: {:?}", find_points(f, 2)?);
    }

    println!("\n--- Custom grid ---\n");

    // f'(x) = 2(x - 20) only vanishes outside the default range
    let f = Poly::from_terms([(1.0, 2.0), (-40.0, 1.0)])?;
    println!("f(x) = {}", f);
    println!("  default grid: {:?}", find_points(&f, 1)?);

    let finder = PointFinder::new(ScanConfig::default().with_range(0.0, 30.0))?;
    println!("  [0, 30]:      {:?}", finder.find(&f, Order::Critical));

    println!("\n--- Invalid order ---\n");
    match find_points(&f, 3) {
        Ok(points) => println!("unexpected: {:?}", points),
        Err(e) => println!("error: {}", e),
    }

    Ok(())
}
