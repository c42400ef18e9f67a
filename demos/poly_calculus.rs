//! Polynomial Calculus
//!
//! This example demonstrates `Poly` operations including:
//! - Building polynomials term by term
//! - Evaluation, including fractional and negative exponents
//! - Derivatives and integrals
//! - The term capacity limit
//!
//! Run with: cargo run --example poly_calculus

use critpoly::{Poly, PolyError};

fn main() -> Result<(), PolyError> {
    println!("=== Power-Term Polynomials ===\n");

    building()?;
    calculus()?;
    capacity();

    Ok(())
}

/// Build and evaluate polynomials
fn building() -> Result<(), PolyError> {
    println!("--- Building and Evaluating ---\n");

    // f(x) = x^2
    let mut f = Poly::new();
    f.add_term(1.0, 2.0)?;
    println!("f(x) = {}", f);
    println!("f(3) = {}", f.eval(3.0));

    // g(x) = 2x^0.5 - x^-1 + 4
    let g = Poly::from_terms([(2.0, 0.5), (-1.0, -1.0), (4.0, 0.0)])?;
    println!("g(x) = {}", g);
    println!("g(4) = {}", g.eval(4.0));
    println!("g(0) = {}  (negative exponent at zero)", g.eval(0.0));
    println!("g(-1) = {}  (fractional exponent of a negative)", g.eval(-1.0));

    println!("empty = {}", Poly::new());
    println!();
    Ok(())
}

/// Derivatives and integrals
fn calculus() -> Result<(), PolyError> {
    println!("--- Derivatives and Integrals ---\n");

    // f(x) = x^3 - 3x + 2
    let f = Poly::from_terms([(1.0, 3.0), (-3.0, 1.0), (2.0, 0.0)])?;
    println!("f(x)   = {}", f);
    println!("f'(x)  = {}", f.derivative());
    println!("f''(x) = {}", f.derivative().derivative());

    println!("∫f dx (C = 0) = {}", f.integral(0.0)?);
    println!("∫f dx (C = 5) = {}", f.integral(5.0)?);

    let round_trip = f.integral(0.0)?.derivative();
    println!("d/dx ∫f dx    = {}", round_trip);

    // 1/x has no power-rule antiderivative
    let recip = Poly::from_terms([(1.0, -1.0)])?;
    println!("∫x^-1 dx      = {}", recip.integral(0.0)?);
    println!();
    Ok(())
}

/// The 100-term limit
fn capacity() {
    println!("--- Capacity ---\n");

    let mut p = Poly::new();
    let mut rejected = 0;
    for i in 0..=Poly::MAX_TERMS {
        if let Err(e) = p.add_term(1.0, i as f64) {
            println!("term {} rejected: {}", i, e);
            rejected += 1;
        }
    }
    println!("terms held: {}, rejected: {}", p.len(), rejected);
}
