//! Math function and constant allow-list
//!
//! The only callables an expression can reach. All entries are pure
//! `f64 → f64` (or `f64 × f64 → f64`) and total: domain violations produce
//! NaN per IEEE-754 rather than errors, so evaluation never fails.

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub static UNARY: Lazy<HashMap<&'static str, fn(f64) -> f64>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, fn(f64) -> f64> = HashMap::new();
    m.insert("abs", f64::abs);
    m.insert("sqrt", f64::sqrt);
    m.insert("exp", f64::exp);
    m.insert("log", f64::ln);
    m.insert("log10", f64::log10);
    m.insert("log2", f64::log2);
    m.insert("sin", f64::sin);
    m.insert("cos", f64::cos);
    m.insert("tan", f64::tan);
    m.insert("asin", f64::asin);
    m.insert("acos", f64::acos);
    m.insert("atan", f64::atan);
    m.insert("sinh", f64::sinh);
    m.insert("cosh", f64::cosh);
    m.insert("tanh", f64::tanh);
    m.insert("floor", f64::floor);
    m.insert("ceil", f64::ceil);
    m.insert("round", f64::round);
    m.insert("trunc", f64::trunc);
    m.insert("degrees", f64::to_degrees);
    m.insert("radians", f64::to_radians);
    m
});

pub static BINARY: Lazy<HashMap<&'static str, fn(f64, f64) -> f64>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, fn(f64, f64) -> f64> = HashMap::new();
    m.insert("atan2", f64::atan2);
    m.insert("pow", f64::powf);
    m.insert("fmod", |a, b| a % b);
    m.insert("hypot", f64::hypot);
    m.insert("min", f64::min);
    m.insert("max", f64::max);
    m.insert("copysign", f64::copysign);
    m
});

pub static CONSTANTS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("pi", std::f64::consts::PI);
    m.insert("tau", std::f64::consts::TAU);
    m.insert("e", std::f64::consts::E);
    m.insert("inf", f64::INFINITY);
    m.insert("nan", f64::NAN);
    m
});
