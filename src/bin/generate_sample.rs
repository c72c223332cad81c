use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

/// Strain decays by this factor each bar before new stress is added.
const STRAIN_MEMORY: f64 = 0.97;
const BARS: usize = 750;

/// One row in the same layout the rupture engine writes.
#[derive(Debug, Serialize)]
struct Row {
    timestamp: String,
    close: f64,
    volume: f64,
    r_combined: f64,
    strain: f64,
    capacity: f64,
    rho: f64,
    state: &'static str,
    candidate: u8,
    confirmed: u8,
}

/// Minimal deterministic PRNG (xoshiro256**). A fixed seed keeps generated
/// files reproducible.
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn next_weekday(date: NaiveDate) -> NaiveDate {
    let mut next = date + Duration::days(1);
    while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
        next += Duration::days(1);
    }
    next
}

fn state_for(rho: f64) -> &'static str {
    match rho {
        r if r >= 1.0 => "Rupture",
        r if r >= 0.85 => "Critical",
        r if r >= 0.60 => "Elevated",
        _ => "Stable",
    }
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::with_capacity(BARS);
    let mut date = NaiveDate::from_ymd_opt(2008, 1, 2).unwrap_or_default();
    let mut close = 146.0;
    let mut strain = 0.0;

    for bar in 0..BARS {
        // Volatility clusters in a few stress windows.
        let stressed = matches!(bar % 250, 180..=230);
        let sigma = if stressed { 0.03 } else { 0.01 };
        let ret = rng.gauss(0.0002, sigma);
        close *= 1.0 + ret;

        let r_combined = (ret / 0.01).abs() + rng.gauss(0.0, 0.2);
        strain = STRAIN_MEMORY * strain + r_combined.max(0.0) * 0.05;
        let capacity = 1.0 + 0.2 * ((bar as f64) / 120.0).sin().abs();
        let rho = strain / capacity;

        let confirmed = rho >= 1.0;
        rows.push(Row {
            timestamp: date.format("%Y-%m-%d").to_string(),
            close,
            volume: 1.0e6 * (1.0 + rng.next_f64()),
            r_combined,
            strain,
            capacity,
            rho,
            state: state_for(rho),
            candidate: u8::from(rho >= 0.85),
            confirmed: u8::from(confirmed),
        });

        if confirmed {
            // A confirmed rupture releases the accumulated strain.
            strain *= 0.3;
        }
        date = next_weekday(date);
    }
    rows
}

fn main() -> Result<()> {
    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output/rupture_timeseries.csv"));
    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    for row in &rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;

    let confirmed = rows.iter().filter(|r| r.confirmed == 1).count();
    println!(
        "Wrote {} bars ({confirmed} confirmed events) to {}",
        rows.len(),
        output_path.display()
    );
    Ok(())
}
