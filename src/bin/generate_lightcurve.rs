use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};

/// First epoch of the synthetic season (HJD).
const START_HJD: f64 = 2455260.85336;
const PERIOD_DAYS: f64 = 3.217;
const MEAN_MAG: f64 = 19.8;
const AMPLITUDE: f64 = 0.35;

/// Minimal deterministic PRNG (xoshiro256**)
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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Sawtooth-like pulsation: fast rise, slow decline.
fn model_magnitude(hjd: f64) -> f64 {
    let phase = ((hjd - START_HJD) / PERIOD_DAYS).rem_euclid(1.0);
    let shape = if phase < 0.2 {
        1.0 - phase / 0.2
    } else {
        (phase - 0.2) / 0.8
    };
    MEAN_MAG + AMPLITUDE * (shape - 0.5)
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_lightcurve.dat".to_string());
    let mut rng = SimpleRng::new(42);

    let file = File::create(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    let mut out = BufWriter::new(file);

    // One season: up to two visits per night, skipping nights lost to weather.
    let mut rows = 0usize;
    for night in 0..150 {
        if rng.next_f64() < 0.25 {
            continue;
        }
        let visits = if rng.next_f64() < 0.3 { 2 } else { 1 };
        for _ in 0..visits {
            let hjd = START_HJD + night as f64 + rng.uniform(-0.15, 0.15);
            let seeing = rng.uniform(0.8, 5.0);
            let sky = rng.gauss(680.0, 40.0);
            // Noise grows with seeing.
            let err = 0.04 + 0.02 * seeing + rng.uniform(0.0, 0.02);
            let mag = model_magnitude(hjd) + rng.gauss(0.0, err);

            writeln!(out, "{hjd:.5} {mag:.3} {err:.3} {seeing:.2} {sky:.1}")?;
            rows += 1;
        }
    }
    out.flush()?;

    println!("Wrote {rows} observations to {output_path}");
    Ok(())
}
