//! Writes a sample comma-decimal CSV in the format the viewer reads.
//!
//! Usage: `generate_sample [output.csv]`

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// `20:42:27,123456` for `micros` microseconds after the start time.
fn clock(start_secs: u64, micros: u64) -> String {
    let total = start_secs + micros / 1_000_000;
    format!(
        "{:02}:{:02}:{:02},{:06}",
        total / 3600 % 24,
        total / 60 % 60,
        total % 60,
        micros % 1_000_000
    )
}

fn decimal_comma(v: f64) -> String {
    format!("{v:.4}").replace('.', ",")
}

fn main() {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_timeseries.csv".to_string());
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::Writer::from_path(&output_path).expect("Failed to create output file");
    writer
        .write_record(["Time", "Actual", "Expected", "Error"])
        .expect("Failed to write header");

    let start = 20 * 3600 + 42 * 60 + 27;
    let rows = 600;
    for i in 0..rows {
        let t = i as f64 * 0.1;
        let expected = 50.0 + 20.0 * (t / 5.0).sin();
        let actual = expected + rng.gauss(0.0, 1.5);

        let mut actual_cell = decimal_comma(actual);
        // a few corrupted cells, read back as gaps
        if i % 97 == 50 {
            actual_cell = "n/d".to_string();
        }

        writer
            .write_record([
                clock(start, i * 100_000),
                actual_cell,
                decimal_comma(expected),
                decimal_comma(actual - expected),
            ])
            .expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {rows} rows to {output_path}");
}
