use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// One row of `healthexp.csv`, in file column order.
#[derive(Serialize)]
struct Row {
    age: u32,
    gender: &'static str,
    expenditure: f64,
    smoker: &'static str,
    region: &'static str,
    timestamp: String,
}

/// Box-Muller transform for normal distribution
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen_range(1e-15..1.0);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

fn main() {
    let mut rng = StdRng::seed_from_u64(42);

    let regions = ["northeast", "northwest", "southeast", "southwest"];
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .expect("valid start date");

    let output_path = "healthexp.csv";
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output_path)
        .expect("Failed to create output file");

    let n_rows = 500;
    for i in 0..n_rows {
        let age: u32 = rng.gen_range(18..=100);
        let smoker = rng.gen_bool(0.2);
        let gender = if rng.gen_bool(0.5) { "Male" } else { "Female" };

        // Spending rises with age; smokers spend markedly more.
        let base = 300.0 + 28.0 * age as f64 + if smoker { 1400.0 } else { 0.0 };
        let expenditure = gauss(&mut rng, base, 350.0).clamp(50.0, 5000.0);

        let row = Row {
            age,
            gender,
            expenditure: (expenditure * 100.0).round() / 100.0,
            smoker: if smoker { "Yes" } else { "No" },
            region: regions[rng.gen_range(0..regions.len())],
            timestamp: (start + Duration::hours(i as i64 * 3))
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        };
        writer.serialize(row).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {n_rows} expenditure records to {output_path}");
}
