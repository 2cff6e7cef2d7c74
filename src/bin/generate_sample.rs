use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Launch {
    flight: i64,
    site: &'static str,
    outcome: i64,
    payload: f64,
    booster: String,
    category: &'static str,
}

/// (site, share of launches)
const SITES: [(&str, f64); 4] = [
    ("CCAFS LC-40", 0.46),
    ("KSC LC-39A", 0.75),
    ("VAFB SLC-4E", 0.90),
    ("CCAFS SLC-40", 1.00),
];

/// (category, first flight number, base success probability)
const BOOSTERS: [(&str, i64, f64); 5] = [
    ("v1.0", 1, 0.2),
    ("v1.1", 6, 0.35),
    ("FT", 21, 0.65),
    ("B4", 42, 0.55),
    ("B5", 50, 0.9),
];

fn generate(n: i64, rng: &mut SimpleRng) -> Vec<Launch> {
    (1..=n)
        .map(|flight| {
            let roll = rng.next_f64();
            let site = SITES
                .iter()
                .find(|(_, share)| roll < *share)
                .map_or(SITES[0].0, |&(s, _)| s);

            let (category, first, base) = BOOSTERS
                .iter()
                .rev()
                .find(|(_, first, _)| flight >= *first)
                .copied()
                .unwrap_or(BOOSTERS[0]);
            let serial = 1000 + flight - first;
            let booster = format!("F9 {category}  B{serial}.{}", rng.pick(&[1, 1, 2]));

            // Heavier payloads are a little less likely to land.
            let payload = (rng.next_f64() * 9600.0 * 10.0).round() / 10.0;
            let p_success = (base - payload / 40_000.0).clamp(0.05, 0.95);
            let outcome = i64::from(rng.next_f64() < p_success);

            Launch {
                flight,
                site,
                outcome,
                payload,
                booster,
                category,
            }
        })
        .collect()
}

fn write_csv(path: &str, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version",
        "Booster Version Category",
    ])?;
    for l in launches {
        writer.write_record([
            l.flight.to_string(),
            l.site.to_string(),
            l.outcome.to_string(),
            format!("{:.1}", l.payload),
            l.booster.clone(),
            l.category.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, launches: &[Launch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.outcome))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.booster.as_str()))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.category))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate(56, &mut rng);

    write_csv("spacex_launch_dash.csv", &launches)?;
    write_parquet("spacex_launch_dash.parquet", &launches)?;

    let successes = launches.iter().filter(|l| l.outcome == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to spacex_launch_dash.csv and spacex_launch_dash.parquet",
        launches.len()
    );
    Ok(())
}
