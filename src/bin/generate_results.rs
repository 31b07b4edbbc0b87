use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Write synthetic `train_*` / `valid_*` result files for trying out
/// `loss-distance`.
#[derive(Parser, Debug)]
#[command(name = "generate_results")]
struct Args {
    /// Output folder; `train/` and `valid/` are created inside
    #[arg(default_value = "sample_results")]
    out_dir: PathBuf,

    /// Runs written per distance and partition
    #[arg(long, default_value_t = 5)]
    runs: usize,

    /// Rows per result file
    #[arg(long, default_value_t = 200)]
    rows: usize,

    /// Store values as log10 (`log_` headers)
    #[arg(long)]
    log: bool,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const DISTANCES: [u32; 8] = [5, 10, 20, 30, 40, 60, 80, 100];

/// Box-Muller transform for normal distribution
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-15);
    let u2: f64 = rng.random();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

fn write_result_file(path: &Path, args: &Args, noise: f64, rng: &mut StdRng) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    if args.log {
        writer.write_record(["log_target", "log_predicted"])?;
    } else {
        writer.write_record(["target", "predicted"])?;
    }

    for _ in 0..args.rows {
        let target: f64 = rng.random_range(1.0..50.0);
        let predicted = target + gauss(rng, 0.0, noise);
        let (t, p) = if args.log {
            (target.log10(), predicted.max(1e-3).log10())
        } else {
            (target, predicted)
        };
        writer.write_record([t.to_string(), p.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut written = 0usize;

    for (key, base_noise) in [("train", 0.5), ("valid", 0.8)] {
        let dir = args.out_dir.join(key);
        std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

        for &distance in &DISTANCES {
            let noise = base_noise * (1.0 + distance as f64 / 25.0);
            for run in 0..args.runs {
                let path = dir.join(format!("{key}_run{run}_L{distance}m_pred.csv"));
                write_result_file(&path, &args, noise, &mut rng)?;
                written += 1;
            }
        }

        // No distance token: skipped by the reader.
        let baseline = dir.join(format!("{key}_baseline_Lm.csv"));
        write_result_file(&baseline, &args, base_noise, &mut rng)?;
        written += 1;
    }

    println!("Wrote {written} result files to {}", args.out_dir.display());
    Ok(())
}
