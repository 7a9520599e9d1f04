//! Command-line launch options for the desktop app.

use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_MAP_DIR: &str = "assets/maps";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchOptions {
    pub seed: SeedChoice,
    pub map_dir: PathBuf,
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

/// Reads `--seed N` and `--maps DIR` (either flag also as `--flag=value`). Unknown arguments
/// are ignored.
pub fn parse_launch_args(args: &[String], generated_seed: u64) -> Result<LaunchOptions, String> {
    let mut seed = None;
    let mut map_dir = None;
    let mut index = 1usize;

    while index < args.len() {
        let argument = args[index].as_str();
        let (flag, inline) = match argument.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (argument, None),
        };
        if flag != "--seed" && flag != "--maps" {
            index += 1;
            continue;
        }

        let value = match inline {
            Some(value) => value,
            None => {
                index += 1;
                let value = args.get(index).map(String::as_str);
                value.ok_or_else(|| format!("missing value for {flag}"))?
            }
        };
        index += 1;

        if flag == "--seed" {
            if seed.is_some() {
                return Err("seed provided more than once".to_string());
            }
            seed = Some(parse_seed_value(value)?);
        } else {
            map_dir = Some(PathBuf::from(value));
        }
    }

    Ok(LaunchOptions {
        seed: seed.map_or(SeedChoice::Generated(generated_seed), SeedChoice::Cli),
        map_dir: map_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_MAP_DIR)),
    })
}

fn parse_seed_value(raw_value: &str) -> Result<u64, String> {
    raw_value.parse::<u64>().map_err(|_| format!("seed value '{raw_value}' must be a number"))
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
