//! Timing harness for heap-sort on random inputs.
//!
//! Each trial sorts a freshly allocated buffer of random `u32`s, so no trial
//! inherits a warm cache from the previous one. Inputs come from a `ChaCha8Rng`
//! seeded from the run seed and the trial size, which makes every size
//! reproducible on its own.

use std::fmt;
use std::io::Write;
use std::mem::size_of;
use std::time::Duration;

use derive_more::Display;
use hrsw::Stopwatch;
use human_duration::human_duration;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use size::Size;
use thiserror::Error;
use thousands::Separable;
use tqdm::tqdm;

use crate::comparator::Greater;
use crate::comparator::Less;
use crate::heap::heapsort_by;
use crate::heap::is_sorted_by;

/// Input sizes timed when none are given.
pub const DEFAULT_SIZES: [usize; 16] = [
    1, 5, 10, 50, 100, 500, 1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000,
    2_000_000, 3_000_000, 5_000_000,
];

/// Trials slower than this get a warning.
const SLOW_TRIAL: Duration = Duration::from_secs(1);

/// Direction the inputs get sorted in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display, clap::ValueEnum)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    #[display("ascending")]
    Ascending,
    /// Largest first.
    #[display("descending")]
    Descending,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No input sizes to benchmark")]
    NoSizes,
    #[error("Repetitions must be at least 1")]
    ZeroRepetitions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    pub sizes: Vec<usize>,
    pub seed: u64,
    /// Times each size is sorted. The fastest run is kept.
    pub repetitions: u32,
    pub order: SortOrder,
    /// Shows a progress bar on stderr while timing.
    pub progress: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            seed: 0,
            repetitions: 1,
            order: SortOrder::default(),
            progress: false,
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sizes.is_empty() {
            return Err(ConfigError::NoSizes);
        }
        if self.repetitions == 0 {
            return Err(ConfigError::ZeroRepetitions);
        }
        Ok(())
    }

    /// Seed for the inputs of a given size.
    #[must_use]
    pub fn trial_seed(&self, size: usize) -> u64 {
        self.seed ^ (size as u64)
    }
}

/// How long sorting `size` elements took.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Trial {
    pub size: usize,
    pub elapsed: Duration,
}

impl Trial {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / 1_000_000.0
    }
}

/// A CSV row, `size,elapsed_ms`.
impl fmt::Display for Trial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.size, self.elapsed_ms())
    }
}

/// `size` uniformly random values.
pub fn random_input<R: Rng>(rng: &mut R, size: usize) -> Vec<u32> {
    (0..size).map(|_| rng.random()).collect()
}

/// Sorts one fresh random buffer of `size` elements and times it.
///
/// Only the sort is timed, input generation is not.
pub fn run_trial<R: Rng>(rng: &mut R, size: usize, order: SortOrder) -> Trial {
    if size == 0 {
        return Trial {
            size,
            elapsed: Duration::ZERO,
        };
    }

    let mut input = random_input(rng, size);

    let mut stopwatch = Stopwatch::new_started();
    match order {
        SortOrder::Ascending => heapsort_by(&mut input, &mut Less),
        SortOrder::Descending => heapsort_by(&mut input, &mut Greater),
    }
    stopwatch.stop();
    let elapsed = stopwatch.elapsed();

    debug_assert!(match order {
        SortOrder::Ascending => is_sorted_by(&input, &mut Less),
        SortOrder::Descending => is_sorted_by(&input, &mut Greater),
    });

    log::debug!(
        "Sorted {} elements ({}) {order} in {}",
        size.separate_with_commas(),
        Size::from_bytes(size * size_of::<u32>()),
        human_duration(&elapsed)
    );
    if elapsed > SLOW_TRIAL {
        log::warn!(
            "Sorting {} elements took {}",
            size.separate_with_commas(),
            human_duration(&elapsed)
        );
    }

    Trial { size, elapsed }
}

/// Best of `config.repetitions` trials of the given size.
///
/// Every repetition sorts the same input, regenerated into a new buffer.
pub fn run_size(config: &BenchConfig, size: usize) -> Trial {
    let mut best: Option<Trial> = None;
    for _ in 0..config.repetitions {
        let mut rng = ChaCha8Rng::seed_from_u64(config.trial_seed(size));
        let trial = run_trial(&mut rng, size, config.order);
        best = match best {
            Some(b) if b.elapsed <= trial.elapsed => Some(b),
            _ => Some(trial),
        };
    }
    best.unwrap_or(Trial {
        size,
        elapsed: Duration::ZERO,
    })
}

/// Runs every configured size, in order.
pub fn run_trials(config: &BenchConfig) -> Result<Vec<Trial>, ConfigError> {
    config.validate()?;
    log::info!(
        "Timing {} sizes ({} repetitions, seed {}, {})",
        config.sizes.len(),
        config.repetitions,
        config.seed,
        config.order
    );

    let sizes: Box<dyn Iterator<Item = &usize> + '_> = if config.progress {
        Box::new(tqdm(config.sizes.iter()).desc(Some("Sorting".to_string())))
    } else {
        Box::new(config.sizes.iter())
    };
    let trials: Vec<Trial> = sizes.map(|&s| run_size(config, s)).collect();

    let total: Duration = trials.iter().map(|t| t.elapsed).sum();
    log::info!("Spent {} sorting", human_duration(&total));
    Ok(trials)
}

/// Writes one CSV row per trial.
pub fn write_csv<W: Write>(mut out: W, trials: &[Trial]) -> std::io::Result<()> {
    for t in trials {
        writeln!(out, "{t}")?;
    }
    out.flush()
}
