//! Heap-sort timing tool
//!
//! Prints `size,elapsed_ms` for every requested input size.
use std::io::{BufWriter, ErrorKind};

use clap::Parser;
use log::LevelFilter;

use heapsort::bench::BenchConfig;
use heapsort::bench::ConfigError;
use heapsort::bench::DEFAULT_SIZES;
use heapsort::bench::SortOrder;
use heapsort::bench::Trial;
use heapsort::bench::run_trials;
use heapsort::bench::write_csv;

#[cfg(all(not(target_env = "msvc"), not(feature = "mem_profile")))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(feature = "mem_profile")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(long_version = heapsort::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Input sizes to time, comma separated.
    #[arg(
        short,
        long,
        env = "HEAPSORT_SIZES",
        value_delimiter = ',',
        default_values_t = DEFAULT_SIZES
    )]
    pub sizes: Vec<usize>,

    /// Seed for the random inputs.
    #[arg(long, env = "HEAPSORT_SEED", default_value_t = 0u64)]
    pub seed: u64,

    /// Times each size is sorted, the fastest run is reported.
    #[arg(short, long, default_value_t = 1u32)]
    pub repetitions: u32,

    #[arg(long, value_enum, default_value_t = SortOrder::Ascending)]
    pub order: SortOrder,

    #[arg(long, env = "HEAPSORT_LOG", default_value_t = LevelFilter::Warn)]
    pub log_level: LevelFilter,

    /// Shows a progress bar on stderr.
    #[arg(long)]
    pub progress: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

impl Args {
    fn config(&self) -> BenchConfig {
        BenchConfig {
            sizes: self.sizes.clone(),
            seed: self.seed,
            repetitions: self.repetitions,
            order: self.order,
            progress: self.progress,
        }
    }
}

fn main() -> std::io::Result<()> {
    #[cfg(feature = "mem_profile")]
    let _profiler = dhat::Profiler::new_heap();
    #[cfg(feature = "coz_profile")]
    coz::thread_init();

    let args = Args::parse();
    args.color.write_global();
    heapsort::logger::init(args.log_level).map_err(std::io::Error::other)?;

    let config = args.config();
    let invalid = |e: ConfigError| std::io::Error::new(ErrorKind::InvalidInput, e);
    log::info!("heapsort {}", heapsort::build::PKG_VERSION);

    let trials: Vec<Trial> = run_trials(&config).map_err(invalid)?;

    let stdout = std::io::stdout();
    write_csv(BufWriter::new(stdout.lock()), &trials)
}
