/// Trace tool
///
/// Generates `docs/heapsort_report.org`, showing the array after build-heap
/// and after every extraction of a heap-sort.
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anstream::println;
use clap::Parser;
use indoc::indoc;
use owo_colors::OwoColorize;

use heapsort::bench::SortOrder;
use heapsort::comparator::Comparator;
use heapsort::comparator::Greater;
use heapsort::comparator::Less;
use heapsort::heap::build_heap;
use heapsort::heap::extract_root;
use heapsort::heap::is_heap;

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(long_version = heapsort::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(
        short,
        long,
        env = "HEAPSORT_REPORT",
        default_value = "docs/heapsort_report.org"
    )]
    pub output: PathBuf,

    /// Values to sort, comma separated.
    #[arg(
        short,
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        default_values_t = [15i64, 31, 7, 24, 5, 19, 46, 2, 10, 29]
    )]
    pub input: Vec<i64>,

    #[arg(long, value_enum, default_value_t = SortOrder::Ascending)]
    pub order: SortOrder,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

fn write_row<W: std::io::Write>(
    out: &mut BufWriter<W>,
    label: &str,
    a: &[i64],
    len: usize,
) -> std::io::Result<()> {
    let heap: Vec<String> = a[..len].iter().map(i64::to_string).collect();
    let tail: Vec<String> = a[len..].iter().map(i64::to_string).collect();
    writeln!(out, "| {label:12} | {:40} | {:40} |", heap.join(" "), tail.join(" "))
}

fn write_trace<W, C>(out: &mut BufWriter<W>, input: &[i64], mut cmp: C) -> std::io::Result<()>
where
    W: Write,
    C: Comparator<i64> + Display,
{
    writeln!(out, "* Heap-sort with ~{cmp}~")?;
    writeln!(out, "| {:12} | {:40} | {:40} |", "Step", "Heap", "Sorted")?;
    let mut a = input.to_vec();
    write_row(out, "input", &a, a.len())?;

    build_heap(&mut a, &mut cmp);
    debug_assert!(is_heap(&a, &mut cmp));
    write_row(out, "build-heap", &a, a.len())?;

    let mut len = a.len();
    let mut step = 0usize;
    while len > 1 {
        len = extract_root(&mut a, len, &mut cmp);
        step += 1;
        write_row(out, &format!("extract {step}"), &a, len)?;
    }
    writeln!(out)?;

    writeln!(out, "* Result")?;
    let sorted: Vec<String> = a.iter().map(i64::to_string).collect();
    writeln!(out, "#+begin_src\n{}\n#+end_src", sorted.join(", "))?;
    Ok(())
}

fn write_report<W: Write>(out: &mut BufWriter<W>, args: &Args) -> std::io::Result<()> {
    writeln!(out, ":PROPERTIES:")?;
    writeln!(out, ":VERSION: {:?}", heapsort::build::PKG_VERSION)?;
    writeln!(out, ":GIT_BRANCH: {:?}", shadow_rs::branch())?;
    writeln!(out, ":BUILD_IS_DEBUG: {}", shadow_rs::is_debug())?;
    if heapsort::build::GIT_CLEAN {
        writeln!(out, ":GIT_STATUS: CLEAN")?;
    } else {
        writeln!(out, ":GIT_STATUS: DIRTY")?;
    }
    writeln!(out, ":DATE: {}", chrono::Local::now().to_rfc3339())?;
    writeln!(out, ":END:")?;
    writeln!(out, "#+title: Heap-sort trace")?;
    writeln!(out)?;
    write!(
        out,
        "{}",
        indoc! {"
            Each row shows the live heap, then the tail holding extracted
            elements. Every extraction swaps the root into the tail and sifts
            the new root down.

        "}
    )?;

    match args.order {
        SortOrder::Ascending => write_trace(out, &args.input, Less)?,
        SortOrder::Descending => write_trace(out, &args.input, Greater)?,
    }

    out.flush()
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    args.color.write_global();
    println!("Writing report to {:?}", args.output.green());

    if let Some(dir) = args.output.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }
    let file = File::create(&args.output)?;
    let mut r = BufWriter::new(file);
    write_report(&mut r, &args)?;

    Ok(())
}
