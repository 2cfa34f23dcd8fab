extern crate std;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use heapsort::bench::random_input;

const SIZE: usize = 10_000;

fn get_instance() -> Vec<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    random_input(&mut rng, SIZE)
}

mod iai_wrappers {
    use iai::black_box;

    use heapsort::comparator::Less;
    use heapsort::heap::build_heap;
    use heapsort::heap::heapsort_by;

    pub fn iai_trace_baseline() {
        let v = super::get_instance();

        let _ = black_box(v);
    }
    pub fn iai_trace_build_heap() {
        let mut v = super::get_instance();

        build_heap(black_box(&mut v), &mut Less);

        let _ = black_box(v);
    }
    pub fn iai_trace_heapsort() {
        let mut v = super::get_instance();

        heapsort_by(black_box(&mut v), &mut Less);

        let _ = black_box(v);
    }
    pub fn iai_trace_sort_unstable() {
        let mut v = super::get_instance();

        black_box(&mut v).sort_unstable();

        let _ = black_box(v);
    }
}

fn main() {
    let benchmarks: &[&(&'static str, fn())] = &[
        &("iai_trace_baseline", iai_wrappers::iai_trace_baseline),
        &("iai_trace_build_heap", iai_wrappers::iai_trace_build_heap),
        &("iai_trace_heapsort", iai_wrappers::iai_trace_heapsort),
        &("iai_trace_sort_unstable", iai_wrappers::iai_trace_sort_unstable),
    ];
    ::iai::runner(benchmarks);
}
