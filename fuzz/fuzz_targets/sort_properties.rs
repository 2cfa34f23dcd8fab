#![no_main]

use libfuzzer_sys::fuzz_target;

use heapsort::comparator::Greater;
use heapsort::comparator::Less;
use heapsort::heap::build_heap;
use heapsort::heap::extract_root;
use heapsort::heap::heapsort_by;
use heapsort::heap::is_heap;
use heapsort::heap::is_sorted_by;

fuzz_target!(|data: &[u8]| {
    let mut expected = data.to_vec();
    expected.sort_unstable();

    // Ascending
    let mut a = data.to_vec();
    heapsort_by(&mut a, &mut Less);
    assert_eq!(a, expected);

    // Sorting again changes nothing
    heapsort_by(&mut a, &mut Less);
    assert_eq!(a, expected);

    // Descending
    let mut d = data.to_vec();
    heapsort_by(&mut d, &mut Greater);
    assert!(is_sorted_by(&d, &mut Greater));
    d.reverse();
    assert_eq!(d, expected);

    // Extracting every root sorts too
    let mut h = data.to_vec();
    build_heap(&mut h, &mut Less);
    assert!(is_heap(&h, &mut Less));
    let mut len = h.len();
    while len > 0 {
        len = extract_root(&mut h, len, &mut Less);
    }
    assert_eq!(h, expected);
});
