//! Exercises real thread pinning against the live kernel. Linux only - these tests change
//! the affinity of the threads they run on and restore it afterwards.

#![cfg(all(target_os = "linux", not(miri)))]

use cpu_affinity::Affinity;
use scopeguard::defer;

#[test]
fn pinning_to_one_processor_constrains_execution() {
    let affinity = Affinity::new();

    let original = affinity.current().unwrap();
    defer! {
        Affinity::new().set(&original).ok();
    }

    // Pin to the first processor we are actually allowed to use; the process may already
    // be confined (containers, taskset) so processor 0 is not guaranteed available.
    let target = affinity
        .current()
        .unwrap()
        .processors()
        .unwrap()
        .first()
        .copied()
        .unwrap();

    let mask = affinity.mask_for(&[target]).unwrap();
    affinity.set(&mask).unwrap();

    for _ in 0..100 {
        assert_eq!(affinity.current_processor().unwrap(), target);
        std::thread::yield_now();
    }
}

#[test]
fn set_then_get_round_trips_the_pinned_set() {
    let affinity = Affinity::new();

    let original = affinity.current().unwrap();
    defer! {
        Affinity::new().set(&original).ok();
    }

    let target = original.processors().unwrap().first().copied().unwrap();

    let mask = affinity.mask_for(&[target]).unwrap();
    affinity.set(&mask).unwrap();

    // The kernel may clamp but never widen: what we read back is exactly the single
    // processor we asked for.
    let observed = affinity.current().unwrap();
    assert_eq!(observed.processors().unwrap(), vec![target]);
}

#[test]
fn widening_back_to_the_original_set_is_accepted() {
    let affinity = Affinity::new();

    let original = affinity.current().unwrap();
    defer! {
        Affinity::new().set(&original).ok();
    }

    let target = original.processors().unwrap().first().copied().unwrap();
    affinity.set(&affinity.mask_for(&[target]).unwrap()).unwrap();

    affinity.set(&original).unwrap();

    let observed = affinity.current().unwrap();
    assert_eq!(observed.processors(), original.processors());
}
