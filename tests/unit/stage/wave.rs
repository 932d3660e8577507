use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn wave_is_deterministic_per_seed() {
    let mut a = Wave::new(7);
    let mut b = Wave::new(7);
    for _ in 0..200 {
        assert_eq!(a.sample(0.05), b.sample(0.05));
    }
}

#[test]
fn wave_stays_in_unit_interval() {
    let mut wave = Wave::new(42);
    for _ in 0..2000 {
        let v = wave.sample(0.03);
        assert!((0.0..=1.0).contains(&v), "wave escaped: {v}");
    }
}

#[test]
fn different_seeds_diverge() {
    let mut a = Wave::new(1);
    let mut b = Wave::new(2);
    let diverged = (0..100).any(|_| (a.sample(0.1) - b.sample(0.1)).abs() > 1e-9);
    assert!(diverged);
}

#[test]
fn jitter_offset_is_bounded_by_amplitude() {
    let mut jitter = Jitter::new(5);
    for _ in 0..500 {
        jitter.advance(0.05);
        let v = jitter.offset();
        assert!(v.x.abs() <= Jitter::DEFAULT_AMPLITUDE / 2.0);
        assert!(v.y.abs() <= Jitter::DEFAULT_AMPLITUDE / 2.0);
    }
}
