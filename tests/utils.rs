pub fn assert_float_eq_f64(f1: f64, f2: f64) {
    assert!(
        (f1 - f2).abs() < 1e-12,
        "floats not almost equal, {} vs {}",
        f1,
        f2
    );
}
