
pub mod xorshift;

pub fn db_to_linear(db:f64) -> f64 { 10.0_f64.powf(db / 10.0) }

#[test]
fn test_db_to_linear() {
	assert!((db_to_linear(0.0) - 1.0).abs() < 1.0e-12);
	assert!((db_to_linear(30.0) - 1000.0).abs() < 1.0e-9);
	assert!((db_to_linear(45.0) - 31622.776601683792).abs() < 1.0e-6);
}
