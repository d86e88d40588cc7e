
use std::f64::consts;

// log(0) guard for Box-Muller
pub const UNIFORM_FLOOR:f64 = 1.0e-12;

const TWO_POW_32:f64 = 4294967296.0;

/// Deterministic xorshift32 generator.  The draw sequence for a given seed is part of the
/// output contract: every normal draw consumes exactly two uniform draws, u1 then u2.
#[derive(Debug, Clone)]
pub struct Xorshift32 {
	state: u32,
}

impl Xorshift32 {

	// State 0 is a fixed point of xorshift, so a zero seed runs as seed 1
	pub fn new(seed:u32) -> Self {
		Self{ state: if seed == 0 { 1 } else { seed } }
	}

	pub fn state(&self) -> u32 { self.state }

	pub fn next_u32(&mut self) -> u32 {
		let mut x = self.state;
		x ^= x << 13;
		x ^= x >> 17;
		x ^= x << 5;
		self.state = x;
		x
	}

	/// Uniform in [0,1)
	pub fn next_uniform(&mut self) -> f64 {
		(self.next_u32() as f64) / TWO_POW_32
	}

	/// Approximately N(0,1), cosine branch of Box-Muller only
	pub fn next_normal(&mut self) -> f64 {
		let mut u1:f64 = self.next_uniform();
		let u2:f64 = self.next_uniform();
		if u1 < UNIFORM_FLOOR { u1 = UNIFORM_FLOOR; }
		(-2.0 * u1.ln()).sqrt() * (2.0 * consts::PI * u2).cos()
	}

}

#[test]
fn test_known_states_from_seed_one() {
	let mut rng = Xorshift32::new(1);
	assert_eq!(rng.next_u32(), 270369);
	assert_eq!(rng.next_u32(), 67634689);
	assert_eq!(rng.next_u32(), 2647435461);
}

#[test]
fn test_uniform_matches_state() {
	let mut rng = Xorshift32::new(1);
	let u = rng.next_uniform();
	assert_eq!(u, 270369.0 / 4294967296.0);
	assert!((u - 6.295018829405308e-05).abs() < 1.0e-18);
}

#[test]
fn test_zero_seed_remapped() {
	let mut a = Xorshift32::new(0);
	let mut b = Xorshift32::new(1);
	assert_eq!(a.state(), 1);
	for _ in 0..100 { assert_eq!(a.next_u32(), b.next_u32()); }
}

#[test]
fn test_repeatable_sequence() {
	let mut a = Xorshift32::new(0xDEADBEEF);
	let mut b = Xorshift32::new(0xDEADBEEF);
	for _ in 0..1000 {
		let ua = a.next_uniform();
		assert!(ua >= 0.0 && ua < 1.0);
		assert_eq!(ua, b.next_uniform());
	}
}

#[test]
fn test_normal_consumes_two_uniforms() {
	let mut a = Xorshift32::new(7);
	let mut b = Xorshift32::new(7);
	for _ in 0..50 {
		a.next_normal();
		b.next_u32();
		b.next_u32();
		assert_eq!(a.state(), b.state());
	}
}

#[test]
fn test_first_normal_draws() {
	let mut rng = Xorshift32::new(1);
	assert!((rng.next_normal() - 4.3769340723023).abs() < 1.0e-9);
	assert!((rng.next_normal() - 0.8857907532122087).abs() < 1.0e-9);
	assert_eq!(rng.state(), 307599695);
}

#[test]
fn test_normal_statistics() {
	let mut rng = Xorshift32::new(12345);
	let n = 200000;
	let draws:Vec<f64> = (0..n).map(|_| rng.next_normal()).collect();
	let mean:f64 = draws.iter().sum::<f64>() / (n as f64);
	let var:f64 = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n as f64);
	assert!(mean.abs() < 0.01, "mean = {}", mean);
	assert!((var - 1.0).abs() < 0.02, "var = {}", var);
}
