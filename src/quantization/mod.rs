
// For x ~ N(0,1), P(|x| < T) = 0.68, i.e. Phi(T) = 0.84
pub const THRESHOLD:f64 = 0.9944578832;

/// Sign/magnitude output of a 2-bit ADC.
/// sign: 0 = negative, 1 = non-negative.  mag: 0 = inner level (1), 1 = outer level (3).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TwoBit {
	pub sign: u8,
	pub mag: u8,
}

impl TwoBit {

	pub fn level(&self) -> i8 {
		let m:i8 = if self.mag == 1 { 3 } else { 1 };
		if self.sign == 1 { m } else { -m }
	}

}

/// x must not be NaN.  Zero (including -0.0, since -0.0 >= 0.0) quantizes as non-negative.
pub fn quantize_2bit(x:f64) -> TwoBit {
	debug_assert!(!x.is_nan(), "NaN passed to quantize_2bit");
	let sign:u8 = if x >= 0.0 { 1 } else { 0 };
	let mag:u8  = if x.abs() >= THRESHOLD { 1 } else { 0 };
	TwoBit{ sign, mag }
}

#[cfg(test)]
mod tests {

	extern crate rand;
	extern crate rand_distr;

	use self::rand::SeedableRng;
	use self::rand::rngs::StdRng;
	use self::rand_distr::{Distribution, Normal};

	use super::*;

	const EPS:f64 = 1.0e-9;

	#[test]
	fn zero_is_positive_inner() {
		assert_eq!(quantize_2bit(0.0), TwoBit{ sign: 1, mag: 0 });
	}

	#[test]
	fn negative_values() {
		assert_eq!(quantize_2bit(-1.0e-300).sign, 0);
		assert_eq!(quantize_2bit(-0.5), TwoBit{ sign: 0, mag: 0 });
		assert_eq!(quantize_2bit(-5.0), TwoBit{ sign: 0, mag: 1 });
		assert_eq!(quantize_2bit(std::f64::NEG_INFINITY), TwoBit{ sign: 0, mag: 1 });
	}

	#[test]
	fn magnitude_flips_at_threshold() {
		assert_eq!(quantize_2bit(THRESHOLD - EPS).mag, 0);
		assert_eq!(quantize_2bit(THRESHOLD).mag, 1);
		assert_eq!(quantize_2bit(THRESHOLD + EPS).mag, 1);
		assert_eq!(quantize_2bit(-THRESHOLD + EPS).mag, 0);
		assert_eq!(quantize_2bit(-THRESHOLD).mag, 1);
		assert_eq!(quantize_2bit(-THRESHOLD - EPS).mag, 1);
	}

	#[test]
	fn levels() {
		assert_eq!(quantize_2bit(0.1).level(), 1);
		assert_eq!(quantize_2bit(2.0).level(), 3);
		assert_eq!(quantize_2bit(-0.1).level(), -1);
		assert_eq!(quantize_2bit(-2.0).level(), -3);
	}

	#[test]
	fn inner_fraction_of_standard_normal() {
		let mut rng = StdRng::seed_from_u64(2020);
		let normal = Normal::new(0.0, 1.0).unwrap();
		let n = 100000;

		let inner = (0..n).filter(|_| quantize_2bit(normal.sample(&mut rng)).mag == 0).count();
		let frac:f64 = (inner as f64) / (n as f64);
		assert!((frac - 0.68).abs() < 0.01, "inner fraction {}", frac);
	}

	#[test]
	fn signs_are_balanced_for_standard_normal() {
		let mut rng = StdRng::seed_from_u64(7);
		let normal = Normal::new(0.0, 1.0).unwrap();
		let n = 100000;

		let pos = (0..n).filter(|_| quantize_2bit(normal.sample(&mut rng)).sign == 1).count();
		let frac:f64 = (pos as f64) / (n as f64);
		assert!((frac - 0.5).abs() < 0.01, "positive fraction {}", frac);
	}

}
