
use std::convert::TryFrom;

use crate::SimErr;
use super::CODE_LENGTH;

// G2 phase selector taps for PRN 1..37, given as 1-based G2 stages (IS-GPS-200, Table 3-Ia).
// PRN 37 repeats the {4,10} pair of PRN 34; outputs generated so far depend on it, so it stays.
const G2_TAPS:[(usize, usize); 37] = [
	(2, 6),  (3, 7),  (4, 8),  (5, 9),  (1, 9),  (2, 10), (1, 8),  (2, 9),  (3, 10), (2, 3),	// PRN 01-10
	(3, 4),  (5, 6),  (6, 7),  (7, 8),  (8, 9),  (9, 10), (1, 4),  (2, 5),  (3, 6),  (4, 7),	// PRN 11-20
	(5, 8),  (6, 9),  (1, 3),  (4, 6),  (5, 7),  (6, 8),  (7, 9),  (8, 10), (1, 6),  (2, 7),	// PRN 21-30
	(3, 8),  (4, 9),  (5, 10), (4, 10), (1, 7),  (2, 8),  (4, 10)								// PRN 31-37
];

// Feedback stages, 0-based.  G1 = 1 + x^3 + x^10, G2 = 1 + x^2 + x^3 + x^6 + x^8 + x^9 + x^10
const G1_FEEDBACK:[usize; 2] = [2, 9];
const G2_FEEDBACK:[usize; 6] = [1, 2, 5, 7, 8, 9];

pub const REGISTER_LEN:usize = 10;

pub struct ShiftRegister {
	pub state: [bool; REGISTER_LEN],
}

impl ShiftRegister {

	pub fn all_ones() -> Self {
		Self{ state: [true; REGISTER_LEN] }
	}

	pub fn output(&self) -> bool { self.state[REGISTER_LEN-1] }

	pub fn parity(&self, taps:&[usize]) -> bool {
		taps.iter().fold(false, |acc, t| acc ^ self.state[*t])
	}

	// Every stage takes the value of the stage before it; the feedback bit enters at stage 0
	pub fn shift(&mut self, feedback:bool) {
		for k in (1..REGISTER_LEN).rev() {
			self.state[k] = self.state[k-1];
		}
		self.state[0] = feedback;
	}

}

pub fn g2_taps(prn:usize) -> Result<(usize, usize), SimErr> {
	if prn >= 1 && prn <= G2_TAPS.len() {
		Ok(G2_TAPS[prn-1])
	} else {
		Err(SimErr::InvalidPrn(i64::try_from(prn).unwrap_or(std::i64::MAX)))
	}
}

/// Generates one period of the C/A code for the given PRN as +1/-1 chips, chip 0 first.
/// Logical 0 maps to +1 and logical 1 maps to -1.
pub fn prn_int(prn:usize) -> Result<[i8; CODE_LENGTH], SimErr> {
	let (t1, t2) = g2_taps(prn)?;

	let mut g1 = ShiftRegister::all_ones();
	let mut g2 = ShiftRegister::all_ones();
	let mut ans:[i8; CODE_LENGTH] = [0; CODE_LENGTH];

	for chip in ans.iter_mut() {
		let g1_out:bool = g1.output();
		let g2_out:bool = g2.state[t1-1] ^ g2.state[t2-1];
		*chip = if g1_out ^ g2_out { -1 } else { 1 };

		// Feedback is taken from the current state, before either register moves
		let g1_fb:bool = g1.parity(&G1_FEEDBACK);
		let g2_fb:bool = g2.parity(&G2_FEEDBACK);
		g1.shift(g1_fb);
		g2.shift(g2_fb);
	}

	Ok(ans)
}

#[cfg(test)]
fn first_ten_octal(code:&[i8]) -> u16 {
	code[..10].iter().fold(0u16, |acc, c| (acc << 1) | if *c < 0 { 1 } else { 0 })
}

#[test]
fn test_code_length_and_values() {
	for prn in 1..=37 {
		let code = prn_int(prn).unwrap();
		assert_eq!(code.len(), CODE_LENGTH);
		assert!(code.iter().all(|c| *c == 1 || *c == -1), "PRN {} has a chip outside +/-1", prn);
	}
}

#[test]
fn test_code_is_idempotent() {
	for prn in &[1, 19, 37] {
		let a = prn_int(*prn).unwrap();
		let b = prn_int(*prn).unwrap();
		assert!(a.iter().zip(b.iter()).all(|(x, y)| x == y));
	}
}

#[test]
fn test_first_ten_chips() {
	// Octal values of the first 10 chips, IS-GPS-200 Table 3-Ia
	assert_eq!(first_ten_octal(&prn_int(1).unwrap()),  0o1440);
	assert_eq!(first_ten_octal(&prn_int(2).unwrap()),  0o1620);
	assert_eq!(first_ten_octal(&prn_int(10).unwrap()), 0o1504);
}

#[test]
fn test_codes_are_balanced() {
	// 512 logical ones and 511 logical zeros per period
	for prn in 1..=37 {
		let sum:i32 = prn_int(prn).unwrap().iter().map(|c| *c as i32).sum();
		assert_eq!(sum, -1, "PRN {}", prn);
	}
}

#[test]
fn test_invalid_prn() {
	assert_eq!(prn_int(0).err(),  Some(SimErr::InvalidPrn(0)));
	assert_eq!(prn_int(38).err(), Some(SimErr::InvalidPrn(38)));
	assert!(g2_taps(1000).is_err());
	assert_eq!(g2_taps(std::usize::MAX).err(), Some(SimErr::InvalidPrn(std::i64::MAX)));
}

#[test]
fn test_prn_34_and_37_share_taps() {
	assert_eq!(g2_taps(34).unwrap(), (4, 10));
	assert_eq!(g2_taps(37).unwrap(), (4, 10));
	let a = prn_int(34).unwrap();
	let b = prn_int(37).unwrap();
	assert!(a.iter().zip(b.iter()).all(|(x, y)| x == y));
}

#[test]
fn test_shift_register() {
	let mut reg = ShiftRegister::all_ones();
	reg.shift(false);
	assert_eq!(reg.state[0], false);
	assert!(reg.state[1..].iter().all(|b| *b));
	assert_eq!(reg.parity(&G1_FEEDBACK), false);
	assert_eq!(reg.parity(&[0, 1]), true);
}
