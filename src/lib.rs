
use std::fmt;

pub mod gnss;
pub mod io;
pub mod quantization;

pub mod utils;

#[derive(Debug, Clone, Copy)]
pub struct Sample {
	pub val: f64,
	pub idx: usize,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SimErr {
	InvalidPrn(i64),
	InvalidCodePhase(f64),
	InvalidParameter(&'static str),
	OutputSinkUnavailable(&'static str),
}

impl SimErr {

	// Configuration errors exit with 2, sink failures with 1
	pub fn exit_code(&self) -> i32 {
		match self {
			SimErr::OutputSinkUnavailable(_) => 1,
			_ => 2,
		}
	}

}

impl fmt::Display for SimErr {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			SimErr::InvalidPrn(prn)          => write!(f, "PRN {} not supported (1..37)", prn),
			SimErr::InvalidCodePhase(cp)     => write!(f, "code phase {} must be in [0,1023]", cp),
			SimErr::InvalidParameter(s)      => write!(f, "invalid parameter: {}", s),
			SimErr::OutputSinkUnavailable(s) => write!(f, "output unavailable: {}", s),
		}
	}
}

impl std::error::Error for SimErr {}
