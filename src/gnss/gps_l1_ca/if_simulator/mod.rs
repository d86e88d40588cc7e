
extern crate serde;

use std::convert::TryFrom;
use std::f64::consts;
use std::io::Write;

use self::serde::{Serialize, Deserialize};

use crate::{Sample, SimErr};
use crate::io::RecordSink;
use crate::utils::{self, xorshift::Xorshift32};
use super::{signal_modulation, BIT_MS, CHIP_RATE_HZ, CODE_LENGTH};


pub const DEFAULT_FIF_HZ:f64 = 4.092e6;
pub const DEFAULT_FS:f64 = 16.368e6;
pub const DEFAULT_DURATION_MS:f64 = 10.0;
pub const DEFAULT_CN0_DBHZ:f64 = 45.0;
pub const DEFAULT_SEED:u32 = 1;

// Carrier phase is reduced mod 2*pi once it grows past this [radians]
const PHASE_WRAP_THRESHOLD:f64 = 1.0e6;

fn default_fif_hz() -> f64 { DEFAULT_FIF_HZ }
fn default_fs() -> f64 { DEFAULT_FS }
fn default_duration_ms() -> f64 { DEFAULT_DURATION_MS }
fn default_cn0_dbhz() -> f64 { DEFAULT_CN0_DBHZ }
fn default_seed() -> u32 { DEFAULT_SEED }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
	pub prn: i64,
	pub delay_chips: f64,
	pub doppler_hz: f64,
	#[serde(default = "default_fif_hz")]
	pub fif_hz: f64,
	#[serde(default = "default_fs")]
	pub fs: f64,
	#[serde(default = "default_duration_ms")]
	pub duration_ms: f64,
	#[serde(default = "default_cn0_dbhz")]
	pub cn0_dbhz: f64,
	#[serde(default = "default_seed")]
	pub seed: u32,
}

impl SimConfig {

	pub fn new(prn:i64, delay_chips:f64, doppler_hz:f64) -> Self {
		Self{ prn, delay_chips, doppler_hz, fif_hz: DEFAULT_FIF_HZ, fs: DEFAULT_FS, duration_ms: DEFAULT_DURATION_MS,
			cn0_dbhz: DEFAULT_CN0_DBHZ, seed: DEFAULT_SEED }
	}

	// Negative PRNs, including ones read from a config file, are rejected as InvalidPrn
	pub fn prn_index(&self) -> Result<usize, SimErr> {
		usize::try_from(self.prn).map_err(|_| SimErr::InvalidPrn(self.prn))
	}

	/// The requested delay is a code retard, applied as an advance of the code phase
	pub fn code_phase(&self) -> f64 {
		let len = CODE_LENGTH as f64;
		(len - self.delay_chips) % len
	}

	pub fn num_samples(&self) -> usize { (self.duration_ms * 1.0e-3 * self.fs).round() as usize }

	pub fn chips_per_sample(&self) -> f64 { CHIP_RATE_HZ / self.fs }

	// Real IF carrier power is A^2/2
	pub fn amplitude(&self) -> f64 { (4.0 * utils::db_to_linear(self.cn0_dbhz) / self.fs).sqrt() }

	pub fn validate(&self) -> Result<(), SimErr> {
		signal_modulation::g2_taps(self.prn_index()?)?;

		let cp = self.code_phase();
		if !(cp >= 0.0 && cp <= CODE_LENGTH as f64) {
			return Err(SimErr::InvalidCodePhase(cp));
		}

		if !(self.fs.is_finite() && self.fs > 0.0) {
			return Err(SimErr::InvalidParameter("sampling frequency must be positive and finite"));
		}
		if !(self.duration_ms.is_finite() && self.duration_ms >= 0.0) {
			return Err(SimErr::InvalidParameter("duration must be non-negative and finite"));
		}
		if !(self.fif_hz.is_finite() && self.doppler_hz.is_finite()) {
			return Err(SimErr::InvalidParameter("IF and Doppler frequencies must be finite"));
		}
		if !self.cn0_dbhz.is_finite() {
			return Err(SimErr::InvalidParameter("C/N0 must be finite"));
		}

		Ok(())
	}

}

/// Fractional chip position of sample idx, normalized to [0, CODE_LENGTH)
pub fn chip_position(code_phase:f64, idx:usize, chips_per_sample:f64) -> f64 {
	let len = CODE_LENGTH as f64;
	let mut chip_f:f64 = (code_phase + (idx as f64) * chips_per_sample) % len;
	if chip_f < 0.0 { chip_f += len; }
	// A tiny negative remainder plus len can round up to len
	if chip_f >= len { chip_f = 0.0; }
	chip_f
}

/// Produces real IF samples for one satellite: C/A code, carrier at IF plus Doppler, unit-variance
/// Gaussian noise and a navigation data bit that flips every BIT_MS code epochs.
pub struct IfSimulator {
	code: [i8; CODE_LENGTH],
	code_phase: f64,
	chips_per_sample: f64,
	amplitude: f64,
	dphi: f64,
	phase: f64,
	rng: Xorshift32,
	data_bit: i8,
	epoch_count: u64,
	prev_chip_f: Option<f64>,
	idx: usize,
	len: usize,
}

impl IfSimulator {

	pub fn new(cfg:&SimConfig) -> Result<Self, SimErr> {
		cfg.validate()?;
		let code = signal_modulation::prn_int(cfg.prn_index()?)?;

		Ok(Self {
			code,
			code_phase: cfg.code_phase(),
			chips_per_sample: cfg.chips_per_sample(),
			amplitude: cfg.amplitude(),
			dphi: 2.0 * consts::PI * (cfg.fif_hz + cfg.doppler_hz) / cfg.fs,
			phase: 0.0,
			rng: Xorshift32::new(cfg.seed),
			data_bit: 1,
			epoch_count: 0,
			prev_chip_f: None,
			idx: 0,
			len: cfg.num_samples(),
		})
	}

	// Read-only getter methods
	pub fn data_bit(&self) -> i8 { self.data_bit }
	pub fn epoch_count(&self) -> u64 { self.epoch_count }
	pub fn remaining(&self) -> usize { self.len - self.idx }
	pub fn rng_state(&self) -> u32 { self.rng.state() }
	pub fn carrier_phase(&self) -> f64 { self.phase }
	pub fn code(&self) -> &[i8] { &self.code }

}

impl Iterator for IfSimulator {
	type Item = Sample;

	fn next(&mut self) -> Option<Sample> {
		if self.idx >= self.len { return None; }

		let chip_f:f64 = chip_position(self.code_phase, self.idx, self.chips_per_sample);

		// A decrease in chip position means the code wrapped into a new epoch
		if let Some(prev) = self.prev_chip_f {
			if chip_f < prev {
				self.epoch_count += 1;
				if self.epoch_count % BIT_MS == 0 {
					self.data_bit = -self.data_bit;
				}
			}
		}
		self.prev_chip_f = Some(chip_f);

		let c:f64 = self.code[chip_f.floor() as usize] as f64;
		let mut s:f64 = self.amplitude * c * self.phase.cos() + self.rng.next_normal();
		s *= self.data_bit as f64;

		let ans = Sample{ val: s, idx: self.idx };

		self.phase += self.dphi;
		if self.phase.abs() > PHASE_WRAP_THRESHOLD {
			self.phase %= 2.0 * consts::PI;
		}
		self.idx += 1;

		Some(ans)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining(), Some(self.remaining()))
	}
}

impl ExactSizeIterator for IfSimulator {}

#[derive(Debug, Serialize)]
pub struct SimSummary {
	pub config: SimConfig,
	pub code_phase: f64,
	pub num_samples: usize,
	pub code_epochs: u64,
	pub nav_bit_transitions: u64,
	pub mag_fraction: f64,
}

/// Synthesizes the whole run into the sink, one record per sample in order.
/// Stops at the first sink failure; records already written stay written.
pub fn run<W: Write>(cfg:&SimConfig, sink:&mut RecordSink<W>) -> Result<SimSummary, SimErr> {
	let mut sim = IfSimulator::new(cfg)?;
	let mut num_samples:usize = 0;
	let mut mag_count:usize = 0;

	while let Some(s) = sim.next() {
		let q = sink.write_sample(s.val)?;
		mag_count += q.mag as usize;
		num_samples += 1;
	}

	let mag_fraction:f64 = if num_samples > 0 { (mag_count as f64) / (num_samples as f64) } else { 0.0 };

	Ok(SimSummary {
		config: cfg.clone(),
		code_phase: cfg.code_phase(),
		num_samples,
		code_epochs: sim.epoch_count(),
		nav_bit_transitions: sim.epoch_count() / BIT_MS,
		mag_fraction,
	})
}
