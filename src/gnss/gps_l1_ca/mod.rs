
pub const CHIP_RATE_HZ:f64 = 1.023e6;			// [chips/sec]
pub const CODE_LENGTH:usize = 1023;				// [chips]
pub const CODE_PERIOD_SEC:f64 = 1.0e-3;			// [sec] one code epoch

// Code epochs per navigation data bit
pub const BIT_MS:u64 = 5;

pub mod signal_modulation;
pub mod if_simulator;
