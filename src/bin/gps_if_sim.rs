
extern crate clap;
extern crate colored;
extern crate gnss_if_sim;
extern crate serde_json;

use std::fs::File;
use std::io::BufReader;

use clap::{Arg, App, ArgMatches};
use colored::*;

use gnss_if_sim::SimErr;
use gnss_if_sim::io::{self, OutputFormat, RecordSink};
use gnss_if_sim::gnss::gps_l1_ca::if_simulator::{self, SimConfig};

fn parse_f64(matches:&ArgMatches, name:&'static str) -> Result<Option<f64>, SimErr> {
	match matches.value_of(name) {
		Some(s) => s.parse::<f64>().map(Some).map_err(|_| SimErr::InvalidParameter(name)),
		None => Ok(None)
	}
}

// Range checking happens in SimConfig::validate, for flags and config files alike
fn parse_prn(s:&str) -> Result<i64, SimErr> {
	s.parse().map_err(|_| SimErr::InvalidParameter("prn"))
}

fn build_config(matches:&ArgMatches) -> Result<SimConfig, SimErr> {
	// Start from the config file if there is one, then apply explicit flags on top
	let mut cfg:SimConfig = match matches.value_of("config") {
		Some(path) => {
			let f = File::open(path).map_err(|_| SimErr::InvalidParameter("unable to open config file"))?;
			serde_json::from_reader(BufReader::new(f)).map_err(|_| SimErr::InvalidParameter("unable to parse config file"))?
		},
		// clap requires --prn, --delay and --dopp when there's no config file
		None => SimConfig::new(0, 0.0, 0.0)
	};

	if let Some(s) = matches.value_of("prn") { cfg.prn = parse_prn(s)?; }
	if let Some(x) = parse_f64(matches, "delay")? { cfg.delay_chips = x; }
	if let Some(x) = parse_f64(matches, "dopp")?  { cfg.doppler_hz = x; }
	if let Some(x) = parse_f64(matches, "fif")?   { cfg.fif_hz = x; }
	if let Some(x) = parse_f64(matches, "fs")?    { cfg.fs = x; }
	if let Some(x) = parse_f64(matches, "ms")?    { cfg.duration_ms = x; }
	if let Some(x) = parse_f64(matches, "cn0")?   { cfg.cn0_dbhz = x; }
	if let Some(s) = matches.value_of("seed") {
		cfg.seed = s.parse().map_err(|_| SimErr::InvalidParameter("seed"))?;
	}

	cfg.validate()?;
	Ok(cfg)
}

fn simulate(matches:&ArgMatches) -> Result<(), SimErr> {
	let quiet:bool = matches.is_present("quiet");
	let cfg = build_config(matches)?;
	let format = OutputFormat::from_name(matches.value_of("format").unwrap_or("text"))?;

	if !quiet {
		eprintln!("PRN {:02}: {:.3} [chips] delay (code phase {:.3}), {:.1} [Hz] Doppler, {:.1} [dB-Hz], {} samples at {} [samples/sec]",
			cfg.prn, cfg.delay_chips, cfg.code_phase(), cfg.doppler_hz, cfg.cn0_dbhz, cfg.num_samples(), cfg.fs);
		if cfg.seed == 0 {
			eprintln!("{}", "Seed 0 is degenerate for xorshift32; running with seed 1".yellow());
		}
	}

	let mut sink = RecordSink::new(io::open_output(matches.value_of("output"))?, format);
	let summary = if_simulator::run(&cfg, &mut sink)?;
	sink.finish()?;

	if let Some(path) = matches.value_of("summary") {
		let f = File::create(path).map_err(|_| SimErr::OutputSinkUnavailable("unable to create summary file"))?;
		serde_json::to_writer_pretty(f, &summary).map_err(|_| SimErr::OutputSinkUnavailable("unable to write summary file"))?;
	}

	if !quiet {
		let result_str = format!("{} samples, {} code epochs, {} data bit transitions, {:.4} outer level fraction",
			summary.num_samples, summary.code_epochs, summary.nav_bit_transitions, summary.mag_fraction);
		eprintln!("{}", result_str.green());
	}

	Ok(())
}

fn main() {

	let matches = App::new("GPS L1 CA IF Simulator")
		.version("0.1.0")
		.author("John Stanford (johnwstanford@gmail.com)")
		.about("Produces 2-bit sign/magnitude IF samples of a single GPS L1 CA signal in Gaussian noise")
		.arg(Arg::with_name("config")
			.short("c").long("config")
			.help("JSON file with simulation parameters; explicit flags override it")
			.takes_value(true))
		.arg(Arg::with_name("prn")
			.long("prn")
			.help("PRN number (1..37)")
			.required_unless("config").takes_value(true).allow_hyphen_values(true))
		.arg(Arg::with_name("delay")
			.long("delay")
			.help("Code delay [chips]")
			.required_unless("config").takes_value(true).allow_hyphen_values(true))
		.arg(Arg::with_name("dopp")
			.long("dopp")
			.help("Doppler offset [Hz]")
			.required_unless("config").takes_value(true).allow_hyphen_values(true))
		.arg(Arg::with_name("fif")
			.long("fif")
			.help("IF center frequency [Hz] (default 4092000)")
			.takes_value(true).allow_hyphen_values(true))
		.arg(Arg::with_name("fs")
			.long("fs")
			.help("Sampling frequency [Hz] (default 16368000)")
			.takes_value(true))
		.arg(Arg::with_name("ms")
			.long("ms")
			.help("Duration [ms] (default 10)")
			.takes_value(true))
		.arg(Arg::with_name("cn0")
			.long("cn0")
			.help("C/N0 [dB-Hz] (default 45)")
			.takes_value(true).allow_hyphen_values(true))
		.arg(Arg::with_name("seed")
			.long("seed")
			.help("RNG seed, u32 (default 1)")
			.takes_value(true))
		.arg(Arg::with_name("output")
			.short("o").long("output")
			.help("Output filename; stdout if not specified")
			.takes_value(true))
		.arg(Arg::with_name("format")
			.short("t").long("format")
			.help("Output format (default text)")
			.takes_value(true)
			.possible_values(OutputFormat::names()))
		.arg(Arg::with_name("summary")
			.long("summary")
			.help("Write a JSON run summary to this file")
			.takes_value(true))
		.arg(Arg::with_name("quiet")
			.short("q").long("quiet")
			.help("Only report errors"))
		.get_matches();

	if let Err(e) = simulate(&matches) {
		eprintln!("{}", format!("Error: {}", e).red());
		std::process::exit(e.exit_code());
	}

}
