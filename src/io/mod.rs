
extern crate byteorder;

use std::fs::File;
use std::io::{BufWriter, Write};

use self::byteorder::{LittleEndian, WriteBytesExt};

use crate::SimErr;
use crate::quantization::{self, TwoBit};

pub const BUFFER_SIZE:usize = 1 << 16;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OutputFormat {
	Text,		// "sign mag\n" per sample
	I8,			// one byte per sample, levels -3, -1, +1, +3
	F32,		// little-endian f32 per sample, before quantization
}

impl OutputFormat {

	pub fn from_name(name:&str) -> Result<Self, SimErr> {
		match name {
			"text" => Ok(OutputFormat::Text),
			"i8"   => Ok(OutputFormat::I8),
			"f32"  => Ok(OutputFormat::F32),
			_      => Err(SimErr::InvalidParameter("output format must be one of text, i8, f32")),
		}
	}

	pub fn names() -> &'static [&'static str] { &["text", "i8", "f32"] }

}

/// Opens the output file, or stdout when no path is given
pub fn open_output(path:Option<&str>) -> Result<Box<dyn Write>, SimErr> {
	match path {
		Some(p) => {
			let f = File::create(p).map_err(|_| SimErr::OutputSinkUnavailable("unable to create output file"))?;
			Ok(Box::new(BufWriter::with_capacity(BUFFER_SIZE, f)))
		},
		None => Ok(Box::new(BufWriter::with_capacity(BUFFER_SIZE, std::io::stdout())))
	}
}

pub struct RecordSink<W: Write> {
	dst: W,
	format: OutputFormat,
	count: usize,
}

impl<W: Write> RecordSink<W> {

	pub fn new(dst:W, format:OutputFormat) -> Self {
		Self{ dst, format, count: 0 }
	}

	pub fn count(&self) -> usize { self.count }
	pub fn format(&self) -> OutputFormat { self.format }

	/// Writes one sample and returns its quantized value
	pub fn write_sample(&mut self, x:f64) -> Result<TwoBit, SimErr> {
		let q = quantization::quantize_2bit(x);
		let result = match self.format {
			OutputFormat::Text => writeln!(self.dst, "{} {}", q.sign, q.mag),
			OutputFormat::I8   => self.dst.write_i8(q.level()),
			OutputFormat::F32  => self.dst.write_f32::<LittleEndian>(x as f32),
		};
		result.map_err(|_| SimErr::OutputSinkUnavailable("unable to write sample"))?;
		self.count += 1;
		Ok(q)
	}

	pub fn finish(mut self) -> Result<W, SimErr> {
		self.dst.flush().map_err(|_| SimErr::OutputSinkUnavailable("unable to flush output"))?;
		Ok(self.dst)
	}

}
