use std::io;
use thiserror::Error;

use crate::FIELD_COUNT;

/// Which case mapping a malformed hex value was found in
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MappingKind {
	Uppercase,
	Lowercase,
}

impl core::fmt::Display for MappingKind {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			MappingKind::Uppercase => f.write_str("uppercase"),
			MappingKind::Lowercase => f.write_str("lowercase"),
		}
	}
}

/// Error while building or emitting the unicode tables.
///
/// Every parse error carries the 1-based line of the source table it was found on.
#[derive(Error, Debug)]
pub enum Error {
	/// A line doesn't split into the expected number of fields.
	#[error("line {line}: expected {} fields, found {found}", FIELD_COUNT)]
	MalformedRow { line: usize, found: usize },

	/// The general category field is empty.
	#[error("line {line}: missing general category")]
	MissingCategory { line: usize },

	/// The codepoint field isn't a hexadecimal number.
	#[error("line {line}: invalid codepoint '{value}'")]
	MalformedCodepoint { line: usize, value: String },

	/// A case mapping is present, but isn't a hexadecimal number.
	#[error("line {line}: invalid {kind} mapping '{value}'")]
	MalformedMapping { line: usize, kind: MappingKind, value: String },

	/// The decimal digit or numeric field is present, but isn't an integer or `a/b` fraction.
	#[error("line {line}: invalid {field} value '{value}'")]
	MalformedNumericField { line: usize, field: &'static str, value: String },

	/// Writing an artifact failed.
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),
}

impl Error {
	/// Source line the error was found on, `None` for I/O errors
	pub fn line(&self) -> Option<usize> {
		match self {
			Error::MalformedRow { line, .. }          |
			Error::MissingCategory { line }           |
			Error::MalformedCodepoint { line, .. }    |
			Error::MalformedMapping { line, .. }      |
			Error::MalformedNumericField { line, .. } => Some(*line),
			Error::Io(_)                              => None,
		}
	}
}

pub type Result<T> = core::result::Result<T, Error>;
