use std::collections::{hash_map::Entry, HashMap};

use crate::{Error, Result};

/// Numeric properties of a codepoint: its decimal digit value and its numeric value as a fraction
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct UnicodeValue {
	/// Decimal digit value, `NO_DIGIT` if the codepoint isn't a decimal digit
	pub digit:       i32,
	pub numerator:   i64,
	pub denominator: i64,
}

impl UnicodeValue {
	pub const NO_DIGIT: i32 = -1;

	pub const fn new(digit: i32, numerator: i64, denominator: i64) -> Self {
		Self { digit, numerator, denominator }
	}

	/// Parse the value from the decimal digit and numeric fields of a row.
	///
	/// Returns `Ok(None)` when both fields are empty.
	pub fn parse(digit: &str, numeric: &str, line: usize) -> Result<Option<Self>> {
		if digit.is_empty() && numeric.is_empty() {
			return Ok(None);
		}

		let digit = if digit.is_empty() {
			Self::NO_DIGIT
		} else {
			digit.parse::<i32>().map_err(|_| malformed(line, "decimal digit", digit))?
		};

		let parsed = match numeric.split_once('/') {
			Some((num, den)) => num.parse::<i64>().ok().zip(den.parse::<i64>().ok()),
			None             => numeric.parse::<i64>().ok().map(|num| (num, 1)),
		};
		let (numerator, denominator) = parsed.ok_or_else(|| malformed(line, "numeric", numeric))?;

		Ok(Some(Self { digit, numerator, denominator }))
	}

	/// Does the codepoint have a decimal digit value
	pub fn has_digit(&self) -> bool {
		self.digit != Self::NO_DIGIT
	}
}

fn malformed(line: usize, field: &'static str, value: &str) -> Error {
	Error::MalformedNumericField { line, field, value: value.to_string() }
}

/// Deduplicated table of values, in the order they were first seen
#[derive(Clone, Default, Debug)]
pub struct ValueTable {
	/// Values, indexed by the index handed out by `register`
	values  : Vec<UnicodeValue>,
	/// Mapping from value to an index
	mapping : HashMap<UnicodeValue, usize>,
}

impl ValueTable {
	pub fn new() -> Self {
		Self { values: Vec::new(), mapping: HashMap::new() }
	}

	/// Get the index of a value, appending it to the table if it wasn't seen before
	pub fn register(&mut self, value: UnicodeValue) -> usize {
		match self.mapping.entry(value) {
			Entry::Occupied(entry) => *entry.get(),
			Entry::Vacant(entry) => {
				let idx = self.values.len();
				self.values.push(value);
				entry.insert(idx);
				idx
			},
		}
	}

	/// Get the index of an already registered value
	pub fn index_of(&self, value: &UnicodeValue) -> Option<usize> {
		self.mapping.get(value).copied()
	}

	pub fn get(&self, idx: usize) -> Option<&UnicodeValue> {
		self.values.get(idx)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn as_slice(&self) -> &[UnicodeValue] {
		&self.values
	}

	pub fn iter(&self) -> core::slice::Iter<'_, UnicodeValue> {
		self.values.iter()
	}
}

impl<'a> IntoIterator for &'a ValueTable {
	type Item = &'a UnicodeValue;
	type IntoIter = core::slice::Iter<'a, UnicodeValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
