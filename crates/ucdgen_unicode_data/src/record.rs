use ucdgen_logging::{log_verbose, log_warning};

use crate::{
	source_rows, Error, Field, MappingKind, Result, SourceRow, UnicodeValue, ValueTable, LOG_CAT,
};

/// Per-codepoint record
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CodepointRecord {
	pub codepoint:   u32,
	/// General category tag, e.g. `Lu`, carried through as-is
	pub category:    String,
	/// Index into the value table
	pub value_index: Option<usize>,
	pub uppercase:   Option<u32>,
	pub lowercase:   Option<u32>,
}

impl CodepointRecord {
	/// Sentinel used in the emitted tables for a missing value or mapping
	pub const NONE: i64 = -1;

	pub fn value_index_raw(&self) -> i64 {
		self.value_index.map_or(Self::NONE, |idx| idx as i64)
	}

	pub fn uppercase_raw(&self) -> i64 {
		self.uppercase.map_or(Self::NONE, i64::from)
	}

	pub fn lowercase_raw(&self) -> i64 {
		self.lowercase.map_or(Self::NONE, i64::from)
	}
}

/// Accumulated result of a run: records, deduplicated values and names.
///
/// The n-th name belongs to the n-th record.
#[derive(Clone, Debug)]
pub struct UnicodeTables {
	records: Vec<CodepointRecord>,
	values:  ValueTable,
	names:   Vec<String>,
}

impl UnicodeTables {
	pub fn records(&self) -> &[CodepointRecord] {
		&self.records
	}

	pub fn values(&self) -> &ValueTable {
		&self.values
	}

	pub fn names(&self) -> &[String] {
		&self.names
	}

	/// Number of codepoints
	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn name(&self, idx: usize) -> Option<&str> {
		self.names.get(idx).map(String::as_str)
	}

	/// Get the value referenced by a record
	pub fn value_of(&self, record: &CodepointRecord) -> Option<&UnicodeValue> {
		record.value_index.and_then(|idx| self.values.get(idx))
	}

	/// Iterate over the records together with their names
	pub fn iter(&self) -> impl Iterator<Item = (&CodepointRecord, &str)> {
		self.records.iter().zip(self.names.iter().map(String::as_str))
	}
}

/// Builds the unicode tables one source row at a time
#[derive(Default)]
pub struct UnicodeDataBuilder {
	records: Vec<CodepointRecord>,
	values:  ValueTable,
	names:   Vec<String>,
}

impl UnicodeDataBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(rows: usize) -> Self {
		Self {
			records: Vec::with_capacity(rows),
			values: ValueTable::new(),
			names: Vec::with_capacity(rows),
		}
	}

	/// Convert a row into a record and name, registering its value if it has one
	pub fn push_row(&mut self, row: &SourceRow) -> Result<()> {
		let line = row.line();

		let codepoint_str = row.field(Field::Codepoint);
		let codepoint = parse_hex(codepoint_str)
			.ok_or_else(|| Error::MalformedCodepoint { line, value: codepoint_str.to_string() })?;

		let category = row.field(Field::GeneralCategory);
		if category.is_empty() {
			return Err(Error::MissingCategory { line });
		}

		let value = UnicodeValue::parse(row.field(Field::DecimalDigit), row.field(Field::Numeric), line)?;
		let uppercase = parse_mapping(row, Field::UppercaseMapping, MappingKind::Uppercase)?;
		let lowercase = parse_mapping(row, Field::LowercaseMapping, MappingKind::Lowercase)?;

		if let Some(prev) = self.records.last() {
			if prev.codepoint >= codepoint {
				log_warning!(LOG_CAT, "line {line}: codepoint {codepoint:04X} does not follow {:04X}, keeping source order", prev.codepoint);
			}
		}

		// Only register once the whole row parsed, a failing row can't leave a value behind
		let value_index = value.map(|value| self.values.register(value));

		self.names.push(row.field(Field::Name).to_lowercase());
		self.records.push(CodepointRecord {
			codepoint,
			category: category.to_string(),
			value_index,
			uppercase,
			lowercase,
		});
		Ok(())
	}

	/// Number of rows pushed so far
	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn finish(self) -> UnicodeTables {
		UnicodeTables {
			records: self.records,
			values: self.values,
			names: self.names,
		}
	}
}

/// Build the tables from the full text of a source table.
///
/// Fails on the first malformed row, nothing is returned for the rows before it.
pub fn parse_unicode_data(text: &str) -> Result<UnicodeTables> {
	let mut builder = UnicodeDataBuilder::with_capacity(text.lines().count());
	for row in source_rows(text) {
		builder.push_row(&row?)?;
	}

	let tables = builder.finish();
	log_verbose!(LOG_CAT, "parsed {} codepoints, carrying {} distinct values", tables.len(), tables.values().len());
	Ok(tables)
}

/// Parse strictly hexadecimal text, without sign or prefix
fn parse_hex(s: &str) -> Option<u32> {
	if s.is_empty() || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
		return None;
	}
	u32::from_str_radix(s, 16).ok()
}

fn parse_mapping(row: &SourceRow, field: Field, kind: MappingKind) -> Result<Option<u32>> {
	let s = row.field(field);
	if s.is_empty() {
		return Ok(None);
	}
	parse_hex(s)
		.map(Some)
		.ok_or_else(|| Error::MalformedMapping { line: row.line(), kind, value: s.to_string() })
}
