use static_assertions::const_assert_eq;

use crate::{Error, Result};

/// Fields of a `UnicodeData.txt` line, in the order they appear
#[repr(usize)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
	/// Code value in hexadecimal.
	Codepoint,
	/// Character name.
	Name,
	/// General category, e.g. `Lu`.
	GeneralCategory,
	/// Canonical combining class.
	CombiningClass,
	/// Bidirectional category.
	BidiClass,
	/// Character decomposition mapping.
	Decomposition,
	/// Decimal digit value.
	DecimalDigit,
	/// Digit value, also covers digits which aren't decimal, like superscripts.
	Digit,
	/// Numeric value, an integer or a `num/den` fraction.
	Numeric,
	/// `Y` if the character is mirrored in bidirectional text.
	BidiMirrored,
	/// Unicode 1.0 name.
	Unicode1Name,
	/// ISO 10646 comment.
	IsoComment,
	/// Simple uppercase mapping.
	UppercaseMapping,
	/// Simple lowercase mapping.
	LowercaseMapping,
	/// Simple titlecase mapping.
	TitlecaseMapping,
}

/// Number of `;` separated fields on every line
pub const FIELD_COUNT: usize = 15;
const_assert_eq!(Field::TitlecaseMapping as usize + 1, FIELD_COUNT);

/// A single line of the source table, split into its fields
#[derive(Clone, Copy, Debug)]
pub struct SourceRow<'a> {
	line:   usize,
	fields: [&'a str; FIELD_COUNT],
}

impl<'a> SourceRow<'a> {
	/// Split a line into its fields.
	///
	/// `line` is the 1-based line number, used for error reporting.
	pub fn parse(line: usize, text: &'a str) -> Result<Self> {
		let text = text.strip_suffix('\r').unwrap_or(text);

		let mut fields = [""; FIELD_COUNT];
		let mut found = 0;
		for field in text.split(';') {
			if found < FIELD_COUNT {
				fields[found] = field;
			}
			found += 1;
		}

		if found != FIELD_COUNT {
			return Err(Error::MalformedRow { line, found });
		}
		Ok(Self { line, fields })
	}

	/// Get the raw text of a field
	pub fn field(&self, field: Field) -> &'a str {
		self.fields[field as usize]
	}

	/// Line in the source table this row came from
	pub fn line(&self) -> usize {
		self.line
	}
}

/// Iterate over the rows of a source table, blank lines are skipped but still counted for line numbers
pub fn source_rows(text: &str) -> impl Iterator<Item = Result<SourceRow<'_>>> {
	text.split('\n')
		.enumerate()
		.filter(|(_, line)| !line.trim().is_empty())
		.map(|(idx, line)| SourceRow::parse(idx + 1, line))
}

#[cfg(test)]
mod tests {
	use super::*;

	const LATIN_A: &str = "0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;";

	#[test]
	pub fn split_fields() {
		let row = SourceRow::parse(7, LATIN_A).unwrap();
		assert_eq!(row.line(), 7);
		assert_eq!(row.field(Field::Codepoint), "0041");
		assert_eq!(row.field(Field::Name), "LATIN CAPITAL LETTER A");
		assert_eq!(row.field(Field::GeneralCategory), "Lu");
		assert_eq!(row.field(Field::BidiMirrored), "N");
		assert_eq!(row.field(Field::UppercaseMapping), "");
		assert_eq!(row.field(Field::LowercaseMapping), "0061");
		assert_eq!(row.field(Field::TitlecaseMapping), "");
	}

	#[test]
	pub fn field_count_must_match() {
		let short = "0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;0061;";
		match SourceRow::parse(3, short) {
			Err(Error::MalformedRow { line, found }) => {
				assert_eq!(line, 3);
				assert_eq!(found, 14);
			},
			other => panic!("unexpected result: {other:?}"),
		}

		let long = "0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;;";
		assert!(matches!(SourceRow::parse(1, long), Err(Error::MalformedRow { found: 16, .. })));
	}

	#[test]
	pub fn carriage_return_is_stripped() {
		let row = SourceRow::parse(1, "0061;LATIN SMALL LETTER A;Ll;0;L;;;;;N;;;0041;;0041\r").unwrap();
		assert_eq!(row.field(Field::TitlecaseMapping), "0041");
	}

	#[test]
	pub fn blank_lines_are_skipped() {
		let text = "\n0030;DIGIT ZERO;Nd;0;EN;;0;0;0;N;;;;;\n   \n0031;DIGIT ONE;Nd;0;EN;;1;1;1;N;;;;;\n";
		let rows = source_rows(text).collect::<Result<Vec<_>>>().unwrap();
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0].line(), 2);
		assert_eq!(rows[1].line(), 4);
		assert_eq!(rows[1].field(Field::Name), "DIGIT ONE");
	}

	#[test]
	pub fn malformed_line_reports_real_line_number() {
		let text = "0030;DIGIT ZERO;Nd;0;EN;;0;0;0;N;;;;;\n\n0031;DIGIT ONE\n";
		let err = source_rows(text).find_map(|row| row.err()).unwrap();
		assert_eq!(err.line(), Some(3));
	}
}
