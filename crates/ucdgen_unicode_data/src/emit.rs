use std::io;

use crate::{Result, UnicodeTables};

/// Identifiers used in the emitted source text
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TableNames {
	/// Name of the static holding the per-codepoint records
	pub data_static:   &'static str,
	pub data_type:     &'static str,
	/// Name of the static holding the deduplicated values
	pub values_static: &'static str,
	pub values_type:   &'static str,
	/// Enum the category tags are variants of
	pub category_type: &'static str,
}

impl Default for TableNames {
	fn default() -> Self {
		Self {
			data_static: "UNICODE_DATA",
			data_type: "UnicodeDatum",
			values_static: "UNICODE_VALUES",
			values_type: "UnicodeDatumValue",
			category_type: "Category",
		}
	}
}

/// Write the record and value arrays as rust source.
///
/// Output starts with a summary line, followed by both arrays, each preceded by a comment with its element count.
/// Categories are written as `{category_type}::{tag}`, rows without a tag are rejected while building the tables.
pub fn write_tables(writer: &mut dyn io::Write, tables: &UnicodeTables, names: &TableNames) -> Result<()> {
	let records = tables.records();
	let values = tables.values();

	writeln!(writer, "// {} codepoints, carrying {} distinct values", records.len(), values.len())?;
	writeln!(writer)?;

	writeln!(writer, "// {} codepoints", records.len())?;
	writeln!(writer, "pub static {}: [{}; {}] = [", names.data_static, names.data_type, records.len())?;
	for record in records {
		writeln!(writer, "\t{} {{ cdpt: {}, cat: {}::{}, val: {}, upper: {}, lower: {} }},",
			names.data_type,
			record.codepoint,
			names.category_type,
			record.category,
			record.value_index_raw(),
			record.uppercase_raw(),
			record.lowercase_raw(),
		)?;
	}
	writeln!(writer, "];")?;
	writeln!(writer)?;

	writeln!(writer, "// {} values", values.len())?;
	writeln!(writer, "pub static {}: [{}; {}] = [", names.values_static, names.values_type, values.len())?;
	for value in values {
		writeln!(writer, "\t{} {{ digit: {}, num: {}, den: {} }},", names.values_type, value.digit, value.numerator, value.denominator)?;
	}
	writeln!(writer, "];")?;
	writer.flush()?;
	Ok(())
}

/// Write all names, each followed by a null byte, in record order
pub fn write_name_blob(writer: &mut dyn io::Write, tables: &UnicodeTables) -> Result<()> {
	for name in tables.names() {
		writer.write_all(name.as_bytes())?;
		writer.write_all(&[0])?;
	}
	writer.flush()?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::io::Write;
	use super::*;
	use crate::{parse_unicode_data, Error};

	const SOURCE: &str = "\
0030;DIGIT ZERO;Nd;0;EN;;0;0;0;N;;;;;
0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;
00BD;VULGAR FRACTION ONE HALF;No;0;ON;<fraction> 0031 2044 0032;;;1/2;N;FRACTION ONE HALF;;;;
2CFD;COPTIC FRACTION ONE HALF;No;0;ON;;;;1/2;N;;;;;
";

	fn emit_text(tables: &UnicodeTables, names: &TableNames) -> String {
		let mut out = Vec::new();
		write_tables(&mut out, tables, names).unwrap();
		String::from_utf8(out).unwrap()
	}

	#[test]
	pub fn table_text() {
		let tables = parse_unicode_data(SOURCE).unwrap();
		let expected = "\
// 4 codepoints, carrying 2 distinct values

// 4 codepoints
pub static UNICODE_DATA: [UnicodeDatum; 4] = [
\tUnicodeDatum { cdpt: 48, cat: Category::Nd, val: 0, upper: -1, lower: -1 },
\tUnicodeDatum { cdpt: 65, cat: Category::Lu, val: -1, upper: -1, lower: 97 },
\tUnicodeDatum { cdpt: 189, cat: Category::No, val: 1, upper: -1, lower: -1 },
\tUnicodeDatum { cdpt: 11517, cat: Category::No, val: 1, upper: -1, lower: -1 },
];

// 2 values
pub static UNICODE_VALUES: [UnicodeDatumValue; 2] = [
\tUnicodeDatumValue { digit: 0, num: 0, den: 1 },
\tUnicodeDatumValue { digit: -1, num: 1, den: 2 },
];
";
		assert_eq!(emit_text(&tables, &TableNames::default()), expected);
	}

	#[test]
	pub fn custom_names() {
		let tables = parse_unicode_data("0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;").unwrap();
		let names = TableNames {
			data_static: "DATA",
			data_type: "Datum",
			values_static: "VALUES",
			values_type: "Value",
			category_type: "Cat",
		};
		let text = emit_text(&tables, &names);
		assert!(text.contains("pub static DATA: [Datum; 1] = [\n\tDatum { cdpt: 65, cat: Cat::Lu, val: -1, upper: -1, lower: 97 },\n];"));
		assert!(text.contains("pub static VALUES: [Value; 0] = [\n];"));
	}

	#[test]
	pub fn name_blob_layout() {
		let tables = parse_unicode_data(SOURCE).unwrap();
		let mut blob = Vec::new();
		write_name_blob(&mut blob, &tables).unwrap();

		assert_eq!(blob, b"digit zero\0latin capital letter a\0vulgar fraction one half\0coptic fraction one half\0");

		let names = blob.split(|b| *b == 0).filter(|name| !name.is_empty()).collect::<Vec<_>>();
		assert_eq!(names.len(), tables.len());
		assert_eq!(blob.iter().filter(|b| **b == 0).count(), tables.len());
	}

	#[test]
	pub fn empty_source() {
		let tables = parse_unicode_data("\n\n").unwrap();
		assert!(tables.is_empty());

		let mut blob = Vec::new();
		write_name_blob(&mut blob, &tables).unwrap();
		assert!(blob.is_empty());

		let text = emit_text(&tables, &TableNames::default());
		assert!(text.starts_with("// 0 codepoints, carrying 0 distinct values\n"));
		assert!(text.contains("pub static UNICODE_DATA: [UnicodeDatum; 0] = [\n];"));
	}

	struct FailingWriter;

	impl Write for FailingWriter {
		fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
			Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
		}

		fn flush(&mut self) -> io::Result<()> {
			Ok(())
		}
	}

	#[test]
	pub fn write_failures_surface() {
		let tables = parse_unicode_data(SOURCE).unwrap();
		assert!(matches!(write_name_blob(&mut FailingWriter, &tables), Err(Error::Io(_))));
		assert!(matches!(write_tables(&mut FailingWriter, &tables, &TableNames::default()), Err(Error::Io(_))));
	}
}
