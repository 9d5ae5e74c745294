//! Renders a [`ParseResult`] for people and other tools.

use std::io::{self, Write};

use serde::Serialize;

use crate::{
    parser::{ParseResult, Value},
    schema::Schema,
};

/// Pipe-separated table: a header row of the columns present in this version, then one
/// line per record. Text is double-quoted, raw bytes are hex, absent values are empty.
pub fn write_table<W: Write>(out: &mut W, schema: &Schema, result: &ParseResult) -> io::Result<()> {
    let columns = schema.columns(result.version);
    writeln!(out, "{}", columns.join("|"))?;
    for record in &result.records {
        let row: Vec<String> = columns
            .iter()
            .map(|c| match record.get(c) {
                Some(Value::Text(s)) => format!("\"{s}\""),
                Some(v) => v.to_string(),
                None => String::new(),
            })
            .collect();
        writeln!(out, "{}", row.join("|"))?;
    }
    Ok(())
}

#[derive(Serialize)]
struct Document<'a> {
    version: u64,
    count: u64,
    items: &'a [crate::parser::Record],
}

pub fn write_json<W: Write>(out: &mut W, result: &ParseResult) -> io::Result<()> {
    let doc = Document {
        version: result.version,
        count: result.count,
        items: &result.records,
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        parser::Record,
        schema::{FieldDescriptor, HeaderLayout},
    };

    fn fixture() -> (Schema, ParseResult) {
        let schema = Schema::new([
            FieldDescriptor::int("id", 4),
            FieldDescriptor::ignored("pad", 2),
            FieldDescriptor::string("name"),
            FieldDescriptor::bytes("hash", 2),
            FieldDescriptor::string("pet").since(4),
        ])
        .with_header(HeaderLayout::new(2, 4));
        let mut a = Record::new();
        a.insert("id", Some(Value::Int(0)));
        a.insert("name", Some(Value::Text("Blank".into())));
        a.insert("hash", Some(Value::Bytes(vec![0x0a, 0xff])));
        a.insert("pet", None);
        let result = ParseResult {
            version: 3,
            count: 1,
            records: vec![a],
        };
        (schema, result)
    }

    #[test]
    fn table_lists_present_columns_and_quotes_text() {
        let (schema, result) = fixture();
        let mut out = Vec::new();
        write_table(&mut out, &schema, &result).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id|name|hash\n0|\"Blank\"|0aff\n"
        );
    }

    #[test]
    fn json_keeps_field_order_and_nulls() {
        let (_, result) = fixture();
        let mut out = Vec::new();
        write_json(&mut out, &result).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["version"], 3);
        assert_eq!(v["count"], 1);
        assert_eq!(v["items"][0]["name"], "Blank");
        assert_eq!(v["items"][0]["hash"], "0aff");
        assert!(v["items"][0]["pet"].is_null());
    }
}
