use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use tracing::{debug, trace};

use crate::{
    cipher::xor_decrypt_at,
    constants::{LENGTH_PREFIX_WIDTH, MAX_PREALLOCATED_RECORDS},
    error::{Error, Result},
    headers::{ItemDbHeader, parse_header},
    parser::record::{Record, Value},
    schema::{FieldDescriptor, FieldKind, Schema},
    stream::ByteStream,
};

/// Everything one parse produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub version: u64,
    pub count: u64,
    pub records: Vec<Record>,
}

impl ParseResult {
    pub fn header(&self) -> ItemDbHeader {
        ItemDbHeader {
            version: self.version,
            count: self.count,
        }
    }
}

/// Decode a whole itemdb container: header, then exactly `count` records in stream order.
pub fn parse<R: Read>(reader: R, schema: &Schema) -> Result<ParseResult> {
    let mut stream = ByteStream::new(reader);
    let header = parse_header(&mut stream, schema.header())?;
    debug!(version = header.version, count = header.count, "read itemdb header");

    let capacity = usize::try_from(header.count)
        .unwrap_or(usize::MAX)
        .min(MAX_PREALLOCATED_RECORDS);
    let mut records = Vec::with_capacity(capacity);
    for index in 0..header.count {
        let record = decode_record(&mut stream, schema, header.version, index)?;
        trace!(index, offset = stream.offset(), "decoded record");
        records.push(record);
    }
    debug!(records = records.len(), bytes = stream.offset(), "finished itemdb parse");

    Ok(ParseResult {
        version: header.version,
        count: header.count,
        records,
    })
}

pub fn parse_bytes(data: &[u8], schema: &Schema) -> Result<ParseResult> {
    parse(data, schema)
}

pub fn parse_file(path: impl AsRef<Path>, schema: &Schema) -> Result<ParseResult> {
    let file = File::open(path)?;
    parse(BufReader::new(file), schema)
}

/// Decode one record. `index` is the record's zero-based position in the stream; it feeds
/// per-record key schedules and the schema's index check.
pub fn decode_record<R: Read>(
    stream: &mut ByteStream<R>,
    schema: &Schema,
    version: u64,
    index: u64,
) -> Result<Record> {
    let index_position = schema.index_position();
    let mut record = Record::with_capacity(schema.len());
    for (position, field) in schema.fields().iter().enumerate() {
        if !field.is_present_in(version) {
            if field.kind.is_stored() {
                record.insert(field.name.as_ref(), None);
            }
            continue;
        }
        let Some(value) = decode_field(stream, field, version, index)? else {
            continue;
        };
        // Index check runs before any later field of the record is read.
        if index_position == Some(position) {
            if let Some(found) = value.as_int().filter(|&found| found != index) {
                return Err(Error::OffsetMismatch {
                    index,
                    found,
                    version,
                });
            }
        }
        record.insert(field.name.as_ref(), Some(value));
    }
    Ok(record)
}

/// Consume one field's bytes. Returns `None` for ignored fields.
fn decode_field<R: Read>(
    stream: &mut ByteStream<R>,
    field: &FieldDescriptor,
    version: u64,
    index: u64,
) -> Result<Option<Value>> {
    let name = field.name.as_ref();
    match field.kind {
        FieldKind::FixedInt(width) => stream.read_uint(width, name).map(|v| Some(Value::Int(v))),
        FieldKind::FixedBytes(width) => {
            let offset = stream.offset();
            let raw = stream.read_bytes(width, name)?;
            if field.decryption_for(version).is_some() {
                decode_text(field, raw, version, index, offset).map(Some)
            } else {
                Ok(Some(Value::Bytes(raw)))
            }
        }
        FieldKind::LengthPrefixedString => {
            let len = read_length(stream, name)?;
            let offset = stream.offset();
            let raw = stream.read_bytes(len, name)?;
            decode_text(field, raw, version, index, offset).map(Some)
        }
        FieldKind::Ignored(Some(width)) => stream.skip(width, name).map(|_| None),
        FieldKind::Ignored(None) => {
            let len = read_length(stream, name)?;
            stream.skip(len, name).map(|_| None)
        }
    }
}

fn read_length<R: Read>(stream: &mut ByteStream<R>, name: &str) -> Result<usize> {
    Ok(stream.read_uint(LENGTH_PREFIX_WIDTH, name)? as usize)
}

/// Decrypt when the field calls for it in this version, then decode as UTF-8.
fn decode_text(
    field: &FieldDescriptor,
    raw: Vec<u8>,
    version: u64,
    index: u64,
    offset: u64,
) -> Result<Value> {
    let bytes = match field.decryption_for(version) {
        Some(d) => xor_decrypt_at(&raw, &d.key, d.schedule.start(index, d.key.len()))?,
        None => raw,
    };
    String::from_utf8(bytes)
        .map(Value::Text)
        .map_err(|e| Error::Decode {
            field: field.name.to_string(),
            offset,
            reason: e.to_string(),
        })
}
