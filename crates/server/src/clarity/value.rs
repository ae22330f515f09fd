// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};
use thiserror::Error;

use super::c32::c32_address;

/// Maximum nesting depth accepted when decoding.
pub const MAX_DEPTH: usize = 32;

mod type_id {
    pub const INT: u8 = 0x00;
    pub const UINT: u8 = 0x01;
    pub const BUFFER: u8 = 0x02;
    pub const BOOL_TRUE: u8 = 0x03;
    pub const BOOL_FALSE: u8 = 0x04;
    pub const PRINCIPAL_STANDARD: u8 = 0x05;
    pub const PRINCIPAL_CONTRACT: u8 = 0x06;
    pub const RESPONSE_OK: u8 = 0x07;
    pub const RESPONSE_ERR: u8 = 0x08;
    pub const OPTIONAL_NONE: u8 = 0x09;
    pub const OPTIONAL_SOME: u8 = 0x0a;
    pub const LIST: u8 = 0x0b;
    pub const TUPLE: u8 = 0x0c;
    pub const STRING_ASCII: u8 = 0x0d;
    pub const STRING_UTF8: u8 = 0x0e;
}

#[derive(Debug, Error)]
pub enum ClarityError {
    #[error("Invalid hex payload: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Unexpected end of input at byte {offset}: needed {needed} more bytes")]
    UnexpectedEnd { offset: usize, needed: usize },

    #[error("Unknown Clarity type prefix 0x{0:02x}")]
    UnknownType(u8),

    #[error("String at byte {0} is not valid UTF-8")]
    InvalidUtf8(usize),

    #[error("String at byte {0} is not ASCII")]
    InvalidAscii(usize),

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    #[error("Value nesting exceeds {MAX_DEPTH} levels")]
    TooDeep,

    #[error("{0} is too long to serialize")]
    TooLong(&'static str),
}

/// A decoded Clarity value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClarityValue {
    Int(i128),
    UInt(u128),
    Buffer(Vec<u8>),
    Bool(bool),
    StandardPrincipal {
        version: u8,
        hash160: [u8; 20],
    },
    ContractPrincipal {
        version: u8,
        hash160: [u8; 20],
        name: String,
    },
    ResponseOk(Box<ClarityValue>),
    ResponseErr(Box<ClarityValue>),
    OptionalNone,
    OptionalSome(Box<ClarityValue>),
    List(Vec<ClarityValue>),
    Tuple(BTreeMap<String, ClarityValue>),
    StringAscii(String),
    StringUtf8(String),
}

impl ClarityValue {
    pub fn ok(value: ClarityValue) -> Self {
        Self::ResponseOk(Box::new(value))
    }

    pub fn err(value: ClarityValue) -> Self {
        Self::ResponseErr(Box::new(value))
    }

    pub fn ascii(value: impl Into<String>) -> Self {
        Self::StringAscii(value.into())
    }

    pub fn tuple<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, ClarityValue)>,
        K: Into<String>,
    {
        Self::Tuple(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Decode a `0x`-prefixed (or bare) hex string.
    pub fn from_hex(input: &str) -> Result<Self, ClarityError> {
        let bytes = hex::decode(input.trim().trim_start_matches("0x"))?;
        Self::deserialize(&bytes)
    }

    /// Decode exactly one value from `bytes`.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, ClarityError> {
        let mut reader = Reader { bytes, offset: 0 };
        let value = reader.value(0)?;
        let remaining = reader.remaining();
        if remaining != 0 {
            return Err(ClarityError::TrailingBytes(remaining));
        }
        Ok(value)
    }

    pub fn to_hex(&self) -> Result<String, ClarityError> {
        Ok(format!("0x{}", hex::encode(self.serialize()?)))
    }

    pub fn serialize(&self) -> Result<Vec<u8>, ClarityError> {
        let mut out = Vec::new();
        self.write(&mut out)?;
        Ok(out)
    }

    fn write(&self, out: &mut Vec<u8>) -> Result<(), ClarityError> {
        match self {
            Self::Int(v) => {
                out.push(type_id::INT);
                out.extend_from_slice(&v.to_be_bytes());
            }
            Self::UInt(v) => {
                out.push(type_id::UINT);
                out.extend_from_slice(&v.to_be_bytes());
            }
            Self::Buffer(bytes) => {
                out.push(type_id::BUFFER);
                write_len(out, bytes.len(), "buffer")?;
                out.extend_from_slice(bytes);
            }
            Self::Bool(true) => out.push(type_id::BOOL_TRUE),
            Self::Bool(false) => out.push(type_id::BOOL_FALSE),
            Self::StandardPrincipal { version, hash160 } => {
                out.push(type_id::PRINCIPAL_STANDARD);
                out.push(*version);
                out.extend_from_slice(hash160);
            }
            Self::ContractPrincipal {
                version,
                hash160,
                name,
            } => {
                out.push(type_id::PRINCIPAL_CONTRACT);
                out.push(*version);
                out.extend_from_slice(hash160);
                let len = u8::try_from(name.len())
                    .map_err(|_| ClarityError::TooLong("contract name"))?;
                out.push(len);
                out.extend_from_slice(name.as_bytes());
            }
            Self::ResponseOk(inner) => {
                out.push(type_id::RESPONSE_OK);
                inner.write(out)?;
            }
            Self::ResponseErr(inner) => {
                out.push(type_id::RESPONSE_ERR);
                inner.write(out)?;
            }
            Self::OptionalNone => out.push(type_id::OPTIONAL_NONE),
            Self::OptionalSome(inner) => {
                out.push(type_id::OPTIONAL_SOME);
                inner.write(out)?;
            }
            Self::List(items) => {
                out.push(type_id::LIST);
                write_len(out, items.len(), "list")?;
                for item in items {
                    item.write(out)?;
                }
            }
            Self::Tuple(fields) => {
                out.push(type_id::TUPLE);
                write_len(out, fields.len(), "tuple")?;
                // BTreeMap iteration is the canonical (sorted) field order.
                for (name, value) in fields {
                    let len = u8::try_from(name.len())
                        .map_err(|_| ClarityError::TooLong("tuple field name"))?;
                    out.push(len);
                    out.extend_from_slice(name.as_bytes());
                    value.write(out)?;
                }
            }
            Self::StringAscii(s) => {
                out.push(type_id::STRING_ASCII);
                write_len(out, s.len(), "string-ascii")?;
                out.extend_from_slice(s.as_bytes());
            }
            Self::StringUtf8(s) => {
                out.push(type_id::STRING_UTF8);
                write_len(out, s.len(), "string-utf8")?;
                out.extend_from_slice(s.as_bytes());
            }
        }
        Ok(())
    }

    /// Render the loosely typed `{ "type": ..., "value": ... }` object form.
    ///
    /// Integers are rendered as decimal strings since they may exceed the
    /// range of a JSON number.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Int(v) => json!({ "type": "int", "value": v.to_string() }),
            Self::UInt(v) => json!({ "type": "uint", "value": v.to_string() }),
            Self::Buffer(bytes) => json!({ "type": "buffer", "value": hex::encode(bytes) }),
            Self::Bool(true) => json!({ "type": "true" }),
            Self::Bool(false) => json!({ "type": "false" }),
            Self::StandardPrincipal { version, hash160 } => {
                json!({ "type": "address", "value": c32_address(*version, hash160) })
            }
            Self::ContractPrincipal {
                version,
                hash160,
                name,
            } => json!({
                "type": "contract",
                "value": format!("{}.{}", c32_address(*version, hash160), name),
            }),
            Self::ResponseOk(inner) => json!({ "type": "ok", "value": inner.to_json() }),
            Self::ResponseErr(inner) => json!({ "type": "err", "value": inner.to_json() }),
            Self::OptionalNone => json!({ "type": "none" }),
            Self::OptionalSome(inner) => json!({ "type": "some", "value": inner.to_json() }),
            Self::List(items) => json!({
                "type": "list",
                "value": items.iter().map(ClarityValue::to_json).collect::<Vec<_>>(),
            }),
            Self::Tuple(fields) => {
                let map: Map<String, Value> = fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect();
                json!({ "type": "tuple", "value": map })
            }
            Self::StringAscii(s) => json!({ "type": "ascii", "value": s }),
            Self::StringUtf8(s) => json!({ "type": "utf8", "value": s }),
        }
    }
}

fn write_len(out: &mut Vec<u8>, len: usize, what: &'static str) -> Result<(), ClarityError> {
    let len = u32::try_from(len).map_err(|_| ClarityError::TooLong(what))?;
    out.extend_from_slice(&len.to_be_bytes());
    Ok(())
}

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ClarityError> {
        if self.remaining() < n {
            return Err(ClarityError::UnexpectedEnd {
                offset: self.offset,
                needed: n - self.remaining(),
            });
        }
        let slice = &self.bytes[self.offset..self.offset + n];
        self.offset += n;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, ClarityError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, ClarityError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(buf))
    }

    fn array16(&mut self) -> Result<[u8; 16], ClarityError> {
        let mut buf = [0u8; 16];
        buf.copy_from_slice(self.take(16)?);
        Ok(buf)
    }

    fn hash160(&mut self) -> Result<[u8; 20], ClarityError> {
        let mut buf = [0u8; 20];
        buf.copy_from_slice(self.take(20)?);
        Ok(buf)
    }

    fn utf8(&mut self, len: usize) -> Result<String, ClarityError> {
        let start = self.offset;
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| ClarityError::InvalidUtf8(start))
    }

    fn ascii(&mut self, len: usize) -> Result<String, ClarityError> {
        let start = self.offset;
        let raw = self.take(len)?;
        if !raw.is_ascii() {
            return Err(ClarityError::InvalidAscii(start));
        }
        Ok(raw.iter().map(|&b| char::from(b)).collect())
    }

    fn value(&mut self, depth: usize) -> Result<ClarityValue, ClarityError> {
        if depth > MAX_DEPTH {
            return Err(ClarityError::TooDeep);
        }

        let prefix = self.u8()?;
        let value = match prefix {
            type_id::INT => ClarityValue::Int(i128::from_be_bytes(self.array16()?)),
            type_id::UINT => ClarityValue::UInt(u128::from_be_bytes(self.array16()?)),
            type_id::BUFFER => {
                let len = self.u32()? as usize;
                ClarityValue::Buffer(self.take(len)?.to_vec())
            }
            type_id::BOOL_TRUE => ClarityValue::Bool(true),
            type_id::BOOL_FALSE => ClarityValue::Bool(false),
            type_id::PRINCIPAL_STANDARD => {
                let version = self.u8()?;
                let hash160 = self.hash160()?;
                ClarityValue::StandardPrincipal { version, hash160 }
            }
            type_id::PRINCIPAL_CONTRACT => {
                let version = self.u8()?;
                let hash160 = self.hash160()?;
                let len = self.u8()? as usize;
                let name = self.ascii(len)?;
                ClarityValue::ContractPrincipal {
                    version,
                    hash160,
                    name,
                }
            }
            type_id::RESPONSE_OK => ClarityValue::ok(self.value(depth + 1)?),
            type_id::RESPONSE_ERR => ClarityValue::err(self.value(depth + 1)?),
            type_id::OPTIONAL_NONE => ClarityValue::OptionalNone,
            type_id::OPTIONAL_SOME => ClarityValue::OptionalSome(Box::new(self.value(depth + 1)?)),
            type_id::LIST => {
                let len = self.u32()? as usize;
                // Declared lengths are untrusted; grow as items actually decode.
                let mut items = Vec::with_capacity(len.min(self.remaining()));
                for _ in 0..len {
                    items.push(self.value(depth + 1)?);
                }
                ClarityValue::List(items)
            }
            type_id::TUPLE => {
                let len = self.u32()? as usize;
                let mut fields = BTreeMap::new();
                for _ in 0..len {
                    let name_len = self.u8()? as usize;
                    let name = self.ascii(name_len)?;
                    let value = self.value(depth + 1)?;
                    fields.insert(name, value);
                }
                ClarityValue::Tuple(fields)
            }
            type_id::STRING_ASCII => {
                let len = self.u32()? as usize;
                ClarityValue::StringAscii(self.ascii(len)?)
            }
            type_id::STRING_UTF8 => {
                let len = self.u32()? as usize;
                ClarityValue::StringUtf8(self.utf8(len)?)
            }
            other => return Err(ClarityError::UnknownType(other)),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_tuple() -> ClarityValue {
        ClarityValue::tuple([
            ("word", ClarityValue::ascii("hello")),
            (
                "sender",
                ClarityValue::StandardPrincipal {
                    version: 26,
                    hash160: [0u8; 20],
                },
            ),
            ("timestamp", ClarityValue::UInt(1_700_000_000)),
            ("category", ClarityValue::ascii("general")),
        ])
    }

    #[test]
    fn test_uint_argument_hex() {
        assert_eq!(
            ClarityValue::UInt(5).to_hex().unwrap(),
            "0x0100000000000000000000000000000005"
        );
    }

    #[test]
    fn test_decode_ok_uint() {
        let value = ClarityValue::from_hex("0x070100000000000000000000000000000003").unwrap();
        assert_eq!(value, ClarityValue::ok(ClarityValue::UInt(3)));
    }

    #[test]
    fn test_decode_string_ascii() {
        let value = ClarityValue::from_hex("0d0000000568656c6c6f").unwrap();
        assert_eq!(value, ClarityValue::ascii("hello"));
    }

    #[test]
    fn test_tuple_fields_are_serialized_sorted() {
        let bytes = word_tuple().serialize().unwrap();
        assert_eq!(bytes[0], 0x0c);
        assert_eq!(&bytes[1..5], &[0, 0, 0, 4]);
        // "category" sorts first.
        assert_eq!(bytes[5], 8);
        assert_eq!(&bytes[6..14], b"category");
    }

    #[test]
    fn test_decode_nested_response() {
        let original = ClarityValue::ok(ClarityValue::List(vec![word_tuple(), word_tuple()]));
        let hex = original.to_hex().unwrap();
        assert_eq!(ClarityValue::from_hex(&hex).unwrap(), original);
    }

    #[test]
    fn test_truncated_input() {
        let err = ClarityValue::from_hex("0x0100").unwrap_err();
        assert!(matches!(err, ClarityError::UnexpectedEnd { offset: 1, needed: 15 }));
    }

    #[test]
    fn test_unknown_prefix_and_trailing_bytes() {
        assert!(matches!(
            ClarityValue::from_hex("0x0f").unwrap_err(),
            ClarityError::UnknownType(0x0f)
        ));
        assert!(matches!(
            ClarityValue::from_hex("0x0303").unwrap_err(),
            ClarityError::TrailingBytes(1)
        ));
    }

    #[test]
    fn test_invalid_hex() {
        assert!(matches!(
            ClarityValue::from_hex("0xzz").unwrap_err(),
            ClarityError::InvalidHex(_)
        ));
    }

    #[test]
    fn test_huge_declared_list_length_fails_cleanly() {
        let err = ClarityValue::from_hex("0x0bffffffff").unwrap_err();
        assert!(matches!(err, ClarityError::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_depth_limit() {
        let mut bytes = vec![type_id::OPTIONAL_SOME; MAX_DEPTH + 2];
        bytes.push(type_id::BOOL_TRUE);
        assert!(matches!(
            ClarityValue::deserialize(&bytes).unwrap_err(),
            ClarityError::TooDeep
        ));
    }

    #[test]
    fn test_to_json_shape() {
        let json = ClarityValue::ok(word_tuple()).to_json();
        assert_eq!(json["type"], "ok");
        assert_eq!(json["value"]["type"], "tuple");
        assert_eq!(json["value"]["value"]["word"]["value"], "hello");
        assert_eq!(json["value"]["value"]["timestamp"]["type"], "uint");
        assert_eq!(json["value"]["value"]["timestamp"]["value"], "1700000000");
        assert_eq!(
            json["value"]["value"]["sender"]["value"],
            "ST000000000000000000002AMW42H"
        );
    }

    #[test]
    fn test_u128_max_renders_as_string() {
        let json = ClarityValue::UInt(u128::MAX).to_json();
        assert_eq!(json["value"], u128::MAX.to_string());
    }
}
