//! Binary record stored in every dataset entry.
//!
//! ```text
//! offset  size      field
//! 0       4         magic "PADS"
//! 4       1         codec version
//! 5       1         kind (1 text, 2 bytes, 3 numeric array)
//! 6       1         flags (bit 0 scalar, bit 1 bool)
//! 7       1         dtype code (0 for text and bytes)
//! 8       1         rank
//! 9       8 * rank  shape, u64 per axis
//! ...               payload, little-endian, row-major
//! ```
//!
//! Scalars are written as rank-1 arrays of length one with the scalar flag
//! set; booleans additionally carry the bool flag and are stored as `uint8`.

use std::io::{self, Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::value::{DType, NumericArray};

/// Leading bytes of every dataset record
pub const MAGIC: &[u8; 4] = b"PADS";

/// Highest record revision this build reads and the one it writes
pub const CODEC_VERSION: u8 = 1;

const KIND_TEXT: u8 = 1;
const KIND_BYTES: u8 = 2;
const KIND_ARRAY: u8 = 3;

const FLAG_SCALAR: u8 = 0b01;
const FLAG_BOOL: u8 = 0b10;

const HEADER_LEN: usize = 9;
/// Largest number of axes a record may declare
pub const MAX_RANK: usize = 32;

/// Errors decoding a single dataset record
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("bad magic bytes {0:02x?}")]
    BadMagic([u8; 4]),

    #[error("unsupported codec version {0}")]
    UnsupportedVersion(u8),

    #[error("unknown dataset kind {0}")]
    UnknownKind(u8),

    #[error("unknown dtype code {0}")]
    UnknownDType(u8),

    #[error("rank {0} exceeds the supported maximum")]
    RankTooLarge(usize),

    #[error("payload holds {found} bytes, header declares {expected}")]
    PayloadLength { expected: usize, found: usize },

    #[error("shape {0:?} is not valid for this dataset kind")]
    InvalidShape(Vec<usize>),

    #[error("bool flag set on a non-uint8 scalar")]
    BoolDType,

    #[error("bool scalar holds {0}, expected 0 or 1")]
    BoolValue(u8),

    #[error("text payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("integer scalar {0} does not fit into int64")]
    IntOverflow(u64),

    #[error("record truncated: {0}")]
    Truncated(#[from] io::Error),
}

/// A single-element dataset collapsed back to a scalar value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Decoded content of one dataset entry
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    /// UTF-8 text
    Text(String),
    /// Opaque byte string
    Bytes(Vec<u8>),
    /// N-dimensional numeric array
    Array(NumericArray),
    /// Scalar written as a flagged singleton array
    Scalar(Scalar),
}

impl Dataset {
    /// True for datasets whose entry may be deflated
    pub fn is_array(&self) -> bool {
        matches!(self, Dataset::Array(_))
    }

    /// Short description used in logs and inspection output
    pub fn describe(&self) -> String {
        match self {
            Dataset::Text(text) => format!("text[{}]", text.len()),
            Dataset::Bytes(bytes) => format!("bytes[{}]", bytes.len()),
            Dataset::Array(array) => array.to_string(),
            Dataset::Scalar(Scalar::Int(_)) => "int64 scalar".to_string(),
            Dataset::Scalar(Scalar::Float(_)) => "float64 scalar".to_string(),
            Dataset::Scalar(Scalar::Bool(_)) => "bool scalar".to_string(),
        }
    }

    /// Encode into a complete record
    pub fn encode(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Write the record to `writer`
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            Dataset::Text(text) => {
                write_header(writer, KIND_TEXT, 0, 0, &[text.len()])?;
                writer.write_all(text.as_bytes())
            }
            Dataset::Bytes(bytes) => {
                write_header(writer, KIND_BYTES, 0, 0, &[bytes.len()])?;
                writer.write_all(bytes)
            }
            Dataset::Array(array) => {
                write_header(writer, KIND_ARRAY, 0, array.dtype().code(), array.shape())?;
                array.write_le(writer)
            }
            Dataset::Scalar(Scalar::Int(value)) => {
                write_header(writer, KIND_ARRAY, FLAG_SCALAR, DType::I64.code(), &[1])?;
                writer.write_i64::<LittleEndian>(*value)
            }
            Dataset::Scalar(Scalar::Float(value)) => {
                write_header(writer, KIND_ARRAY, FLAG_SCALAR, DType::F64.code(), &[1])?;
                writer.write_f64::<LittleEndian>(*value)
            }
            Dataset::Scalar(Scalar::Bool(value)) => {
                write_header(
                    writer,
                    KIND_ARRAY,
                    FLAG_SCALAR | FLAG_BOOL,
                    DType::U8.code(),
                    &[1],
                )?;
                writer.write_u8(u8::from(*value))
            }
        }
    }

    /// Decode a complete record; trailing bytes are rejected
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut cursor = Cursor::new(bytes);

        let mut magic = [0u8; 4];
        cursor.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(CodecError::BadMagic(magic));
        }
        let version = cursor.read_u8()?;
        if version == 0 || version > CODEC_VERSION {
            return Err(CodecError::UnsupportedVersion(version));
        }
        let kind = cursor.read_u8()?;
        let flags = cursor.read_u8()?;
        let dtype_code = cursor.read_u8()?;
        let rank = usize::from(cursor.read_u8()?);
        if rank > MAX_RANK {
            return Err(CodecError::RankTooLarge(rank));
        }
        let mut shape = Vec::with_capacity(rank);
        for _ in 0..rank {
            let extent = cursor.read_u64::<LittleEndian>()?;
            shape.push(usize::try_from(extent).map_err(|_| overflow())?);
        }

        let header_len = HEADER_LEN + 8 * rank;
        let payload = &bytes[header_len.min(bytes.len())..];

        match kind {
            KIND_TEXT | KIND_BYTES => {
                if shape.len() != 1 {
                    return Err(CodecError::InvalidShape(shape));
                }
                check_length(shape[0], payload.len())?;
                if kind == KIND_BYTES {
                    return Ok(Dataset::Bytes(payload.to_vec()));
                }
                String::from_utf8(payload.to_vec())
                    .map(Dataset::Text)
                    .map_err(|_| CodecError::InvalidUtf8)
            }
            KIND_ARRAY => {
                let dtype = DType::from_code(dtype_code).ok_or(CodecError::UnknownDType(dtype_code))?;
                let count = shape
                    .iter()
                    .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
                    .ok_or_else(overflow)?;
                let expected = count.checked_mul(dtype.size()).ok_or_else(overflow)?;
                check_length(expected, payload.len())?;

                let mut payload = Cursor::new(payload);
                if flags & FLAG_SCALAR != 0 {
                    if shape != [1] {
                        return Err(CodecError::InvalidShape(shape));
                    }
                    return read_scalar(&mut payload, dtype, flags & FLAG_BOOL != 0).map(Dataset::Scalar);
                }
                Ok(Dataset::Array(NumericArray::read_le(&mut payload, dtype, &shape)?))
            }
            other => Err(CodecError::UnknownKind(other)),
        }
    }
}

fn write_header<W: Write>(writer: &mut W, kind: u8, flags: u8, dtype: u8, shape: &[usize]) -> io::Result<()> {
    writer.write_all(MAGIC)?;
    writer.write_u8(CODEC_VERSION)?;
    writer.write_u8(kind)?;
    writer.write_u8(flags)?;
    writer.write_u8(dtype)?;
    let rank = u8::try_from(shape.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "array rank exceeds 255"))?;
    writer.write_u8(rank)?;
    for &extent in shape {
        writer.write_u64::<LittleEndian>(extent as u64)?;
    }
    Ok(())
}

fn check_length(expected: usize, found: usize) -> Result<(), CodecError> {
    if expected != found {
        return Err(CodecError::PayloadLength { expected, found });
    }
    Ok(())
}

fn overflow() -> CodecError {
    CodecError::Truncated(io::Error::new(
        io::ErrorKind::InvalidData,
        "declared shape overflows the address space",
    ))
}

fn read_scalar<R: Read>(reader: &mut R, dtype: DType, boolean: bool) -> Result<Scalar, CodecError> {
    if boolean {
        if dtype != DType::U8 {
            return Err(CodecError::BoolDType);
        }
        return match reader.read_u8()? {
            0 => Ok(Scalar::Bool(false)),
            1 => Ok(Scalar::Bool(true)),
            other => Err(CodecError::BoolValue(other)),
        };
    }
    let scalar = match dtype {
        DType::I8 => Scalar::Int(reader.read_i8()?.into()),
        DType::I16 => Scalar::Int(reader.read_i16::<LittleEndian>()?.into()),
        DType::I32 => Scalar::Int(reader.read_i32::<LittleEndian>()?.into()),
        DType::I64 => Scalar::Int(reader.read_i64::<LittleEndian>()?),
        DType::U8 => Scalar::Int(reader.read_u8()?.into()),
        DType::U16 => Scalar::Int(reader.read_u16::<LittleEndian>()?.into()),
        DType::U32 => Scalar::Int(reader.read_u32::<LittleEndian>()?.into()),
        DType::U64 => {
            let value = reader.read_u64::<LittleEndian>()?;
            Scalar::Int(i64::try_from(value).map_err(|_| CodecError::IntOverflow(value))?)
        }
        DType::F32 => Scalar::Float(reader.read_f32::<LittleEndian>()?.into()),
        DType::F64 => Scalar::Float(reader.read_f64::<LittleEndian>()?),
    };
    Ok(scalar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_layout() {
        let bytes = Dataset::Scalar(Scalar::Int(7)).encode().unwrap();
        assert_eq!(&bytes[..4], b"PADS");
        assert_eq!(bytes[4], CODEC_VERSION);
        assert_eq!(bytes[5], KIND_ARRAY);
        assert_eq!(bytes[6], FLAG_SCALAR);
        assert_eq!(bytes[7], DType::I64.code());
        assert_eq!(bytes[8], 1);
        assert_eq!(&bytes[9..17], &1u64.to_le_bytes());
        assert_eq!(&bytes[17..], &7i64.to_le_bytes());
    }

    #[test]
    fn test_bool_is_flagged_uint8() {
        let bytes = Dataset::Scalar(Scalar::Bool(true)).encode().unwrap();
        assert_eq!(bytes[6], FLAG_SCALAR | FLAG_BOOL);
        assert_eq!(bytes[7], DType::U8.code());
        assert_eq!(bytes.last(), Some(&1));
        assert_eq!(Dataset::decode(&bytes).unwrap(), Dataset::Scalar(Scalar::Bool(true)));
    }

    #[test]
    fn test_decode_each_kind() {
        let array = NumericArray::from_shape_vec(&[2, 3], vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        for dataset in [
            Dataset::Text("time and space".to_string()),
            Dataset::Text(String::new()),
            Dataset::Bytes(vec![0, 255, 7]),
            Dataset::Array(array),
            Dataset::Array(NumericArray::from_elem(&[0, 4], 0u16)),
            Dataset::Scalar(Scalar::Float(-2.5)),
        ] {
            assert_eq!(Dataset::decode(&dataset.encode().unwrap()).unwrap(), dataset);
        }
    }

    #[test]
    fn test_unflagged_singleton_stays_array() {
        let dataset = Dataset::Array(NumericArray::from_vec(vec![3i64]));
        assert!(matches!(Dataset::decode(&dataset.encode().unwrap()).unwrap(), Dataset::Array(_)));
    }

    #[test]
    fn test_rejects_corrupt_records() {
        let good = Dataset::Array(NumericArray::from_vec(vec![1.0f64, 2.0])).encode().unwrap();

        let mut bad_magic = good.clone();
        bad_magic[0] = b'X';
        assert!(matches!(Dataset::decode(&bad_magic), Err(CodecError::BadMagic(_))));

        let mut future = good.clone();
        future[4] = CODEC_VERSION + 1;
        assert!(matches!(Dataset::decode(&future), Err(CodecError::UnsupportedVersion(_))));

        let mut kind = good.clone();
        kind[5] = 9;
        assert!(matches!(Dataset::decode(&kind), Err(CodecError::UnknownKind(9))));

        let mut dtype = good.clone();
        dtype[7] = 42;
        assert!(matches!(Dataset::decode(&dtype), Err(CodecError::UnknownDType(42))));

        let truncated = &good[..good.len() - 3];
        assert!(matches!(
            Dataset::decode(truncated),
            Err(CodecError::PayloadLength { .. })
        ));

        assert!(matches!(Dataset::decode(&good[..6]), Err(CodecError::Truncated(_))));

        let mut trailing = good;
        trailing.push(0);
        assert!(matches!(
            Dataset::decode(&trailing),
            Err(CodecError::PayloadLength { .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let mut bytes = Dataset::Text("ab".to_string()).encode().unwrap();
        let last = bytes.len() - 1;
        bytes[last] = 0xff;
        assert!(matches!(Dataset::decode(&bytes), Err(CodecError::InvalidUtf8)));
    }

    #[test]
    fn test_huge_shape_is_rejected_without_allocating() {
        let mut bytes = Vec::new();
        write_header(&mut bytes, KIND_ARRAY, 0, DType::F64.code(), &[usize::MAX / 2, 4]).unwrap();
        assert!(Dataset::decode(&bytes).is_err());
    }
}
