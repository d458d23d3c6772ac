use std::fmt;
use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use ndarray::{Array1, ArrayD, Axis, IxDyn, ShapeError};

/// Element type of a [`NumericArray`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit unsigned integer
    U32,
    /// 64-bit unsigned integer
    U64,
    /// 32-bit IEEE float
    F32,
    /// 64-bit IEEE float
    F64,
}

impl DType {
    /// All supported element types, in code order
    pub const ALL: [DType; 10] = [
        DType::I8,
        DType::I16,
        DType::I32,
        DType::I64,
        DType::U8,
        DType::U16,
        DType::U32,
        DType::U64,
        DType::F32,
        DType::F64,
    ];

    /// Stable on-disk code of this element type
    pub fn code(self) -> u8 {
        match self {
            DType::I8 => 1,
            DType::I16 => 2,
            DType::I32 => 3,
            DType::I64 => 4,
            DType::U8 => 5,
            DType::U16 => 6,
            DType::U32 => 7,
            DType::U64 => 8,
            DType::F32 => 9,
            DType::F64 => 10,
        }
    }

    /// Inverse of [`DType::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|dtype| dtype.code() == code)
    }

    /// Size of one element in bytes
    pub fn size(self) -> usize {
        match self {
            DType::I8 | DType::U8 => 1,
            DType::I16 | DType::U16 => 2,
            DType::I32 | DType::U32 | DType::F32 => 4,
            DType::I64 | DType::U64 | DType::F64 => 8,
        }
    }

    /// True for the integer element types
    pub fn is_integer(self) -> bool {
        !matches!(self, DType::F32 | DType::F64)
    }

    /// numpy-style name of the element type
    pub fn name(self) -> &'static str {
        match self {
            DType::I8 => "int8",
            DType::I16 => "int16",
            DType::I32 => "int32",
            DType::I64 => "int64",
            DType::U8 => "uint8",
            DType::U16 => "uint16",
            DType::U32 => "uint32",
            DType::U64 => "uint64",
            DType::F32 => "float32",
            DType::F64 => "float64",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Primitive types that can be stored in a [`NumericArray`]
pub trait Element: Copy + PartialEq + fmt::Debug + 'static {
    /// Element type tag
    const DTYPE: DType;

    /// Wrap an owned array into the matching [`NumericArray`] variant
    fn into_numeric(array: ArrayD<Self>) -> NumericArray;

    /// Lossy conversion used for range checks
    fn to_f64(self) -> f64;

    /// Write one element in little-endian order
    fn write_le<W: Write>(self, writer: &mut W) -> io::Result<()>;

    /// Read one little-endian element
    fn read_le<R: Read>(reader: &mut R) -> io::Result<Self>;
}

macro_rules! impl_element {
    (byte $t:ty, $variant:ident, $write:ident, $read:ident) => {
        impl Element for $t {
            const DTYPE: DType = DType::$variant;

            fn into_numeric(array: ArrayD<Self>) -> NumericArray {
                NumericArray::$variant(array)
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn write_le<W: Write>(self, writer: &mut W) -> io::Result<()> {
                writer.$write(self)
            }

            fn read_le<R: Read>(reader: &mut R) -> io::Result<Self> {
                reader.$read()
            }
        }
    };
    ($t:ty, $variant:ident, $write:ident, $read:ident) => {
        impl Element for $t {
            const DTYPE: DType = DType::$variant;

            fn into_numeric(array: ArrayD<Self>) -> NumericArray {
                NumericArray::$variant(array)
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn write_le<W: Write>(self, writer: &mut W) -> io::Result<()> {
                writer.$write::<LittleEndian>(self)
            }

            fn read_le<R: Read>(reader: &mut R) -> io::Result<Self> {
                reader.$read::<LittleEndian>()
            }
        }
    };
}

impl_element!(byte i8, I8, write_i8, read_i8);
impl_element!(i16, I16, write_i16, read_i16);
impl_element!(i32, I32, write_i32, read_i32);
impl_element!(i64, I64, write_i64, read_i64);
impl_element!(byte u8, U8, write_u8, read_u8);
impl_element!(u16, U16, write_u16, read_u16);
impl_element!(u32, U32, write_u32, read_u32);
impl_element!(u64, U64, write_u64, read_u64);
impl_element!(f32, F32, write_f32, read_f32);
impl_element!(f64, F64, write_f64, read_f64);

/// An owned n-dimensional numeric array (rank 0 allowed), row-major.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericArray {
    /// `int8` elements
    I8(ArrayD<i8>),
    /// `int16` elements
    I16(ArrayD<i16>),
    /// `int32` elements
    I32(ArrayD<i32>),
    /// `int64` elements
    I64(ArrayD<i64>),
    /// `uint8` elements
    U8(ArrayD<u8>),
    /// `uint16` elements
    U16(ArrayD<u16>),
    /// `uint32` elements
    U32(ArrayD<u32>),
    /// `uint64` elements
    U64(ArrayD<u64>),
    /// `float32` elements
    F32(ArrayD<f32>),
    /// `float64` elements
    F64(ArrayD<f64>),
}

/// Run `$body` with `$arr` bound to the inner `ArrayD<T>` of any variant
macro_rules! with_array {
    ($value:expr, $arr:ident => $body:expr) => {
        match $value {
            NumericArray::I8($arr) => $body,
            NumericArray::I16($arr) => $body,
            NumericArray::I32($arr) => $body,
            NumericArray::I64($arr) => $body,
            NumericArray::U8($arr) => $body,
            NumericArray::U16($arr) => $body,
            NumericArray::U32($arr) => $body,
            NumericArray::U64($arr) => $body,
            NumericArray::F32($arr) => $body,
            NumericArray::F64($arr) => $body,
        }
    };
}

/// Like [`with_array`], but `$body` yields an array rewrapped in the same variant
macro_rules! map_array {
    ($value:expr, $arr:ident => $body:expr) => {
        match $value {
            NumericArray::I8($arr) => NumericArray::I8($body),
            NumericArray::I16($arr) => NumericArray::I16($body),
            NumericArray::I32($arr) => NumericArray::I32($body),
            NumericArray::I64($arr) => NumericArray::I64($body),
            NumericArray::U8($arr) => NumericArray::U8($body),
            NumericArray::U16($arr) => NumericArray::U16($body),
            NumericArray::U32($arr) => NumericArray::U32($body),
            NumericArray::U64($arr) => NumericArray::U64($body),
            NumericArray::F32($arr) => NumericArray::F32($body),
            NumericArray::F64($arr) => NumericArray::F64($body),
        }
    };
}

impl NumericArray {
    /// Build an array of the given shape from row-major data
    pub fn from_shape_vec<T: Element>(shape: &[usize], data: Vec<T>) -> Result<Self, ShapeError> {
        let array = ArrayD::from_shape_vec(IxDyn(shape), data)?;
        Ok(T::into_numeric(array))
    }

    /// Build a rank-1 array
    pub fn from_vec<T: Element>(data: Vec<T>) -> Self {
        T::into_numeric(Array1::from_vec(data).into_dyn())
    }

    /// Build a rank-0 array holding one element
    pub fn scalar<T: Element>(value: T) -> Self {
        T::into_numeric(ArrayD::from_elem(IxDyn(&[]), value))
    }

    /// Build an array of the given shape filled with one element
    pub fn from_elem<T: Element + Clone>(shape: &[usize], value: T) -> Self {
        T::into_numeric(ArrayD::from_elem(IxDyn(shape), value))
    }

    /// Element type
    pub fn dtype(&self) -> DType {
        match self {
            NumericArray::I8(_) => DType::I8,
            NumericArray::I16(_) => DType::I16,
            NumericArray::I32(_) => DType::I32,
            NumericArray::I64(_) => DType::I64,
            NumericArray::U8(_) => DType::U8,
            NumericArray::U16(_) => DType::U16,
            NumericArray::U32(_) => DType::U32,
            NumericArray::U64(_) => DType::U64,
            NumericArray::F32(_) => DType::F32,
            NumericArray::F64(_) => DType::F64,
        }
    }

    /// Length of every axis
    pub fn shape(&self) -> &[usize] {
        with_array!(self, a => a.shape())
    }

    /// Number of axes
    pub fn ndim(&self) -> usize {
        with_array!(self, a => a.ndim())
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        with_array!(self, a => a.len())
    }

    /// True if the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major iterator over all elements, converted to `f64`
    pub fn iter_f64(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        with_array!(self, a => Box::new(a.iter().map(|v| v.to_f64())) as Box<dyn Iterator<Item = f64> + '_>)
    }

    /// The single element of a rank-0 array
    pub fn scalar_f64(&self) -> Option<f64> {
        if self.ndim() == 0 {
            self.iter_f64().next()
        } else {
            None
        }
    }

    /// The inner `f64` array, if that is the element type
    pub fn as_f64(&self) -> Option<&ArrayD<f64>> {
        match self {
            NumericArray::F64(a) => Some(a),
            _ => None,
        }
    }

    /// Reshape without reordering elements (row-major)
    pub fn into_shape(self, shape: &[usize]) -> Result<Self, ShapeError> {
        Ok(map_array!(self, a => a.as_standard_layout().into_owned().into_shape(IxDyn(shape))?))
    }

    /// Reorder the axes; `order[i]` names the source axis of output axis `i`
    pub fn permuted_axes(self, order: &[usize]) -> Self {
        map_array!(self, a => a.permuted_axes(IxDyn(order)).as_standard_layout().into_owned())
    }

    /// Repeat the flattened elements `reps` times as a rank-1 array
    pub fn tile(&self, reps: usize) -> Self {
        map_array!(self, a => {
            let data: Vec<_> = (0..reps).flat_map(|_| a.iter().copied()).collect();
            Array1::from_vec(data).into_dyn()
        })
    }

    /// Stack equally shaped arrays along a new leading axis
    ///
    /// The element type is kept when all arrays share it; mixed types are
    /// widened to `f64`. Returns `None` for an empty slice or unequal shapes.
    pub fn stack(arrays: &[&NumericArray]) -> Option<Self> {
        let first = *arrays.first()?;
        if arrays.iter().any(|array| array.shape() != first.shape()) {
            return None;
        }

        macro_rules! stack_variant {
            ($variant:ident) => {{
                let views: Option<Vec<_>> = arrays
                    .iter()
                    .map(|array| match array {
                        NumericArray::$variant(a) => Some(a.view()),
                        _ => None,
                    })
                    .collect();
                if let Some(views) = views {
                    return ndarray::stack(Axis(0), &views)
                        .ok()
                        .map(NumericArray::$variant);
                }
            }};
        }

        match first {
            NumericArray::I8(_) => stack_variant!(I8),
            NumericArray::I16(_) => stack_variant!(I16),
            NumericArray::I32(_) => stack_variant!(I32),
            NumericArray::I64(_) => stack_variant!(I64),
            NumericArray::U8(_) => stack_variant!(U8),
            NumericArray::U16(_) => stack_variant!(U16),
            NumericArray::U32(_) => stack_variant!(U32),
            NumericArray::U64(_) => stack_variant!(U64),
            NumericArray::F32(_) => stack_variant!(F32),
            NumericArray::F64(_) => stack_variant!(F64),
        }

        let data: Vec<f64> = arrays.iter().flat_map(|array| array.iter_f64()).collect();
        let mut shape = Vec::with_capacity(first.ndim() + 1);
        shape.push(arrays.len());
        shape.extend_from_slice(first.shape());
        Self::from_shape_vec(&shape, data).ok()
    }

    /// Write all elements in row-major little-endian order
    pub fn write_le<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        with_array!(self, a => {
            for value in a.iter() {
                value.write_le(writer)?;
            }
            Ok(())
        })
    }

    /// Read `shape.iter().product()` little-endian elements of `dtype`
    pub fn read_le<R: Read>(reader: &mut R, dtype: DType, shape: &[usize]) -> io::Result<Self> {
        match dtype {
            DType::I8 => read_elements::<i8, R>(reader, shape),
            DType::I16 => read_elements::<i16, R>(reader, shape),
            DType::I32 => read_elements::<i32, R>(reader, shape),
            DType::I64 => read_elements::<i64, R>(reader, shape),
            DType::U8 => read_elements::<u8, R>(reader, shape),
            DType::U16 => read_elements::<u16, R>(reader, shape),
            DType::U32 => read_elements::<u32, R>(reader, shape),
            DType::U64 => read_elements::<u64, R>(reader, shape),
            DType::F32 => read_elements::<f32, R>(reader, shape),
            DType::F64 => read_elements::<f64, R>(reader, shape),
        }
    }
}

fn read_elements<T: Element, R: Read>(reader: &mut R, shape: &[usize]) -> io::Result<NumericArray> {
    let count: usize = shape.iter().product();
    let mut data = Vec::with_capacity(count);
    for _ in 0..count {
        data.push(T::read_le(reader)?);
    }
    NumericArray::from_shape_vec(shape, data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

impl fmt::Display for NumericArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.dtype(), self.shape())
    }
}

impl<T: Element> From<Vec<T>> for NumericArray {
    fn from(data: Vec<T>) -> Self {
        NumericArray::from_vec(data)
    }
}

impl<T: Element> From<ArrayD<T>> for NumericArray {
    fn from(array: ArrayD<T>) -> Self {
        T::into_numeric(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_codes_are_unique() {
        for dtype in DType::ALL {
            assert_eq!(DType::from_code(dtype.code()), Some(dtype));
        }
        assert_eq!(DType::from_code(0), None);
        assert_eq!(DType::from_code(200), None);
    }

    #[test]
    fn test_shape_and_len() {
        let array = NumericArray::from_shape_vec(&[2, 3], vec![1i32, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(array.shape(), &[2, 3]);
        assert_eq!(array.ndim(), 2);
        assert_eq!(array.len(), 6);
        assert_eq!(array.dtype(), DType::I32);
    }

    #[test]
    fn test_scalar_array() {
        let array = NumericArray::scalar(1540.0f64);
        assert_eq!(array.ndim(), 0);
        assert_eq!(array.len(), 1);
        assert_eq!(array.scalar_f64(), Some(1540.0));
    }

    #[test]
    fn test_bad_shape_is_rejected() {
        assert!(NumericArray::from_shape_vec(&[2, 2], vec![1.0f64, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_permute_then_reshape() {
        // [1, 1, 2, 3]: w0 = [0, 1, 2], w1 = [10, 11, 12]
        let array = NumericArray::from_shape_vec(&[1, 1, 2, 3], vec![0.0f64, 1.0, 2.0, 10.0, 11.0, 12.0])
            .unwrap();
        let moved = array.permuted_axes(&[0, 1, 3, 2]).into_shape(&[1, 1, 6]).unwrap();
        let values: Vec<f64> = moved.iter_f64().collect();
        assert_eq!(values, vec![0.0, 10.0, 1.0, 11.0, 2.0, 12.0]);
    }

    #[test]
    fn test_tile() {
        let array = NumericArray::from_vec(vec![700u16, 800]);
        let tiled = array.tile(3);
        assert_eq!(tiled.shape(), &[6]);
        let values: Vec<f64> = tiled.iter_f64().collect();
        assert_eq!(values, vec![700.0, 800.0, 700.0, 800.0, 700.0, 800.0]);
    }

    #[test]
    fn test_stack_keeps_shared_dtype() {
        let big = (1u64 << 53) + 1;
        let first = NumericArray::from_vec(vec![big, 1]);
        let second = NumericArray::from_vec(vec![2, big + 2]);
        let stacked = NumericArray::stack(&[&first, &second]).unwrap();
        assert_eq!(
            stacked,
            NumericArray::from_shape_vec(&[2, 2], vec![big, 1, 2, big + 2]).unwrap()
        );
    }

    #[test]
    fn test_stack_mixed_dtypes_widens_to_f64() {
        let first = NumericArray::from_vec(vec![1i32, 2]);
        let second = NumericArray::from_vec(vec![0.5f32, 1.5]);
        let stacked = NumericArray::stack(&[&first, &second]).unwrap();
        assert_eq!(stacked.dtype(), DType::F64);
        assert_eq!(stacked.shape(), &[2, 2]);
        let values: Vec<f64> = stacked.iter_f64().collect();
        assert_eq!(values, vec![1.0, 2.0, 0.5, 1.5]);

        let longer = NumericArray::from_vec(vec![1i32, 2, 3]);
        assert!(NumericArray::stack(&[&first, &longer]).is_none());
        assert!(NumericArray::stack(&[]).is_none());
    }

    #[test]
    fn test_le_roundtrip_preserves_dtype() {
        let array = NumericArray::from_shape_vec(&[3, 2], vec![-1i16, 2, -3, 4, -5, 6]).unwrap();
        let mut bytes = Vec::new();
        array.write_le(&mut bytes).unwrap();
        assert_eq!(bytes.len(), 6 * DType::I16.size());

        let restored = NumericArray::read_le(&mut bytes.as_slice(), DType::I16, &[3, 2]).unwrap();
        assert_eq!(restored, array);
    }
}
