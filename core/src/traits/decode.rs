use crate::error::{RelqError, Result};
use crate::traits::{Attr, Column};
use crate::value::{SQLType, Value};

/// The values of one fetched row, consumed left to right while decoding.
#[derive(Debug)]
pub struct RowValues {
    values: std::vec::IntoIter<Value>,
    position: usize,
}

impl RowValues {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values: values.into_iter(),
            position: 0,
        }
    }

    /// Takes the next column value.
    pub fn next_value(&mut self) -> Result<Value> {
        let value = self.values.next().ok_or_else(|| {
            RelqError::Mapping(format!(
                "row has {} columns, result shape needs more",
                self.position
            ))
        })?;
        self.position += 1;
        Ok(value)
    }

    /// Fails if the result shape left columns unread.
    pub fn finish(self) -> Result<()> {
        let remaining = self.values.len();
        if remaining == 0 {
            Ok(())
        } else {
            Err(RelqError::Mapping(format!(
                "result shape read {} columns, row has {} more",
                self.position, remaining
            )))
        }
    }
}

/// Builds a value from the leading columns of a row.
pub trait Decode: Sized {
    fn decode(row: &mut RowValues) -> Result<Self>;
}

impl<C: Column> Decode for Attr<C> {
    fn decode(row: &mut RowValues) -> Result<Self> {
        C::Type::from_value(row.next_value()?).map(Attr::from_option)
    }
}

impl<T: SQLType> Decode for Option<T> {
    fn decode(row: &mut RowValues) -> Result<Self> {
        T::from_value(row.next_value()?)
    }
}

/// Row counts.
impl Decode for u64 {
    fn decode(row: &mut RowValues) -> Result<Self> {
        match row.next_value()? {
            Value::Integer(v) => {
                u64::try_from(v).map_err(|_| RelqError::Mapping(format!("negative count {v}")))
            }
            Value::Null => Ok(0),
            other => Err(RelqError::Mapping(format!(
                "expected count, found {} value",
                other.kind_name()
            ))),
        }
    }
}

macro_rules! impl_decode_tuple {
    ($($name:ident),+) => {
        impl<$($name: Decode),+> Decode for ($($name,)+) {
            fn decode(row: &mut RowValues) -> Result<Self> {
                Ok(($($name::decode(row)?,)+))
            }
        }
    };
}

impl_decode_tuple!(A);
impl_decode_tuple!(A, B);
impl_decode_tuple!(A, B, C);
impl_decode_tuple!(A, B, C, D);
impl_decode_tuple!(A, B, C, D, E);
impl_decode_tuple!(A, B, C, D, E, F);
impl_decode_tuple!(A, B, C, D, E, F, G);
impl_decode_tuple!(A, B, C, D, E, F, G, H);
