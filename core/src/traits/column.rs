use core::any::type_name;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use crate::error::Result;
use crate::sql::qualified;
use crate::traits::Model;
use crate::value::{SQLKind, SQLType, Value};

/// Column-level constraints, built with the const builder methods.
///
/// ```ignore
/// const C: Constraints = Constraints::NONE.primary_key().not_null();
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Constraints {
    pub primary_key: bool,
    pub not_null: bool,
    pub unique: bool,
    pub auto_increment: bool,
    /// Character limit of a text column, rendered as `VARCHAR(n)`.
    pub max_length: Option<u32>,
}

impl Constraints {
    pub const NONE: Self = Self {
        primary_key: false,
        not_null: false,
        unique: false,
        auto_increment: false,
        max_length: None,
    };

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub const fn max_length(mut self, length: u32) -> Self {
        self.max_length = Some(length);
        self
    }
}

/// Static description of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnInfo {
    pub table: &'static str,
    pub name: &'static str,
    pub kind: SQLKind,
    pub constraints: Constraints,
}

impl ColumnInfo {
    pub const fn of<C: Column>() -> Self {
        C::INFO
    }

    /// `"table"."column"`
    pub fn qualified(&self) -> String {
        qualified(self.table, self.name)
    }

    /// A join predicate between two columns of the same type.
    pub const fn join_pair<L, R>() -> (ColumnInfo, ColumnInfo)
    where
        L: Column,
        R: Column<Type = L::Type>,
    {
        (L::INFO, R::INFO)
    }

    pub const fn is_primary_key(&self) -> bool {
        self.constraints.primary_key
    }
}

/// A column of a model, implemented by a zero-sized marker type.
///
/// Usually generated by [`model!`](crate::model).
pub trait Column: Copy + Default + fmt::Debug + Send + Sync + 'static {
    type Model: Model;
    type Type: SQLType;

    const NAME: &'static str;
    const CONSTRAINTS: Constraints;

    const INFO: ColumnInfo = ColumnInfo {
        table: <Self::Model as Model>::TABLE,
        name: Self::NAME,
        kind: <Self::Type as SQLType>::KIND,
        constraints: Self::CONSTRAINTS,
    };
}

/// A typed, possibly absent value of column `C`.
pub struct Attr<C: Column> {
    value: Option<C::Type>,
    _column: PhantomData<C>,
}

impl<C: Column> Attr<C> {
    pub fn new(value: impl Into<C::Type>) -> Self {
        Self::from_option(Some(value.into()))
    }

    pub const fn null() -> Self {
        Self {
            value: None,
            _column: PhantomData,
        }
    }

    pub const fn from_option(value: Option<C::Type>) -> Self {
        Self {
            value,
            _column: PhantomData,
        }
    }

    pub const fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub const fn value(&self) -> Option<&C::Type> {
        self.value.as_ref()
    }

    pub fn into_inner(self) -> Option<C::Type> {
        self.value
    }

    pub fn set(&mut self, value: impl Into<C::Type>) {
        self.value = Some(value.into());
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    pub const fn column_name(&self) -> &'static str {
        C::NAME
    }

    pub const fn table_name(&self) -> &'static str {
        C::INFO.table
    }

    pub const fn info(&self) -> ColumnInfo {
        C::INFO
    }

    /// Text form of the value, `"null"` when absent.
    ///
    /// The sentinel is not escaped: a text column holding the string `"null"`
    /// reads back through [`Attr::from_text`] as absent.
    pub fn to_text(&self) -> String {
        self.value
            .as_ref()
            .map_or_else(|| "null".to_string(), SQLType::to_text)
    }

    /// Parses the text form produced by [`Attr::to_text`]. Exactly `"null"`
    /// yields an absent value.
    pub fn from_text(text: &str) -> Result<Self> {
        if text == "null" {
            return Ok(Self::null());
        }
        C::Type::from_text(text).map(|value| Self::from_option(Some(value)))
    }

    pub fn to_value(&self) -> Value {
        self.value.as_ref().map_or(Value::Null, SQLType::to_value)
    }

    /// False when a `not_null` column holds no value, or a text value runs
    /// past the column's `max_length`.
    pub fn is_valid(&self) -> bool {
        match (&self.value, C::CONSTRAINTS.max_length) {
            (None, _) => !C::CONSTRAINTS.not_null,
            (Some(value), Some(limit)) if C::Type::KIND == SQLKind::Text => {
                value.to_text().chars().count() <= limit as usize
            }
            (Some(_), _) => true,
        }
    }
}

impl<C: Column> Clone for Attr<C> {
    fn clone(&self) -> Self {
        Self::from_option(self.value.clone())
    }
}

impl<C: Column> Default for Attr<C> {
    fn default() -> Self {
        Self::null()
    }
}

impl<C: Column> fmt::Debug for Attr<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column = type_name::<C>().rsplit("::").next().unwrap_or(C::NAME);
        f.debug_tuple(column).field(&self.value).finish()
    }
}

impl<C: Column> PartialEq for Attr<C> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<C: Column> Eq for Attr<C> where C::Type: Eq {}

impl<C: Column> Hash for Attr<C>
where
    C::Type: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}
