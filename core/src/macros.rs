/// Declares a model: a record struct of [`Attr`](crate::Attr) fields, one
/// marker type per column, and the [`Model`](crate::Model) /
/// [`Decode`](crate::Decode) impls tying them to a table.
///
/// Column names are the field names; constraints follow the column type.
/// `max_length(n)` takes its limit in parentheses.
///
/// ```ignore
/// relq::model! {
///     pub struct User("users") {
///         pub id: UserId<i64>.primary_key.auto_increment,
///         pub name: UserName<String>.not_null.max_length(64),
///         pub age: UserAge<i32>,
///     }
/// }
/// ```
#[macro_export]
macro_rules! model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $model:ident ($table:literal) {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $column:ident < $ty:ty >
                    $(.$constraint:ident $(($arg:expr))?)*
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $model {
            $(
                $(#[$field_meta])*
                $field_vis $field: $crate::Attr<$column>,
            )+
        }

        $(
            #[doc = concat!("Column `", stringify!($field), "` of `", $table, "`.")]
            #[derive(Debug, Clone, Copy, Default)]
            $vis struct $column;

            impl $crate::Column for $column {
                type Model = $model;
                type Type = $ty;

                const NAME: &'static str = stringify!($field);
                const CONSTRAINTS: $crate::Constraints =
                    $crate::Constraints::NONE $(.$constraint($($arg)?))*;
            }
        )+

        impl $crate::Model for $model {
            const TABLE: &'static str = $table;
            const COLUMNS: &'static [$crate::ColumnInfo] =
                &[$(<$column as $crate::Column>::INFO),+];

            fn values(&self) -> ::std::vec::Vec<$crate::Value> {
                ::std::vec![$(self.$field.to_value()),+]
            }
        }

        impl $crate::Decode for $model {
            fn decode(row: &mut $crate::RowValues) -> $crate::Result<Self> {
                ::core::result::Result::Ok(Self {
                    $($field: $crate::Decode::decode(row)?,)+
                })
            }
        }
    };
}

/// Declares the foreign key `Child.fk -> Parent.pk`, enabling joins in both
/// directions. Both columns must hold the same Rust type.
///
/// ```ignore
/// relq::relationship!(Post: PostUserId => User: UserId);
/// ```
#[macro_export]
macro_rules! relationship {
    ($child:ident : $fk:ident => $parent:ident : $pk:ident) => {
        impl $crate::Related<$parent> for $child {
            const JOIN: ($crate::ColumnInfo, $crate::ColumnInfo) =
                $crate::ColumnInfo::join_pair::<$fk, $pk>();
        }

        impl $crate::Related<$child> for $parent {
            const JOIN: ($crate::ColumnInfo, $crate::ColumnInfo) =
                $crate::ColumnInfo::join_pair::<$pk, $fk>();
        }
    };
}
