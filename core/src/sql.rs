//! Token streams shared by conditions and relations.

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::params::PlaceholderStyle;
use crate::value::Value;

/// A piece of a statement: literal SQL text or a reference into the owning
/// bound-value list.
#[derive(Debug, Clone, PartialEq)]
pub enum SQLChunk {
    /// Keywords, operators, parentheses and quoted identifiers
    Text(CompactString),
    /// Index of a bound value
    Bind(usize),
}

impl SQLChunk {
    pub fn text(text: impl Into<CompactString>) -> Self {
        Self::Text(text.into())
    }
}

pub type Chunks = SmallVec<[SQLChunk; 4]>;

/// Double-quotes an identifier, doubling any embedded quote.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `"table"."column"`
pub fn qualified(table: &str, column: &str) -> String {
    format!("{}.{}", quote_ident(table), quote_ident(column))
}

/// Renders chunks into `out`, resolving binds against `values` per `style`.
pub fn write_chunks(out: &mut String, chunks: &[SQLChunk], style: PlaceholderStyle, values: &[Value]) {
    for chunk in chunks {
        match chunk {
            SQLChunk::Text(text) => out.push_str(text),
            SQLChunk::Bind(index) => match style {
                PlaceholderStyle::Inline => {
                    let literal = values
                        .get(*index)
                        .map_or_else(|| "NULL".to_string(), Value::to_literal);
                    out.push_str(&literal);
                }
                _ => style.write_placeholder(out, *index),
            },
        }
    }
}

/// Offsets every bind index by `by`.
pub fn shift(chunks: &mut [SQLChunk], by: usize) {
    if by == 0 {
        return;
    }
    for chunk in chunks {
        if let SQLChunk::Bind(index) = chunk {
            *index += by;
        }
    }
}

pub fn bind_indices(chunks: &[SQLChunk]) -> impl Iterator<Item = usize> + '_ {
    chunks.iter().filter_map(|chunk| match chunk {
        SQLChunk::Bind(index) => Some(*index),
        SQLChunk::Text(_) => None,
    })
}
