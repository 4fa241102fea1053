//! Nodal attribute tables.
//!
//! Four kinds of attribute are supported, each stored column-wise and
//! indexed by node id: binary, categorical, continuous and set. Missing
//! values are first-class (`None` for binary/categorical/set, NaN for
//! continuous) and every change statistic treats a missing operand as a
//! zero contribution. Tables are read-only once the graph is built.

use bitvec::vec::BitVec;

/// Identifies one of the four attribute kinds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AttributeKind {
    /// Values in `{0, 1, NA}`.
    Binary,
    /// Non-negative integer categories, or NA.
    Categorical,
    /// IEEE-754 doubles; NaN denotes NA.
    Continuous,
    /// Element sets over a fixed universe; the whole value may be NA.
    Set,
}

impl AttributeKind {
    /// Returns the lowercase kind name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Categorical => "categorical",
            Self::Continuous => "continuous",
            Self::Set => "set",
        }
    }
}

/// One named column of per-node values.
#[derive(Clone, Debug)]
pub struct AttributeColumn<T> {
    name: String,
    values: Vec<T>,
}

impl<T> AttributeColumn<T> {
    /// Builds a column from a name and one value per node.
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Returns the column name as given in the attribute file header.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of rows (one per node).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the column holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn value(&self, node: u32) -> Option<&T> {
        self.values.get(node as usize)
    }
}

/// All attribute columns attached to a graph.
///
/// Effects reference columns by `(kind, index)`; the configuration binder
/// resolves user-supplied names to indices once, before sampling starts.
#[derive(Clone, Debug, Default)]
pub struct AttributeStore {
    binary: Vec<AttributeColumn<Option<bool>>>,
    categorical: Vec<AttributeColumn<Option<u32>>>,
    continuous: Vec<AttributeColumn<f64>>,
    set: Vec<AttributeColumn<Option<BitVec>>>,
}

impl AttributeStore {
    /// Adds a binary column and returns its index.
    pub fn push_binary(&mut self, column: AttributeColumn<Option<bool>>) -> usize {
        self.binary.push(column);
        self.binary.len() - 1
    }

    /// Adds a categorical column and returns its index.
    pub fn push_categorical(&mut self, column: AttributeColumn<Option<u32>>) -> usize {
        self.categorical.push(column);
        self.categorical.len() - 1
    }

    /// Adds a continuous column and returns its index.
    pub fn push_continuous(&mut self, column: AttributeColumn<f64>) -> usize {
        self.continuous.push(column);
        self.continuous.len() - 1
    }

    /// Adds a set column and returns its index.
    pub fn push_set(&mut self, column: AttributeColumn<Option<BitVec>>) -> usize {
        self.set.push(column);
        self.set.len() - 1
    }

    /// Looks up a column index by case-insensitive name.
    #[must_use]
    pub fn find(&self, kind: AttributeKind, name: &str) -> Option<usize> {
        fn position<T>(columns: &[AttributeColumn<T>], name: &str) -> Option<usize> {
            columns
                .iter()
                .position(|column| column.name().eq_ignore_ascii_case(name))
        }
        match kind {
            AttributeKind::Binary => position(&self.binary, name),
            AttributeKind::Categorical => position(&self.categorical, name),
            AttributeKind::Continuous => position(&self.continuous, name),
            AttributeKind::Set => position(&self.set, name),
        }
    }

    /// Returns how many columns of `kind` are loaded.
    #[must_use]
    pub fn count(&self, kind: AttributeKind) -> usize {
        match kind {
            AttributeKind::Binary => self.binary.len(),
            AttributeKind::Categorical => self.categorical.len(),
            AttributeKind::Continuous => self.continuous.len(),
            AttributeKind::Set => self.set.len(),
        }
    }

    /// Binary value for `node`, `None` when missing or the column is absent.
    #[must_use]
    pub fn binary(&self, index: usize, node: u32) -> Option<bool> {
        self.binary
            .get(index)
            .and_then(|column| column.value(node))
            .copied()
            .flatten()
    }

    /// Categorical value for `node`, `None` when missing.
    #[must_use]
    pub fn categorical(&self, index: usize, node: u32) -> Option<u32> {
        self.categorical
            .get(index)
            .and_then(|column| column.value(node))
            .copied()
            .flatten()
    }

    /// Continuous value for `node`; NaN encodes a missing observation.
    #[must_use]
    pub fn continuous(&self, index: usize, node: u32) -> f64 {
        self.continuous
            .get(index)
            .and_then(|column| column.value(node))
            .copied()
            .unwrap_or(f64::NAN)
    }

    /// Set value for `node`, `None` when the whole value is missing.
    #[must_use]
    pub fn set(&self, index: usize, node: u32) -> Option<&BitVec> {
        self.set
            .get(index)
            .and_then(|column| column.value(node))
            .and_then(Option::as_ref)
    }
}
