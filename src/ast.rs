use crate::number::Number;
use crate::utils::quote;
use serde::Serialize;
use std::fmt::{self, Display};

/// A whole document: the entries of the root record plus any trailing comments.
#[derive(Debug, PartialEq, Clone, Default, Serialize)]
pub struct Ast {
    pub entries: Vec<Entry>,
    pub trailing_comments: Vec<String>,
    /// Set when the tree documents a type rather than holding data.
    pub schema: bool,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    Attribute(Attribute),
    Block(Block),
}

/// `key = value`
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Attribute {
    pub key: String,
    pub value: Value,
    /// Only rendered for schema trees.
    pub optional: bool,
    pub comments: Vec<String>,
}

/// `name "label" ... { body }`
#[derive(Debug, PartialEq, Clone, Default, Serialize)]
pub struct Block {
    pub name: String,
    pub labels: Vec<String>,
    pub body: Vec<Entry>,
    /// Only rendered for schema trees: the block may appear zero or more times.
    pub repeated: bool,
    pub comments: Vec<String>,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    String(String),
    Number(Number),
    Bool(bool),
    List(Vec<Value>),
    Map(Vec<MapEntry>),
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct MapEntry {
    pub key: Value,
    pub value: Value,
    pub comments: Vec<String>,
}

/// Any printable part of a tree.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Ast(&'a Ast),
    Block(&'a Block),
    Attribute(&'a Attribute),
    Value(&'a Value),
}

// --- Constructors ---

impl Ast {
    pub fn new(entries: Vec<Entry>) -> Self {
        Ast {
            entries,
            ..Default::default()
        }
    }

    /// Dumps the tree as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Attribute {
            key: key.into(),
            value: value.into(),
            optional: false,
            comments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Block {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    #[must_use]
    pub fn with_entry(mut self, entry: impl Into<Entry>) -> Self {
        self.body.push(entry.into());
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn number(n: impl Into<Number>) -> Self {
        Value::Number(n.into())
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Builds a map from key/value pairs, keeping their order.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(key, value)| MapEntry::new(key, value))
                .collect(),
        )
    }
}

impl MapEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        MapEntry {
            key: Value::String(key.into()),
            value: value.into(),
            comments: Vec::new(),
        }
    }
}

impl From<Attribute> for Entry {
    fn from(attribute: Attribute) -> Self {
        Entry::Attribute(attribute)
    }
}

impl From<Block> for Entry {
    fn from(block: Block) -> Self {
        Entry::Block(block)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

macro_rules! impl_value_from_int {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n.into())
                }
            }
        )+
    };
}

impl_value_from_int!(i32, i64, u32, u64);

impl From<Vec<Value>> for Value {
    fn from(list: Vec<Value>) -> Self {
        Value::List(list)
    }
}

impl From<Vec<MapEntry>> for Value {
    fn from(map: Vec<MapEntry>) -> Self {
        Value::Map(map)
    }
}

impl<'a> From<&'a Ast> for Node<'a> {
    fn from(ast: &'a Ast) -> Self {
        Node::Ast(ast)
    }
}

impl<'a> From<&'a Block> for Node<'a> {
    fn from(block: &'a Block) -> Self {
        Node::Block(block)
    }
}

impl<'a> From<&'a Attribute> for Node<'a> {
    fn from(attribute: &'a Attribute) -> Self {
        Node::Attribute(attribute)
    }
}

impl<'a> From<&'a Value> for Node<'a> {
    fn from(value: &'a Value) -> Self {
        Node::Value(value)
    }
}

/// Single-line rendering. Maps nested inside lists use the inline `{k: v, ...}` form;
/// the printer expands attribute-level maps over several lines.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", quote(s)),
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", entry.key, entry.value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
