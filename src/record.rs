//! Field registration for records.
//!
//! A record lists its members in declaration order, each with a [`Tag`] telling the
//! marshaller whether the member is a label, a nested block or an attribute. Embedded
//! records are flattened in place.
//!
//! ```
//! use hcl_marshal::record::{Member, Record, Tag};
//!
//! #[derive(Default)]
//! struct Listener {
//!     name: String,
//!     port: u16,
//! }
//!
//! impl Record for Listener {
//!     fn members(&self) -> Vec<Member<'_>> {
//!         vec![
//!             Member::value(Tag::label("name"), &self.name),
//!             Member::value(Tag::attr("port").comment("Port to bind."), &self.port),
//!         ]
//!     }
//! }
//! ```

use crate::ast::Value;
use crate::error::MarshalError;
use crate::options::MarshalOptions;
use crate::value::Marshal;

/// A record whose fields can be walked by the marshaller.
pub trait Record {
    fn members(&self) -> Vec<Member<'_>>;
}

pub enum Member<'a> {
    Field(Field<'a>),
    /// Fields of the inner record are spliced in at this position.
    Embed(&'a dyn Record),
}

pub struct Field<'a> {
    pub tag: Tag,
    pub type_name: &'static str,
    pub value: FieldValue<'a>,
}

pub enum FieldValue<'a> {
    Leaf(Leaf<'a>),
    Record(Nested<'a>),
}

#[derive(Clone, Copy)]
pub struct Leaf<'a> {
    pub value: &'a dyn Marshal,
    pub schema: fn() -> Value,
}

/// Builds a zero-valued instance of a record type.
pub type ZeroRecord = fn() -> Box<dyn Record>;

pub enum Nested<'a> {
    One(&'a dyn Record),
    Optional(Option<&'a dyn Record>, ZeroRecord),
    Many(Vec<&'a dyn Record>, ZeroRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Attribute,
    Block,
    Label,
}

/// Per-field metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    /// `None` when the field carries no explicit tag.
    pub kind: Option<TagKind>,
    pub optional: bool,
    pub comments: Vec<String>,
}

impl Tag {
    fn with_kind(name: impl Into<String>, kind: Option<TagKind>) -> Self {
        Tag {
            name: name.into(),
            kind,
            optional: false,
            comments: Vec::new(),
        }
    }

    pub fn attr(name: impl Into<String>) -> Self {
        Self::with_kind(name, Some(TagKind::Attribute))
    }

    pub fn block(name: impl Into<String>) -> Self {
        Self::with_kind(name, Some(TagKind::Block))
    }

    pub fn label(name: impl Into<String>) -> Self {
        Self::with_kind(name, Some(TagKind::Label))
    }

    pub fn untagged(name: impl Into<String>) -> Self {
        Self::with_kind(name, None)
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Adds a comment; embedded newlines become separate comment lines.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Tag::untagged(name)
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Tag::untagged(name)
    }
}

fn zero<T: Record + Default + 'static>() -> Box<dyn Record> {
    Box::new(T::default())
}

impl<'a> Member<'a> {
    /// A leaf: an attribute, or a label when tagged as one.
    pub fn value<T: Marshal>(tag: impl Into<Tag>, value: &'a T) -> Self {
        Member::Field(Field {
            tag: tag.into(),
            type_name: std::any::type_name::<T>(),
            value: FieldValue::Leaf(Leaf {
                value,
                schema: T::schema,
            }),
        })
    }

    pub fn record<T: Record>(tag: impl Into<Tag>, value: &'a T) -> Self {
        Member::Field(Field {
            tag: tag.into(),
            type_name: std::any::type_name::<T>(),
            value: FieldValue::Record(Nested::One(value)),
        })
    }

    pub fn optional_record<T: Record + Default + 'static>(
        tag: impl Into<Tag>,
        value: &'a Option<T>,
    ) -> Self {
        Member::Field(Field {
            tag: tag.into(),
            type_name: std::any::type_name::<Option<T>>(),
            value: FieldValue::Record(Nested::Optional(
                value.as_ref().map(|v| v as &dyn Record),
                zero::<T>,
            )),
        })
    }

    pub fn records<T: Record + Default + 'static>(tag: impl Into<Tag>, values: &'a [T]) -> Self {
        Member::Field(Field {
            tag: tag.into(),
            type_name: std::any::type_name::<Vec<T>>(),
            value: FieldValue::Record(Nested::Many(
                values.iter().map(|v| v as &dyn Record).collect(),
                zero::<T>,
            )),
        })
    }

    pub fn embed<T: Record>(value: &'a T) -> Self {
        Member::Embed(value)
    }
}

/// What a field turned out to be once its tag and value were reconciled.
pub(crate) enum Resolved<'a> {
    Label(Leaf<'a>),
    Block(Nested<'a>),
    Attribute(Leaf<'a>),
}

impl<'a> Field<'a> {
    pub(crate) fn resolve(
        self,
        options: &MarshalOptions,
    ) -> Result<(Tag, Resolved<'a>), MarshalError> {
        let resolved = match (self.tag.kind, self.value) {
            (Some(TagKind::Label), FieldValue::Leaf(leaf)) => Resolved::Label(leaf),
            (Some(TagKind::Label), FieldValue::Record(_)) => {
                return Err(MarshalError::LabelNotString {
                    field: self.tag.name,
                })
            }
            (Some(TagKind::Block), FieldValue::Record(nested)) => Resolved::Block(nested),
            (Some(TagKind::Block), FieldValue::Leaf(_)) => {
                return Err(MarshalError::BlockNotRecord {
                    field: self.tag.name,
                })
            }
            (None, FieldValue::Record(nested)) if options.infer_tags => Resolved::Block(nested),
            (_, FieldValue::Record(_)) => {
                return Err(MarshalError::UnsupportedType {
                    field: self.tag.name,
                    type_name: self.type_name.to_string(),
                })
            }
            (_, FieldValue::Leaf(leaf)) => Resolved::Attribute(leaf),
        };
        Ok((self.tag, resolved))
    }
}

/// The fields of a record with embedded records flattened, in declaration order.
pub(crate) fn flatten<'a>(record: &'a dyn Record) -> Vec<Field<'a>> {
    let mut fields = Vec::new();
    for member in record.members() {
        match member {
            Member::Field(field) => fields.push(field),
            Member::Embed(inner) => fields.extend(flatten(inner)),
        }
    }
    fields
}
