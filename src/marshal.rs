use crate::ast::{Ast, Attribute, Block, Entry, Value};
use crate::error::MarshalError;
use crate::options::MarshalOptions;
use crate::record::{flatten, Leaf, Nested, Record, Resolved, Tag};
use log::{debug, trace};

/// Builds the tree for a top-level record. Labels are rejected here because only
/// blocks carry them.
pub(crate) fn marshal_to_ast(
    record: &dyn Record,
    schema: bool,
    options: &MarshalOptions,
) -> Result<Ast, MarshalError> {
    let (entries, labels) = struct_to_entries(record, schema, options)?;
    if !labels.is_empty() {
        return Err(MarshalError::TopLevelLabels { labels });
    }
    debug!(
        "marshalled {} top-level entries (schema: {schema})",
        entries.len()
    );
    Ok(Ast {
        entries,
        trailing_comments: Vec::new(),
        schema,
    })
}

/// Walks the fields of one record, returning its body entries and the labels
/// pulled out of label fields.
fn struct_to_entries(
    record: &dyn Record,
    schema: bool,
    options: &MarshalOptions,
) -> Result<(Vec<Entry>, Vec<String>), MarshalError> {
    let mut entries = Vec::new();
    let mut labels = Vec::new();
    let fields = flatten(record);
    trace!("walking record with {} fields", fields.len());

    for field in fields {
        let (tag, resolved) = field.resolve(options)?;
        match resolved {
            Resolved::Label(leaf) => {
                if schema {
                    labels.push(tag.name);
                } else {
                    labels.push(label_text(&tag, leaf)?);
                }
            }
            Resolved::Block(nested) => {
                let blocks = nested_to_blocks(&tag, nested, schema, options)?;
                entries.extend(blocks.into_iter().map(Entry::Block));
            }
            Resolved::Attribute(leaf) if tag.optional && !schema && leaf.value.is_zero() => {
                trace!("skipping zero-valued optional field `{}`", tag.name);
            }
            Resolved::Attribute(leaf) => {
                entries.push(Entry::Attribute(field_to_attr(tag, leaf, schema)?));
            }
        }
    }
    Ok((entries, labels))
}

fn label_text(tag: &Tag, leaf: Leaf<'_>) -> Result<String, MarshalError> {
    match leaf.value.to_value().map_err(|e| e.in_field(&tag.name))? {
        Value::String(s) => Ok(s),
        _ => Err(MarshalError::LabelNotString {
            field: tag.name.clone(),
        }),
    }
}

fn field_to_attr(tag: Tag, leaf: Leaf<'_>, schema: bool) -> Result<Attribute, MarshalError> {
    let value = if schema {
        (leaf.schema)()
    } else {
        leaf.value.to_value().map_err(|e| e.in_field(&tag.name))?
    };
    Ok(Attribute {
        optional: tag.optional && schema,
        key: tag.name,
        value,
        comments: tag.comments,
    })
}

fn nested_to_blocks(
    tag: &Tag,
    nested: Nested<'_>,
    schema: bool,
    options: &MarshalOptions,
) -> Result<Vec<Block>, MarshalError> {
    match nested {
        Nested::One(record) => Ok(vec![value_to_block(tag, Some(record), schema, options)?]),
        Nested::Optional(None, zero) if schema => {
            let record = zero();
            Ok(vec![value_to_block(tag, Some(&*record), schema, options)?])
        }
        Nested::Optional(record, _) => Ok(vec![value_to_block(tag, record, schema, options)?]),
        Nested::Many(_, zero) if schema => {
            let record = zero();
            let mut block = value_to_block(tag, Some(&*record), schema, options)?;
            block.repeated = true;
            Ok(vec![block])
        }
        Nested::Many(records, _) => slice_to_blocks(tag, &records, options),
    }
}

/// One block per record. An absent record still yields the block, with an empty body.
fn value_to_block(
    tag: &Tag,
    record: Option<&dyn Record>,
    schema: bool,
    options: &MarshalOptions,
) -> Result<Block, MarshalError> {
    let (body, labels) = match record {
        Some(record) => struct_to_entries(record, schema, options)?,
        None => (Vec::new(), Vec::new()),
    };
    Ok(Block {
        name: tag.name.clone(),
        labels,
        body,
        repeated: false,
        comments: tag.comments.clone(),
    })
}

fn slice_to_blocks(
    tag: &Tag,
    records: &[&dyn Record],
    options: &MarshalOptions,
) -> Result<Vec<Block>, MarshalError> {
    records
        .iter()
        .map(|record| value_to_block(tag, Some(*record), false, options))
        .collect()
}
