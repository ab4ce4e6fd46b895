use crate::ast::{Ast, Node};
use crate::error::MarshalError;
use crate::marshal::marshal_to_ast as build;
use crate::options::MarshalOptions;
use crate::printer::marshal_node;
use crate::record::Record;
use std::io::Write;

/// Marshals a record to configuration text.
///
/// This is the full pipeline: the record is walked into an [`Ast`], which is then
/// printed.
///
/// # Errors
///
/// Returns a `MarshalError` if a field cannot be converted, if labels appear on the
/// top-level record, or if a field's registration does not match its value.
pub fn marshal<T: Record>(
    value: &T,
    options: impl Into<MarshalOptions>,
) -> Result<Vec<u8>, MarshalError> {
    let ast = marshal_to_ast(value, options)?;
    marshal_ast(&ast)
}

/// Walks a record into an [`Ast`] without printing it.
///
/// # Errors
///
/// See [`marshal`].
pub fn marshal_to_ast<T: Record>(
    value: &T,
    options: impl Into<MarshalOptions>,
) -> Result<Ast, MarshalError> {
    build(value, false, &options.into())
}

/// Prints a tree, or any part of one, to a byte buffer.
///
/// # Errors
///
/// Only fails if writing fails, which cannot happen for an in-memory buffer.
pub fn marshal_ast<'a>(node: impl Into<Node<'a>>) -> Result<Vec<u8>, MarshalError> {
    let mut buf = Vec::new();
    marshal_to_writer(node, &mut buf)?;
    Ok(buf)
}

/// Prints a tree, or any part of one, to an arbitrary sink.
///
/// # Errors
///
/// Returns `MarshalError::Io` if the sink fails.
pub fn marshal_to_writer<'a, W: Write>(
    node: impl Into<Node<'a>>,
    w: &mut W,
) -> Result<(), MarshalError> {
    marshal_node(w, "", node.into())?;
    Ok(())
}

/// Builds the documentation tree for a record type.
///
/// Every field appears, optional attributes are marked as such, values are
/// placeholders and repeated blocks appear once, marked as repeated.
///
/// # Errors
///
/// See [`marshal`].
pub fn schema<T: Record + Default>(
    options: impl Into<MarshalOptions>,
) -> Result<Ast, MarshalError> {
    build(&T::default(), true, &options.into())
}

/// Prints the documentation tree for a record type.
///
/// # Errors
///
/// See [`marshal`].
pub fn marshal_schema<T: Record + Default>(
    options: impl Into<MarshalOptions>,
) -> Result<Vec<u8>, MarshalError> {
    let ast = schema::<T>(options)?;
    marshal_ast(&ast)
}
