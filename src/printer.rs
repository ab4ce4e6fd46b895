use crate::ast::{Ast, Attribute, Block, Entry, MapEntry, Node, Value};
use crate::utils::quote;
use std::io::{self, Write};

const INDENT: &str = "  ";

pub(crate) fn marshal_node<W: Write>(w: &mut W, indent: &str, node: Node<'_>) -> io::Result<()> {
    match node {
        Node::Ast(ast) => marshal_ast(w, indent, ast),
        Node::Block(block) => marshal_block(w, indent, block),
        Node::Attribute(attribute) => marshal_attribute(w, indent, attribute),
        Node::Value(value) => marshal_value(w, indent, value),
    }
}

fn marshal_ast<W: Write>(w: &mut W, indent: &str, ast: &Ast) -> io::Result<()> {
    marshal_entries(w, indent, &ast.entries)?;
    marshal_comments(w, indent, &ast.trailing_comments)
}

/// Attribute runs are kept tight; every block is set off by a blank line, as is the
/// first attribute after a block.
fn marshal_entries<W: Write>(w: &mut W, indent: &str, entries: &[Entry]) -> io::Result<()> {
    let mut prev_attr = true;
    for (i, entry) in entries.iter().enumerate() {
        match entry {
            Entry::Block(block) => {
                if i > 0 {
                    writeln!(w)?;
                }
                marshal_block(w, indent, block)?;
                prev_attr = false;
            }
            Entry::Attribute(attribute) => {
                if !prev_attr {
                    writeln!(w)?;
                }
                marshal_attribute(w, indent, attribute)?;
                prev_attr = true;
            }
        }
    }
    Ok(())
}

fn marshal_attribute<W: Write>(w: &mut W, indent: &str, attribute: &Attribute) -> io::Result<()> {
    marshal_comments(w, indent, &attribute.comments)?;
    write!(w, "{indent}{} = ", attribute.key)?;
    marshal_value(w, indent, &attribute.value)?;
    if attribute.optional {
        write!(w, " // (optional)")?;
    }
    writeln!(w)
}

/// `indent` is the indentation of the line the value starts on.
fn marshal_value<W: Write>(w: &mut W, indent: &str, value: &Value) -> io::Result<()> {
    match value {
        Value::Map(entries) => marshal_map(w, indent, entries),
        other => write!(w, "{other}"),
    }
}

fn marshal_map<W: Write>(w: &mut W, indent: &str, entries: &[MapEntry]) -> io::Result<()> {
    writeln!(w, "{{")?;
    let inner = format!("{indent}{INDENT}");
    for entry in entries {
        marshal_comments(w, &inner, &entry.comments)?;
        write!(w, "{inner}{}: ", entry.key)?;
        // Nested maps sit two levels below their key, their brace one level below.
        marshal_value(w, &format!("{inner}{INDENT}"), &entry.value)?;
        writeln!(w, ",")?;
    }
    write!(w, "{indent}}}")
}

fn marshal_block<W: Write>(w: &mut W, indent: &str, block: &Block) -> io::Result<()> {
    marshal_comments(w, indent, &block.comments)?;
    write!(w, "{indent}{} ", block.name)?;
    for label in &block.labels {
        write!(w, "{} ", quote(label))?;
    }
    if block.repeated {
        writeln!(w, "{{ // (repeated)")?;
    } else {
        writeln!(w, "{{")?;
    }
    marshal_entries(w, &format!("{indent}{INDENT}"), &block.body)?;
    writeln!(w, "{indent}}}")
}

fn marshal_comments<W: Write>(w: &mut W, indent: &str, comments: &[String]) -> io::Result<()> {
    for comment in comments {
        for line in comment.split('\n') {
            writeln!(w, "{indent}// {line}")?;
        }
    }
    Ok(())
}
