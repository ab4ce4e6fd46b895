pub mod api;
pub mod ast;
pub mod error;
pub mod number;
pub mod options;
pub mod record;
pub mod utils;
pub mod value;
mod marshal;
mod printer;

pub use api::{marshal, marshal_ast, marshal_schema, marshal_to_ast, marshal_to_writer, schema};
pub use ast::{Ast, Attribute, Block, Entry, MapEntry, Node, Value};
pub use error::{ConvertError, MarshalError};
pub use number::Number;
pub use options::{MarshalOption, MarshalOptions};
pub use record::{Member, Record, Tag};
pub use value::{Json, Marshal, MarshalText};
