use miette::Diagnostic;
use thiserror::Error;

/// Boxed error returned by [`MarshalText`](crate::value::MarshalText) implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug, Diagnostic)]
pub enum MarshalError {
    #[error("unexpected labels {} at top level", .labels.join(", "))]
    #[diagnostic(
        code(marshal::top_level_labels),
        help("Label fields name a block; they are only valid on records nested inside a block.")
    )]
    TopLevelLabels { labels: Vec<String> },

    #[error("label field `{field}` must hold a string")]
    #[diagnostic(
        code(marshal::label_not_string),
        help("Labels are printed as quoted identifiers after the block name.")
    )]
    LabelNotString { field: String },

    #[error("block field `{field}` does not hold a record")]
    #[diagnostic(
        code(marshal::block_not_record),
        help("Register the field with `Member::record`, `Member::optional_record` or `Member::records`.")
    )]
    BlockNotRecord { field: String },

    #[error("field `{field}` has type `{type_name}`, which cannot be represented as an attribute value")]
    #[diagnostic(
        code(marshal::unsupported_type),
        help("Tag the field as a block, or enable `infer_tags` for untagged records.")
    )]
    UnsupportedType { field: String, type_name: String },

    #[error("failed to convert field `{field}`")]
    #[diagnostic(code(marshal::conversion))]
    Conversion {
        field: String,
        #[source]
        source: ConvertError,
    },

    #[error(transparent)]
    #[diagnostic(code(marshal::io))]
    Io(#[from] std::io::Error),
}

/// A leaf value could not be turned into an attribute value.
#[derive(Error, Debug, Diagnostic)]
pub enum ConvertError {
    #[error("text rendering failed: {0}")]
    Text(#[source] BoxError),

    #[error("JSON rendering failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} has no decimal representation")]
    NonFinite(f64),

    #[error("value is absent")]
    #[diagnostic(help("Only fields tagged optional may be left unset."))]
    Absent,
}

impl ConvertError {
    pub(crate) fn in_field(self, field: &str) -> MarshalError {
        MarshalError::Conversion {
            field: field.to_string(),
            source: self,
        }
    }
}
