use thiserror::Error;

/// Problems with face data. These are raised when a catalog is loaded, never
/// while drawing.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("shape `{name}` has no vertices")]
    EmptyFace { name: String },

    #[error("shape `{name}` flips side wall {index} but only has {sides} side walls")]
    FlipOutOfRange {
        name: String,
        index: usize,
        sides: usize,
    },

    #[error("flip index {index} does not fit in a {max}-bit flip mask")]
    FlipIndexTooLarge { index: usize, max: usize },

    #[error("shape `{name}` vertex {vertex} has a non-finite coordinate")]
    NonFinite { name: String, vertex: usize },

    #[error("shape name `{name}` appears more than once")]
    DuplicateName { name: String },

    #[error("invalid catalog json: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum TessellationError {
    #[error("tessellation protocol violated: {0}")]
    Protocol(&'static str),

    #[error("polygon fill failed: {0}")]
    Fill(String),
}

