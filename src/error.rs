use thiserror::Error;

/// Result type for pipeline stages that fail with a domain error.
pub type BuildResult<T> = Result<T, BuildError>;

/// Fatal conditions detected while building the map dataset.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    /// A source record names a state code missing from the reference table.
    #[error("unknown state code {code}: not present in the state reference table")]
    UnknownState { code: u32 },

    /// A source record lacks a property the normalizer depends on.
    #[error("feature {index} is missing required property `{field}`")]
    MissingField { field: String, index: usize },

    /// A source property is present but cannot be interpreted.
    #[error("property `{field}` has unusable value {value}")]
    InvalidField { field: String, value: String },

    /// Only areal geometries can be colored and labelled.
    #[error("unsupported geometry type `{kind}` (expected Polygon or MultiPolygon)")]
    UnsupportedGeometry { kind: String },

    /// Neither the pole of inaccessibility nor the source interior point is usable.
    #[error("no label anchor for district {key}: placement failed and no fallback point was recorded")]
    NoLabelAnchor { key: String },
}

impl BuildError {
    pub(crate) fn missing(field: &str, index: usize) -> Self {
        Self::MissingField { field: field.to_string(), index }
    }

    pub(crate) fn invalid(field: &str, value: impl ToString) -> Self {
        Self::InvalidField { field: field.to_string(), value: value.to_string() }
    }
}
