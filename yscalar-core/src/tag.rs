//! Tag resolution against the YAML core schema.
//!
//! Global tags live under the `tag:yaml.org,2002:` namespace and name exactly
//! one [`SemanticType`]. Anything else is a local/custom tag which this layer
//! refuses to interpret.

/// Namespace prefix of every core-schema tag.
pub const CORE_SCHEMA_PREFIX: &str = "tag:yaml.org,2002:";

/// Default tag attached to emitted binary scalars.
pub const BINARY_TAG: &str = "tag:yaml.org,2002:binary";

/// Semantic type named by a core-schema tag.
///
/// Only the scalar kinds take part in coercion. The collection kinds exist so
/// the resolver can report "this names a collection, not a scalar".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Null,
    Boolean,
    Integer,
    /// Same wire tag as [`SemanticType::Integer`]; never returned by [`resolve`]
    UnsignedInteger,
    Float,
    String,
    Binary,
    Map,
    OrderedMap,
    Pairs,
    Set,
    Sequence,
    Merge,
    Timestamp,
    GenericValue,
    GenericYaml,
}

impl SemanticType {
    #[inline]
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            SemanticType::Map
                | SemanticType::OrderedMap
                | SemanticType::Pairs
                | SemanticType::Set
                | SemanticType::Sequence
        )
    }

    #[inline]
    pub fn is_scalar(self) -> bool {
        !self.is_collection()
    }

    /// The core-schema suffix of this type.
    pub fn suffix(self) -> &'static str {
        match self {
            SemanticType::Null => "null",
            SemanticType::Boolean => "bool",
            SemanticType::Integer | SemanticType::UnsignedInteger => "int",
            SemanticType::Float => "float",
            SemanticType::String => "str",
            SemanticType::Binary => "binary",
            SemanticType::Map => "map",
            SemanticType::OrderedMap => "omap",
            SemanticType::Pairs => "pairs",
            SemanticType::Set => "set",
            SemanticType::Sequence => "seq",
            SemanticType::Merge => "merge",
            SemanticType::Timestamp => "timestamp",
            SemanticType::GenericValue => "value",
            SemanticType::GenericYaml => "yaml",
        }
    }
}

/// Why a tag did not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    /// Local/custom tag: not an error as such, callers decide what to do
    #[error("local tag is not interpreted")]
    Unsupported,

    /// Core-schema namespace with an unknown suffix
    #[error("unknown core-schema tag")]
    Invalid,
}

static CORE_SCHEMA_TYPES: phf::Map<&'static str, SemanticType> = phf::phf_map! {
    "null" => SemanticType::Null,
    "bool" => SemanticType::Boolean,
    "int" => SemanticType::Integer,
    "float" => SemanticType::Float,
    "str" => SemanticType::String,
    "binary" => SemanticType::Binary,
    "map" => SemanticType::Map,
    "omap" => SemanticType::OrderedMap,
    "pairs" => SemanticType::Pairs,
    "set" => SemanticType::Set,
    "seq" => SemanticType::Sequence,
    "merge" => SemanticType::Merge,
    "timestamp" => SemanticType::Timestamp,
    "value" => SemanticType::GenericValue,
    "yaml" => SemanticType::GenericYaml,
};

/// Resolve a tag to the semantic type it names.
///
/// Matching is exact and case-sensitive.
pub fn resolve(tag: &str) -> Result<SemanticType, TagError> {
    let suffix = tag
        .strip_prefix(CORE_SCHEMA_PREFIX)
        .ok_or(TagError::Unsupported)?;
    CORE_SCHEMA_TYPES
        .get(suffix)
        .copied()
        .ok_or(TagError::Invalid)
}

/// Canonical global tag URI of a semantic type.
pub fn tag_for(ty: SemanticType) -> &'static str {
    match ty {
        SemanticType::Null => "tag:yaml.org,2002:null",
        SemanticType::Boolean => "tag:yaml.org,2002:bool",
        SemanticType::Integer | SemanticType::UnsignedInteger => "tag:yaml.org,2002:int",
        SemanticType::Float => "tag:yaml.org,2002:float",
        SemanticType::String => "tag:yaml.org,2002:str",
        SemanticType::Binary => BINARY_TAG,
        SemanticType::Map => "tag:yaml.org,2002:map",
        SemanticType::OrderedMap => "tag:yaml.org,2002:omap",
        SemanticType::Pairs => "tag:yaml.org,2002:pairs",
        SemanticType::Set => "tag:yaml.org,2002:set",
        SemanticType::Sequence => "tag:yaml.org,2002:seq",
        SemanticType::Merge => "tag:yaml.org,2002:merge",
        SemanticType::Timestamp => "tag:yaml.org,2002:timestamp",
        SemanticType::GenericValue => "tag:yaml.org,2002:value",
        SemanticType::GenericYaml => "tag:yaml.org,2002:yaml",
    }
}
