use std::fmt;

use thiserror::Error;

/// Non-fatal generation diagnostics. Enhancement always continues after one
/// of these; the generator reports them on stderr.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// A member referenced by the naive type model has no corresponding
    /// particle or attribute in the schema. The documented fallback was
    /// applied: singular cardinality, no coercion.
    SchemaMismatch { type_name: String, member: String },
    /// The type matches both iteration shapes; it was left untagged.
    AmbiguousCapability { type_name: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaMismatch { type_name, member } => {
                write!(
                    f,
                    "{type_name}: no schema particle for member {member:?}, falling back to a singular accessor"
                )
            }
            Self::AmbiguousCapability { type_name } => {
                write!(
                    f,
                    "{type_name}: matches both the iteration-request and iteration-response shape, leaving it untagged"
                )
            }
        }
    }
}

/// Contract violations in the naive type model itself. These have no safe
/// default: the input is internally inconsistent.
#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("type {type_name}: aggregator {aggregator:?} references discriminator {discriminator:?}, which is not a discriminator member of the type")]
    MalformedAggregator {
        type_name: String,
        aggregator: String,
        discriminator: String,
    },
}
