mod installation_kind;
mod installation_tag;

pub use installation_kind::InstallationKind;
pub use installation_tag::InstallationTag;

/// Returned when a textual enum value does not name a known variant.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("Unknown {enum_name} variant `{value}`")]
pub struct UnknownVariant {
    pub enum_name: &'static str,
    pub value: String,
}
