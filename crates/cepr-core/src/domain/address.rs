use serde::{Deserialize, Serialize};

/// Canonical, provider-agnostic address record.
///
/// All fields are best-effort strings; a field the provider omitted is the
/// empty string, never a null-like marker. Records are immutable once built:
/// they are either selected as the race output or discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub postal_code: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

impl Address {
    pub fn new(
        postal_code: impl Into<String>,
        street: impl Into<String>,
        neighborhood: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            postal_code: postal_code.into(),
            street: street.into(),
            neighborhood: neighborhood.into(),
            city: city.into(),
            state: state.into(),
        }
    }
}
