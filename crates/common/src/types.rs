use serde::{Deserialize, Serialize};

/// License plate identifying a vehicle.
///
/// Plates are the registry key of the parking lot, so two records with the
/// same plate are the same vehicle. Surrounding whitespace is trimmed and the
/// plate is upper-cased on construction, including when read back from a
/// serialized document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Plate(String);

impl Plate {
    /// Creates a plate from any string-like value.
    pub fn new(plate: impl AsRef<str>) -> Self {
        Self(plate.as_ref().trim().to_uppercase())
    }

    /// Returns the plate as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the plate is empty after normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Plate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Plate {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Plate {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<Plate> for String {
    fn from(plate: Plate) -> Self {
        plate.0
    }
}

impl AsRef<str> for Plate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
