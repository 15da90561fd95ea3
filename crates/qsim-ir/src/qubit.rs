//! Qubit identifiers and computational basis states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest qubit count whose basis-state indices fit in a `usize`.
pub const MAX_QUBITS: u32 = usize::BITS - 1;

/// Index of a qubit within a circuit.
///
/// Qubit 0 is the least-significant bit of a basis-state index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Index as `usize`, for addressing amplitudes.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Initial computational basis state of a single qubit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasisState {
    /// |0⟩
    #[default]
    #[serde(rename = "0")]
    Zero,
    /// |1⟩
    #[serde(rename = "1")]
    One,
}

impl BasisState {
    /// Parse the wire representation (`"0"` or `"1"`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "0" => Some(BasisState::Zero),
            "1" => Some(BasisState::One),
            _ => None,
        }
    }

    /// Whether the qubit starts in |1⟩.
    #[inline]
    pub fn is_one(self) -> bool {
        matches!(self, BasisState::One)
    }
}

impl fmt::Display for BasisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasisState::Zero => write!(f, "0"),
            BasisState::One => write!(f, "1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_state_parse() {
        assert_eq!(BasisState::parse("0"), Some(BasisState::Zero));
        assert_eq!(BasisState::parse("1"), Some(BasisState::One));
        assert_eq!(BasisState::parse("2"), None);
        assert_eq!(BasisState::parse(""), None);
        assert_eq!(BasisState::parse("01"), None);
    }

    #[test]
    fn test_basis_state_serde() {
        let json = serde_json::to_string(&[BasisState::Zero, BasisState::One]).unwrap();
        assert_eq!(json, r#"["0","1"]"#);
    }
}
