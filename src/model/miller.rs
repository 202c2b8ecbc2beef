// src/model/miller.rs

use crate::error::LatticeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest accepted |component| of an index
pub const INDEX_LIMIT: i32 = 10;

/// Plane index: three-index Miller or four-index Miller-Bravais (h k i l)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MillerIndex {
    Miller { h: i32, k: i32, l: i32 },
    Bravais { h: i32, k: i32, i: i32, l: i32 },
}

impl MillerIndex {
    pub fn new(h: i32, k: i32, l: i32) -> Self {
        MillerIndex::Miller { h, k, l }
    }

    pub fn bravais(h: i32, k: i32, i: i32, l: i32) -> Self {
        MillerIndex::Bravais { h, k, i, l }
    }

    /// Four-index form with i = -(h + k)
    pub fn bravais_from_hkl(h: i32, k: i32, l: i32) -> Self {
        MillerIndex::Bravais { h, k, i: -(h + k), l }
    }

    pub fn components(&self) -> Vec<i32> {
        match *self {
            MillerIndex::Miller { h, k, l } => vec![h, k, l],
            MillerIndex::Bravais { h, k, i, l } => vec![h, k, i, l],
        }
    }

    /// Three-index form; Miller-Bravais drops the redundant i
    pub fn hkl(&self) -> [i32; 3] {
        match *self {
            MillerIndex::Miller { h, k, l } => [h, k, l],
            MillerIndex::Bravais { h, k, l, .. } => [h, k, l],
        }
    }

    pub fn is_bravais(&self) -> bool {
        matches!(self, MillerIndex::Bravais { .. })
    }

    /// Rejects the all-zero index, broken h + k + i sums and out-of-range components
    pub fn validate(&self) -> Result<(), LatticeError> {
        let comps = self.components();
        if let Some(&value) = comps.iter().find(|v| v.abs() > INDEX_LIMIT) {
            return Err(LatticeError::IndexOutOfRange {
                value,
                min: -INDEX_LIMIT,
                max: INDEX_LIMIT,
            });
        }
        if comps.iter().all(|&v| v == 0) {
            return Err(LatticeError::NotAPlane(self.to_string()));
        }
        if let MillerIndex::Bravais { h, k, i, .. } = *self {
            if h + k + i != 0 {
                return Err(LatticeError::InvalidBravaisIndex { h, k, i });
            }
        }
        Ok(())
    }

    /// Axis of a plane parallel to a cell face: exactly one non-zero
    /// component of (h, k, l)
    pub fn face_axis(&self) -> Option<usize> {
        let hkl = self.hkl();
        let mut nonzero = (0..3).filter(|&j| hkl[j] != 0);
        match (nonzero.next(), nonzero.next()) {
            (Some(j), None) => Some(j),
            _ => None,
        }
    }
}

impl fmt::Display for MillerIndex {
    /// Bar notation: negative components carry a combining overline
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        for v in self.components() {
            if v < 0 {
                write!(f, "{}\u{0305}", -v)?;
            } else {
                write!(f, "{}", v)?;
            }
        }
        write!(f, ")")
    }
}

/// Visibility toggles for the six cell faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceFilter {
    pub show_100: bool,
    pub show_010: bool,
    pub show_001: bool,
}

impl Default for FaceFilter {
    fn default() -> Self {
        Self { show_100: true, show_010: true, show_001: true }
    }
}

impl FaceFilter {
    /// Face-parallel planes follow their axis toggle, everything else shows
    pub fn is_visible(&self, index: &MillerIndex) -> bool {
        if let MillerIndex::Bravais { h, k, i, .. } = *index {
            if h == 0 && k == 0 && i == 0 {
                return self.show_001;
            }
            return true;
        }
        match index.face_axis() {
            Some(0) => self.show_100,
            Some(1) => self.show_010,
            Some(_) => self.show_001,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_notation() {
        assert_eq!(MillerIndex::new(1, 0, 0).to_string(), "(100)");
        assert_eq!(MillerIndex::new(-1, 0, 0).to_string(), "(1\u{0305}00)");
        assert_eq!(MillerIndex::bravais(1, 0, -1, 0).to_string(), "(101\u{0305}0)");
    }

    #[test]
    fn test_validate() {
        assert!(MillerIndex::new(1, 1, 1).validate().is_ok());
        assert!(matches!(
            MillerIndex::new(0, 0, 0).validate(),
            Err(LatticeError::NotAPlane(_))
        ));
        assert!(matches!(
            MillerIndex::bravais(0, 0, 0, 0).validate(),
            Err(LatticeError::NotAPlane(_))
        ));
        assert_eq!(
            MillerIndex::bravais(1, 1, 1, 0).validate(),
            Err(LatticeError::InvalidBravaisIndex { h: 1, k: 1, i: 1 })
        );
        assert!(matches!(
            MillerIndex::new(11, 0, 0).validate(),
            Err(LatticeError::IndexOutOfRange { value: 11, .. })
        ));
        assert!(MillerIndex::bravais(0, 0, 0, 1).validate().is_ok());
    }

    #[test]
    fn test_bravais_conversion() {
        let idx = MillerIndex::bravais_from_hkl(1, 1, 2);
        assert_eq!(idx, MillerIndex::bravais(1, 1, -2, 2));
        assert_eq!(idx.hkl(), [1, 1, 2]);
        assert!(idx.validate().is_ok());
    }

    #[test]
    fn test_face_axis() {
        assert_eq!(MillerIndex::new(0, -2, 0).face_axis(), Some(1));
        assert_eq!(MillerIndex::new(1, 1, 0).face_axis(), None);
    }

    #[test]
    fn test_face_filter() {
        let filter = FaceFilter { show_100: false, show_010: true, show_001: false };
        assert!(!filter.is_visible(&MillerIndex::new(1, 0, 0)));
        assert!(!filter.is_visible(&MillerIndex::new(-1, 0, 0)));
        assert!(filter.is_visible(&MillerIndex::new(0, 1, 0)));
        assert!(!filter.is_visible(&MillerIndex::new(0, 0, -1)));
        assert!(filter.is_visible(&MillerIndex::new(1, 1, 1)));
        assert!(!filter.is_visible(&MillerIndex::bravais(0, 0, 0, 1)));
        assert!(filter.is_visible(&MillerIndex::bravais(1, 0, -1, 0)));
    }
}
