use serde::{Deserialize, Serialize};

/// The six stones
///
/// The discriminant is the piece's integer code in flattened board arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceType {
    Ruby = 0,
    Sapphire = 1,
    Emerald = 2,
    Topaz = 3,
    Amethyst = 4,
    Onyx = 5,
}

impl PieceType {
    pub const COUNT: usize = 6;

    pub fn all() -> [PieceType; Self::COUNT] {
        [
            Self::Ruby,
            Self::Sapphire,
            Self::Emerald,
            Self::Topaz,
            Self::Amethyst,
            Self::Onyx,
        ]
    }

    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code).ok().and_then(|i| Self::all().get(i).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for piece in PieceType::all() {
            assert_eq!(PieceType::from_code(piece.code()), Some(piece));
        }
        assert_eq!(PieceType::from_code(-1), None);
        assert_eq!(PieceType::from_code(6), None);
    }
}
