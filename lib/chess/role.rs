use derive_more::{Display, Error};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// The type of a chess [`Piece`][`crate::chess::Piece`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Role {
    Queen,
    King,
    Bishop,
    Rook,
    Knight,
    Pawn,
}

impl Role {
    /// All roles, in index order.
    pub const ALL: [Role; 6] = [
        Role::Queen,
        Role::King,
        Role::Bishop,
        Role::Rook,
        Role::Knight,
        Role::Pawn,
    ];

    /// This role's index in the range `(0..6)`.
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether a pawn may be promoted to this role.
    #[inline(always)]
    pub fn is_promotion(self) -> bool {
        !matches!(self, Role::King | Role::Pawn)
    }

    /// The character that denotes this role in board definitions.
    ///
    /// Pawns are denoted by a blank.
    #[inline(always)]
    pub fn key(self) -> char {
        match self {
            Role::Pawn => ' ',
            r => r.letter(),
        }
    }

    /// The inverse of [`Role::key`].
    #[inline(always)]
    pub fn from_key(c: char) -> Option<Self> {
        Role::ALL.into_iter().find(|r| r.key() == c)
    }

    /// The uppercase letter that denotes this role.
    #[inline(always)]
    pub fn letter(self) -> char {
        match self {
            Role::Queen => 'Q',
            Role::King => 'K',
            Role::Bishop => 'B',
            Role::Rook => 'R',
            Role::Knight => 'N',
            Role::Pawn => 'P',
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char(self.letter())
    }
}

/// The reason why parsing [`Role`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse piece, expected one of `QKBRNP`")]
pub struct ParseRoleError;

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Role::ALL
                .into_iter()
                .find(|r| r.letter() == c.to_ascii_uppercase())
                .ok_or(ParseRoleError),
            _ => Err(ParseRoleError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn role_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Role>>(), size_of::<Role>());
    }

    #[proptest]
    fn role_has_a_unique_index(r: Role, #[filter(#r != #s)] s: Role) {
        assert_ne!(r.index(), s.index());
    }

    #[proptest]
    fn roles_are_listed_in_index_order(r: Role) {
        assert_eq!(Role::ALL[r.index()], r);
    }

    #[proptest]
    fn parsing_printed_role_is_an_identity(r: Role) {
        assert_eq!(r.to_string().parse(), Ok(r));
    }

    #[proptest]
    fn parsing_role_is_case_insensitive(r: Role) {
        assert_eq!(r.to_string().to_lowercase().parse(), Ok(r));
    }

    #[proptest]
    fn parsing_role_fails_if_not_one_of_qkbrnp(
        #[filter(!"QKBRNPqkbrnp".contains(#c))] c: char,
    ) {
        assert_eq!(c.to_string().parse::<Role>(), Err(ParseRoleError));
    }

    #[proptest]
    fn parsing_role_fails_if_length_not_one(#[filter(#s.chars().count() != 1)] s: String) {
        assert_eq!(s.parse::<Role>(), Err(ParseRoleError));
    }

    #[proptest]
    fn key_is_invertible(r: Role) {
        assert_eq!(Role::from_key(r.key()), Some(r));
    }

    #[test]
    fn pawn_is_keyed_by_blank() {
        assert_eq!(Role::from_key(' '), Some(Role::Pawn));
        assert_eq!(Role::from_key('P'), None);
    }

    #[test]
    fn kings_and_pawns_are_not_promotions() {
        assert!(!Role::King.is_promotion());
        assert!(!Role::Pawn.is_promotion());
        assert!(Role::Queen.is_promotion());
        assert!(Role::Knight.is_promotion());
    }
}
