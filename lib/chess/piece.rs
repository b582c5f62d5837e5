use crate::chess::{Role, Side, Tag, TagKind};
use derive_more::Display;

/// A chess [piece][`Role`] of a certain [`Side`], along with its [`Tag`]s.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}", "self.symbol()")]
pub struct Piece {
    role: Role,
    side: Side,
    #[cfg_attr(test, strategy(proptest::collection::vec(proptest::prelude::any::<Tag>(), 0..3)))]
    tags: Vec<Tag>,
}

impl Piece {
    /// An untagged piece.
    #[inline(always)]
    pub fn new(role: Role, side: Side) -> Self {
        Piece {
            role,
            side,
            tags: Vec::new(),
        }
    }

    /// This piece's [`Role`].
    #[inline(always)]
    pub fn role(&self) -> Role {
        self.role
    }

    /// This piece's [`Side`].
    #[inline(always)]
    pub fn side(&self) -> Side {
        self.side
    }

    /// This piece's [`Tag`]s.
    #[inline(always)]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Whether this piece carries a [`Tag`] of the given kind.
    #[inline(always)]
    pub fn has_tag(&self, kind: TagKind) -> bool {
        self.tags.iter().any(|t| t.kind() == kind)
    }

    /// Attaches a [`Tag`] to this piece.
    #[inline(always)]
    pub fn add_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// Ages every [`Tag`], dropping the ones that expired.
    #[inline(always)]
    pub fn update_tags(&mut self) {
        self.tags.retain_mut(Tag::update);
    }

    /// Rewrites this piece's [`Role`] in place, keeping its tags.
    #[inline(always)]
    pub fn promote(&mut self, role: Role) {
        self.role = role;
    }

    /// The letter of this piece's role, uppercase for [`Side::Front`] and lowercase otherwise.
    pub fn symbol(&self) -> char {
        let c = self.role.letter();
        match self.side {
            Side::Front => c.to_ascii_uppercase(),
            Side::Back => c.to_ascii_lowercase(),
        }
    }
}
