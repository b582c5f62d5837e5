use derive_more::Display;

/// The kind of a [`Tag`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum TagKind {
    #[display(fmt = "has moved")]
    HasMoved,
    #[display(fmt = "en passant")]
    EnPassant,
}

/// Metadata attached to a [`Piece`][`crate::chess::Piece`] that affects the legality of its moves.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Tag {
    /// Permanent once set.
    HasMoved,
    /// Expires after `lifespan` tag updates.
    EnPassant {
        #[cfg_attr(test, strategy(0u8..=Tag::EN_PASSANT_LIFESPAN))]
        lifespan: u8,
    },
}

impl Tag {
    /// The number of updates a fresh [`Tag::EnPassant`] survives, minus one.
    pub const EN_PASSANT_LIFESPAN: u8 = 2;

    /// A fresh tag of the given kind.
    #[inline(always)]
    pub fn new(kind: TagKind) -> Self {
        match kind {
            TagKind::HasMoved => Tag::HasMoved,
            TagKind::EnPassant => Tag::EnPassant {
                lifespan: Tag::EN_PASSANT_LIFESPAN,
            },
        }
    }

    /// This tag's [`TagKind`].
    #[inline(always)]
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::HasMoved => TagKind::HasMoved,
            Tag::EnPassant { .. } => TagKind::EnPassant,
        }
    }

    /// Ages this tag by one update, returning whether it is still alive.
    #[inline(always)]
    pub fn update(&mut self) -> bool {
        match self {
            Tag::HasMoved => true,
            Tag::EnPassant { lifespan } => {
                *lifespan = lifespan.saturating_sub(1);
                *lifespan > 0
            }
        }
    }
}
