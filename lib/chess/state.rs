use derive_more::Display;

/// The classification of a position from the perspective of the side to move.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum LogicState {
    #[default]
    #[display(fmt = "none")]
    None,

    #[display(fmt = "check")]
    Check,

    #[display(fmt = "checkmate")]
    Checkmate,

    #[display(fmt = "stalemate")]
    Stalemate,
}

impl LogicState {
    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        matches!(self, LogicState::Check | LogicState::Checkmate)
    }

    /// Whether the game cannot continue.
    pub fn is_final(&self) -> bool {
        matches!(self, LogicState::Checkmate | LogicState::Stalemate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn stalemate_is_final_without_check() {
        assert!(LogicState::Stalemate.is_final());
        assert!(!LogicState::Stalemate.is_check());
    }

    #[proptest]
    fn checkmate_is_final_check() {
        assert!(LogicState::Checkmate.is_final());
        assert!(LogicState::Checkmate.is_check());
    }

    #[proptest]
    fn game_goes_on_unless_state_is_final(#[filter(!#s.is_final())] s: LogicState) {
        assert!(matches!(s, LogicState::None | LogicState::Check));
    }
}
