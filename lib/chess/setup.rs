use crate::chess::{Board, Notation, Piece, Role, Side, Vector};
use derive_more::{Display, Error};
use std::collections::HashSet;
use std::fmt::{self, Write};
use std::{fs, path::Path, str::FromStr};

/// A single piece placement of a [`Setup`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Placement {
    pub role: Role,
    pub side: Side,
    pub coord: Vector,
}

/// The reason why a board definition was rejected.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "invalid board definition `{}`, {}", path, reason)]
pub struct InvalidSetup {
    pub reason: String,
    pub path: String,
}

/// A validated board definition.
///
/// Definitions are line-delimited `key:value` pairs.
/// Keys `w` and `h` set the dimensions, `turn` the side to move first, and `name` and `desc`
/// describe the board. Every other key is a side (`w` or `b`) followed by a role (`QKBRN`,
/// or a blank for pawns), mapping to a space-separated list of coordinates.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Setup {
    width: usize,
    height: usize,
    turn: Side,
    name: String,
    description: String,
    placements: Vec<Placement>,
}

impl Setup {
    /// The path reported by definitions that were not loaded from a file.
    pub const IN_MEMORY: &'static str = "<memory>";

    /// The name of boards that don't have one.
    pub const MISSING_NAME: &'static str = "MISSING_NAME";

    /// The description of boards that don't have one.
    pub const MISSING_DESCRIPTION: &'static str = "MISSING_DESC";

    /// The largest number of cells a board may have.
    pub const MAX_CELLS: usize = 1 << 20;

    /// Loads a board definition from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InvalidSetup> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(s) => Self::parse(&s, &path.display().to_string()),
            Err(e) => Err(InvalidSetup {
                reason: format!("the file could not be loaded, {e}"),
                path: path.display().to_string(),
            }),
        }
    }

    /// Parses a board definition, reporting errors against the given path.
    pub fn parse(s: &str, path: &str) -> Result<Self, InvalidSetup> {
        let invalid = |reason: String| InvalidSetup {
            reason,
            path: path.into(),
        };

        let entries: Vec<_> = s
            .lines()
            .filter_map(|line| line.trim_end_matches('\r').split_once(':'))
            .collect();

        let dimension = |key: &str| {
            entries
                .iter()
                .rev()
                .find(|(k, _)| *k == key)
                .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                .filter(|&n| n > 0)
        };

        let (width, height) = match (dimension("w"), dimension("h")) {
            (Some(w), Some(h)) if i32::try_from(w).is_ok() && i32::try_from(h).is_ok() => (w, h),
            _ => return Err(invalid("the board width and/or height was invalid".into())),
        };

        if !width.checked_mul(height).is_some_and(|n| n <= Self::MAX_CELLS) {
            return Err(invalid(format!(
                "a {width}x{height} board exceeds {} cells",
                Self::MAX_CELLS
            )));
        }

        let notation = Notation::new(height);
        let mut setup = Setup {
            width,
            height,
            turn: Side::Front,
            name: Self::MISSING_NAME.into(),
            description: Self::MISSING_DESCRIPTION.into(),
            placements: Vec::new(),
        };

        let mut occupied = HashSet::new();
        for &(key, value) in &entries {
            match key {
                "w" | "h" => continue,
                "name" => setup.name = value.into(),
                "desc" => setup.description = value.into(),
                "turn" => {
                    setup.turn = value
                        .trim()
                        .parse()
                        .map_err(|_| invalid(format!("the 'turn' value was invalid: {value}")))?;
                }

                _ => {
                    let mut chars = key.chars();
                    let (side, role) = match (chars.next(), chars.next(), chars.next()) {
                        (Some(side), Some(role), None) => {
                            (side.to_string().parse::<Side>().ok(), Role::from_key(role))
                        }
                        _ => (None, None),
                    };

                    let (Some(side), Some(role)) = (side, role) else {
                        return Err(invalid(format!("the piece data was invalid: '{key}:{value}'")));
                    };

                    for text in value.split_whitespace() {
                        let coord = notation.parse(text).map_err(|e| invalid(e.to_string()))?;

                        if !coord.inbounds(width, height) {
                            return Err(invalid(format!("`{text}` lies beyond the board")));
                        } else if !occupied.insert(coord) {
                            return Err(invalid(format!("`{text}` is occupied more than once")));
                        }

                        setup.placements.push(Placement { role, side, coord });
                    }
                }
            }
        }

        Ok(setup)
    }

    /// The number of columns.
    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of rows.
    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The side to move first.
    #[inline(always)]
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// This board's name.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This board's description.
    #[inline(always)]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The pieces on this board, in definition order.
    #[inline(always)]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// An unsupplied [`Board`] with every piece in place.
    pub fn board(&self) -> Board {
        let mut board = Board::new(self.width, self.height);
        for p in &self.placements {
            board.place(p.coord, Piece::new(p.role, p.side));
        }

        board
    }
}

impl FromStr for Setup {
    type Err = InvalidSetup;

    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Self::IN_MEMORY)
    }
}

impl fmt::Display for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "w:{}", self.width)?;
        writeln!(f, "h:{}", self.height)?;
        writeln!(f, "turn:{}", self.turn.symbol())?;
        writeln!(f, "name:{}", self.name)?;
        writeln!(f, "desc:{}", self.description)?;

        let notation = Notation::new(self.height);
        for side in Side::ALL {
            for role in Role::ALL {
                let mut coords = self
                    .placements
                    .iter()
                    .filter(|p| p.side == side && p.role == role)
                    .filter_map(|p| notation.format(p.coord))
                    .peekable();

                if coords.peek().is_none() {
                    continue;
                }

                f.write_char(side.symbol())?;
                f.write_char(role.key())?;
                f.write_char(':')?;
                f.write_str(&coords.collect::<Vec<_>>().join(" "))?;
                f.write_char('\n')?;
            }
        }

        Ok(())
    }
}
