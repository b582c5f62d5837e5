use crate::chess::{MoveKinds, Role, Side, Vector};
use std::{iter::successors, ops::Index};

/// A single movement rule of a piece.
///
/// Rules are written from the perspective of [`Side::Front`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Rule {
    vector: Vector,
    revolve: bool,
    expand: bool,
    kinds: MoveKinds,
}

impl Rule {
    /// A rule that both moves and attacks along `vector`.
    ///
    /// If `revolve` is set, the three 90° rotations of `vector` are used as well.
    /// If `expand` is set, the piece slides along each direction until blocked.
    #[inline(always)]
    pub fn new(vector: Vector, revolve: bool, expand: bool) -> Self {
        Rule {
            vector,
            revolve,
            expand,
            kinds: MoveKinds::all(),
        }
    }

    /// Restricts the kinds of move this rule produces.
    #[inline(always)]
    pub fn with_kinds(self, kinds: MoveKinds) -> Self {
        Rule { kinds, ..self }
    }

    /// Whether the piece slides along this rule's directions.
    #[inline(always)]
    pub fn expands(&self) -> bool {
        self.expand
    }

    /// The kinds of move this rule produces.
    #[inline(always)]
    pub fn kinds(&self) -> MoveKinds {
        self.kinds
    }

    /// The directions this rule walks for a piece of the given [`Side`].
    ///
    /// Revolving rules are symmetric, so only the others are flipped for [`Side::Back`].
    pub fn directions(&self, side: Side) -> impl Iterator<Item = Vector> {
        let flip = !self.revolve && side.flips();
        successors(Some(self.vector), |v| Some(v.rotate()))
            .take(if self.revolve { 4 } else { 1 })
            .map(move |v| if flip { v.flip() } else { v })
    }
}

/// The movement rules of one [`Role`].
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct Descriptor {
    rules: Vec<Rule>,
}

impl Descriptor {
    #[inline(always)]
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        Descriptor {
            rules: rules.into_iter().collect(),
        }
    }

    /// This descriptor's rules.
    #[inline(always)]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// The movement rules of every [`Role`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Descriptors([Descriptor; 6]);

impl Descriptors {
    /// A table with the given descriptors, in [`Role::ALL`] order.
    #[inline(always)]
    pub fn new(descriptors: [Descriptor; 6]) -> Self {
        Descriptors(descriptors)
    }
}

impl Default for Descriptors {
    /// The rules of orthodox chess, excluding manoeuvres.
    fn default() -> Self {
        let orthogonal = Vector::new(1, 0);
        let diagonal = Vector::new(1, 1);

        Descriptors([
            Descriptor::new([
                Rule::new(orthogonal, true, true),
                Rule::new(diagonal, true, true),
            ]),
            Descriptor::new([
                Rule::new(orthogonal, true, false),
                Rule::new(diagonal, true, false),
            ]),
            Descriptor::new([Rule::new(diagonal, true, true)]),
            Descriptor::new([Rule::new(orthogonal, true, true)]),
            Descriptor::new([
                Rule::new(Vector::new(2, 1), true, false),
                Rule::new(Vector::new(2, -1), true, false),
            ]),
            Descriptor::new([
                Rule::new(Vector::new(-1, 0), false, false).with_kinds(MoveKinds::MOVE),
                Rule::new(Vector::new(-1, -1), false, false).with_kinds(MoveKinds::ATTACK),
                Rule::new(Vector::new(-1, 1), false, false).with_kinds(MoveKinds::ATTACK),
            ]),
        ])
    }
}

impl Index<Role> for Descriptors {
    type Output = Descriptor;

    #[inline(always)]
    fn index(&self, r: Role) -> &Self::Output {
        &self.0[r.index()]
    }
}
