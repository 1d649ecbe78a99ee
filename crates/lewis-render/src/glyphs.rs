//! Electron glyph placement around an atom symbol.
//!
//! Free electrons are drawn as pairs (a short tick) and singles (a dot) on
//! the four cardinal sides of the symbol. Sides facing a bond are used
//! last; sides facing away from a bond are used first.

use lewis_core::Vector2;
use serde::Serialize;
use smallvec::SmallVec;

/// A side of the atom symbol. Screen coordinates, so `N` is towards −y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Orientation {
    N,
    E,
    S,
    W,
}

impl Orientation {
    /// Base preference order when no bond breaks the tie.
    pub const ALL: [Orientation; 4] =
        [Orientation::N, Orientation::E, Orientation::S, Orientation::W];

    pub fn opposite(self) -> Orientation {
        match self {
            Orientation::N => Orientation::S,
            Orientation::E => Orientation::W,
            Orientation::S => Orientation::N,
            Orientation::W => Orientation::E,
        }
    }

    /// Unit step towards this side.
    pub fn unit(self) -> Vector2 {
        match self {
            Orientation::N => Vector2::new(0.0, -1.0),
            Orientation::E => Vector2::new(1.0, 0.0),
            Orientation::S => Vector2::new(0.0, 1.0),
            Orientation::W => Vector2::new(-1.0, 0.0),
        }
    }

    /// Nearest cardinal direction of a displacement. Ties between the axes
    /// go to the vertical one.
    pub fn classify(delta: Vector2) -> Orientation {
        if delta.x.abs() > delta.y.abs() {
            if delta.x > 0.0 { Orientation::E } else { Orientation::W }
        } else if delta.y > 0.0 {
            Orientation::S
        } else {
            Orientation::N
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectronKind {
    Single,
    Pair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElectronGlyph {
    pub kind: ElectronKind,
    pub orientation: Orientation,
}

impl ElectronGlyph {
    /// Dot position for a single electron `distance` away from `center`.
    pub fn single_position(&self, center: Vector2, distance: f64) -> Vector2 {
        center + self.orientation.unit() * distance
    }

    /// Endpoints of the tick drawn for an electron pair.
    pub fn pair_segment(
        &self,
        center: Vector2,
        distance: f64,
        half_width: f64,
    ) -> (Vector2, Vector2) {
        let mid = center + self.orientation.unit() * distance;
        let across = self.orientation.unit().perpendicular() * half_width;
        (mid - across, mid + across)
    }
}

pub type Glyphs = SmallVec<[ElectronGlyph; 4]>;

/// Sides ordered from most to least preferred for the given bonds.
pub fn side_preference(bond_directions: &[Vector2]) -> [Orientation; 4] {
    let used: SmallVec<[Orientation; 4]> = bond_directions
        .iter()
        .map(|d| Orientation::classify(*d))
        .collect();
    let rank = |side: Orientation| {
        if used.contains(&side) {
            2
        } else if used.contains(&side.opposite()) {
            0
        } else {
            1
        }
    };
    let mut order = Orientation::ALL;
    // Stable, so equal ranks keep the N, E, S, W order
    order.sort_by_key(|side| rank(*side));
    order
}

/// Glyphs for `count` free electrons: pairs first, then the odd single.
/// More glyphs than sides wrap around the preference order.
pub fn place_electrons(count: u8, bond_directions: &[Vector2]) -> Glyphs {
    let order = side_preference(bond_directions);
    let pairs = usize::from(count / 2);
    let singles = usize::from(count % 2);

    let kinds = std::iter::repeat_n(ElectronKind::Pair, pairs)
        .chain(std::iter::repeat_n(ElectronKind::Single, singles));
    kinds
        .enumerate()
        .map(|(i, kind)| ElectronGlyph {
            kind,
            orientation: order[i % order.len()],
        })
        .collect()
}
