//! Bond geometry for both bonding styles.

use lewis_core::{BondMultiplicity, Vector2};
use smallvec::SmallVec;

pub type Segment = (Vector2, Vector2);

/// Perpendicular offsets of the parallel strokes, in units of the
/// separation.
fn stroke_offsets(multiplicity: BondMultiplicity) -> &'static [f64] {
    match multiplicity {
        BondMultiplicity::Single => &[0.0],
        BondMultiplicity::Double => &[-0.5, 0.5],
        BondMultiplicity::Triple => &[0.0, 1.0, -1.0],
    }
}

/// Parallel lines from `left` to `right`, one per shared pair.
pub fn valence_bond_lines(
    left: Vector2,
    right: Vector2,
    multiplicity: BondMultiplicity,
    separation: f64,
) -> SmallVec<[Segment; 3]> {
    let normal = (right - left).normalize().perpendicular() * separation;
    stroke_offsets(multiplicity)
        .iter()
        .map(|k| (left + normal * *k, right + normal * *k))
        .collect()
}

/// Dot pairs straddling the bond midpoint, one pair per shared pair.
pub fn electron_bond_dots(
    left: Vector2,
    right: Vector2,
    multiplicity: BondMultiplicity,
    separation: f64,
) -> SmallVec<[Vector2; 6]> {
    let axis = (right - left).normalize();
    let normal = axis.perpendicular() * separation;
    let along = axis * (separation / 2.0);
    let mid = left.midpoint(right);
    stroke_offsets(multiplicity)
        .iter()
        .flat_map(|k| {
            let row = mid + normal * *k;
            [row - along, row + along]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEP: f64 = 6.0;

    #[test]
    fn single_line_is_the_axis() {
        let lines = valence_bond_lines(
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 0.0),
            BondMultiplicity::Single,
            SEP,
        );
        assert_eq!(lines.as_slice(), &[(Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0))]);
    }

    #[test]
    fn double_lines_straddle_the_axis() {
        let lines = valence_bond_lines(
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 0.0),
            BondMultiplicity::Double,
            SEP,
        );
        let ys: Vec<f64> = lines.iter().map(|(a, _)| a.y).collect();
        assert_eq!(ys, vec![-3.0, 3.0]);
    }

    #[test]
    fn triple_lines_keep_the_center() {
        let lines = valence_bond_lines(
            Vector2::new(0.0, 0.0),
            Vector2::new(0.0, 10.0),
            BondMultiplicity::Triple,
            SEP,
        );
        let xs: Vec<f64> = lines
            .iter()
            .map(|(a, b)| {
                assert_eq!(a.x, b.x);
                a.x
            })
            .collect();
        assert_eq!(xs, vec![0.0, -6.0, 6.0]);
    }

    #[test]
    fn dots_sit_around_the_midpoint() {
        let dots = electron_bond_dots(
            Vector2::new(0.0, 0.0),
            Vector2::new(20.0, 0.0),
            BondMultiplicity::Single,
            SEP,
        );
        assert_eq!(dots.as_slice(), &[Vector2::new(7.0, 0.0), Vector2::new(13.0, 0.0)]);
        let triple = electron_bond_dots(
            Vector2::new(0.0, 0.0),
            Vector2::new(20.0, 0.0),
            BondMultiplicity::Triple,
            SEP,
        );
        assert_eq!(triple.len(), 6);
    }

    #[test]
    fn degenerate_bond_collapses_without_nan() {
        let p = Vector2::new(5.0, 5.0);
        for (a, b) in valence_bond_lines(p, p, BondMultiplicity::Double, SEP) {
            assert_eq!((a, b), (p, p));
        }
    }
}
