//! Appearance settings shared by the live canvas and the image export.

use serde::{Deserialize, Serialize};

/// How bonds are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BondingStyle {
    /// One line per shared electron pair.
    Valence,
    /// Pairs of dots around the bond midpoint.
    #[default]
    Electrons,
}

impl BondingStyle {
    /// Case-insensitive parse of `VALENCE` / `ELECTRONS`.
    pub fn parse(value: &str) -> Option<BondingStyle> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("valence") {
            Some(BondingStyle::Valence)
        } else if value.eq_ignore_ascii_case("electrons") {
            Some(BondingStyle::Electrons)
        } else {
            None
        }
    }
}

/// Sizes in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderMetrics {
    pub atom_radius: f64,
    pub bond_separation: f64,
    pub bond_line_width: f64,
    pub bond_dot_radius: f64,
    pub single_electron_radius: f64,
    pub single_electron_distance: f64,
    pub pair_distance: f64,
    pub pair_half_width: f64,
    pub pair_line_width: f64,
    pub label_size: f64,
    pub export_padding: f64,
}

impl Default for RenderMetrics {
    fn default() -> Self {
        Self {
            atom_radius: 20.0,
            bond_separation: 6.0,
            bond_line_width: 2.5,
            bond_dot_radius: 2.5,
            single_electron_radius: 2.5,
            single_electron_distance: 26.0,
            pair_distance: 26.0,
            pair_half_width: 8.0,
            pair_line_width: 3.0,
            label_size: 24.0,
            export_padding: 40.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(BondingStyle::parse("VALENCE"), Some(BondingStyle::Valence));
        assert_eq!(BondingStyle::parse("electrons"), Some(BondingStyle::Electrons));
        assert_eq!(BondingStyle::parse(" Electrons "), Some(BondingStyle::Electrons));
        assert_eq!(BondingStyle::parse("dots"), None);
        assert_eq!(BondingStyle::default(), BondingStyle::Electrons);
    }
}
