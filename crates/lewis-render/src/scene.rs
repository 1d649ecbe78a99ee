//! Standalone drawing of a committed model, used for image export.
//!
//! The scene is built from the model alone: it never contains ghosts or
//! selection highlights.

use crate::bond::{electron_bond_dots, valence_bond_lines};
use crate::glyphs::ElectronKind;
use crate::style::{BondingStyle, RenderMetrics};
use crate::view::{MoleculeView, derive_view};
use lewis_core::{EditorState, MoleculeModel, Vector2, build_graph};

pub const INK: &str = "#000000";
pub const PAPER: &str = "#ffffff";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min: Vector2,
    pub size: Vector2,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        from: Vector2,
        to: Vector2,
        width: f64,
        round_cap: bool,
    },
    Circle {
        center: Vector2,
        radius: f64,
        fill: &'static str,
        /// Outline width and opacity.
        outline: Option<(f64, f64)>,
    },
    Label {
        at: Vector2,
        text: String,
        size: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportScene {
    pub view_box: ViewBox,
    /// Painted in order; later shapes cover earlier ones.
    pub shapes: Vec<Shape>,
}

/// Atom extents grown by `padding` on every side. Without atoms the box
/// is centred on the origin.
pub fn view_box(view: &MoleculeView, padding: f64) -> ViewBox {
    let mut committed = view.atoms.iter().filter(|a| !a.temporary).map(|a| a.position);
    let Some(first) = committed.next() else {
        return ViewBox {
            min: Vector2::new(-padding, -padding),
            size: Vector2::new(2.0 * padding, 2.0 * padding),
        };
    };
    let (min, max) = committed.fold((first, first), |(min, max), p| {
        (
            Vector2::new(min.x.min(p.x), min.y.min(p.y)),
            Vector2::new(max.x.max(p.x), max.y.max(p.y)),
        )
    });
    let pad = Vector2::new(padding, padding);
    ViewBox {
        min: min - pad,
        size: (max + pad) - (min - pad),
    }
}

pub fn build_export_scene(
    model: &MoleculeModel,
    style: BondingStyle,
    metrics: &RenderMetrics,
) -> ExportScene {
    let view = derive_view(model, &build_graph(model), &EditorState::Idle);
    let mut shapes = Vec::new();

    for bond in view.bonds.iter().filter(|b| !b.temporary) {
        match style {
            BondingStyle::Valence => {
                let lines = valence_bond_lines(
                    bond.left_position,
                    bond.right_position,
                    bond.multiplicity,
                    metrics.bond_separation,
                );
                shapes.extend(lines.into_iter().map(|(from, to)| Shape::Line {
                    from,
                    to,
                    width: metrics.bond_line_width,
                    round_cap: false,
                }));
            }
            BondingStyle::Electrons => {
                let dots = electron_bond_dots(
                    bond.left_position,
                    bond.right_position,
                    bond.multiplicity,
                    metrics.bond_separation,
                );
                shapes.extend(dots.into_iter().map(|center| Shape::Circle {
                    center,
                    radius: metrics.bond_dot_radius,
                    fill: INK,
                    outline: None,
                }));
            }
        }
    }

    for atom in view.atoms.iter().filter(|a| !a.temporary) {
        // White disc hides bond ends under the symbol
        shapes.push(Shape::Circle {
            center: atom.position,
            radius: metrics.atom_radius,
            fill: PAPER,
            outline: Some((1.0, 0.5)),
        });
        shapes.push(Shape::Label {
            at: atom.position,
            text: atom.symbol.to_string(),
            size: metrics.label_size,
        });
        for glyph in &atom.electrons {
            match glyph.kind {
                ElectronKind::Single => shapes.push(Shape::Circle {
                    center: glyph.single_position(atom.position, metrics.single_electron_distance),
                    radius: metrics.single_electron_radius,
                    fill: INK,
                    outline: None,
                }),
                ElectronKind::Pair => {
                    let (from, to) = glyph.pair_segment(
                        atom.position,
                        metrics.pair_distance,
                        metrics.pair_half_width,
                    );
                    shapes.push(Shape::Line {
                        from,
                        to,
                        width: metrics.pair_line_width,
                        round_cap: true,
                    });
                }
            }
        }
    }

    ExportScene {
        view_box: view_box(&view, metrics.export_padding),
        shapes,
    }
}
