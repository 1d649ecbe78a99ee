//! Canvas2D renderer for the live editor view.
//!
//! Draws a [`MoleculeView`] to an HTML `<canvas>` via
//! `CanvasRenderingContext2d`: committed items, selection and target
//! highlights, and the translucent ghosts of an operation in progress.

use lewis_core::{Block, Locale, Vector2, lookup_element};
use lewis_render::bond::{electron_bond_dots, valence_bond_lines};
use lewis_render::{AtomView, BondView, BondingStyle, ElectronKind, MoleculeView, RenderMetrics};
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

/// Theme-dependent colors for the canvas renderer.
pub struct CanvasTheme {
    pub bg: &'static str,
    pub ink: &'static str,
    pub atom_fill: &'static str,
    pub selection: &'static str,
    pub target: &'static str,
    pub info_text: &'static str,
    pub ghost_alpha: f64,
}

impl CanvasTheme {
    pub fn light() -> Self {
        Self {
            bg: "#FFFFFF",
            ink: "#1C1C1E",
            atom_fill: "#FFFFFF",
            selection: "#4FC3F7",
            target: "#FFB74D",
            info_text: "#86868B",
            ghost_alpha: 0.45,
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: "#1C1C1E",
            ink: "#F5F5F7",
            atom_fill: "#2C2C2E",
            selection: "#4FC3F7",
            target: "#FFB74D",
            info_text: "#98989D",
            ghost_alpha: 0.45,
        }
    }
}

/// Which optional element details are drawn next to each atom.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomDecorations {
    pub name: bool,
    pub order: bool,
    pub blocks: bool,
    pub locale: Locale,
}

/// Tint of an atom disc when periodic-table blocks are highlighted.
pub fn block_fill(block: Block) -> &'static str {
    match block {
        Block::S => "#FFCDD2",
        Block::P => "#FFF9C4",
        Block::D => "#BBDEFB",
        Block::F => "#C8E6C9",
    }
}

pub struct RenderOptions<'a> {
    pub style: BondingStyle,
    pub metrics: &'a RenderMetrics,
    pub theme: &'a CanvasTheme,
    pub decorations: AtomDecorations,
    pub scale: f64,
}

/// Render the entire view to a Canvas2D context.
pub fn render_view(
    ctx: &CanvasRenderingContext2d,
    view: &MoleculeView,
    canvas_width: f64,
    canvas_height: f64,
    options: &RenderOptions<'_>,
) {
    ctx.set_fill_style_str(options.theme.bg);
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    ctx.save();
    let _ = ctx.scale(options.scale, options.scale);

    // Atoms cover bond ends, so bonds go first
    for bond in &view.bonds {
        draw_bond(ctx, bond, options);
    }
    for atom in &view.atoms {
        draw_atom(ctx, atom, options);
    }

    ctx.restore();
}

// ─── Bonds ───────────────────────────────────────────────────────────────

fn draw_bond(ctx: &CanvasRenderingContext2d, bond: &BondView, options: &RenderOptions<'_>) {
    let metrics = options.metrics;
    let theme = options.theme;

    ctx.save();
    if bond.temporary {
        ctx.set_global_alpha(theme.ghost_alpha);
    }

    if bond.selected {
        ctx.set_stroke_style_str(theme.selection);
        ctx.set_line_width(metrics.bond_separation * 3.0);
        ctx.set_line_cap("round");
        line(ctx, bond.left_position, bond.right_position);
    }

    match options.style {
        BondingStyle::Valence => {
            ctx.set_stroke_style_str(theme.ink);
            ctx.set_line_width(metrics.bond_line_width);
            ctx.set_line_cap("butt");
            let lines = valence_bond_lines(
                bond.left_position,
                bond.right_position,
                bond.multiplicity,
                metrics.bond_separation,
            );
            for (from, to) in lines {
                line(ctx, from, to);
            }
        }
        BondingStyle::Electrons => {
            ctx.set_fill_style_str(theme.ink);
            let dots = electron_bond_dots(
                bond.left_position,
                bond.right_position,
                bond.multiplicity,
                metrics.bond_separation,
            );
            for center in dots {
                dot(ctx, center, metrics.bond_dot_radius);
            }
        }
    }

    ctx.restore();
}

// ─── Atoms ───────────────────────────────────────────────────────────────

fn draw_atom(ctx: &CanvasRenderingContext2d, atom: &AtomView, options: &RenderOptions<'_>) {
    let metrics = options.metrics;
    let theme = options.theme;
    let decorations = options.decorations;
    let element = lookup_element(atom.element);
    let (x, y) = (atom.position.x, atom.position.y);

    ctx.save();
    if atom.temporary {
        ctx.set_global_alpha(theme.ghost_alpha);
    }

    let fill = if decorations.blocks && element.is_known() {
        block_fill(element.block)
    } else {
        theme.atom_fill
    };
    ctx.begin_path();
    let _ = ctx.arc(x, y, metrics.atom_radius, 0.0, TAU);
    ctx.set_fill_style_str(fill);
    ctx.fill();

    if atom.selected || atom.targeted {
        ctx.set_stroke_style_str(if atom.selected { theme.selection } else { theme.target });
        ctx.set_line_width(2.0);
        ctx.stroke();
    }

    ctx.set_fill_style_str(theme.ink);
    ctx.set_font(&format!("500 {}px Inter, sans-serif", metrics.label_size));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(atom.symbol, x, y);

    for glyph in &atom.electrons {
        match glyph.kind {
            ElectronKind::Single => {
                let center = glyph.single_position(atom.position, metrics.single_electron_distance);
                dot(ctx, center, metrics.single_electron_radius);
            }
            ElectronKind::Pair => {
                let (from, to) = glyph.pair_segment(
                    atom.position,
                    metrics.pair_distance,
                    metrics.pair_half_width,
                );
                ctx.set_stroke_style_str(theme.ink);
                ctx.set_line_width(metrics.pair_line_width);
                ctx.set_line_cap("round");
                line(ctx, from, to);
            }
        }
    }

    if element.is_known() && (decorations.name || decorations.order) {
        let info_size = (metrics.label_size * 0.45).round();
        ctx.set_fill_style_str(theme.info_text);
        ctx.set_font(&format!("400 {info_size}px Inter, sans-serif"));
        if decorations.order {
            ctx.set_text_align("right");
            let _ = ctx.fill_text(
                &element.number.0.to_string(),
                x - metrics.atom_radius * 0.6,
                y - metrics.atom_radius * 0.6,
            );
        }
        if decorations.name {
            ctx.set_text_align("center");
            ctx.set_text_baseline("top");
            let _ = ctx.fill_text(
                element.name(decorations.locale),
                x,
                y + metrics.atom_radius + metrics.single_electron_distance * 0.5,
            );
        }
    }

    ctx.restore();
}

// ─── Drawing primitives ──────────────────────────────────────────────────

fn line(ctx: &CanvasRenderingContext2d, from: Vector2, to: Vector2) {
    ctx.begin_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke();
}

fn dot(ctx: &CanvasRenderingContext2d, center: Vector2, radius: f64) {
    ctx.begin_path();
    let _ = ctx.arc(center.x, center.y, radius, 0.0, TAU);
    ctx.fill();
}
