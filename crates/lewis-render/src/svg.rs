use crate::scene::{ExportScene, Shape};
use std::fmt::Write;

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Serialize an export scene to a standalone SVG document.
pub fn render_svg(scene: &ExportScene) -> String {
    let vb = scene.view_box;
    let width = vb.size.x.ceil().max(1.0);
    let height = vb.size.y.ceil().max(1.0);

    let mut svg = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"{} {} {} {}\">",
        vb.min.x, vb.min.y, vb.size.x, vb.size.y
    );
    svg.push_str("<g>\n");

    for shape in &scene.shapes {
        match shape {
            Shape::Line {
                from,
                to,
                width,
                round_cap,
            } => {
                let cap = if *round_cap { " stroke-linecap=\"round\"" } else { "" };
                let _ = writeln!(
                    svg,
                    "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" \
                     stroke=\"#000000\" stroke-width=\"{width}\"{cap} />",
                    from.x, from.y, to.x, to.y
                );
            }
            Shape::Circle {
                center,
                radius,
                fill,
                outline,
            } => {
                let stroke = match outline {
                    Some((w, opacity)) => {
                        format!(
                            " stroke=\"#000000\" stroke-width=\"{w}\" \
                             stroke-opacity=\"{opacity}\""
                        )
                    }
                    None => String::new(),
                };
                let _ = writeln!(
                    svg,
                    "  <circle cx=\"{}\" cy=\"{}\" r=\"{radius}\" fill=\"{fill}\"{stroke} />",
                    center.x, center.y
                );
            }
            Shape::Label { at, text, size } => {
                let _ = writeln!(
                    svg,
                    "  <text x=\"{}\" y=\"{}\" font-size=\"{size}\" font-family=\"sans-serif\" \
                     text-anchor=\"middle\" dominant-baseline=\"central\" \
                     fill=\"#000000\">{}</text>",
                    at.x,
                    at.y,
                    escape_xml(text)
                );
            }
        }
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}
