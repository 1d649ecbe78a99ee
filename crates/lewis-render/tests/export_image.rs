//! Integration tests: model → scene → SVG → PNG (lewis-render).

use lewis_core::*;
use lewis_render::*;

fn methane_fragment() -> MoleculeModel {
    let c = AtomId::intern("ex_c");
    let mut model =
        MoleculeModel::new().add_atom(c, ElementNumber::CARBON, Vector2::new(100.0, 100.0));
    for (i, (dx, dy)) in [(60.0, 0.0), (-60.0, 0.0), (0.0, 60.0)]
        .into_iter()
        .enumerate()
    {
        let h = AtomId::intern(&format!("ex_h{i}"));
        model = model
            .add_atom(h, ElementNumber::HYDROGEN, Vector2::new(100.0 + dx, 100.0 + dy))
            .add_bond(
                BondId::intern(&format!("ex_b{i}")),
                c,
                h,
                BondMultiplicity::Single,
            );
    }
    model.set_atom_electrons(c, 1)
}

#[test]
fn svg_contains_every_atom_label() {
    let scene = build_export_scene(
        &methane_fragment(),
        BondingStyle::Valence,
        &RenderMetrics::default(),
    );
    let svg = render_svg(&scene);
    assert_eq!(svg.matches("<text").count(), 4);
    assert_eq!(svg.matches(">H</text>").count(), 3);
    assert!(svg.contains("viewBox=\"0 60 200 140\""));
}

#[test]
fn lone_electron_faces_the_free_side() {
    let scene = build_export_scene(
        &methane_fragment(),
        BondingStyle::Electrons,
        &RenderMetrics::default(),
    );
    // Bonds go east, west and south, so the single electron sits north
    let north = Vector2::new(100.0, 74.0);
    assert!(scene.shapes.iter().any(|s| matches!(
        s,
        Shape::Circle { center, outline: None, .. } if *center == north
    )));
}

#[test]
fn png_data_uri_round_trip() {
    let exporter = ImageExporter::new();
    let scene = build_export_scene(
        &methane_fragment(),
        BondingStyle::Electrons,
        &RenderMetrics::default(),
    );
    let uri = exporter.export_data_uri(&scene).unwrap();
    assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
    assert!(!exporter.is_busy());
}

#[test]
fn empty_model_still_exports() {
    let exporter = ImageExporter::new();
    let scene = build_export_scene(
        &MoleculeModel::new(),
        BondingStyle::Valence,
        &RenderMetrics::default(),
    );
    let png = exporter.begin().unwrap().render_png(&scene).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

/// Width and height from the IHDR chunk.
fn png_dimensions(png: &[u8]) -> (u32, u32) {
    let be = |at: usize| u32::from_be_bytes(png[at..at + 4].try_into().unwrap());
    (be(16), be(20))
}

#[test]
fn tall_scene_is_scaled_to_fit() {
    let model = MoleculeModel::new()
        .add_atom(AtomId::intern("tall_top"), ElementNumber::CARBON, Vector2::ZERO)
        .add_atom(
            AtomId::intern("tall_bottom"),
            ElementNumber::OXYGEN,
            Vector2::new(0.0, 5e8),
        );
    let scene = build_export_scene(&model, BondingStyle::Valence, &RenderMetrics::default());
    let png = ImageExporter::new().begin().unwrap().render_png(&scene).unwrap();

    let (width, height) = png_dimensions(&png);
    assert_eq!(height, MAX_EXPORT_DIMENSION);
    assert!(width >= 1 && width < 10);
}

#[test]
fn small_scene_keeps_its_size() {
    let scene = build_export_scene(
        &methane_fragment(),
        BondingStyle::Valence,
        &RenderMetrics::default(),
    );
    let png = ImageExporter::new().begin().unwrap().render_png(&scene).unwrap();
    assert_eq!(png_dimensions(&png), (200, 140));
}
