pub mod bond;
pub mod glyphs;
pub mod raster;
pub mod scene;
pub mod style;
pub mod svg;
pub mod view;

pub use glyphs::{ElectronGlyph, ElectronKind, Orientation};
pub use raster::{ExportError, ImageExporter, MAX_EXPORT_DIMENSION};
pub use scene::{ExportScene, Shape, build_export_scene};
pub use style::{BondingStyle, RenderMetrics};
pub use svg::render_svg;
pub use view::{AtomView, BondView, MoleculeView, derive_view};
