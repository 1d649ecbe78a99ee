//! SVG → PNG rasterization for state snapshots.
//!
//! Only one export may be in flight at a time; a second request while a
//! job is open fails with [`ExportError::Busy`] instead of queuing.
//! Scenes larger than [`MAX_EXPORT_DIMENSION`] on either side are scaled
//! down to fit.

use crate::scene::ExportScene;
use crate::svg::render_svg;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg;
use std::cell::Cell;

/// Largest width or height of an exported image, in pixels.
pub const MAX_EXPORT_DIMENSION: u32 = 4096;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("an image export is already in progress")]
    Busy,
    #[error("scene extent {width}x{height} cannot be rasterized")]
    Unbounded { width: f64, height: f64 },
    #[error("failed to parse generated SVG: {0}")]
    Svg(#[from] usvg::Error),
    #[error("failed to allocate a {width}x{height} surface")]
    Allocation { width: u32, height: u32 },
    #[error("failed to encode PNG output: {0}")]
    Encode(String),
}

pub struct ImageExporter {
    options: usvg::Options<'static>,
    scale: f32,
    busy: Cell<bool>,
}

impl Default for ImageExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageExporter {
    pub fn new() -> Self {
        #[allow(unused_mut)]
        let mut options = usvg::Options::default();
        #[cfg(feature = "system-fonts")]
        options.fontdb_mut().load_system_fonts();
        Self {
            options,
            scale: 1.0,
            busy: Cell::new(false),
        }
    }

    /// Register a font for atom labels (TTF/OTF bytes).
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.options.fontdb_mut().load_font_data(data);
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        } else {
            log::warn!("export: ignoring invalid scale {scale}");
        }
        self
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Claim the exporter. The claim is released when the job is dropped.
    pub fn begin(&self) -> Result<ExportJob<'_>, ExportError> {
        if self.busy.replace(true) {
            log::warn!("export: image conversion was triggered more than once");
            return Err(ExportError::Busy);
        }
        Ok(ExportJob { exporter: self })
    }

    /// Rasterize `scene` into a `data:image/png;base64,…` URI.
    pub fn export_data_uri(&self, scene: &ExportScene) -> Result<String, ExportError> {
        self.begin()?.render_data_uri(scene)
    }

    fn rasterize(&self, scene: &ExportScene) -> Result<Vec<u8>, ExportError> {
        let extent = scene.view_box.size;
        if !extent.x.is_finite() || !extent.y.is_finite() {
            return Err(ExportError::Unbounded {
                width: extent.x,
                height: extent.y,
            });
        }

        let svg = render_svg(scene);
        let tree = usvg::Tree::from_str(&svg, &self.options)?;

        let size = tree.size();
        let limit = MAX_EXPORT_DIMENSION as f32;
        let scale = self.scale.min(limit / size.width()).min(limit / size.height());
        if scale < self.scale {
            log::debug!(
                "export: {}x{} scene scaled by {scale} to fit {MAX_EXPORT_DIMENSION}px",
                size.width(),
                size.height()
            );
        }
        let width = (size.width() * scale).ceil().clamp(1.0, limit) as u32;
        let height = (size.height() * scale).ceil().clamp(1.0, limit) as u32;

        let mut pixmap =
            Pixmap::new(width, height).ok_or(ExportError::Allocation { width, height })?;
        pixmap.fill(Color::WHITE);
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        log::debug!("export: rasterized {width}x{height}");
        pixmap.encode_png().map_err(|err| ExportError::Encode(err.to_string()))
    }
}

/// An exclusive claim on an [`ImageExporter`].
pub struct ExportJob<'a> {
    exporter: &'a ImageExporter,
}

impl ExportJob<'_> {
    pub fn render_png(self, scene: &ExportScene) -> Result<Vec<u8>, ExportError> {
        self.exporter.rasterize(scene)
    }

    pub fn render_data_uri(self, scene: &ExportScene) -> Result<String, ExportError> {
        let png = self.render_png(scene)?;
        Ok(format!("data:image/png;base64,{}", BASE64_STANDARD.encode(png)))
    }
}

impl Drop for ExportJob<'_> {
    fn drop(&mut self) {
        self.exporter.busy.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_rejected_until_release() {
        let exporter = ImageExporter::new();
        let job = exporter.begin().unwrap();
        assert!(exporter.is_busy());
        assert!(matches!(exporter.begin(), Err(ExportError::Busy)));
        drop(job);
        assert!(!exporter.is_busy());
        assert!(exporter.begin().is_ok());
    }

    #[test]
    fn infinite_extent_is_rejected_before_rendering() {
        use crate::scene::ViewBox;
        use lewis_core::Vector2;

        let scene = ExportScene {
            view_box: ViewBox {
                min: Vector2::new(-1e308, 0.0),
                size: Vector2::new(f64::INFINITY, 80.0),
            },
            shapes: Vec::new(),
        };
        let exporter = ImageExporter::new();
        assert!(matches!(
            exporter.export_data_uri(&scene),
            Err(ExportError::Unbounded { .. })
        ));
        assert!(!exporter.is_busy());
    }

    #[test]
    fn invalid_scale_is_ignored() {
        let exporter = ImageExporter::new().with_scale(-2.0);
        assert_eq!(exporter.scale, 1.0);
    }
}
