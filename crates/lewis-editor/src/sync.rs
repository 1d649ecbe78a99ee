//! Editor → host state synchronisation.
//!
//! Model changes reach the host as JSON snapshots, debounced so that a
//! burst of edits produces a single message. Submitting sends a final
//! snapshot carrying the rendered image and then drops the pending one.
//! A failed submit leaves the pending snapshot in place.

use crate::config::SYNC_QUIET_PERIOD_MS;
use crate::controller::MoleculeEditor;
use crate::debounce::{Debouncer, Millis};
use lewis_core::MoleculeModel;
use lewis_render::{
    BondingStyle, ExportError, ImageExporter, RenderMetrics, build_export_scene,
};
use serde::{Deserialize, Serialize};

/// Write-only channel to the hosting page.
pub trait HostChannel {
    /// Deliver a serialized state snapshot.
    fn send_state(&mut self, state: String);

    /// Ask the host to finish the session.
    fn request_return(&mut self, submitted: bool);
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("state snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Final snapshot: the model plus its rendering as a data URI.
#[derive(Debug, Serialize, Deserialize)]
struct SubmittedState {
    #[serde(flatten)]
    model: MoleculeModel,
    #[serde(rename = "asImage", default, skip_serializing_if = "Option::is_none")]
    as_image: Option<String>,
}

pub fn serialize_snapshot(model: &MoleculeModel) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(model)?)
}

/// Parse a snapshot sent by the host. An empty string is an empty model;
/// an embedded image is ignored.
pub fn parse_snapshot(json: &str) -> Result<MoleculeModel, SnapshotError> {
    if json.trim().is_empty() {
        return Ok(MoleculeModel::new());
    }
    let state: SubmittedState = serde_json::from_str(json)?;
    Ok(state.model)
}

pub struct StateSync {
    debounce: Debouncer<String>,
    last_revision: u64,
    exporter: ImageExporter,
    style: BondingStyle,
    metrics: RenderMetrics,
}

impl StateSync {
    pub fn new(exporter: ImageExporter, style: BondingStyle) -> Self {
        Self {
            debounce: Debouncer::new(SYNC_QUIET_PERIOD_MS),
            last_revision: 0,
            exporter,
            style,
            metrics: RenderMetrics::default(),
        }
    }

    pub fn with_metrics(mut self, metrics: RenderMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn set_style(&mut self, style: BondingStyle) {
        self.style = style;
    }

    pub fn exporter_mut(&mut self) -> &mut ImageExporter {
        &mut self.exporter
    }

    /// Treat the editor's current model as already known to the host,
    /// e.g. right after loading it from the host.
    pub fn acknowledge(&mut self, editor: &MoleculeEditor) {
        self.last_revision = editor.revision();
        self.debounce.cancel_pending();
    }

    /// Schedule a snapshot if the model changed since the last call.
    pub fn observe(&mut self, editor: &MoleculeEditor, now: Millis) {
        if editor.revision() == self.last_revision {
            return;
        }
        self.last_revision = editor.revision();
        match serialize_snapshot(editor.model()) {
            Ok(snapshot) => self.debounce.push(snapshot, now),
            Err(err) => log::warn!("sync: {err}"),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Send the pending snapshot once the quiet period has elapsed.
    pub fn poll(&mut self, now: Millis, channel: &mut dyn HostChannel) -> bool {
        let Some(snapshot) = self.debounce.poll(now) else {
            return false;
        };
        log::debug!("sync: sending state ({} bytes)", snapshot.len());
        channel.send_state(snapshot);
        true
    }

    /// Send the final state with its image and ask the host to finish.
    ///
    /// Fails with [`ExportError::Busy`] when an export is already running.
    /// Nothing is sent on failure and a pending snapshot still goes out on
    /// a later [`poll`](Self::poll).
    pub fn submit(
        &mut self,
        model: &MoleculeModel,
        channel: &mut dyn HostChannel,
    ) -> Result<(), SubmitError> {
        let scene = build_export_scene(model, self.style, &self.metrics);
        let image = self.exporter.export_data_uri(&scene)?;
        let state = SubmittedState {
            model: model.clone(),
            as_image: Some(image),
        };
        let json = serde_json::to_string(&state).map_err(SnapshotError::from)?;
        log::debug!("sync: submitting state ({} bytes)", json.len());
        channel.send_state(json);
        self.debounce.cancel_pending();
        channel.request_return(true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lewis_core::{AtomId, ElementNumber, Vector2};

    #[test]
    fn empty_snapshot_is_empty_model() {
        assert!(parse_snapshot("").unwrap().is_empty());
        assert!(parse_snapshot("  ").unwrap().is_empty());
        assert!(parse_snapshot("{\"atoms\":").is_err());
    }

    #[test]
    fn embedded_image_is_ignored() {
        let model = MoleculeModel::new().add_atom(
            AtomId::intern("snap_a"),
            ElementNumber::CARBON,
            Vector2::new(1.0, 2.0),
        );
        let state = SubmittedState {
            model: model.clone(),
            as_image: Some("data:image/png;base64,AAAA".into()),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"asImage\""));
        assert_eq!(parse_snapshot(&json).unwrap(), model);
    }
}
