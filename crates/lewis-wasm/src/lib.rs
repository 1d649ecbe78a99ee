//! WASM bridge for the Lewis editor: exposes the molecule controller to
//! the hosting page.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards DOM
//! pointer events with their `type` string, calls `tick` once per
//! animation frame and receives state snapshots through JS callbacks.

mod render2d;

use lewis_core::{
    AtomId, BondId, BondMultiplicity, ElementNumber, QUICK_PICK, ToolMode, Vector2, lookup_element,
};
use lewis_editor::input::client_to_canvas;
use lewis_editor::{
    EditorConfig, HostChannel, MoleculeEditor, PointerEvent, StateSync, Zoom, atom_handle_cursor,
    bond_handle_cursor, canvas_cursor, parse_snapshot, serialize_snapshot,
};
use lewis_render::{ImageExporter, RenderMetrics};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing editor.
///
/// Holds the controller, the host sync state and the display settings.
/// All interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct LewisEditor {
    editor: MoleculeEditor,
    sync: StateSync,
    config: EditorConfig,
    metrics: RenderMetrics,
    zoom: Zoom,
    /// `false` = light (default), `true` = dark.
    dark_mode: bool,
    on_state: Option<js_sys::Function>,
    on_return: Option<js_sys::Function>,
}

/// Forwards host messages to the page's registered callbacks.
struct JsChannel<'a> {
    on_state: Option<&'a js_sys::Function>,
    on_return: Option<&'a js_sys::Function>,
}

impl HostChannel for JsChannel<'_> {
    fn send_state(&mut self, state: String) {
        let Some(callback) = self.on_state else {
            log::warn!("wasm: no state callback registered, dropping snapshot");
            return;
        };
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&state)) {
            log::warn!("wasm: state callback failed: {err:?}");
        }
    }

    fn request_return(&mut self, submitted: bool) {
        let Some(callback) = self.on_return else {
            log::warn!("wasm: no return callback registered");
            return;
        };
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_bool(submitted)) {
            log::warn!("wasm: return callback failed: {err:?}");
        }
    }
}

#[wasm_bindgen]
impl LewisEditor {
    /// Create an editor from the host configuration JSON. Malformed
    /// configuration falls back to defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Self {
        console_error_panic_hook_setup();
        console_logger_setup();

        let config = EditorConfig::from_json_or_default(config_json);
        log::debug!("wasm: editor created with {config:?}");
        Self {
            editor: MoleculeEditor::default(),
            sync: StateSync::new(ImageExporter::new(), config.bonding_style),
            config,
            metrics: RenderMetrics::default(),
            zoom: Zoom::default(),
            dark_mode: false,
            on_state: None,
            on_return: None,
        }
    }

    /// Register the callback receiving state snapshots (JSON strings).
    pub fn set_state_callback(&mut self, callback: js_sys::Function) {
        self.on_state = Some(callback);
    }

    /// Register the callback receiving completion requests (`true` when
    /// the state was submitted).
    pub fn set_return_callback(&mut self, callback: js_sys::Function) {
        self.on_return = Some(callback);
    }

    /// Register a font (TTF/OTF bytes) for atom labels in exported images.
    pub fn load_font(&mut self, data: Vec<u8>) {
        self.sync.exporter_mut().load_font_data(data);
    }

    // ─── State ───────────────────────────────────────────────────────────

    /// Restore a state snapshot sent by the host. Returns `false` when the
    /// snapshot cannot be parsed; the current model is kept then.
    pub fn load_state(&mut self, json: &str) -> bool {
        match parse_snapshot(json) {
            Ok(model) => {
                self.editor.load_model(model);
                self.sync.acknowledge(&self.editor);
                true
            }
            Err(err) => {
                log::warn!("wasm: {err}");
                false
            }
        }
    }

    /// Current model as a JSON snapshot.
    pub fn get_state(&self) -> String {
        serialize_snapshot(self.editor.model()).unwrap_or_else(|err| {
            log::warn!("wasm: {err}");
            String::new()
        })
    }

    /// Live view (committed items plus ghosts) as JSON.
    pub fn get_view_json(&self) -> String {
        serde_json::to_string(&self.editor.view()).unwrap_or_else(|err| {
            log::warn!("wasm: view serialization failed: {err}");
            String::new()
        })
    }

    pub fn get_editor_state(&self) -> String {
        self.editor.state().name().to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.editor.is_model_empty()
    }

    /// Run deferred continuations and flush the debounced host sync.
    /// Call once per animation frame with `performance.now()`.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let had_deferred = self.editor.has_deferred();
        self.editor.run_deferred();
        self.sync.observe(&self.editor, now_ms);
        let mut channel = JsChannel {
            on_state: self.on_state.as_ref(),
            on_return: self.on_return.as_ref(),
        };
        self.sync.poll(now_ms, &mut channel);
        had_deferred
    }

    /// Send the final state with its rendered image and request
    /// completion. Rejects while another export is in progress.
    pub fn submit(&mut self) -> Result<(), JsValue> {
        let mut channel = JsChannel {
            on_state: self.on_state.as_ref(),
            on_return: self.on_return.as_ref(),
        };
        self.sync
            .submit(self.editor.model(), &mut channel)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    // ─── Pointer events ──────────────────────────────────────────────────

    /// Pointer event on the empty canvas. Returns `false` for event types
    /// the editor does not handle.
    pub fn handle_canvas_event(&mut self, event_type: &str, x: f64, y: f64) -> bool {
        let Some(event) = self.pointer_event(event_type, x, y) else {
            return false;
        };
        self.editor.handle_canvas(event);
        true
    }

    /// Pointer event on the atom with `item_id`.
    pub fn handle_atom_event(&mut self, item_id: &str, event_type: &str, x: f64, y: f64) -> bool {
        let Some(event) = self.pointer_event(event_type, x, y) else {
            return false;
        };
        self.editor.handle_atom(AtomId::intern(item_id), event);
        true
    }

    /// Pointer event on the bond with `item_id`.
    pub fn handle_bond_event(&mut self, item_id: &str, event_type: &str, x: f64, y: f64) -> bool {
        let Some(event) = self.pointer_event(event_type, x, y) else {
            return false;
        };
        self.editor.handle_bond(BondId::intern(item_id), event);
        true
    }

    fn pointer_event(&self, event_type: &str, x: f64, y: f64) -> Option<PointerEvent> {
        let position = client_to_canvas(Vector2::new(x, y), Vector2::ZERO, self.zoom.scale());
        match PointerEvent::from_dom(event_type, position.x, position.y) {
            Ok(event) => Some(event),
            Err(err) => {
                log::warn!("wasm: {err}");
                None
            }
        }
    }

    // ─── Tools ───────────────────────────────────────────────────────────

    /// Arm a tool by name: `pointer`, `duplicate`, `groupMove` or
    /// `bonding` (with `multiplicity` 1–3).
    pub fn set_tool(&mut self, name: &str, multiplicity: u8) {
        self.editor.set_tool_mode(tool_from_name(name, multiplicity));
    }

    pub fn get_tool_name(&self) -> String {
        self.editor.tool().name().to_string()
    }

    /// Multiplicity of the bonding tool, `0` for other tools.
    pub fn get_bond_multiplicity(&self) -> u8 {
        self.editor.tool().bond_multiplicity().map_or(0, BondMultiplicity::count)
    }

    // ─── Elements ────────────────────────────────────────────────────────

    /// Open an element pick for a placement at canvas point `(x, y)`. The
    /// page shows its picker and answers with `element_picked` or
    /// `dismiss_picker`.
    pub fn pick_element(&mut self, x: f64, y: f64) {
        let anchor = client_to_canvas(Vector2::new(x, y), Vector2::ZERO, self.zoom.scale());
        // Completion is observed through `element_picked`, not the handle
        drop(self.editor.pick_element(anchor));
    }

    pub fn element_picked(&mut self, number: u8) {
        self.editor.element_picked(ElementNumber(number));
    }

    pub fn dismiss_picker(&mut self) {
        self.editor.dismiss_picker();
    }

    /// Start placing an element from the quick-pick palette.
    pub fn add_element(&mut self, number: u8, x: f64, y: f64) {
        let position = client_to_canvas(Vector2::new(x, y), Vector2::ZERO, self.zoom.scale());
        self.editor.add_element_to_canvas(ElementNumber(number), position);
    }

    /// Atomic numbers of the quick-pick palette.
    pub fn get_quick_pick(&self) -> Vec<u8> {
        QUICK_PICK.iter().map(|n| n.0).collect()
    }

    pub fn get_element_symbol(&self, number: u8) -> String {
        lookup_element(ElementNumber(number)).symbol.to_string()
    }

    /// Element name in the configured language.
    pub fn get_element_name(&self, number: u8) -> String {
        lookup_element(ElementNumber(number)).name(self.config.locale).to_string()
    }

    // ─── Editing ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    pub fn reset(&mut self) {
        self.editor.reset();
    }

    pub fn delete_selected(&mut self) {
        self.editor.delete_selected();
    }

    /// Add (`delta > 0`) or remove free electrons on the selected atom.
    pub fn change_electrons(&mut self, delta: i32) {
        self.editor.change_selected_electrons(delta);
    }

    pub fn can_increment_electrons(&self) -> bool {
        self.editor.can_increment_electrons()
    }

    pub fn can_decrement_electrons(&self) -> bool {
        self.editor.can_decrement_electrons()
    }

    /// Free-electron capacity of the selected atom, `-1` without one.
    pub fn get_selected_max_electrons(&self) -> i32 {
        self.editor.selected_atom_max_electrons().map_or(-1, i32::from)
    }

    /// Id of the selected atom or bond, or empty string if none.
    pub fn get_selected_id(&self) -> String {
        self.editor
            .selected_item()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    // ─── Display ─────────────────────────────────────────────────────────

    pub fn zoom_in(&mut self) {
        self.zoom.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.zoom.zoom_out();
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom.can_zoom_in()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom.can_zoom_out()
    }

    pub fn get_zoom_percent(&self) -> u16 {
        self.zoom.percent()
    }

    /// CSS cursor for the canvas, empty for the default.
    pub fn get_canvas_cursor(&self) -> String {
        canvas_cursor(self.editor.state()).unwrap_or_default().to_string()
    }

    pub fn get_atom_cursor(&self) -> String {
        atom_handle_cursor(self.editor.state(), self.editor.tool()).to_string()
    }

    pub fn get_bond_cursor(&self) -> String {
        bond_handle_cursor(self.editor.tool()).to_string()
    }

    /// Set the canvas theme.
    pub fn set_theme(&mut self, is_dark: bool) {
        self.dark_mode = is_dark;
    }

    /// Render the live view to a Canvas2D context.
    pub fn render(&self, ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
        let theme = if self.dark_mode {
            render2d::CanvasTheme::dark()
        } else {
            render2d::CanvasTheme::light()
        };
        let options = render2d::RenderOptions {
            style: self.config.bonding_style,
            metrics: &self.metrics,
            theme: &theme,
            decorations: render2d::AtomDecorations {
                name: self.config.show_info_name,
                order: self.config.show_info_order,
                blocks: self.config.highlight_blocks,
                locale: self.config.locale,
            },
            scale: self.zoom.scale(),
        };
        render2d::render_view(ctx, &self.editor.view(), width, height, &options);
    }
}

fn tool_from_name(name: &str, multiplicity: u8) -> ToolMode {
    match name {
        "pointer" => ToolMode::Pointer,
        "duplicate" => ToolMode::Duplicate,
        "groupMove" => ToolMode::GroupMove,
        "bonding" => {
            let multiplicity = BondMultiplicity::try_from(multiplicity).unwrap_or_else(|err| {
                log::warn!("wasm: {err}, using a single bond");
                BondMultiplicity::Single
            });
            ToolMode::Bonding(multiplicity)
        }
        other => {
            log::warn!("wasm: unknown tool {other:?}, using pointer");
            ToolMode::Pointer
        }
    }
}

// ─── Console logging & panic hook ────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            log::Level::Info => web_sys::console::info_1(&msg),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

fn console_logger_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        static LOGGER: ConsoleLogger = ConsoleLogger;
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Debug);
        }
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Lewis WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_names_match_tool_modes() {
        assert_eq!(tool_from_name("duplicate", 0), ToolMode::Duplicate);
        assert_eq!(tool_from_name("groupMove", 0), ToolMode::GroupMove);
        assert_eq!(
            tool_from_name("bonding", 3),
            ToolMode::Bonding(BondMultiplicity::Triple)
        );
        assert_eq!(
            tool_from_name("bonding", 9),
            ToolMode::Bonding(BondMultiplicity::Single)
        );
        assert_eq!(tool_from_name("lasso", 1), ToolMode::Pointer);
        for tool in [ToolMode::Pointer, ToolMode::Duplicate, ToolMode::GroupMove] {
            assert_eq!(tool_from_name(tool.name(), 1), tool);
        }
    }
}
