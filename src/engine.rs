use tracing::{debug, info};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point, normalize_degrees, round_to};
use crate::config::EngineConfig;
use crate::consts::SURFACE_SCALE;
use crate::doc::{DocStore, Element, ElementId};
use crate::export::{self, ExportFormat, ExportImage};
use crate::history::{Command, History};
use crate::hit;
use crate::input::{Button, InputState, Key, Modifiers, TextPrompt, Tool, UiState, parse_number};
use crate::plans::{FloorPlan, PlanId, PlanLibrary};
use crate::render;
use crate::snap::{self, Guide};
use crate::tags::TagPool;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Message shown by the browser prompt when a label stroke ends.
const LABEL_PROMPT: &str = "Enter the text for this label:";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone)]
pub enum Action {
    None,
    ElementCreated(Element),
    ElementUpdated(Element),
    ElementDeleted { id: ElementId },
    RenderNeeded,
}

/// Everything the rendering surface needs for one frame.
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    /// Placed elements in draw order.
    pub elements: &'a [Element],
    /// The element being drawn, if a stroke is active.
    pub in_progress: Option<&'a Element>,
    /// Tag of the element being dragged.
    pub highlighted_tag: Option<&'a str>,
    /// Current zoom factor.
    pub zoom: f64,
    /// Axis guides around the in-progress element's end.
    pub guides: Vec<Guide>,
}

/// Core engine state: all logic that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: DocStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub history: History,
    pub tags: TagPool,
    pub plans: PlanLibrary,
    pub config: EngineConfig,
    next_tag: String,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let tags = TagPool::new();
        let next_tag = tags.next_free();
        Self {
            doc: DocStore::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::Idle,
            history: History::new(),
            tags,
            plans: PlanLibrary::new(),
            config,
            next_tag,
        }
    }

    // --- Tool / modifiers / precision ---

    /// Set the active tool.
    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    /// Hold or release the ortho snap modifier.
    pub fn set_snap_modifier(&mut self, held: bool) {
        self.ui.ortho = held;
    }

    /// Change display precision. Values above [`crate::config::MAX_DECIMALS`] are clamped.
    pub fn set_precision(&mut self, length_decimals: u32, angle_decimals: u32) {
        self.config.length_decimals = length_decimals.min(crate::config::MAX_DECIMALS);
        self.config.angle_decimals = angle_decimals.min(crate::config::MAX_DECIMALS);
        self.doc.check_consistency(&self.config);
    }

    pub fn zoom_in(&mut self) -> Action {
        self.camera.zoom_in();
        Action::RenderNeeded
    }

    pub fn zoom_out(&mut self) -> Action {
        self.camera.zoom_out();
        Action::RenderNeeded
    }

    // --- Drawing ---

    /// Start a stroke at surface point `(x, y)` with the current tool.
    ///
    /// The start snaps onto a nearby endpoint. The in-progress element takes
    /// the next free tag but is not on the plan until [`Self::end_stroke`].
    /// A drag still in progress is committed first.
    pub fn begin_stroke(&mut self, x: f64, y: f64) -> Action {
        self.finish_drag();
        let start = snap::snap_to_endpoint(Point::new(x, y), self.doc.elements(), self.config.snap_tolerance);
        let element = Element::new(self.ui.tool.kind(), start, self.next_tag.clone());
        self.input = InputState::Drawing { element };
        Action::RenderNeeded
    }

    /// Move the end of the in-progress stroke towards `(x, y)`, applying angle
    /// snap and, in ortho mode, axis alignment. No-op without an active stroke.
    pub fn continue_stroke(&mut self, x: f64, y: f64) -> Action {
        let InputState::Drawing { element } = &mut self.input else {
            return Action::None;
        };
        if element.kind.is_label() {
            return Action::None;
        }

        let mut end = snap::snap_angle(element.start, Point::new(x, y), self.ui.ortho, &self.config);
        if self.ui.ortho {
            end = snap::snap_to_axes(end, self.doc.elements(), self.config.snap_tolerance);
        }
        element.end = end;
        element.measure(&self.config);
        Action::RenderNeeded
    }

    /// Finish the active stroke.
    ///
    /// Segments are committed as-is. Labels ask `prompt` for text and are
    /// discarded if none is given. No-op without an active stroke.
    pub fn end_stroke<P>(&mut self, prompt: &mut P) -> Action
    where
        P: TextPrompt + ?Sized,
    {
        if !matches!(self.input, InputState::Drawing { .. }) {
            return Action::None;
        }
        let InputState::Drawing { mut element } = std::mem::take(&mut self.input) else {
            return Action::None;
        };

        if element.kind.is_label() {
            match prompt.request_text() {
                Some(text) if !text.is_empty() => element.text = Some(text),
                _ => {
                    debug!(tag = %element.tag, "label discarded without text");
                    return Action::RenderNeeded;
                }
            }
        }

        self.commit(element)
    }

    fn commit(&mut self, mut element: Element) -> Action {
        // A tag handed out at stroke start may have been reclaimed by an undo since.
        if self.tags.is_used(&element.tag) {
            element.tag = self.tags.next_free();
        }

        let index = self.doc.len();
        let id = element.id;
        self.doc.push(element);
        self.doc.check_consistency(&self.config);
        self.refresh_tags();

        let Some(placed) = self.doc.get(&id).cloned() else {
            return Action::None;
        };
        debug!(%id, tag = %placed.tag, kind = ?placed.kind, "element added");
        self.history.push(Command::add(placed.clone(), index));
        Action::ElementCreated(placed)
    }

    // --- Property edits ---

    /// Stretch or shrink a segment along its direction to `meters`.
    ///
    /// A zero-length segment grows along its stored angle. Negative or
    /// non-finite lengths are treated as 0. Labels are left alone.
    pub fn set_length(&mut self, id: &ElementId, meters: f64) -> Action {
        let meters = if meters.is_finite() { meters.max(0.0) } else { 0.0 };
        let ppm = self.config.pixels_per_meter;
        self.edit(id, |element| {
            if element.kind.is_label() {
                return false;
            }
            let target = meters * ppm;
            let current = element.start.distance(element.end);
            element.end = if current > 0.0 {
                let scale = target / current;
                Point::new(
                    element.start.x + (element.end.x - element.start.x) * scale,
                    element.start.y + (element.end.y - element.start.y) * scale,
                )
            } else {
                element.start.offset_polar(element.angle, target)
            };
            element.length = meters;
            true
        })
    }

    /// Point a segment in direction `degrees`, keeping its stored length.
    pub fn set_angle(&mut self, id: &ElementId, degrees: f64) -> Action {
        let degrees = if degrees.is_finite() { degrees } else { 0.0 };
        let angle = normalize_degrees(round_to(normalize_degrees(degrees), self.config.angle_decimals));
        let ppm = self.config.pixels_per_meter;
        self.edit(id, |element| {
            if element.kind.is_label() {
                return false;
            }
            element.end = element.start.offset_polar(angle, element.length * ppm);
            element.angle = angle;
            true
        })
    }

    /// Rotate a segment a quarter turn about its start.
    pub fn rotate(&mut self, id: &ElementId) -> Action {
        self.edit(id, |element| {
            if element.kind.is_label() {
                return false;
            }
            element.end = element.end.rotated_quarter_about(element.start);
            element.angle = normalize_degrees(element.angle + 90.0);
            true
        })
    }

    /// Replace a label's text.
    pub fn set_text(&mut self, id: &ElementId, text: &str) -> Action {
        self.edit(id, |element| {
            if !element.kind.is_label() || element.text.as_deref() == Some(text) {
                return false;
            }
            element.text = Some(text.to_owned());
            true
        })
    }

    /// Property-panel length entry; unparsable input counts as 0.
    pub fn set_length_input(&mut self, id: &ElementId, raw: &str) -> Action {
        self.set_length(id, parse_number(raw))
    }

    /// Property-panel angle entry; unparsable input counts as 0.
    pub fn set_angle_input(&mut self, id: &ElementId, raw: &str) -> Action {
        self.set_angle(id, parse_number(raw))
    }

    /// Apply `mutate` to a copy of the element and, if it reports a change,
    /// store it, run the consistency pass, and record an update command.
    fn edit<F>(&mut self, id: &ElementId, mutate: F) -> Action
    where
        F: FnOnce(&mut Element) -> bool,
    {
        let Some(index) = self.doc.position(id) else {
            return Action::None;
        };
        let prior = self.doc.elements()[index].clone();
        let mut next = prior.clone();
        if !mutate(&mut next) {
            return Action::None;
        }

        self.doc.replace(next);
        self.doc.check_consistency(&self.config);
        let Some(current) = self.doc.get(id).cloned() else {
            return Action::None;
        };
        debug!(%id, tag = %current.tag, length = current.length, angle = current.angle, "element updated");
        self.history.push(Command::update(prior, current.clone(), index));
        Action::ElementUpdated(current)
    }

    /// Remove an element and free its tag.
    pub fn delete(&mut self, id: &ElementId) -> Action {
        let Some((index, removed)) = self.doc.remove(id) else {
            return Action::None;
        };
        if matches!(&self.input, InputState::Dragging { id: drag_id, .. } if drag_id == id) {
            self.input = InputState::Idle;
            self.ui.highlighted_tag = None;
        }
        self.doc.check_consistency(&self.config);
        self.refresh_tags();
        debug!(%id, tag = %removed.tag, "element deleted");
        self.history.push(Command::delete(removed, index));
        Action::ElementDeleted { id: *id }
    }

    // --- Dragging ---

    /// Grab an element at surface point `(x, y)`. A drag still in progress is
    /// committed first.
    pub fn begin_drag(&mut self, id: &ElementId, x: f64, y: f64) -> Action {
        self.finish_drag();
        let Some(element) = self.doc.get(id) else {
            return Action::None;
        };
        self.ui.highlighted_tag = Some(element.tag.clone());
        self.input = InputState::Dragging { id: *id, last_world: Point::new(x, y), before: element.clone() };
        Action::RenderNeeded
    }

    /// Move the grabbed element by the pointer delta since the last event.
    pub fn drag(&mut self, x: f64, y: f64) -> Action {
        let InputState::Dragging { id, last_world, .. } = &mut self.input else {
            return Action::None;
        };
        let id = *id;
        let (dx, dy) = (x - last_world.x, y - last_world.y);
        *last_world = Point::new(x, y);

        let Some(element) = self.doc.get_mut(&id) else {
            return Action::None;
        };
        element.translate(dx, dy);
        self.doc.check_consistency(&self.config);
        self.doc.get(&id).cloned().map_or(Action::None, Action::ElementUpdated)
    }

    /// Release the grabbed element, recording the whole gesture as one move.
    pub fn end_drag(&mut self) -> Action {
        if !matches!(self.input, InputState::Dragging { .. }) {
            return Action::None;
        }
        let InputState::Dragging { id, before, .. } = std::mem::take(&mut self.input) else {
            return Action::None;
        };
        self.ui.highlighted_tag = None;

        if let (Some(index), Some(after)) = (self.doc.position(&id), self.doc.get(&id).cloned()) {
            if after.start != before.start || after.end != before.end {
                debug!(%id, tag = %after.tag, "element moved");
                self.history.push(Command::moved(before, after, index));
            }
        }
        Action::RenderNeeded
    }

    // --- History ---

    /// Revert the most recent command. No-op on an empty history.
    pub fn undo(&mut self) -> Action {
        self.finish_drag();
        let Some(command) = self.history.pop_undo() else {
            return Action::None;
        };
        command.revert(&mut self.doc);
        self.after_history_step();
        debug!(kind = ?command.kind, tag = %command.element.tag, "undo");
        self.history.push_redo(command);
        Action::RenderNeeded
    }

    /// Re-apply the most recently undone command. No-op when nothing was undone.
    pub fn redo(&mut self) -> Action {
        self.finish_drag();
        let Some(command) = self.history.pop_redo() else {
            return Action::None;
        };
        command.apply(&mut self.doc);
        self.after_history_step();
        debug!(kind = ?command.kind, tag = %command.element.tag, "redo");
        self.history.push_undo(command);
        Action::RenderNeeded
    }

    fn finish_drag(&mut self) {
        if matches!(self.input, InputState::Dragging { .. }) {
            self.end_drag();
        }
    }

    fn after_history_step(&mut self) {
        self.doc.check_consistency(&self.config);
        self.refresh_tags();
    }

    fn refresh_tags(&mut self) {
        self.tags.rebuild(self.doc.elements());
        self.next_tag = self.tags.next_free();
    }

    // --- Floor plans ---

    /// Store the current drawing in the plan library.
    pub fn save_plan(&mut self) -> FloorPlan {
        let plan = self.plans.save(self.doc.elements()).clone();
        info!(plan = %plan.name, elements = plan.elements.len(), "floor plan saved");
        plan
    }

    /// Clear the drawing and detach from the current plan.
    pub fn new_plan(&mut self) -> Action {
        self.plans.start_new();
        self.reset_drawing(Vec::new());
        info!("new floor plan started");
        Action::RenderNeeded
    }

    /// Load a saved plan for editing. History starts empty.
    pub fn open_plan(&mut self, id: &PlanId) -> Action {
        let Some(plan) = self.plans.open(id) else {
            return Action::None;
        };
        let elements = plan.elements.clone();
        info!(plan = %plan.name, elements = elements.len(), "floor plan opened");
        self.reset_drawing(elements);
        Action::RenderNeeded
    }

    fn reset_drawing(&mut self, elements: Vec<Element>) {
        self.doc.load(elements);
        self.doc.check_consistency(&self.config);
        self.history.clear();
        self.input = InputState::Idle;
        self.ui.highlighted_tag = None;
        self.refresh_tags();
    }

    /// Download name for an export of the current plan.
    #[must_use]
    pub fn export_file_name(&self, format: ExportFormat) -> String {
        export::file_name(self.plans.current().map(|p| p.name.as_str()), format)
    }

    // --- Pointer / keyboard ---

    /// Pointer pressed: grab the element under a tag bubble, else start a stroke.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.ui.ortho = modifiers.shift;
        let world = self.camera.screen_to_world(screen_pt);
        let action = match hit::hit_test(world, self.doc.elements(), &self.camera) {
            Some(id) => self.begin_drag(&id, world.x, world.y),
            None => self.begin_stroke(world.x, world.y),
        };
        collect(action)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Drawing { .. } => {
                self.ui.ortho = modifiers.shift;
                collect(self.continue_stroke(world.x, world.y))
            }
            InputState::Dragging { .. } => collect(self.drag(world.x, world.y)),
        }
    }

    pub fn on_pointer_up<P>(&mut self, _screen_pt: Point, button: Button, prompt: &mut P) -> Vec<Action>
    where
        P: TextPrompt + ?Sized,
    {
        if button != Button::Primary {
            return Vec::new();
        }
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Drawing { .. } => collect(self.end_stroke(prompt)),
            InputState::Dragging { .. } => collect(self.end_drag()),
        }
    }

    /// Shift enters ortho mode; Ctrl/Cmd+Z undoes; Ctrl/Cmd+Y or Ctrl/Cmd+Shift+Z redoes.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.shift || key.0 == "Shift" {
            self.ui.ortho = true;
        }
        if !modifiers.command() {
            return Vec::new();
        }
        let action = if key.is_letter('z') {
            if modifiers.shift { self.redo() } else { self.undo() }
        } else if key.is_letter('y') {
            self.redo()
        } else {
            Action::None
        };
        collect(action)
    }

    pub fn on_key_up(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if !modifiers.shift || key.0 == "Shift" {
            self.ui.ortho = false;
        }
        Vec::new()
    }

    // --- Queries ---

    /// Placed elements in draw order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        self.doc.elements()
    }

    /// Look up an element by ID.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.doc.get(id)
    }

    /// The element currently being drawn, if any.
    #[must_use]
    pub fn in_progress(&self) -> Option<&Element> {
        match &self.input {
            InputState::Drawing { element } => Some(element),
            _ => None,
        }
    }

    /// Tag the next drawn element will receive.
    #[must_use]
    pub fn next_tag(&self) -> &str {
        &self.next_tag
    }

    /// Saved floor plans in creation order.
    #[must_use]
    pub fn plans(&self) -> &[FloorPlan] {
        self.plans.plans()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Read-only view of everything the renderer draws.
    #[must_use]
    pub fn scene(&self) -> Scene<'_> {
        let in_progress = self.in_progress();
        let guides = in_progress
            .filter(|e| !e.kind.is_label())
            .map(|e| snap::guides(e.end, self.doc.elements(), self.config.snap_tolerance))
            .unwrap_or_default();
        Scene {
            elements: self.doc.elements(),
            in_progress,
            highlighted_tag: self.ui.highlighted_tag.as_deref(),
            zoom: self.camera.zoom,
            guides,
        }
    }
}

/// Wrap a single handler result, dropping `Action::None`.
fn collect(action: Action) -> Vec<Action> {
    match action {
        Action::None => Vec::new(),
        Action::RenderNeeded => vec![Action::RenderNeeded],
        other => vec![other, Action::RenderNeeded],
    }
}

/// Browser text prompt for new labels.
struct WindowPrompt;

impl TextPrompt for WindowPrompt {
    fn request_text(&mut self) -> Option<String> {
        let window = web_sys::window()?;
        window.prompt_with_message(LABEL_PROMPT).unwrap_or_default()
    }
}

/// The full drawing engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    #[must_use]
    pub fn with_config(canvas: HtmlCanvasElement, config: EngineConfig) -> Self {
        Self { canvas, core: EngineCore::with_config(config) }
    }

    // --- Viewport ---

    /// Size the canvas backing store for a CSS size; the backing store is
    /// [`SURFACE_SCALE`] times larger for crisp lines.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64) {
        self.canvas.set_width((width_css * SURFACE_SCALE).max(0.0).round() as u32);
        self.canvas.set_height((height_css * SURFACE_SCALE).max(0.0).round() as u32);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, &mut WindowPrompt)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn on_key_up(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_up(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = context_2d(&self.canvas)?;
        render::draw(
            &ctx,
            &self.core.scene(),
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        )
    }

    /// Rasterize the plan into a downloadable image the size of the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the document or a 2D context is unavailable, or encoding fails.
    pub fn export(&self, format: ExportFormat) -> Result<ExportImage, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("document unavailable"))?;
        let target: HtmlCanvasElement = document.create_element("canvas")?.dyn_into().map_err(JsValue::from)?;
        target.set_width(self.canvas.width());
        target.set_height(self.canvas.height());

        let ctx = context_2d(&target)?;
        render::draw_export(
            &ctx,
            self.core.elements(),
            self.core.camera.zoom,
            format,
            f64::from(target.width()),
            f64::from(target.height()),
        )?;

        let data_url = target.to_data_url_with_type_and_encoder_options(format.mime_type(), &JsValue::from_f64(1.0))?;
        let file_name = self.core.export_file_name(format);
        info!(%file_name, "floor plan exported");
        Ok(ExportImage { file_name, data_url })
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        self.core.elements()
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.core.element(id)
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}
