//! Document model: floor-plan elements and the ordered in-memory store.
//!
//! This module defines what is on the plan (`Element`, `ElementKind`) and the
//! runtime store that owns every placed element (`DocStore`). The store keeps
//! insertion order, which is also draw order and property-panel order.
//!
//! Lengths and angles on segment elements are derived values: the
//! consistency pass ([`DocStore::check_consistency`]) measures each segment
//! after every structural change and either re-syncs the stored values or
//! flags the divergence, depending on [`ConsistencyPolicy`].

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{Point, round_to};
use crate::config::{ConsistencyPolicy, EngineConfig};

/// Unique identifier for a placed element.
pub type ElementId = Uuid;

/// The kind of a floor-plan element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Wall segment.
    Line,
    /// Door segment.
    Door,
    /// Window segment.
    Window,
    /// Free-text label anchored at `start`.
    Label,
}

impl ElementKind {
    /// Whether this kind is a text label rather than a measured segment.
    #[must_use]
    pub fn is_label(self) -> bool {
        matches!(self, Self::Label)
    }
}

/// A placed element as stored in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier for this element.
    pub id: ElementId,
    /// Segment or label.
    pub kind: ElementKind,
    /// First endpoint; the anchor for labels.
    pub start: Point,
    /// Second endpoint; equal to `start` for labels.
    pub end: Point,
    /// Human-facing tag (`A`, `B`, … `AA`), unique among placed elements.
    pub tag: String,
    /// Length in meters at the configured precision. Zero for labels.
    pub length: f64,
    /// Direction from `start` to `end` in degrees, `[0, 360)`. Zero for labels.
    pub angle: f64,
    /// Whether the stored length matched the geometry at the last consistency pass.
    pub is_consistent: bool,
    /// Label text. `None` for segments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Element {
    /// A fresh zero-length element of `kind` at `start`.
    #[must_use]
    pub fn new(kind: ElementKind, start: Point, tag: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            start,
            end: start,
            tag: tag.into(),
            length: 0.0,
            angle: 0.0,
            is_consistent: true,
            text: None,
        }
    }

    /// Midpoint of the segment.
    #[must_use]
    pub fn midpoint(&self) -> Point {
        Point::new((self.start.x + self.end.x) / 2.0, (self.start.y + self.end.y) / 2.0)
    }

    /// Where the element is grabbed: the tag bubble at the midpoint for
    /// segments, the anchor for labels.
    #[must_use]
    pub fn handle_point(&self) -> Point {
        if self.kind.is_label() { self.start } else { self.midpoint() }
    }

    /// Length implied by the endpoints, in meters at the configured precision.
    #[must_use]
    pub fn measured_length(&self, config: &EngineConfig) -> f64 {
        round_to(self.start.distance(self.end) / config.pixels_per_meter, config.length_decimals)
    }

    /// Angle implied by the endpoints at the configured precision, wrapped into `[0, 360)`.
    #[must_use]
    pub fn measured_angle(&self, config: &EngineConfig) -> f64 {
        let angle = round_to(self.start.angle_to(self.end), config.angle_decimals);
        if angle >= 360.0 { 0.0 } else { angle }
    }

    /// Whether both endpoints coincide, leaving the direction undefined.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Overwrite `length` and `angle` from the current endpoints.
    ///
    /// A degenerate segment keeps its stored angle.
    pub fn measure(&mut self, config: &EngineConfig) {
        self.length = self.measured_length(config);
        if !self.is_degenerate() {
            self.angle = self.measured_angle(config);
        }
    }

    /// Move both endpoints by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.start = self.start.translated(dx, dy);
        self.end = self.end.translated(dx, dy);
    }
}

/// Largest gap between a measured and a stored length still treated as equal.
const LENGTH_EPSILON: f64 = 1e-9;

/// Ordered in-memory store of placed elements.
#[derive(Debug, Clone, Default)]
pub struct DocStore {
    elements: Vec<Element>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { elements: Vec::new() }
    }

    /// All elements in draw order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Return a reference to an element by id.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == *id)
    }

    /// Return a mutable reference to an element by id.
    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == *id)
    }

    /// List position of an element.
    #[must_use]
    pub fn position(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == *id)
    }

    /// Append an element at the end of the draw order.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Insert an element at `index`, or append if `index` is past the end.
    pub fn insert(&mut self, index: usize, element: Element) {
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
    }

    /// Remove an element by id, returning its former position and value.
    pub fn remove(&mut self, id: &ElementId) -> Option<(usize, Element)> {
        let index = self.position(id)?;
        Some((index, self.elements.remove(index)))
    }

    /// Replace the element with the same id in place, returning the old value.
    /// Returns `None` (and stores nothing) if no such element exists.
    pub fn replace(&mut self, element: Element) -> Option<Element> {
        let slot = self.get_mut(&element.id)?;
        Some(std::mem::replace(slot, element))
    }

    /// Replace all elements.
    pub fn load(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    /// Number of elements currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Compare every segment's stored length with its geometry.
    ///
    /// The measured length is rounded to the configured precision; the stored
    /// length is compared as-is, so a fractional length entered at a coarser
    /// precision is flagged. Sets `is_consistent` on each segment. Under [`ConsistencyPolicy::Resync`]
    /// the stored length and angle are then overwritten with the measured
    /// values; under [`ConsistencyPolicy::Retain`] they are left alone.
    /// Labels are skipped.
    pub fn check_consistency(&mut self, config: &EngineConfig) {
        for element in self.elements.iter_mut().filter(|e| !e.kind.is_label()) {
            let measured = element.measured_length(config);
            element.is_consistent = (measured - element.length).abs() < LENGTH_EPSILON;
            if config.consistency == ConsistencyPolicy::Resync {
                element.measure(config);
            }
        }
    }
}
