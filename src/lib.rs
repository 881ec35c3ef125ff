//! Floor-plan drawing engine for the real-estate agent workspace.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of a floor plan: turning pointer and keyboard events into
//! walls, doors, windows, and labels; snapping strokes onto existing geometry;
//! keeping each segment's stated length and angle in step with its endpoints;
//! linear undo/redo; and drawing or exporting the plan. The host JavaScript
//! layer only wires DOM events and the property panel to the engine.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Element types, the ordered store, and the consistency pass |
//! | [`tags`] | Ascending letter tags and the pool of tags in use |
//! | [`history`] | Undoable commands and the undo/redo stacks |
//! | [`snap`] | Endpoint, angle, and axis snapping plus guide lines |
//! | [`camera`] | Points, angle math, and zoom |
//! | [`input`] | Tools, modifiers, the gesture state machine, and host seams |
//! | [`hit`] | Hit-testing of tag bubbles and label anchors |
//! | [`render`] | Live-view and export drawing |
//! | [`export`] | Export formats, file names, and stroke styles |
//! | [`plans`] | In-memory library of saved floor plans |
//! | [`config`] | Tolerances, precision, and consistency policy |
//! | [`consts`] | Shared numeric constants (snap tolerance, zoom limits, etc.) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod export;
pub mod hit;
pub mod history;
pub mod input;
pub mod plans;
pub mod render;
pub mod snap;
pub mod tags;
