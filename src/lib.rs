//! Editor core for a vector drawing canvas.
//!
//! This crate owns everything about a drawing that does not depend on a
//! display: the shape model, per-kind geometry and hit-testing, paint order,
//! selection, the pan/zoom camera, and the pointer pipeline that turns device
//! events into edits. A host renders the paint-ordered
//! [`render::RenderDescription`] list and forwards pointer and wheel events to
//! [`editor::Editor`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Top-level editor: mutations, derived views, observers, pointer pipeline |
//! | [`doc`] | In-memory shape collection |
//! | [`shape`] | Shape, page and patch types |
//! | [`shapes`] | Per-kind capabilities and the registry that dispatches to them |
//! | [`geom`] | Points, vectors, boxes and path math |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`hit`] | Topmost-shape hit-testing |
//! | [`input`] | Tools, modifiers and instance UI state |
//! | [`order`] | Fractional paint-order keys |
//! | [`render`] | Render descriptions handed to the host |
//! | [`metrics`] | Text measurement seam |
//! | [`store`] | Optional persistence seam and in-memory store |
//! | [`config`] | Editor configuration from the environment |
//! | [`consts`] | Shared numeric constants (zoom limits, hit margins, text sizing) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod editor;
pub mod geom;
pub mod hit;
pub mod input;
pub mod metrics;
pub mod order;
pub mod render;
pub mod shape;
pub mod shapes;
pub mod store;

pub use editor::{Editor, EditorError, Placement};
