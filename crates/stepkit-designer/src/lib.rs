//! # StepKit Designer
//!
//! This crate is the layout engine behind the StepKit poster editor. It decides
//! where objects land while the user drags them: free objects snap to the
//! canvas grid, icons dropped over a step snap into that step's internal grid,
//! and steps push their neighbours out of the way.
//!
//! ## Core Components
//!
//! - **Grid Math**: pixel <-> cell conversions for the canvas and for step grids
//! - **Collision**: cell occupancy inside steps and step push-away on the canvas
//! - **Object Store**: the authoritative object collection and its mutation API
//! - **Placement**: the drag state machine, including the expanded step view
//! - **Session**: the host-facing `EditorSession`
//! - **Catalog / Templates**: built-in icons, step presets and quick-create kits
//!
//! ## Architecture
//!
//! ```text
//! EditorSession
//!   ├── Placement (DragState)
//!   │     ├── Grid Math
//!   │     └── Collision
//!   └── ObjectStore (id map + draw order)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use stepkit_core::{Footprint, Point};
//! use stepkit_designer::EditorSession;
//!
//! let mut session = EditorSession::new();
//! let step = session.add_step(Footprint::new(4, 4));
//! let icon = session.add_icon("📷", "Camera", Footprint::ICON);
//!
//! // Grab the icon at its corner and drop it over the step
//! session.begin_drag(icon, Point::new(100.0, 200.0));
//! let frame = session.update_drag(Point::new(60.0, 160.0));
//! session.end_drag();
//!
//! assert!(frame.preview.is_some_and(|p| p.valid));
//! assert_eq!(session.objects().get(icon).unwrap().attached_step(), Some(step));
//! ```

pub mod catalog;
pub mod collision;
pub mod grid;
pub mod model;
pub mod object_store;
pub mod placement;
pub mod session;
pub mod templates;

pub use catalog::{IconCategory, IconEntry, StepPreset, PALETTE, STEP_PRESETS};
pub use collision::{CellProbe, Displacement, PushResolution, StepBox};
pub use grid::StepFrame;
pub use model::{
    Attachment, CanvasObject, FontWeight, IconAttrs, ObjectKind, ObjectTemplate, PropertyUpdate,
    StepAttrs, TextAttrs,
};
pub use object_store::{InvariantViolation, ObjectStore};
pub use placement::{DragKind, DragOutcome, DragPreview, DragState};
pub use session::{DragFrame, EditorSession};
pub use templates::QuickKit;
