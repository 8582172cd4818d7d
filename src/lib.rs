//! Room layout engine for the cabinet designer.
//!
//! Compiled to WebAssembly and run in the browser beside the designer's SVG
//! canvas. It turns raw pointer and touch input into snapped, collision-aware
//! element positions and wall edits. The engine keeps no copy of the room:
//! the host passes its element list, walls, and catalog into every call and
//! applies the [`engine::Action`]s that come back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`]: gestures to snapped actions |
//! | [`web`] | Browser wrapper around the SVG element and DOM events |
//! | [`gesture`] | Drag, pinch, double-tap, long-press, and wall-rotate state machine |
//! | [`snap`] | Snap priority chain, room clamp, and collision fallback |
//! | [`collision`] | Wall, cabinet, and door-clearance collision queries |
//! | [`walls`] | Boundary and custom wall registry |
//! | [`catalog`] | Per-type heights and mount data |
//! | [`model`] | Elements, walls, room dimensions, clearance zones |
//! | [`geom`] | Rectangles, segments, rotated bounds |
//! | [`transform`] | Screen-to-design conversion and pointer normalization |
//! | [`config`] | Tunable thresholds loaded from JSON |
//! | [`error`] | [`error::LayoutError`] |
//! | [`consts`] | Default distances, zoom limits, and timings |

pub mod catalog;
pub mod collision;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geom;
pub mod gesture;
pub mod model;
pub mod snap;
pub mod transform;
pub mod walls;
pub mod web;
