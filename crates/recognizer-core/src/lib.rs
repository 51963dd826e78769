//! Extrusion, outward-normal and cap tessellation engine for the Recognizer
//! model.
//!
//! A host builds a [`scene::SceneState`] each redraw and hands it to
//! [`render::render_frame`] together with a [`catalog::Catalog`]; what comes
//! back is an ordered list of [`draw::DrawCommand`]s for whatever graphics
//! backend the host drives.

pub mod catalog;
pub mod draw;
pub mod error;
pub mod extrude;
pub mod face;
pub mod geom;
pub mod lighting;
pub mod normal;
pub mod render;
pub mod report;
pub mod scene;
pub mod tessellate;
