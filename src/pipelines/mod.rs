//! Render pipelines and the uniform state feeding them.
//!
//! - `basic` builds the scene pipeline and its bind group layouts
//! - `uniforms` holds the named-uniform interface and the `Pod` blocks behind it

pub mod basic;
pub mod uniforms;
