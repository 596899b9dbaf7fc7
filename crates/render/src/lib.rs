//! Turns a parsed [`quire_types::Report`] into drawing calls on a
//! [`quire_canvas::Canvas`].
//!
//! The [`Pipeline`] owns the canvas for the duration of one document. Each
//! section's elements are dispatched in declared order to the renderers in
//! [`elements`]; header and footer bands are drawn from the canvas page hooks
//! by a [`BandDecorator`].

pub mod bands;
pub mod context;
pub mod elements;
pub mod error;
pub mod pipeline;
pub mod style;

pub use bands::BandDecorator;
pub use context::RenderContext;
pub use elements::render_element;
pub use error::GenerationError;
pub use pipeline::{CREATOR, Pipeline, PipelineState};
pub use style::{DEFAULT_LINE_HEIGHT, StyleRegistry};
