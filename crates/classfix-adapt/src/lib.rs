#![forbid(unsafe_code)]

mod diag;
mod param_annotations;
mod pipeline;
mod read_marker;

pub use crate::diag::{Diagnostic, Diagnostics, Severity, Visibility};
pub use crate::param_annotations::ParameterAnnotationFixer;
pub use crate::pipeline::{ClassAdapter, Pipeline, PipelineOptions};
pub use crate::read_marker::{ReadMarker, DEFAULT_MARKER_FIELD};
