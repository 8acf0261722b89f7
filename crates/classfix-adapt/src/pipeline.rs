use classfix_classfile::ClassFile;
use serde::Deserialize;

use crate::diag::Diagnostics;
use crate::param_annotations::ParameterAnnotationFixer;
use crate::read_marker::{ReadMarker, DEFAULT_MARKER_FIELD};

/// One independent per-class transformation. Passes mutate the class in
/// place and report through the diagnostics collector; no pass fails.
pub trait ClassAdapter: Send + Sync {
    fn name(&self) -> &'static str;
    fn adapt(&self, class: &mut ClassFile, diags: &mut Diagnostics);
}

/// Which passes a [`Pipeline`] installs. Deserializable so a driver can take
/// it straight from its configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineOptions {
    pub fix_parameter_annotations: bool,
    pub read_marker: bool,
    /// Field name the marker pass looks for.
    pub marker_field: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            fix_parameter_annotations: true,
            read_marker: true,
            marker_field: DEFAULT_MARKER_FIELD.to_string(),
        }
    }
}

/// A fixed sequence of adapters applied to one class at a time. Classes are
/// independent, so a driver may share one pipeline across threads; each run
/// touches only the class it is handed.
pub struct Pipeline {
    adapters: Vec<Box<dyn ClassAdapter>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline::with_options(&PipelineOptions::default())
    }

    pub fn with_options(options: &PipelineOptions) -> Self {
        let mut adapters: Vec<Box<dyn ClassAdapter>> = Vec::new();
        if options.fix_parameter_annotations {
            adapters.push(Box::new(ParameterAnnotationFixer));
        }
        if options.read_marker {
            adapters.push(Box::new(ReadMarker::with_field(options.marker_field.as_str())));
        }
        Pipeline { adapters }
    }

    pub fn adapter_names(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|adapter| adapter.name()).collect()
    }

    /// Applies every adapter to `class`, in installation order.
    pub fn run(&self, class: &mut ClassFile) -> Diagnostics {
        let mut diags = Diagnostics::new();
        for adapter in &self.adapters {
            tracing::debug!(
                target = "classfix.adapt",
                pass = adapter.name(),
                class = %class.name,
                "running pass"
            );
            adapter.adapt(class, &mut diags);
        }
        diags
    }

    /// Sequential convenience over a batch. Diagnostics are concatenated in
    /// class order.
    pub fn run_all(&self, classes: &mut [ClassFile]) -> Diagnostics {
        let mut diags = Diagnostics::new();
        for class in classes {
            diags.merge(self.run(class));
        }
        diags
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::new()
    }
}
