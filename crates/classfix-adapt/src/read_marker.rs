use classfix_classfile::ClassFile;

use crate::diag::{Diagnostic, Diagnostics};
use crate::pipeline::ClassAdapter;

/// Field name obfuscation toolchains leave behind to tag a class with its
/// mapping id.
pub const DEFAULT_MARKER_FIELD: &str = "__OBFID";

/// Reports the value of a well-known marker field when a class declares one.
/// Observation only; nothing is mutated.
#[derive(Debug, Clone)]
pub struct ReadMarker {
    field_name: String,
}

impl ReadMarker {
    pub fn new() -> Self {
        Self::with_field(DEFAULT_MARKER_FIELD)
    }

    pub fn with_field(field_name: impl Into<String>) -> Self {
        ReadMarker {
            field_name: field_name.into(),
        }
    }
}

impl Default for ReadMarker {
    fn default() -> Self {
        ReadMarker::new()
    }
}

impl ClassAdapter for ReadMarker {
    fn name(&self) -> &'static str {
        "read-marker"
    }

    fn adapt(&self, class: &mut ClassFile, diags: &mut Diagnostics) {
        for field in &class.fields {
            if field.name != self.field_name {
                continue;
            }
            let value = field.constant_value.as_ref().map(ToString::to_string);
            tracing::info!(
                target = "classfix.adapt",
                class = %class.name,
                field = %field.name,
                value = value.as_deref().unwrap_or("<no constant>"),
                "marker field"
            );
            diags.push(Diagnostic::MarkerField {
                class: class.name.clone(),
                field: field.name.clone(),
                value,
            });
        }
    }
}
