use serde::Serialize;

/// Which of the two parameter-annotation attributes an event refers to. The
/// two are corrected independently; one attribute's shape implies nothing
/// about the other's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Visible,
    Invisible,
}

impl Visibility {
    pub fn attribute_name(self) -> &'static str {
        match self {
            Visibility::Visible => "RuntimeVisibleParameterAnnotations",
            Visibility::Invisible => "RuntimeInvisibleParameterAnnotations",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Trace,
    Info,
    Warning,
}

/// One structured observation from a pass. Events carry their data rather
/// than preformatted text; the driver decides rendering and verbosity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Leading entries for implicit constructor parameters were removed from
    /// a parameter-annotation table.
    SyntheticEntriesTrimmed {
        class: String,
        method: String,
        descriptor: String,
        table: Visibility,
        removed: usize,
    },
    /// The table's length already excludes the implicit parameters.
    TableAlreadyAligned {
        class: String,
        method: String,
        descriptor: String,
        table: Visibility,
    },
    /// The constructor carries no table for this attribute.
    TableAbsent {
        class: String,
        method: String,
        descriptor: String,
        table: Visibility,
    },
    /// The table's length matches neither the defective nor the corrected
    /// shape. Left untouched.
    UnexpectedTableLength {
        class: String,
        method: String,
        descriptor: String,
        table: Visibility,
        declared_params: usize,
        implicit_params: usize,
        found: usize,
    },
    /// The declared parameters do not start with the implicit types the
    /// class's shape calls for. Left untouched.
    ImplicitParamsMissing {
        class: String,
        method: String,
        descriptor: String,
        expected: Vec<String>,
    },
    /// The constructor's descriptor did not parse.
    MalformedDescriptor {
        class: String,
        method: String,
        descriptor: String,
    },
    /// A marker field was observed; `value` is its `ConstantValue`, when one
    /// is attached.
    MarkerField {
        class: String,
        field: String,
        value: Option<String>,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::SyntheticEntriesTrimmed { .. }
            | Diagnostic::TableAlreadyAligned { .. }
            | Diagnostic::MarkerField { .. } => Severity::Info,
            Diagnostic::TableAbsent { .. } => Severity::Trace,
            Diagnostic::UnexpectedTableLength { .. }
            | Diagnostic::ImplicitParamsMissing { .. }
            | Diagnostic::MalformedDescriptor { .. } => Severity::Warning,
        }
    }

    pub fn class(&self) -> &str {
        match self {
            Diagnostic::SyntheticEntriesTrimmed { class, .. }
            | Diagnostic::TableAlreadyAligned { class, .. }
            | Diagnostic::TableAbsent { class, .. }
            | Diagnostic::UnexpectedTableLength { class, .. }
            | Diagnostic::ImplicitParamsMissing { class, .. }
            | Diagnostic::MalformedDescriptor { class, .. }
            | Diagnostic::MarkerField { class, .. } => class,
        }
    }
}

/// Per-run event collector. Warnings are non-fatal by policy: pushing never
/// interrupts a pass, and the driver inspects the result afterwards.
#[derive(Debug, Default)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Diagnostic) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.events
            .iter()
            .filter(|event| event.severity() == Severity::Warning)
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    pub fn merge(&mut self, other: Diagnostics) {
        self.events.extend(other.events);
    }

    pub fn into_events(self) -> Vec<Diagnostic> {
        self.events
    }
}
