use classfix_classfile::{argument_types, Annotation, ClassFile, Method, PrimitiveType, TypeRef};

use crate::diag::{Diagnostic, Diagnostics, Visibility};
use crate::pipeline::ClassAdapter;

const JAVA_LANG_STRING: &str = "java/lang/String";

/// Realigns `RuntimeVisibleParameterAnnotations` and
/// `RuntimeInvisibleParameterAnnotations` on constructors compiled with
/// implicit leading parameters: the enclosing instance of a non-static inner
/// class, or the name/ordinal pair every enum constructor receives.
///
/// Compilers disagree on whether those parameters get table entries.
/// Consumers that index the tables by source parameter position need the
/// entries gone, so a table counting one entry per compiled parameter loses
/// its leading entries. Any other mismatch is reported and left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterAnnotationFixer;

impl ClassAdapter for ParameterAnnotationFixer {
    fn name(&self) -> &'static str {
        "parameter-annotations"
    }

    fn adapt(&self, class: &mut ClassFile, diags: &mut Diagnostics) {
        let Some(implicit) = implicit_ctor_params(class) else {
            return;
        };
        let class_name = class.name.clone();
        for method in &mut class.methods {
            if method.is_constructor() {
                rectify_constructor(&class_name, method, &implicit, diags);
            }
        }
    }
}

/// The implicit leading parameter types a constructor of `class` is compiled
/// with, or `None` when no adjustment applies.
///
/// Enum constructors always take the constant's name and ordinal, nested or
/// not. A non-static inner class takes its enclosing instance, but only when
/// it is a named member: anonymous and local classes capture in a
/// compiler-dependent shape and are deliberately left alone.
fn implicit_ctor_params(class: &ClassFile) -> Option<Vec<TypeRef>> {
    if class.is_enum() {
        tracing::trace!(
            target = "classfix.adapt",
            class = %class.name,
            "enum, constructors take an implicit name/ordinal pair"
        );
        return Some(vec![
            TypeRef::object(JAVA_LANG_STRING),
            TypeRef::Primitive(PrimitiveType::Int),
        ]);
    }

    let Some(info) = class.self_inner_info() else {
        tracing::trace!(
            target = "classfix.adapt",
            class = %class.name,
            "not a nested class, constructors take no implicit parameters"
        );
        return None;
    };
    if info.is_static() || info.is_interface() {
        tracing::trace!(
            target = "classfix.adapt",
            class = %class.name,
            access_flags = info.access_flags,
            "static or interface nested type, constructors take no enclosing instance"
        );
        return None;
    }
    if info.is_anonymous() {
        tracing::trace!(
            target = "classfix.adapt",
            class = %class.name,
            "anonymous class, capture shape not modeled"
        );
        return None;
    }
    let Some(outer) = info.outer_class.as_deref() else {
        tracing::trace!(
            target = "classfix.adapt",
            class = %class.name,
            "local class without an enclosing record, capture shape not modeled"
        );
        return None;
    };
    tracing::trace!(
        target = "classfix.adapt",
        class = %class.name,
        outer = %outer,
        "inner class, constructors take an implicit enclosing instance"
    );
    Some(vec![TypeRef::object(outer)])
}

struct CtorRef<'a> {
    class: &'a str,
    name: &'a str,
    descriptor: &'a str,
}

fn rectify_constructor(
    class: &str,
    method: &mut Method,
    implicit: &[TypeRef],
    diags: &mut Diagnostics,
) {
    let params = match argument_types(&method.descriptor) {
        Ok(params) => params,
        Err(err) => {
            tracing::warn!(
                target = "classfix.adapt",
                class = %class,
                method = %method.name,
                descriptor = %method.descriptor,
                error = %err,
                "constructor descriptor did not parse, leaving annotations untouched"
            );
            diags.push(Diagnostic::MalformedDescriptor {
                class: class.to_string(),
                method: method.name.clone(),
                descriptor: method.descriptor.clone(),
            });
            return;
        }
    };

    if params.len() < implicit.len() || params[..implicit.len()] != *implicit {
        let expected: Vec<String> = implicit.iter().map(ToString::to_string).collect();
        tracing::warn!(
            target = "classfix.adapt",
            class = %class,
            method = %method.name,
            descriptor = %method.descriptor,
            expected = ?expected,
            "constructor does not start with the expected implicit parameters"
        );
        diags.push(Diagnostic::ImplicitParamsMissing {
            class: class.to_string(),
            method: method.name.clone(),
            descriptor: method.descriptor.clone(),
            expected,
        });
        return;
    }

    let ctor = CtorRef {
        class,
        name: &method.name,
        descriptor: &method.descriptor,
    };
    rectify_table(
        &ctor,
        Visibility::Visible,
        &mut method.visible_parameter_annotations,
        params.len(),
        implicit.len(),
        diags,
    );
    rectify_table(
        &ctor,
        Visibility::Invisible,
        &mut method.invisible_parameter_annotations,
        params.len(),
        implicit.len(),
        diags,
    );
}

fn rectify_table(
    ctor: &CtorRef<'_>,
    table: Visibility,
    entries: &mut Option<Vec<Vec<Annotation>>>,
    declared: usize,
    implicit: usize,
    diags: &mut Diagnostics,
) {
    let Some(sets) = entries.as_mut() else {
        tracing::trace!(
            target = "classfix.adapt",
            class = %ctor.class,
            method = %ctor.name,
            descriptor = %ctor.descriptor,
            attribute = table.attribute_name(),
            "no table present"
        );
        diags.push(Diagnostic::TableAbsent {
            class: ctor.class.to_string(),
            method: ctor.name.to_string(),
            descriptor: ctor.descriptor.to_string(),
            table,
        });
        return;
    };

    let found = sets.len();
    if found == declared {
        sets.drain(..implicit);
        tracing::info!(
            target = "classfix.adapt",
            class = %ctor.class,
            method = %ctor.name,
            descriptor = %ctor.descriptor,
            attribute = table.attribute_name(),
            removed = implicit,
            "removed entries for implicit constructor parameters"
        );
        diags.push(Diagnostic::SyntheticEntriesTrimmed {
            class: ctor.class.to_string(),
            method: ctor.name.to_string(),
            descriptor: ctor.descriptor.to_string(),
            table,
            removed: implicit,
        });
    } else if found == declared - implicit {
        tracing::info!(
            target = "classfix.adapt",
            class = %ctor.class,
            method = %ctor.name,
            descriptor = %ctor.descriptor,
            attribute = table.attribute_name(),
            "table already excludes implicit parameters"
        );
        diags.push(Diagnostic::TableAlreadyAligned {
            class: ctor.class.to_string(),
            method: ctor.name.to_string(),
            descriptor: ctor.descriptor.to_string(),
            table,
        });
    } else {
        tracing::warn!(
            target = "classfix.adapt",
            class = %ctor.class,
            method = %ctor.name,
            descriptor = %ctor.descriptor,
            attribute = table.attribute_name(),
            declared,
            implicit,
            found,
            "unexpected parameter-annotation count, leaving table untouched"
        );
        diags.push(Diagnostic::UnexpectedTableLength {
            class: ctor.class.to_string(),
            method: ctor.name.to_string(),
            descriptor: ctor.descriptor.to_string(),
            table,
            declared_params: declared,
            implicit_params: implicit,
            found,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classfix_classfile::{access::*, InnerClassInfo};
    use pretty_assertions::assert_eq;

    fn class(name: &str, access_flags: u16, inner_classes: Vec<InnerClassInfo>) -> ClassFile {
        ClassFile {
            minor_version: 0,
            major_version: 52,
            access_flags,
            name: name.to_string(),
            super_class: Some("java/lang/Object".to_string()),
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            inner_classes,
        }
    }

    fn self_record(name: &str, outer: Option<&str>, simple: Option<&str>, flags: u16) -> InnerClassInfo {
        InnerClassInfo {
            inner_class: name.to_string(),
            outer_class: outer.map(str::to_string),
            inner_name: simple.map(str::to_string),
            access_flags: flags,
        }
    }

    #[test]
    fn enums_expect_name_and_ordinal() {
        let cls = class("a/Color", ACC_PUBLIC | ACC_FINAL | ACC_ENUM, Vec::new());
        assert_eq!(
            implicit_ctor_params(&cls),
            Some(vec![
                TypeRef::object("java/lang/String"),
                TypeRef::Primitive(PrimitiveType::Int),
            ])
        );
    }

    #[test]
    fn nested_enums_still_expect_name_and_ordinal() {
        let records = vec![self_record("a/Outer$Kind", Some("a/Outer"), Some("Kind"), ACC_STATIC | ACC_ENUM)];
        let cls = class("a/Outer$Kind", ACC_ENUM, records);
        assert_eq!(implicit_ctor_params(&cls).map(|p| p.len()), Some(2));
    }

    #[test]
    fn inner_classes_expect_the_enclosing_instance() {
        let records = vec![self_record("a/Outer$Inner", Some("a/Outer"), Some("Inner"), 0)];
        let cls = class("a/Outer$Inner", 0, records);
        assert_eq!(
            implicit_ctor_params(&cls),
            Some(vec![TypeRef::object("a/Outer")])
        );
    }

    #[test]
    fn top_level_classes_expect_nothing() {
        assert_eq!(implicit_ctor_params(&class("a/Top", ACC_PUBLIC, Vec::new())), None);
    }

    #[test]
    fn static_nested_classes_expect_nothing() {
        let records = vec![self_record("a/Outer$Nested", Some("a/Outer"), Some("Nested"), ACC_STATIC)];
        assert_eq!(implicit_ctor_params(&class("a/Outer$Nested", 0, records)), None);
    }

    #[test]
    fn nested_interfaces_expect_nothing() {
        let records = vec![self_record("a/Outer$Api", Some("a/Outer"), Some("Api"), ACC_INTERFACE | ACC_ABSTRACT)];
        assert_eq!(
            implicit_ctor_params(&class("a/Outer$Api", ACC_INTERFACE | ACC_ABSTRACT, records)),
            None
        );
    }

    #[test]
    fn anonymous_classes_expect_nothing() {
        let records = vec![self_record("a/Outer$1", None, None, 0)];
        assert_eq!(implicit_ctor_params(&class("a/Outer$1", 0, records)), None);
    }

    #[test]
    fn local_classes_expect_nothing() {
        // Local classes keep their simple name but have no enclosing record.
        let records = vec![self_record("a/Outer$1Local", None, Some("Local"), 0)];
        assert_eq!(implicit_ctor_params(&class("a/Outer$1Local", 0, records)), None);
    }

    #[test]
    fn records_describing_other_classes_are_ignored() {
        let records = vec![self_record("a/Outer$Other", Some("a/Outer"), Some("Other"), 0)];
        assert_eq!(implicit_ctor_params(&class("a/Outer$Inner", 0, records)), None);
    }
}
