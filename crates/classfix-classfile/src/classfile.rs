use crate::access;
use crate::annotation::{Annotation, ConstValue};

/// In-memory form of one compiled class, as produced by a container parser.
#[derive(Debug, Clone)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub access_flags: u16,
    /// JVM internal name, e.g. `com/example/Outer$Inner`.
    pub name: String,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    /// `InnerClasses` records from this class's attribute table. The records
    /// may describe classes other than this one.
    pub inner_classes: Vec<InnerClassInfo>,
}

impl ClassFile {
    pub fn is_enum(&self) -> bool {
        self.access_flags & access::ACC_ENUM != 0
    }

    /// The `InnerClasses` record describing this class itself, if the class
    /// is a nested construct. Well-formed input carries at most one.
    pub fn self_inner_info(&self) -> Option<&InnerClassInfo> {
        self.inner_classes
            .iter()
            .find(|info| info.inner_class == self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClassInfo {
    pub inner_class: String,
    /// Absent for anonymous and local classes.
    pub outer_class: Option<String>,
    /// Source-level simple name; absence marks an anonymous class.
    pub inner_name: Option<String>,
    /// Flags of the nested type as declared at its use site. These can
    /// differ from the described class's own header flags, notably the
    /// static bit.
    pub access_flags: u16,
}

impl InnerClassInfo {
    pub fn is_static(&self) -> bool {
        self.access_flags & access::ACC_STATIC != 0
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags & access::ACC_INTERFACE != 0
    }

    pub fn is_anonymous(&self) -> bool {
        self.inner_name.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    /// `ConstantValue` attribute, when the field carries one.
    pub constant_value: Option<ConstValue>,
}

pub const CONSTRUCTOR_NAME: &str = "<init>";

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    /// `RuntimeVisibleParameterAnnotations`: one annotation set per counted
    /// parameter, or absent when the method has no such attribute.
    pub visible_parameter_annotations: Option<Vec<Vec<Annotation>>>,
    /// `RuntimeInvisibleParameterAnnotations`, same shape.
    pub invisible_parameter_annotations: Option<Vec<Vec<Annotation>>>,
}

impl Method {
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }
}
