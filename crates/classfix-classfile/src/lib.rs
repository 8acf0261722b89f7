#![forbid(unsafe_code)]

pub mod access;
mod annotation;
mod classfile;
mod descriptor;
mod error;

pub use crate::annotation::{Annotation, ConstValue, ElementValue};
pub use crate::classfile::{ClassFile, Field, InnerClassInfo, Method, CONSTRUCTOR_NAME};
pub use crate::descriptor::{argument_types, parse_field_descriptor, parse_method_descriptor};
pub use crate::descriptor::{MethodDescriptor, PrimitiveType, ReturnType, TypeRef};
pub use crate::error::{Error, Result};
