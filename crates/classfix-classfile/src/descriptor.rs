use std::fmt;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            b'Z' => PrimitiveType::Boolean,
            b'B' => PrimitiveType::Byte,
            b'C' => PrimitiveType::Char,
            b'S' => PrimitiveType::Short,
            b'I' => PrimitiveType::Int,
            b'J' => PrimitiveType::Long,
            b'F' => PrimitiveType::Float,
            b'D' => PrimitiveType::Double,
            _ => return None,
        })
    }

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A primitive or reference type as written in a descriptor. Reference types
/// carry the JVM internal name (`java/lang/String`); equality is exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Primitive(PrimitiveType),
    Object(String),
    Array(Box<TypeRef>),
}

impl TypeRef {
    pub fn object(internal_name: impl Into<String>) -> Self {
        TypeRef::Object(internal_name.into())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => write!(f, "{p}"),
            TypeRef::Object(name) => f.write_str(name),
            TypeRef::Array(component) => write!(f, "{component}[]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    Void,
    Type(TypeRef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub params: Vec<TypeRef>,
    pub return_type: ReturnType,
}

pub fn parse_field_descriptor(desc: &str) -> Result<TypeRef> {
    let mut cursor = Cursor::new(desc);
    let ty = cursor.field_type()?;
    cursor.finish()?;
    Ok(ty)
}

pub fn parse_method_descriptor(desc: &str) -> Result<MethodDescriptor> {
    let mut cursor = Cursor::new(desc);
    cursor.expect(b'(')?;
    let mut params = Vec::new();
    while !cursor.eat(b')') {
        params.push(cursor.field_type()?);
    }
    let return_type = if cursor.eat(b'V') {
        ReturnType::Void
    } else {
        ReturnType::Type(cursor.field_type()?)
    };
    cursor.finish()?;
    Ok(MethodDescriptor {
        params,
        return_type,
    })
}

/// Parameter types of a method descriptor, in declaration order.
pub fn argument_types(desc: &str) -> Result<Vec<TypeRef>> {
    Ok(parse_method_descriptor(desc)?.params)
}

struct Cursor<'a> {
    desc: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(desc: &'a str) -> Self {
        Cursor { desc, pos: 0 }
    }

    fn invalid<T>(&self) -> Result<T> {
        Err(Error::InvalidDescriptor(self.desc.to_string()))
    }

    fn peek(&self) -> Option<u8> {
        self.desc.as_bytes().get(self.pos).copied()
    }

    fn eat(&mut self, tag: u8) -> bool {
        if self.peek() == Some(tag) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tag: u8) -> Result<()> {
        if self.eat(tag) {
            Ok(())
        } else {
            self.invalid()
        }
    }

    fn finish(&self) -> Result<()> {
        if self.pos == self.desc.len() {
            Ok(())
        } else {
            self.invalid()
        }
    }

    fn field_type(&mut self) -> Result<TypeRef> {
        let Some(tag) = self.peek() else {
            return self.invalid();
        };
        self.pos += 1;
        if let Some(prim) = PrimitiveType::from_tag(tag) {
            return Ok(TypeRef::Primitive(prim));
        }
        match tag {
            b'L' => {
                let rest = &self.desc[self.pos..];
                let Some(end) = rest.find(';') else {
                    return self.invalid();
                };
                if end == 0 {
                    return self.invalid();
                }
                let name = rest[..end].to_string();
                self.pos += end + 1;
                Ok(TypeRef::Object(name))
            }
            b'[' => Ok(TypeRef::Array(Box::new(self.field_type()?))),
            _ => self.invalid(),
        }
    }
}
