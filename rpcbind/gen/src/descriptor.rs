//! Resolved type descriptors.
//!
//! A [`TypeDescriptor`] is the generator's target-language-neutral view of a
//! schema node: a terminal [`TypeKind`] wrapped in `depth` levels of array.
//! Its [`Display`](std::fmt::Display) form is the single canonical textual
//! form, e.g. `[][]integer` or `ref User`.

use std::fmt;

use crate::naming::{exported_name, field_ident};

/// Native scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Integer,
    String,
    Number,
    /// The `{integer, string}` disjunction.
    IntOrString,
}

impl Primitive {
    /// Maps a schema `type` name to a primitive.
    pub fn from_schema(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(Self::Boolean),
            "integer" => Some(Self::Integer),
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            _ => None,
        }
    }

    pub fn schema_name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Number => "number",
            Self::IntOrString => "integer|string",
        }
    }
}

/// The terminal (non-array) kind of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Primitive(Primitive),
    /// Object with declared properties, in declaration order.
    InlineStruct(Vec<FieldDescriptor>),
    /// A canonical, hand-authored type.
    NamedRef(String),
    /// Object keyed by numeric strings (`patternProperties: {"^[0-9]+$": ..}`).
    KeyedMap(Box<TypeDescriptor>),
    /// Explicit object with no statically known shape.
    Dynamic,
    /// Placeholder for a shape that could not be resolved. Carries the
    /// original reference or a note describing the shape.
    Unresolved(String),
}

/// A resolved type: `depth` array levels around `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub depth: usize,
    pub kind: TypeKind,
}

impl TypeDescriptor {
    pub fn new(kind: TypeKind) -> Self {
        Self { depth: 0, kind }
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(TypeKind::Primitive(primitive))
    }

    pub fn named(canonical: impl Into<String>) -> Self {
        Self::new(TypeKind::NamedRef(canonical.into()))
    }

    pub fn unresolved(note: impl Into<String>) -> Self {
        Self::new(TypeKind::Unresolved(note.into()))
    }

    /// Adds `levels` array levels.
    ///
    /// ## Examples
    ///
    /// ```
    /// use rpcbind_gen::descriptor::{Primitive, TypeDescriptor};
    ///
    /// let ids = TypeDescriptor::primitive(Primitive::Integer).wrap(2);
    /// assert_eq!(ids.depth, 2);
    /// assert_eq!(ids.to_string(), "[][]integer");
    /// assert_eq!(ids.element(), TypeDescriptor::primitive(Primitive::Integer));
    /// ```
    pub fn wrap(mut self, levels: usize) -> Self {
        self.depth += levels;
        self
    }

    /// The terminal kind without array levels.
    pub fn element(&self) -> TypeDescriptor {
        TypeDescriptor::new(self.kind.clone())
    }

    pub fn is_array(&self) -> bool {
        self.depth > 0
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self.kind {
            TypeKind::Primitive(p) if self.depth == 0 => Some(p),
            _ => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self.kind, TypeKind::Unresolved(_))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            f.write_str("[]")?;
        }
        fmt::Display::fmt(&self.kind, f)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.schema_name()),
            Self::InlineStruct(fields) => {
                f.write_str("struct {")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(";")?;
                    }
                    if field.embedded {
                        write!(f, " ..{}", field.ty)?;
                    } else {
                        write!(f, " {}: {}", field.schema_name, field.ty)?;
                    }
                }
                f.write_str(" }")
            }
            Self::NamedRef(name) => write!(f, "ref {}", name),
            Self::KeyedMap(value) => write!(f, "map<{}>", value),
            Self::Dynamic => f.write_str("dynamic"),
            Self::Unresolved(note) => write!(f, "unresolved({})", note),
        }
    }
}

/// One field of an inline struct or parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Raw schema name; the wire key.
    pub schema_name: String,
    /// Exported identifier from the field namer.
    pub exported_name: String,
    /// snake_case Rust field identifier.
    pub ident: String,
    pub ty: TypeDescriptor,
    pub required: bool,
    pub description: Option<String>,
    /// Fields of an `allOf` member that resolved to a named type are
    /// embedded rather than copied.
    pub embedded: bool,
}

impl FieldDescriptor {
    pub fn new(schema_name: impl Into<String>, ty: TypeDescriptor) -> Self {
        let schema_name = schema_name.into();
        Self {
            exported_name: exported_name(&schema_name),
            ident: field_ident(&schema_name),
            schema_name,
            ty,
            required: false,
            description: None,
            embedded: false,
        }
    }

    /// A named type embedded whole into the enclosing struct.
    pub fn embedded(canonical: &str) -> Self {
        Self {
            embedded: true,
            required: true,
            ..Self::new(canonical, TypeDescriptor::named(canonical))
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

/// Result of resolving one schema node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub ty: TypeDescriptor,
    /// Innermost non-empty description along the resolution chain.
    pub description: Option<String>,
}

impl Resolved {
    pub fn new(ty: TypeDescriptor, description: Option<String>) -> Self {
        Self { ty, description }
    }
}
