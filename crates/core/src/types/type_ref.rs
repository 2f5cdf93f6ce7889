use crate::annotation::names;
use serde::{Deserialize, Serialize};
use std::fmt;

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "short", "char", "int", "long", "float", "double", "void",
];

/// Reference to a type as written in a declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    Concrete {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<TypeRef>,
    },
    /// An unresolved type variable such as `T`
    Placeholder {
        variable: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bound: Option<Box<TypeRef>>,
    },
}

impl TypeRef {
    pub fn concrete(name: impl Into<String>) -> Self {
        TypeRef::Concrete {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Concrete {
            name: name.into(),
            args,
        }
    }

    pub fn placeholder(variable: impl Into<String>) -> Self {
        TypeRef::Placeholder {
            variable: variable.into(),
            bound: None,
        }
    }

    pub fn bounded(variable: impl Into<String>, bound: TypeRef) -> Self {
        TypeRef::Placeholder {
            variable: variable.into(),
            bound: Some(Box::new(bound)),
        }
    }

    pub fn void() -> Self {
        TypeRef::concrete("void")
    }

    /// Name used for assignability checks; a type variable answers with its bound
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Concrete { name, .. } => name,
            TypeRef::Placeholder { bound: Some(bound), .. } => bound.name(),
            TypeRef::Placeholder { bound: None, .. } => names::OBJECT,
        }
    }

    /// Runtime class name after generic erasure
    pub fn erased_name(&self) -> String {
        self.name().to_string()
    }

    pub fn placeholder_variable(&self) -> Option<&str> {
        match self {
            TypeRef::Placeholder { variable, .. } => Some(variable),
            TypeRef::Concrete { .. } => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Concrete { name, .. } if PRIMITIVES.contains(&name.as_str()))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Concrete { name, args } if args.is_empty() => write!(f, "{name}"),
            TypeRef::Concrete { name, args } => {
                let args = args.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "{name}<{}>", args.join(", "))
            }
            TypeRef::Placeholder { variable, .. } => write!(f, "{variable}"),
        }
    }
}
