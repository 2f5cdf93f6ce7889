//! Declaration model interface
//!
//! The planner never builds classes itself: a program introspector supplies them
//! through this trait. Member flattening and assignability have default
//! implementations expressed in terms of [`DeclarationModel::class`].

use crate::{
    annotation::names,
    types::{ClassElement, ElementQuery, FieldElement, MethodElement, TypeRef},
};
use std::collections::{HashSet, VecDeque};

/// Widening conversions between primitive types
const PRIMITIVE_WIDENING: &[(&str, &[&str])] = &[
    ("byte", &["short", "int", "long", "float", "double"]),
    ("short", &["int", "long", "float", "double"]),
    ("char", &["int", "long", "float", "double"]),
    ("int", &["long", "float", "double"]),
    ("long", &["float", "double"]),
    ("float", &["double"]),
];

/// Read-only access to the classes of one compilation
pub trait DeclarationModel: Send + Sync {
    /// Resolve a class by qualified name
    fn class(&self, name: &str) -> Option<&ClassElement>;

    /// Every class of the compilation, in a stable order
    fn classes(&self) -> Vec<&ClassElement>;

    /// Can a value of `source` be passed where `target` is expected
    fn is_assignable(&self, source: &TypeRef, target: &str) -> bool {
        let source_name = source.name();
        if source_name == target {
            return true;
        }
        if source.is_primitive() {
            return PRIMITIVE_WIDENING
                .iter()
                .find(|(from, _)| *from == source_name)
                .is_some_and(|(_, to)| to.contains(&target));
        }
        if target == names::OBJECT {
            return true;
        }
        super_type_closure(self, source_name).contains(target)
    }

    /// Methods of `class` matching `query`. Inherited methods are included unless the query
    /// is declared-only; an override in a subtype hides the inherited declaration.
    fn enclosed_methods(&self, class: &ClassElement, query: &ElementQuery) -> Vec<MethodElement> {
        let mut seen = HashSet::new();
        let mut methods = Vec::new();
        for owner in hierarchy_of(self, class, query.is_only_declared()) {
            for method in &owner.methods {
                if seen.insert(method.signature()) {
                    methods.push(method.clone());
                }
            }
        }
        methods.retain(|m| query.matches_method(m));
        methods
    }

    fn enclosed_fields(&self, class: &ClassElement, query: &ElementQuery) -> Vec<FieldElement> {
        let mut seen = HashSet::new();
        let mut fields = Vec::new();
        for owner in hierarchy_of(self, class, query.is_only_declared()) {
            for field in &owner.fields {
                if seen.insert(field.name.clone()) {
                    fields.push(field.clone());
                }
            }
        }
        fields.retain(|f| query.matches_field(f));
        fields
    }

    fn enclosed_method(&self, class: &ClassElement, query: &ElementQuery) -> Option<MethodElement> {
        self.enclosed_methods(class, query).into_iter().next()
    }

    fn enclosed_field(&self, class: &ClassElement, query: &ElementQuery) -> Option<FieldElement> {
        self.enclosed_fields(class, query).into_iter().next()
    }
}

/// `class` followed by its resolvable super types, breadth first
fn hierarchy_of<'a, M: DeclarationModel + ?Sized>(
    model: &'a M,
    class: &'a ClassElement,
    only_declared: bool,
) -> Vec<&'a ClassElement> {
    let mut owners = vec![class];
    if only_declared {
        return owners;
    }
    let mut visited: HashSet<&str> = HashSet::from([class.name.as_str()]);
    let mut queue: VecDeque<&str> = class.super_types.iter().map(String::as_str).collect();
    while let Some(name) = queue.pop_front() {
        if !visited.insert(name) {
            continue;
        }
        if let Some(super_class) = model.class(name) {
            owners.push(super_class);
            queue.extend(super_class.super_types.iter().map(String::as_str));
        }
    }
    owners
}

/// Names of every transitive super type of `name`, resolvable or not
fn super_type_closure<M: DeclarationModel + ?Sized>(model: &M, name: &str) -> HashSet<String> {
    let mut closure = HashSet::new();
    let mut queue = VecDeque::from([name.to_string()]);
    while let Some(current) = queue.pop_front() {
        if let Some(class) = model.class(&current) {
            for super_type in &class.super_types {
                if closure.insert(super_type.clone()) {
                    queue.push_back(super_type.clone());
                }
            }
        }
    }
    closure
}
