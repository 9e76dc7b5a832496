use crate::location::SourceLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

/// A node in the parsed JSON tree. Objects keep their children in source
/// order with non-null labels; arrays keep children with absent labels;
/// scalars have no children. Immutable once built — the parser is the
/// only builder.
#[derive(Debug, Clone)]
pub struct JsonElement {
    pub kind: ElementKind,
    pub location: SourceLocation,
    pub label: Option<String>,
    pub children: Vec<JsonElement>,
    pub string_value: Option<String>,
    pub number_value: Option<f64>,
    pub boolean_value: Option<bool>,
}

impl JsonElement {
    /// First child whose label equals `name`, in source-insertion order.
    /// Absent for non-objects and for objects with no matching child.
    pub fn find_by_label(&self, name: &str) -> Option<&JsonElement> {
        if self.kind != ElementKind::Object {
            return None;
        }
        self.children
            .iter()
            .find(|child| child.label.as_deref() == Some(name))
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn children(&self) -> impl Iterator<Item = &JsonElement> {
        self.children.iter()
    }

    pub fn as_number(&self) -> Option<f64> {
        self.number_value
    }

    pub fn as_str(&self) -> Option<&str> {
        self.string_value.as_deref()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.boolean_value
    }
}
