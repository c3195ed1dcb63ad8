// Thu Oct 15 2026 - Alex

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedValue {
    Unsigned(u64),
    Text(String),
    /// A composite whose value lives entirely in its children.
    Empty,
}

impl ExtractedValue {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ExtractedValue::Unsigned(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ExtractedValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ExtractedValue::Empty)
    }
}

impl fmt::Display for ExtractedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractedValue::Unsigned(value) => write!(f, "0x{:x}", value),
            ExtractedValue::Text(text) => write!(f, "{:?}", text),
            ExtractedValue::Empty => write!(f, "<empty>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionNode {
    pub name: String,
    pub value: ExtractedValue,
    pub children: Vec<ExtractionNode>,
}

impl ExtractionNode {
    pub fn new(name: &str, value: ExtractedValue) -> Self {
        Self {
            name: name.to_string(),
            value,
            children: Vec::new(),
        }
    }

    pub fn composite(name: &str, children: Vec<ExtractionNode>) -> Self {
        Self {
            name: name.to_string(),
            value: ExtractedValue::Empty,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Leaf values in depth-first order, named by their dotted path from this node.
    pub fn leaves(&self) -> Vec<(String, &ExtractedValue)> {
        let mut leaves = Vec::new();
        self.collect_leaves(&self.name, &mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, path: &str, leaves: &mut Vec<(String, &'a ExtractedValue)>) {
        if self.is_leaf() {
            if !self.value.is_empty() {
                leaves.push((path.to_string(), &self.value));
            }
            return;
        }
        for child in &self.children {
            child.collect_leaves(&format!("{}.{}", path, child.name), leaves);
        }
    }
}
