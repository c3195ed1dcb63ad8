// Thu Oct 15 2026 - Alex

use crate::schema::{lookup_alias, LeafKind, SchemaError};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterKind {
    Leaf(LeafKind),
    /// Pointer to a structure; each backing parameter is one field of it.
    Composite(Vec<ParameterSchema>),
}

/// Declarative description of one parameter or structure field.
///
/// A schema is either a primitive leaf decoded by its [`LeafKind`] or a
/// pointer to a composite described by its backing parameters. Widths are
/// restricted to 1, 2, 4 or 8 bytes and are used to mask raw reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSchema {
    name: String,
    kind: ParameterKind,
    width: u8,
}

impl ParameterSchema {
    /// A primitive leaf whose decoder is selected by a declared type name.
    pub fn leaf(name: &str, alias: &str, width: u64) -> Result<Self, SchemaError> {
        let kind = lookup_alias(alias).ok_or_else(|| SchemaError::UnknownType {
            name: name.to_string(),
            alias: alias.to_string(),
        })?;
        Self::with_kind(name, kind, width)
    }

    /// A primitive leaf without a declared type, decoded as an unsigned integer.
    pub fn untyped(name: &str, width: u64) -> Result<Self, SchemaError> {
        Self::with_kind(name, LeafKind::UnsignedInt, width)
    }

    pub fn with_kind(name: &str, kind: LeafKind, width: u64) -> Result<Self, SchemaError> {
        Ok(Self {
            name: name.to_string(),
            kind: ParameterKind::Leaf(kind),
            width: validate_width(name, width)?,
        })
    }

    pub fn composite(name: &str, width: u64, backing_parameters: Vec<ParameterSchema>) -> Result<Self, SchemaError> {
        if backing_parameters.is_empty() {
            return Err(SchemaError::EmptyComposite(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            kind: ParameterKind::Composite(backing_parameters),
            width: validate_width(name, width)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ParameterKind {
        &self.kind
    }

    pub fn width(&self) -> u64 {
        u64::from(self.width)
    }

    pub fn leaf_kind(&self) -> Option<LeafKind> {
        match &self.kind {
            ParameterKind::Leaf(kind) => Some(*kind),
            ParameterKind::Composite(_) => None,
        }
    }

    pub fn backing_parameters(&self) -> &[ParameterSchema] {
        match &self.kind {
            ParameterKind::Leaf(_) => &[],
            ParameterKind::Composite(fields) => fields,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.kind, ParameterKind::Composite(_))
    }

    /// Number of pointer indirections below this node.
    pub fn depth(&self) -> usize {
        self.backing_parameters()
            .iter()
            .map(|field| field.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Keeps only the low `width` bytes of a raw register or memory word.
    pub fn mask(&self, raw: u64) -> u64 {
        mask_to_width(raw, self.width())
    }
}

pub fn mask_to_width(raw: u64, width: u64) -> u64 {
    if width >= 8 {
        raw
    } else {
        raw & ((1u64 << (width * 8)) - 1)
    }
}

fn validate_width(name: &str, width: u64) -> Result<u8, SchemaError> {
    match width {
        1 | 2 | 4 | 8 => Ok(width as u8),
        _ => Err(SchemaError::InvalidWidth {
            name: name.to_string(),
            width,
        }),
    }
}

impl fmt::Display for ParameterSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParameterKind::Leaf(kind) => write!(f, "{}: {} ({} bytes)", self.name, kind, self.width),
            ParameterKind::Composite(fields) => {
                write!(f, "{}: *{{{} fields}} ({} bytes)", self.name, fields.len(), self.width)
            }
        }
    }
}
