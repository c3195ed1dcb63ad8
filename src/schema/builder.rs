// Thu Oct 15 2026 - Alex

use crate::config::{FieldDefinition, TracingConfig};
use crate::schema::{ParameterSchema, SchemaError};
use indexmap::IndexMap;
use std::sync::Arc;

/// Parameter list of one traced function.
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    pub module_name: String,
    pub function_name: String,
    pub parameters: Arc<Vec<ParameterSchema>>,
}

/// Turns field definitions into schemas, resolving named structures into
/// pointer-to-composite nodes. Every alias and width is checked here, so
/// nothing invalid reaches extraction.
pub struct SchemaBuilder<'a> {
    structures: &'a IndexMap<String, Vec<FieldDefinition>>,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(structures: &'a IndexMap<String, Vec<FieldDefinition>>) -> Self {
        Self { structures }
    }

    pub fn build_all(config: &TracingConfig) -> Result<Vec<FunctionSignature>, SchemaError> {
        let builder = SchemaBuilder::new(&config.structures);
        let mut signatures = Vec::with_capacity(config.function_count());

        for module in &config.modules {
            for function in &module.functions {
                signatures.push(FunctionSignature {
                    module_name: module.name.clone(),
                    function_name: function.name.clone(),
                    parameters: Arc::new(builder.build_parameters(&function.parameters)?),
                });
            }
        }
        Ok(signatures)
    }

    pub fn build_parameters(&self, fields: &[FieldDefinition]) -> Result<Vec<ParameterSchema>, SchemaError> {
        let mut path = Vec::new();
        fields.iter().map(|field| self.build_field(field, &mut path)).collect()
    }

    fn build_field(&self, field: &FieldDefinition, path: &mut Vec<String>) -> Result<ParameterSchema, SchemaError> {
        match (&field.type_name, &field.structure) {
            (Some(_), Some(_)) => Err(SchemaError::ConflictingField(field.name.clone())),
            (Some(alias), None) => ParameterSchema::leaf(&field.name, alias, field.size),
            (None, None) => ParameterSchema::untyped(&field.name, field.size),
            (None, Some(structure)) => {
                if path.iter().any(|visited| visited == structure) {
                    return Err(SchemaError::RecursiveStructure(structure.clone()));
                }
                let definition = self
                    .structures
                    .get(structure)
                    .ok_or_else(|| SchemaError::UnknownStructure {
                        name: field.name.clone(),
                        structure: structure.clone(),
                    })?;

                path.push(structure.clone());
                let backing = definition
                    .iter()
                    .map(|nested| self.build_field(nested, path))
                    .collect::<Result<Vec<_>, _>>();
                path.pop();

                ParameterSchema::composite(&field.name, field.size, backing?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FunctionDefinition, ModuleDefinition};
    use crate::schema::LeafKind;

    fn structures() -> IndexMap<String, Vec<FieldDefinition>> {
        let mut structures = IndexMap::new();
        structures.insert(
            "OBJECT_ATTRIBUTES".to_string(),
            vec![FieldDefinition::structure("ObjectName", "UNICODE_STRING", 8)],
        );
        structures.insert(
            "UNICODE_STRING".to_string(),
            vec![FieldDefinition::typed("Buffer", "LPWSTR", 8)],
        );
        structures
    }

    #[test]
    fn test_nested_structure_resolution() {
        let structures = structures();
        let builder = SchemaBuilder::new(&structures);
        let schemas = builder
            .build_parameters(&[
                FieldDefinition::typed("FileHandle", "PHANDLE", 8),
                FieldDefinition::structure("ObjectAttributes", "OBJECT_ATTRIBUTES", 8),
            ])
            .unwrap();

        assert_eq!(schemas.len(), 2);
        assert_eq!(schemas[0].leaf_kind(), Some(LeafKind::UnsignedInt));
        let object_attributes = &schemas[1];
        assert_eq!(object_attributes.depth(), 2);
        let object_name = &object_attributes.backing_parameters()[0];
        assert_eq!(object_name.name(), "ObjectName");
        assert_eq!(object_name.backing_parameters()[0].leaf_kind(), Some(LeafKind::WideString));
    }

    #[test]
    fn test_untyped_field_is_unsigned() {
        let structures = IndexMap::new();
        let schemas = SchemaBuilder::new(&structures)
            .build_parameters(&[FieldDefinition {
                name: "Flags".to_string(),
                size: 2,
                type_name: None,
                structure: None,
            }])
            .unwrap();

        assert_eq!(schemas[0].leaf_kind(), Some(LeafKind::UnsignedInt));
        assert_eq!(schemas[0].width(), 2);
    }

    #[test]
    fn test_recursive_structure_rejected() {
        let mut structures = IndexMap::new();
        structures.insert(
            "LIST_ENTRY".to_string(),
            vec![FieldDefinition::structure("Flink", "LIST_ENTRY", 8)],
        );
        let result = SchemaBuilder::new(&structures)
            .build_parameters(&[FieldDefinition::structure("Head", "LIST_ENTRY", 8)]);

        assert_eq!(result, Err(SchemaError::RecursiveStructure("LIST_ENTRY".to_string())));
    }

    #[test]
    fn test_shared_structure_is_not_recursion() {
        let structures = structures();
        let result = SchemaBuilder::new(&structures).build_parameters(&[
            FieldDefinition::structure("First", "UNICODE_STRING", 8),
            FieldDefinition::structure("Second", "UNICODE_STRING", 8),
        ]);

        assert!(result.is_ok());
    }

    #[test]
    fn test_unknown_structure() {
        let structures = IndexMap::new();
        let result = SchemaBuilder::new(&structures)
            .build_parameters(&[FieldDefinition::structure("Info", "FILE_BASIC_INFORMATION", 8)]);

        assert!(matches!(result, Err(SchemaError::UnknownStructure { .. })));
    }

    #[test]
    fn test_conflicting_field() {
        let structures = structures();
        let mut field = FieldDefinition::typed("Both", "ULONG", 4);
        field.structure = Some("UNICODE_STRING".to_string());

        assert_eq!(
            SchemaBuilder::new(&structures).build_parameters(&[field]),
            Err(SchemaError::ConflictingField("Both".to_string()))
        );
    }

    #[test]
    fn test_build_all_rejects_unknown_alias() {
        let config = TracingConfig::new().with_module(ModuleDefinition::new("ntdll.dll").with_function(
            FunctionDefinition::new("NtClose", vec![FieldDefinition::typed("Handle", "HANDLE_OR_WHATEVER", 8)]),
        ));

        assert!(matches!(SchemaBuilder::build_all(&config), Err(SchemaError::UnknownType { .. })));
    }

    #[test]
    fn test_build_all() {
        let config = TracingConfig::new().with_module(
            ModuleDefinition::new("ntdll.dll")
                .with_function(FunctionDefinition::new("NtClose", vec![FieldDefinition::typed("Handle", "HANDLE", 8)]))
                .with_function(FunctionDefinition::new("NtYieldExecution", Vec::new())),
        );
        let signatures = SchemaBuilder::build_all(&config).unwrap();

        assert_eq!(signatures.len(), 2);
        assert_eq!(signatures[0].function_name, "NtClose");
        assert_eq!(signatures[0].module_name, "ntdll.dll");
        assert!(signatures[1].parameters.is_empty());
    }
}
