use std::{fmt, fmt::Formatter};

use itertools::Itertools;

use crate::{method_descriptor::MethodDescriptor, report_error::Result};

/// A class as seen by the report: its internal name (e.g. `Lcom/app/Widget;`) and its
/// members, in declaration order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClassDefinition {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
    pub methods: Vec<MethodDefinition>,
}

impl ClassDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodDefinition) -> Self {
        self.methods.push(method);
        self
    }
}

impl fmt::Display for ClassDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} fields, {} methods)",
            self.name,
            self.fields.len(),
            self.methods.len()
        )
    }
}

/// Models a field in a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    pub type_descriptor: String,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, type_descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_descriptor: type_descriptor.into(),
        }
    }
}

impl fmt::Display for FieldDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.type_descriptor)
    }
}

/// Models a method in a class. Parameters are kept in declaration order, since the
/// method's signature depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDefinition {
    pub name: String,
    pub parameters: Vec<String>,
    pub return_type: String,
}

impl MethodDefinition {
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<String>,
        return_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type: return_type.into(),
        }
    }

    /// Builds a method from a full descriptor such as `(ILjava/lang/String;)V`
    pub fn from_descriptor(name: impl Into<String>, descriptor: &str) -> Result<Self> {
        let parsed = MethodDescriptor::parse(descriptor)?;
        Ok(Self {
            name: name.into(),
            parameters: parsed
                .parameters
                .iter()
                .map(|parameter| parameter.to_descriptor())
                .collect(),
            return_type: parsed.return_type.to_descriptor(),
        })
    }

    /// The method's signature, in internal form
    pub fn descriptor(&self) -> String {
        format!("({}){}", self.parameters.iter().join(""), self.return_type)
    }
}

impl fmt::Display for MethodDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.descriptor())
    }
}
