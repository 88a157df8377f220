use itertools::Itertools;

use crate::{
    class_definition::{FieldDefinition, MethodDefinition},
    name_mapping::NameMapping,
    report_error::Result,
    type_descriptor::{class_display_name, to_display_name, value_type_display_name},
};

pub const DEFAULT_SEPARATOR: &str = " -> ";
pub const DEFAULT_INDENT: &str = "    ";

/// The punctuation of a report. The default is the conventional ProGuard layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFormat {
    /// Placed between an original name and its obfuscated counterpart
    pub separator: String,
    /// Prefix of every member line
    pub indent: String,
    pub blank_line_between_classes: bool,
}

impl Default for ReportFormat {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            indent: DEFAULT_INDENT.to_string(),
            blank_line_between_classes: false,
        }
    }
}

impl ReportFormat {
    /// Formats the header line of a class, e.g. `com.app.Widget -> b`
    pub fn class_line(
        &self,
        class_name: &str,
        mapping: &(impl NameMapping + ?Sized),
    ) -> Result<String> {
        let rendering = class_display_name(class_name)?;
        Ok(self.append_mapping(rendering, mapping.obfuscated_class(class_name)))
    }

    /// Formats one field line, e.g. `    int count -> c`
    pub fn field_line(
        &self,
        field: &FieldDefinition,
        class_name: &str,
        mapping: &(impl NameMapping + ?Sized),
    ) -> Result<String> {
        let rendering = format!(
            "{}{} {}",
            self.indent,
            value_type_display_name(&field.type_descriptor)?,
            field.name
        );
        let obfuscated =
            mapping.obfuscated_field(class_name, &field.name, &field.type_descriptor);
        Ok(self.append_mapping(rendering, obfuscated))
    }

    /// Formats one method line, e.g. `    int getCount(java.lang.String,long[]) -> a`
    pub fn method_line(
        &self,
        method: &MethodDefinition,
        class_name: &str,
        mapping: &(impl NameMapping + ?Sized),
    ) -> Result<String> {
        let parameters = method
            .parameters
            .iter()
            .map(|parameter| value_type_display_name(parameter))
            .collect::<Result<Vec<_>>>()?;
        let rendering = format!(
            "{}{} {}({})",
            self.indent,
            to_display_name(&method.return_type)?,
            method.name,
            parameters.iter().join(",")
        );
        let obfuscated = mapping.obfuscated_method(class_name, &method.name, &method.descriptor());
        Ok(self.append_mapping(rendering, obfuscated))
    }

    fn append_mapping(&self, mut rendering: String, obfuscated: Option<&str>) -> String {
        if let Some(obfuscated) = obfuscated {
            rendering.push_str(&self.separator);
            rendering.push_str(obfuscated);
        }
        rendering
    }
}

/// Formats a field with the default [ReportFormat]
pub fn format_field(
    field: &FieldDefinition,
    class_name: &str,
    mapping: &(impl NameMapping + ?Sized),
) -> Result<String> {
    ReportFormat::default().field_line(field, class_name, mapping)
}

/// Formats a method with the default [ReportFormat]
pub fn format_method(
    method: &MethodDefinition,
    class_name: &str,
    mapping: &(impl NameMapping + ?Sized),
) -> Result<String> {
    ReportFormat::default().method_line(method, class_name, mapping)
}
