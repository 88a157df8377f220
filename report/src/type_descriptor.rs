use std::{fmt, fmt::Formatter, str::Chars};

use itertools::Itertools;

use crate::report_error::{ReportError, ReportError::InvalidTypeDescriptor, Result};

/// Models the type of one field, one parameter or the return value of a method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// Primitive types, and void
    Base(BaseType),

    /// Reference type, stored with its internal (slash-separated) name
    Object(String),

    /// Array of any number of dimensions. The component is never itself an array, nor void
    Array {
        dimensions: usize,
        component: Box<TypeDescriptor>,
    },
}

/// Renders the display name: `int`, `com.foo.Bar`, `java.lang.String[][]`
impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Base(base) => write!(f, "{base}"),
            TypeDescriptor::Object(class) => f.write_str(&class.replace('/', ".")),
            TypeDescriptor::Array {
                dimensions,
                component,
            } => write!(f, "{component}{}", "[]".repeat(*dimensions)),
        }
    }
}

/// Possible primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum BaseType {
    Void,
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl BaseType {
    pub fn code(&self) -> char {
        match self {
            BaseType::Void => 'V',
            BaseType::Boolean => 'Z',
            BaseType::Byte => 'B',
            BaseType::Short => 'S',
            BaseType::Char => 'C',
            BaseType::Int => 'I',
            BaseType::Long => 'J',
            BaseType::Float => 'F',
            BaseType::Double => 'D',
        }
    }

    fn from_code(code: char) -> Option<BaseType> {
        Some(match code {
            'V' => BaseType::Void,
            'Z' => BaseType::Boolean,
            'B' => BaseType::Byte,
            'S' => BaseType::Short,
            'C' => BaseType::Char,
            'I' => BaseType::Int,
            'J' => BaseType::Long,
            'F' => BaseType::Float,
            'D' => BaseType::Double,
            _ => return None,
        })
    }

    fn from_keyword(keyword: &str) -> Option<BaseType> {
        Some(match keyword {
            "void" => BaseType::Void,
            "boolean" => BaseType::Boolean,
            "byte" => BaseType::Byte,
            "short" => BaseType::Short,
            "char" => BaseType::Char,
            "int" => BaseType::Int,
            "long" => BaseType::Long,
            "float" => BaseType::Float,
            "double" => BaseType::Double,
            _ => return None,
        })
    }
}

impl TypeDescriptor {
    /// Parses a type descriptor as specified in the JVM specs:
    /// https://docs.oracle.com/javase/specs/jvms/se7/html/jvms-4.html#jvms-4.3.2
    /// with the addition of `V`, so that return types can be parsed too.
    pub fn parse(type_descriptor: &str) -> Result<TypeDescriptor> {
        let mut chars = type_descriptor.chars();
        let descriptor = Self::parse_from(type_descriptor, &mut chars)?;
        match chars.next() {
            None => Ok(descriptor),
            Some(_) => Err(InvalidTypeDescriptor(type_descriptor.to_string())),
        }
    }

    /// Parses a descriptor that can appear as a field type or a parameter, i.e. anything but void
    pub fn parse_value_type(type_descriptor: &str) -> Result<TypeDescriptor> {
        match Self::parse(type_descriptor)? {
            TypeDescriptor::Base(BaseType::Void) => {
                Err(InvalidTypeDescriptor(type_descriptor.to_string()))
            }
            descriptor => Ok(descriptor),
        }
    }

    pub(crate) fn parse_from(type_descriptor: &str, chars: &mut Chars) -> Result<TypeDescriptor> {
        let dimensions = chars.take_while_ref(|c| *c == '[').count();
        let first_char = chars
            .next()
            .ok_or_else(|| InvalidTypeDescriptor(type_descriptor.to_string()))?;

        let component = match first_char {
            'L' => {
                let class_name: String = chars.take_while_ref(|c| *c != ';').collect();
                match chars.next() {
                    Some(';') if !class_name.is_empty() => TypeDescriptor::Object(class_name),
                    _ => return Err(InvalidTypeDescriptor(type_descriptor.to_string())),
                }
            }
            code => match BaseType::from_code(code) {
                Some(base) => TypeDescriptor::Base(base),
                None => return Err(InvalidTypeDescriptor(type_descriptor.to_string())),
            },
        };

        if dimensions == 0 {
            Ok(component)
        } else if component.is_void() {
            Err(InvalidTypeDescriptor(type_descriptor.to_string()))
        } else {
            Ok(TypeDescriptor::Array {
                dimensions,
                component: Box::new(component),
            })
        }
    }

    pub fn is_void(&self) -> bool {
        *self == TypeDescriptor::Base(BaseType::Void)
    }

    /// Renders the internal form back, i.e. the inverse of [TypeDescriptor::parse]
    pub fn to_descriptor(&self) -> String {
        match self {
            TypeDescriptor::Base(base) => base.code().to_string(),
            TypeDescriptor::Object(class) => format!("L{class};"),
            TypeDescriptor::Array {
                dimensions,
                component,
            } => format!("{}{}", "[".repeat(*dimensions), component.to_descriptor()),
        }
    }

    /// Parses a source-level type name such as `java.lang.String[]`
    pub fn from_java_name(java_name: &str) -> Result<TypeDescriptor> {
        let invalid = || ReportError::InvalidJavaTypeName(java_name.to_string());

        let mut base_name = java_name.trim();
        let mut dimensions = 0;
        while let Some(stripped) = base_name.strip_suffix("[]") {
            base_name = stripped;
            dimensions += 1;
        }
        if base_name.is_empty() || base_name.contains(['/', ';', '[', ']', ' ']) {
            return Err(invalid());
        }

        let component = match BaseType::from_keyword(base_name) {
            Some(base) => TypeDescriptor::Base(base),
            None => TypeDescriptor::Object(base_name.replace('.', "/")),
        };
        if dimensions == 0 {
            Ok(component)
        } else if component.is_void() {
            Err(invalid())
        } else {
            Ok(TypeDescriptor::Array {
                dimensions,
                component: Box::new(component),
            })
        }
    }
}

/// Translates an internal type descriptor into its display name,
/// e.g. `[[Ljava/lang/String;` into `java.lang.String[][]`
pub fn to_display_name(type_descriptor: &str) -> Result<String> {
    TypeDescriptor::parse(type_descriptor).map(|descriptor| descriptor.to_string())
}

/// Like [to_display_name], but rejects `V`: fields and parameters cannot be void
pub fn value_type_display_name(type_descriptor: &str) -> Result<String> {
    TypeDescriptor::parse_value_type(type_descriptor).map(|descriptor| descriptor.to_string())
}

/// Translates the internal name of a class, which must be a reference type descriptor
pub fn class_display_name(class_descriptor: &str) -> Result<String> {
    match TypeDescriptor::parse(class_descriptor)? {
        descriptor @ TypeDescriptor::Object(_) => Ok(descriptor.to_string()),
        _ => Err(InvalidTypeDescriptor(class_descriptor.to_string())),
    }
}

/// Translates a source-level type name, e.g. `int[]`, into its internal descriptor `[I`
pub fn java_name_to_descriptor(java_name: &str) -> Result<String> {
    TypeDescriptor::from_java_name(java_name).map(|descriptor| descriptor.to_descriptor())
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use crate::{
        report_error::ReportError,
        type_descriptor::{
            class_display_name, java_name_to_descriptor, to_display_name,
            value_type_display_name, BaseType, TypeDescriptor,
        },
    };

    fn assert_invalid(descriptor: &str) {
        assert!(matches!(
            TypeDescriptor::parse(descriptor),
            Err(ReportError::InvalidTypeDescriptor(s)) if s == descriptor
        ));
    }

    #[test]
    fn cannot_parse_empty_descriptor() {
        assert_invalid("");
    }

    #[test]
    fn cannot_parse_invalid_primitive() {
        assert_invalid("W");
    }

    #[test]
    fn cannot_parse_missing_semicolon() {
        assert_invalid("Ljava/lang/String");
    }

    #[test]
    fn cannot_parse_empty_class_name() {
        assert_invalid("L;");
    }

    #[test]
    fn cannot_parse_invalid_array() {
        assert_invalid("[");
        assert_invalid("[V");
    }

    #[test]
    fn cannot_parse_trailing_data() {
        assert_invalid("II");
        assert_invalid("Lfoo/Bar;I");
    }

    #[test]
    fn can_translate_every_primitive() {
        let keywords: Vec<(char, String)> = BaseType::iter()
            .map(|base| {
                let display = to_display_name(&base.code().to_string()).unwrap();
                (base.code(), display)
            })
            .collect();
        assert_eq!(
            vec![
                ('V', "void".to_string()),
                ('Z', "boolean".to_string()),
                ('B', "byte".to_string()),
                ('S', "short".to_string()),
                ('C', "char".to_string()),
                ('I', "int".to_string()),
                ('J', "long".to_string()),
                ('F', "float".to_string()),
                ('D', "double".to_string()),
            ],
            keywords
        );
    }

    #[test]
    fn can_parse_object_descriptors() {
        assert_eq!(
            TypeDescriptor::Object("rjvm/Test".to_string()),
            TypeDescriptor::parse("Lrjvm/Test;").unwrap()
        );
    }

    #[test]
    fn can_translate_object() {
        assert_eq!("com.foo.Bar", to_display_name("Lcom/foo/Bar;").unwrap());
        assert_eq!("Bar", to_display_name("LBar;").unwrap());
        assert_eq!(
            "com.foo.Bar$Inner",
            to_display_name("Lcom/foo/Bar$Inner;").unwrap()
        );
    }

    #[test]
    fn can_translate_arrays() {
        assert_eq!("int[]", to_display_name("[I").unwrap());
        assert_eq!(
            "java.lang.String[][]",
            to_display_name("[[Ljava/lang/String;").unwrap()
        );
        assert_eq!("double[][][]", to_display_name("[[[D").unwrap());
    }

    #[test]
    fn can_translate_deeply_nested_arrays() {
        let depth = 50_000;
        let descriptor = format!("{}Lcom/app/Widget;", "[".repeat(depth));
        let parsed = TypeDescriptor::parse(&descriptor).unwrap();
        assert_eq!(
            TypeDescriptor::Array {
                dimensions: depth,
                component: Box::new(TypeDescriptor::Object("com/app/Widget".to_string())),
            },
            parsed
        );
        assert_eq!(
            format!("com.app.Widget{}", "[]".repeat(depth)),
            to_display_name(&descriptor).unwrap()
        );
        assert_eq!(descriptor, parsed.to_descriptor());
        assert_eq!(
            format!("{}I", "[".repeat(depth)),
            java_name_to_descriptor(&format!("int{}", "[]".repeat(depth))).unwrap()
        );
    }

    #[test]
    fn value_types_cannot_be_void() {
        assert_eq!("int[]", value_type_display_name("[I").unwrap());
        assert!(matches!(
            value_type_display_name("V"),
            Err(ReportError::InvalidTypeDescriptor(s)) if s == "V"
        ));
    }

    #[test]
    fn translation_is_deterministic() {
        let first = to_display_name("[[Lcom/app/Widget;").unwrap();
        for _ in 0..3 {
            assert_eq!(first, to_display_name("[[Lcom/app/Widget;").unwrap());
        }
    }

    #[test]
    fn class_names_must_be_reference_types() {
        assert_eq!("com.app.Widget", class_display_name("Lcom/app/Widget;").unwrap());
        assert!(matches!(
            class_display_name("[Lcom/app/Widget;"),
            Err(ReportError::InvalidTypeDescriptor(_))
        ));
        assert!(matches!(
            class_display_name("I"),
            Err(ReportError::InvalidTypeDescriptor(_))
        ));
    }

    #[test]
    fn can_render_descriptor_back() {
        for descriptor in ["V", "I", "[J", "Lcom/foo/Bar;", "[[Ljava/lang/String;"] {
            assert_eq!(
                descriptor,
                TypeDescriptor::parse(descriptor).unwrap().to_descriptor()
            );
        }
    }

    #[test]
    fn can_convert_java_names() {
        assert_eq!("I", java_name_to_descriptor("int").unwrap());
        assert_eq!("[[Z", java_name_to_descriptor("boolean[][]").unwrap());
        assert_eq!(
            "[Ljava/lang/String;",
            java_name_to_descriptor("java.lang.String[]").unwrap()
        );
        assert_eq!("Lcom/foo/Bar$1;", java_name_to_descriptor("com.foo.Bar$1").unwrap());
    }

    #[test]
    fn cannot_convert_invalid_java_names() {
        for name in ["", "[]", "void[]", "com/foo/Bar", "int[", "a b"] {
            assert!(
                matches!(
                    java_name_to_descriptor(name),
                    Err(ReportError::InvalidJavaTypeName(_))
                ),
                "{name} should be rejected"
            );
        }
    }
}
