use std::{fmt, fmt::Formatter, str::Chars};

use itertools::Itertools;

use crate::{
    report_error::{ReportError::InvalidMethodDescriptor, Result},
    type_descriptor::TypeDescriptor,
};

/// Models the signature of a method, i.e. the type of the parameters it takes and the type
/// of the return value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub parameters: Vec<TypeDescriptor>,
    pub return_type: TypeDescriptor,
}

/// Renders the internal form, e.g. `(I[Ljava/lang/String;)V`
impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}){}",
            self.parameters
                .iter()
                .map(TypeDescriptor::to_descriptor)
                .join(""),
            self.return_type.to_descriptor()
        )
    }
}

impl MethodDescriptor {
    /// Parses a method descriptor as specified in the JVM specs:
    /// https://docs.oracle.com/javase/specs/jvms/se7/html/jvms-4.html#jvms-4.3.3
    pub fn parse(descriptor: &str) -> Result<MethodDescriptor> {
        let mut chars = descriptor.chars();
        match chars.next() {
            Some('(') => {
                let parameters = Self::parse_parameters(descriptor, &mut chars)?;
                if Some(')') == chars.next() {
                    let return_type = Self::parse_return_type(descriptor, &mut chars)?;
                    Ok(MethodDescriptor {
                        parameters,
                        return_type,
                    })
                } else {
                    Err(InvalidMethodDescriptor(descriptor.to_string()))
                }
            }
            _ => Err(InvalidMethodDescriptor(descriptor.to_string())),
        }
    }

    fn parse_parameters(descriptor: &str, chars: &mut Chars) -> Result<Vec<TypeDescriptor>> {
        let mut parameters = Vec::new();
        loop {
            match chars.clone().next() {
                Some(')') => return Ok(parameters),
                Some('V') => return Err(InvalidMethodDescriptor(descriptor.to_string())),
                Some(_) => {
                    let param = TypeDescriptor::parse_from(descriptor, chars)
                        .map_err(|_| InvalidMethodDescriptor(descriptor.to_string()))?;
                    parameters.push(param);
                }
                None => return Err(InvalidMethodDescriptor(descriptor.to_string())),
            }
        }
    }

    fn parse_return_type(descriptor: &str, chars: &mut Chars) -> Result<TypeDescriptor> {
        let return_type = TypeDescriptor::parse_from(descriptor, chars)
            .map_err(|_| InvalidMethodDescriptor(descriptor.to_string()))?;
        if chars.next().is_none() {
            Ok(return_type)
        } else {
            Err(InvalidMethodDescriptor(descriptor.to_string()))
        }
    }
}
