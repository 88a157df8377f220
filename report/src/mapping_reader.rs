use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::{info, warn};

use crate::{
    class_definition::{ClassDefinition, FieldDefinition, MethodDefinition},
    name_mapping::ProguardMap,
    report_error::{ReportError, Result},
    type_descriptor::{java_name_to_descriptor, TypeDescriptor},
};

const ARROW: &str = " -> ";

/// The content of a mapping file: the table of obfuscated names, and the original classes
/// with their members, in the order in which they were found
#[derive(Debug, Default)]
pub struct ParsedMapping {
    pub map: ProguardMap,
    pub classes: Vec<ClassDefinition>,
}

enum Member {
    Field(FieldDefinition),
    Method(MethodDefinition),
}

pub fn read_mapping_file(path: &Path) -> Result<ParsedMapping> {
    info!("reading mapping file {}", path.display());
    read_mapping(BufReader::new(File::open(path)?))
}

pub fn parse_mapping(text: &str) -> Result<ParsedMapping> {
    read_mapping(text.as_bytes())
}

/// Reads a ProGuard-style mapping file. Line number ranges are accepted and dropped.
/// When a member appears more than once in a class (as happens for inlined frames), only
/// the first occurrence is kept.
pub fn read_mapping(reader: impl BufRead) -> Result<ParsedMapping> {
    let mut parsed = ParsedMapping::default();
    let mut seen_members = HashSet::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let invalid_line = || ReportError::InvalidMappingLine {
            line_number,
            line: line.clone(),
        };

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if !line.starts_with(char::is_whitespace) {
            let (class_name, obfuscated_name) =
                parse_class_line(trimmed).ok_or_else(invalid_line)?;
            if let Some(obfuscated_name) = obfuscated_name {
                parsed.map.add_class(&class_name, obfuscated_name);
            }
            parsed.classes.push(ClassDefinition::new(class_name));
            seen_members.clear();
            continue;
        }

        let class = parsed.classes.last_mut().ok_or_else(invalid_line)?;
        let (member, obfuscated_name) = parse_member_line(trimmed).ok_or_else(invalid_line)?;
        match member {
            Member::Field(field) => {
                if !seen_members.insert(field.to_string()) {
                    warn!("skipping duplicated field {} in {}", field, class.name);
                    continue;
                }
                if let Some(obfuscated_name) = obfuscated_name {
                    parsed.map.add_field(
                        &class.name,
                        &field.name,
                        &field.type_descriptor,
                        obfuscated_name,
                    );
                }
                class.fields.push(field);
            }
            Member::Method(method) => {
                if !seen_members.insert(method.to_string()) {
                    warn!("skipping duplicated method {} in {}", method, class.name);
                    continue;
                }
                if let Some(obfuscated_name) = obfuscated_name {
                    parsed.map.add_method(
                        &class.name,
                        &method.name,
                        &method.descriptor(),
                        obfuscated_name,
                    );
                }
                class.methods.push(method);
            }
        }
    }

    info!("read mapping of {} classes", parsed.classes.len());
    Ok(parsed)
}

fn split_arrow(line: &str) -> Option<(&str, Option<&str>)> {
    match line.split_once(ARROW) {
        Some((original, obfuscated)) => {
            let obfuscated = obfuscated.trim();
            if obfuscated.is_empty() {
                None
            } else {
                Some((original.trim(), Some(obfuscated)))
            }
        }
        None => Some((line, None)),
    }
}

/// Class lines: `com.app.Widget -> b:`. The arrow is optional, and so is the colon
fn parse_class_line(line: &str) -> Option<(String, Option<&str>)> {
    let line = line.strip_suffix(':').unwrap_or(line);
    let (original, obfuscated) = split_arrow(line)?;
    match TypeDescriptor::from_java_name(original).ok()? {
        descriptor @ TypeDescriptor::Object(_) => Some((descriptor.to_descriptor(), obfuscated)),
        _ => None,
    }
}

/// Member lines: `int count -> c` or `12:14:int getCount(java.lang.String):40:42 -> a`
fn parse_member_line(line: &str) -> Option<(Member, Option<&str>)> {
    let (original, obfuscated) = split_arrow(line)?;
    let original = strip_line_numbers(original);
    let (type_name, rest) = original.split_once(' ')?;
    let type_descriptor = java_name_to_descriptor(type_name).ok()?;

    let member = match rest.split_once('(') {
        None => {
            let name = rest.trim();
            if name.is_empty() || name.contains(char::is_whitespace) {
                return None;
            }
            if type_descriptor == "V" {
                return None;
            }
            Member::Field(FieldDefinition::new(name, type_descriptor))
        }
        Some((name, parameter_list)) => {
            let (parameter_list, _) = parameter_list.split_once(')')?;
            let parameters = parameter_list
                .split(',')
                .map(str::trim)
                .filter(|parameter| !parameter.is_empty())
                .map(value_type_descriptor)
                .collect::<Option<Vec<_>>>()?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Member::Method(MethodDefinition::new(name, parameters, type_descriptor))
        }
    };
    Some((member, obfuscated))
}

/// Parameters cannot be void
fn value_type_descriptor(java_name: &str) -> Option<String> {
    match TypeDescriptor::from_java_name(java_name).ok()? {
        descriptor if descriptor.is_void() => None,
        descriptor => Some(descriptor.to_descriptor()),
    }
}

/// Drops the leading `start:end:` line range of a member
fn strip_line_numbers(mut member: &str) -> &str {
    while let Some((prefix, rest)) = member.split_once(':') {
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_digit()) {
            break;
        }
        member = rest;
    }
    member
}
