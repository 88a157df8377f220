pub mod class_definition;
pub mod mapping_reader;
pub mod member_formatter;
pub mod method_descriptor;
pub mod name_mapping;
pub mod report_error;
pub mod report_printer;
pub mod type_descriptor;
