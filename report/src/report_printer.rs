use std::{borrow::Borrow, io::Write};

use log::{debug, info};

use crate::{
    class_definition::ClassDefinition, member_formatter::ReportFormat, name_mapping::NameMapping,
    report_error::Result,
};

/// Writes mapping reports: one header line per class, then its fields and its methods.
/// The printer only borrows the mapping table for the duration of its own life.
#[derive(Debug)]
pub struct ReportPrinter<'a, M: NameMapping + ?Sized> {
    mapping: &'a M,
    format: ReportFormat,
}

impl<'a, M: NameMapping + ?Sized> ReportPrinter<'a, M> {
    pub fn new(mapping: &'a M) -> Self {
        Self::with_format(mapping, ReportFormat::default())
    }

    pub fn with_format(mapping: &'a M, format: ReportFormat) -> Self {
        Self { mapping, format }
    }

    pub fn print_class(&self, output: &mut impl Write, class: &ClassDefinition) -> Result<()> {
        debug!("printing class {class}");
        writeln!(output, "{}", self.format.class_line(&class.name, self.mapping)?)?;
        for field in class.fields.iter() {
            let line = self.format.field_line(field, &class.name, self.mapping)?;
            writeln!(output, "{line}")?;
        }
        for method in class.methods.iter() {
            let line = self.format.method_line(method, &class.name, self.mapping)?;
            writeln!(output, "{line}")?;
        }
        Ok(())
    }

    /// Prints every class of the scope, in the given order. Stops at the first error:
    /// whatever has already been written stays written.
    pub fn print_classes<I>(&self, output: &mut impl Write, scope: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Borrow<ClassDefinition>,
    {
        let mut printed = 0;
        for class in scope {
            if printed > 0 && self.format.blank_line_between_classes {
                writeln!(output)?;
            }
            self.print_class(output, class.borrow())?;
            printed += 1;
        }
        output.flush()?;
        info!("printed mapping report of {printed} classes");
        Ok(())
    }
}

/// Prints one class with the default [ReportFormat]
pub fn print_class(
    output: &mut impl Write,
    mapping: &(impl NameMapping + ?Sized),
    class: &ClassDefinition,
) -> Result<()> {
    ReportPrinter::new(mapping).print_class(output, class)
}

/// Prints all the classes of the scope with the default [ReportFormat]
pub fn print_classes<I>(
    output: &mut impl Write,
    mapping: &(impl NameMapping + ?Sized),
    scope: I,
) -> Result<()>
where
    I: IntoIterator,
    I::Item: Borrow<ClassDefinition>,
{
    ReportPrinter::new(mapping).print_classes(output, scope)
}
