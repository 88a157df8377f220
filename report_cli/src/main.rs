use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use log::info;

use pgmap_report::{
    mapping_reader::{self, ParsedMapping},
    member_formatter::{ReportFormat, DEFAULT_SEPARATOR},
    report_error::ReportError,
    report_printer::ReportPrinter,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// ProGuard mapping file to read
    mapping: PathBuf,

    /// Where to write the report. Defaults to the standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Separator between original and obfuscated names
    #[arg(long, default_value = DEFAULT_SEPARATOR)]
    separator: String,

    /// Number of spaces before each member line
    #[arg(long, default_value_t = 4)]
    indent: usize,

    /// Print an empty line between classes
    #[arg(long)]
    blank_lines: bool,
}

impl Args {
    fn report_format(&self) -> ReportFormat {
        ReportFormat {
            separator: self.separator.clone(),
            indent: " ".repeat(self.indent),
            blank_line_between_classes: self.blank_lines,
        }
    }
}

fn describe_error(err: ReportError) -> String {
    match err {
        ReportError::Io(err) => format!("i/o error: {err}"),
        ReportError::InvalidMappingLine { line_number, line } => {
            format!("invalid mapping file, line {line_number}: {line}")
        }
        ReportError::InvalidTypeDescriptor(descriptor) => {
            format!("invalid type descriptor: {descriptor}")
        }
        ReportError::InvalidMethodDescriptor(descriptor) => {
            format!("invalid method descriptor: {descriptor}")
        }
        ReportError::InvalidJavaTypeName(name) => format!("invalid java type name: {name}"),
    }
}

fn write_report(
    parsed: &ParsedMapping,
    format: ReportFormat,
    output: &mut impl Write,
) -> Result<(), String> {
    ReportPrinter::with_format(&parsed.map, format)
        .print_classes(output, &parsed.classes)
        .map_err(describe_error)
}

fn run(args: Args) -> Result<i32, String> {
    let parsed = mapping_reader::read_mapping_file(&args.mapping).map_err(describe_error)?;
    let format = args.report_format();

    match &args.output {
        Some(path) => {
            info!("writing report to {}", path.display());
            let file = File::create(path)
                .map_err(|err| format!("cannot create {}: {err}", path.display()))?;
            write_report(&parsed, format, &mut BufWriter::new(file))?;
        }
        None => write_report(&parsed, format, &mut io::stdout().lock())?,
    }
    Ok(0)
}

fn main() {
    let args = Args::parse();
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let result = run(args);
    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(-1);
        }
    }
}
