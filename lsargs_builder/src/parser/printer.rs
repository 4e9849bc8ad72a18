use crate::allocator::{AllocError, Allocator};
use crate::constant::*;
use crate::matcher::{ArgumentSpec, Kind, Registry};
use crate::model::{Mode, Names};
use crate::parser::interface::Wrap;
use crate::parser::text::TextBuffer;

// The long-only flags are indented to line up with the long names of "-s, --long".
const SHORT_SLOT: &str = "    ";

/// Renders the help message of a registry into a [`TextBuffer`].
pub(crate) struct Printer<'p> {
    program: &'p str,
    about: Option<&'p str>,
    width: Option<usize>,
}

impl<'p> Printer<'p> {
    pub(crate) fn new(program: &'p str, about: Option<&'p str>, width: Option<usize>) -> Self {
        Self {
            program,
            about,
            width,
        }
    }

    pub(crate) fn print_help(
        &self,
        registry: &Registry<'_>,
        out: &mut TextBuffer,
        allocator: &dyn Allocator,
    ) -> Result<(), AllocError> {
        let has_named = registry.has_named();

        // 1. Usage.
        out.append(allocator, USAGE_PREFIX)?;

        if !self.program.is_empty() {
            out.render(allocator, format_args!(" {}", self.program))?;
        }

        if has_named {
            out.render(allocator, format_args!(" {OPTION_MARKER}"))?;
        }

        for label_mode in registry
            .specs()
            .iter()
            .filter_map(|spec| spec.label().map(|label| (label, spec.mode())))
        {
            match label_mode {
                (label, Mode::Required) => out.render(allocator, format_args!(" <{label}>"))?,
                (label, Mode::Optional) => out.render(allocator, format_args!(" [{label}]"))?,
            }
        }

        out.append(allocator, "\n")?;

        // 2. About.
        if let Some(about) = self.about {
            out.append(allocator, "\n")?;
            self.print_paragraph(out, allocator, about, self.width, 0)?;
        }

        // 3. Options.
        if has_named {
            out.append(allocator, "\n")?;
            out.append(allocator, OPTIONS_HEADER)?;
            out.append(allocator, "\n")?;

            let left_column_width = registry
                .specs()
                .iter()
                .map(flags_width)
                .max()
                .unwrap_or_default();
            let description_column = MAIN_INDENT + left_column_width + PADDING_WIDTH;
            let description_width = self.width.map(|width| {
                std::cmp::max(
                    width.saturating_sub(description_column),
                    MINIMUM_DESCRIPTION_WIDTH,
                )
            });

            for spec in registry.specs() {
                let Some(names) = spec.names() else {
                    continue;
                };

                out.render(allocator, format_args!("{:MAIN_INDENT$}", ""))?;
                print_flags(out, allocator, names, matches!(spec.kind(), Kind::Value { .. }))?;

                match spec.help() {
                    Some(help) if !help.trim().is_empty() => {
                        let padding = left_column_width - flags_width(spec) + PADDING_WIDTH;
                        out.render(allocator, format_args!("{:padding$}", ""))?;
                        self.print_paragraph(
                            out,
                            allocator,
                            help,
                            description_width,
                            description_column,
                        )?;
                    }
                    _ => {
                        out.append(allocator, "\n")?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Print the wrapped paragraph, indenting every line after the first by `indent`.
    fn print_paragraph(
        &self,
        out: &mut TextBuffer,
        allocator: &dyn Allocator,
        paragraph: &str,
        width: Option<usize>,
        indent: usize,
    ) -> Result<(), AllocError> {
        for (i, line) in Wrap::new(paragraph, width).enumerate() {
            if i > 0 {
                out.render(allocator, format_args!("{:indent$}", ""))?;
            }

            out.append(allocator, line.text)?;

            if line.hyphen {
                out.append(allocator, "-")?;
            }

            out.append(allocator, "\n")?;
        }

        Ok(())
    }
}

fn print_flags(
    out: &mut TextBuffer,
    allocator: &dyn Allocator,
    names: Names<'_>,
    value: bool,
) -> Result<(), AllocError> {
    match (names.short(), names.long()) {
        (Some(short), Some(long)) => out.render(allocator, format_args!("-{short}, --{long}"))?,
        (Some(short), None) => out.render(allocator, format_args!("-{short}"))?,
        (None, Some(long)) => out.render(allocator, format_args!("{SHORT_SLOT}--{long}"))?,
        (None, None) => unreachable!("internal error - names must include a short or long"),
    }

    if value {
        out.render(allocator, format_args!(" {VALUE_MARKER}"))?;
    }

    Ok(())
}

/// The width of the flags printed for a flag/value option; `0` for positionals.
fn flags_width(spec: &ArgumentSpec<'_>) -> usize {
    let Some(names) = spec.names() else {
        return 0;
    };

    // The 2 accounts for "-S", and the 2 for "--".
    let width = match (names.short(), names.long()) {
        (Some(_), Some(long)) => 2 + ", ".len() + 2 + long.chars().count(),
        (Some(_), None) => 2,
        (None, Some(long)) => SHORT_SLOT.len() + 2 + long.chars().count(),
        (None, None) => unreachable!("internal error - names must include a short or long"),
    };

    match spec.kind() {
        Kind::Value { .. } => width + 1 + VALUE_MARKER.len(),
        Kind::Flag { .. } | Kind::Positional { .. } => width,
    }
}
