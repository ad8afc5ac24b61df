use std::{io, io::Write as _};

use anstream::stream::{AsLockedWrite, RawStream};
use anstyle::{AnsiColor, Color, Style};
use propkeys::{ConfigProvider, InitError, Violation, ViolationKind};

use crate::{
    Printer,
    contract::{DIMMED, INDENT, KEY, MAIN_NAME},
};

const SUCCESS: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::Green)));
const ERROR: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::Red)));
const WARNING: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::Yellow)));

impl<W: RawStream + AsLockedWrite> Printer<W> {
    /// Prints a report on `provider` initialization. `result` is the outcome of one of its initialization methods.
    /// Property values are never printed.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors.
    pub fn print_report<P: ConfigProvider>(
        self,
        provider: &P,
        result: &Result<(), InitError>,
    ) -> io::Result<()> {
        let mut writer = self.writer;
        let contract = P::contract();
        let name = contract.provider();
        let state = provider.state();

        match result {
            Ok(()) => {
                writeln!(
                    writer,
                    "{SUCCESS}{state}{SUCCESS:#} {MAIN_NAME}{name}{MAIN_NAME:#}: {} properties validated",
                    contract.entries().len()
                )?;
            }
            Err(InitError::Violations { violations, .. }) => {
                writeln!(
                    writer,
                    "{ERROR}{state}{ERROR:#} {MAIN_NAME}{name}{MAIN_NAME:#}: {} violation(s)",
                    violations.len()
                )?;
                for violation in violations {
                    write_violation(&mut writer, violation)?;
                }
            }
            Err(InitError::SourceUnavailable { path, source }) => {
                writeln!(
                    writer,
                    "{ERROR}{state}{ERROR:#} {MAIN_NAME}{name}{MAIN_NAME:#}: properties source is unavailable"
                )?;
                writeln!(writer, "{INDENT}{DIMMED}{}{DIMMED:#}: {source}", path.display())?;
            }
            Err(err) => {
                writeln!(
                    writer,
                    "{WARNING}{state}{WARNING:#} {MAIN_NAME}{name}{MAIN_NAME:#}: {err}"
                )?;
            }
        }
        Ok(())
    }
}

fn write_violation(writer: &mut impl io::Write, violation: &Violation) -> io::Result<()> {
    let key = violation.key();
    let property = violation.external_name();
    write!(writer, "{INDENT}{KEY}{key}{KEY:#} {DIMMED}({property}){DIMMED:#}: ")?;
    match violation.kind() {
        ViolationKind::MissingOrEmptyProperty => writeln!(writer, "missing or empty"),
        ViolationKind::InvalidPropertyValue { validator } => {
            writeln!(writer, "invalid value; {validator}")
        }
        _ => writeln!(writer, "{violation}"),
    }
}
