use std::{io, io::Write as _};

use anstream::stream::{AsLockedWrite, RawStream};
use anstyle::{AnsiColor, Color, Style};
use propkeys::{ConfigKey, Contract};

use crate::Printer;

pub(crate) const INDENT: &str = "  ";
pub(crate) const DIMMED: Style = Style::new().dimmed();
pub(crate) const MAIN_NAME: Style = Style::new().bold();
pub(crate) const KEY: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
const FIELD: Style = Style::new().underline();
const PROPERTY: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

impl<W: RawStream + AsLockedWrite> Printer<W> {
    /// Prints the contract of a provider: its properties source, the null key, and the property name
    /// and validator for each looked up key.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors.
    pub fn print_contract<K: ConfigKey>(self, contract: &Contract<K>) -> io::Result<()> {
        let mut writer = self.writer;
        writeln!(
            writer,
            "{MAIN_NAME}{}{MAIN_NAME:#} {DIMMED}[{}]{DIMMED:#}",
            contract.provider(),
            contract.properties_path()
        )?;
        writeln!(
            writer,
            "{INDENT}{FIELD}Null key{FIELD:#}: {KEY}{}{KEY:#}",
            contract.null_key().name()
        )?;

        for entry in contract.entries() {
            writeln!(
                writer,
                "{INDENT}{KEY}{}{KEY:#} -> {PROPERTY}{}{PROPERTY:#}",
                entry.key().name(),
                entry.external_name()
            )?;
            if let Some(validator) = entry.validator() {
                writeln!(writer, "{INDENT}{INDENT}{FIELD}Validation{FIELD:#}: {validator}")?;
            }
        }
        Ok(())
    }
}
