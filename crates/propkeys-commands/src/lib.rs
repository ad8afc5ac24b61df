//! Command-line extensions for `propkeys` library.
//!
//! The extensions are as follows:
//!
//! - [Printing a contract](Printer::print_contract()) of a provider: its properties source, null key
//!   and the property name and validator for every key.
//! - [Printing an initialization report](Printer::print_report()) with all detected violations.
//!
//! All extensions are encapsulated in [`Printer`].
//!
//! # Examples
//!
//! ## Printing a contract
//!
//! ```
//! use propkeys::{ConfigKeys, ConfigProvider};
//! use propkeys_commands::Printer;
//!
//! #[derive(Debug, Clone, Copy, ConfigKeys)]
//! #[config(properties_path = "app.properties")]
//! pub enum AppKey {
//!     None,
//!     Host,
//! }
//!
//! Printer::stderr().print_contract(ConfigurationProvider::contract())?;
//! # std::io::Result::Ok(())
//! ```
//!
//! ## Printing an initialization report
//!
//! ```
//! use propkeys::{ConfigKeys, ConfigProvider, Properties};
//! use propkeys_commands::Printer;
//!
//! # #[derive(Debug, Clone, Copy, ConfigKeys)]
//! # #[config(properties_path = "app.properties")]
//! # pub enum AppKey {
//! #     None,
//! #     Host,
//! # }
//! let mut provider = ConfigurationProvider::new();
//! let result = provider.initialize_from(&Properties::new());
//! Printer::stderr().print_report(&provider, &result)?;
//! # std::io::Result::Ok(())
//! ```

// Linter settings
#![warn(missing_docs)]

use std::{
    io,
    io::{StderrLock, StdoutLock},
};

use anstream::{AutoStream, stream::RawStream};

mod contract;
mod report;

/// Wrapper around an I/O writer. Will style the output with ANSI sequences if appropriate.
///
/// Internally, the printer is based on [`anstream`] / [`anstyle`]; see their docs to find out how styling support
/// is detected by default. (TL;DR: based on `NO_COLOR`, `CLICOLOR_FORCE` and `CLICOLOR` env vars, and whether
/// the output is a terminal.) If this detection doesn't work for you, you can always [create](Self::custom()) a fully custom `Printer`.
///
/// [`anstream`]: https://docs.rs/anstream/
/// [`anstyle`]: https://docs.rs/anstyle/
#[derive(Debug)]
pub struct Printer<W: RawStream> {
    writer: AutoStream<W>,
}

impl Printer<StdoutLock<'static>> {
    /// Creates a printer to stdout. The stdout is locked while the printer is alive!
    pub fn stdout() -> Self {
        Self {
            writer: AutoStream::auto(io::stdout()).lock(),
        }
    }
}

impl Printer<StderrLock<'static>> {
    /// Creates a printer to stderr. The stderr is locked while the printer is alive!
    pub fn stderr() -> Self {
        Self {
            writer: AutoStream::auto(io::stderr()).lock(),
        }
    }
}

impl<W: RawStream> Printer<W> {
    /// Creates a custom printer.
    pub fn custom(writer: AutoStream<W>) -> Self {
        Self { writer }
    }
}
