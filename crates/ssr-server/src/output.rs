//! Console report for `ssr-server check`.

use std::cell::Cell;

use anyhow::{bail, Result};
use console::style;

/// Check report printer that tallies problems and warnings.
pub struct Output {
    verbose: bool,
    problems: Cell<usize>,
    warnings: Cell<usize>,
}

impl Output {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            problems: Cell::new(0),
            warnings: Cell::new(0),
        }
    }

    /// Start a report section.
    pub fn section(&self, title: &str) {
        println!("\n{}", style(title).bold().underlined());
    }

    /// A check that passed.
    pub fn ok(&self, msg: &str) {
        println!("{} {}", style("✓").green(), msg);
    }

    /// A non-fatal note; the build can still be served.
    pub fn warn(&self, msg: &str) {
        self.warnings.set(self.warnings.get() + 1);
        eprintln!("{} {}", style("⚠").yellow(), style(msg).yellow());
    }

    /// A check that failed; `finish` will report it.
    pub fn problem(&self, msg: &str) {
        self.problems.set(self.problems.get() + 1);
        self.error(msg);
    }

    /// Print a fatal error without counting it.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Extra detail, shown with `--verbose` only.
    pub fn detail(&self, msg: &str) {
        if self.verbose {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn field(&self, key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    pub fn item(&self, item: &str) {
        println!("  {} {}", style("•").dim(), item);
    }

    /// Close the report, failing when any problem was recorded.
    pub fn finish(&self) -> Result<()> {
        let problems = self.problems.get();
        if problems > 0 {
            bail!("{} problem(s) found", problems);
        }
        match self.warnings.get() {
            0 => self.ok("ready to serve"),
            n => self.ok(&format!("ready to serve ({} warning(s))", n)),
        }
        Ok(())
    }
}
