use std::collections::BTreeSet;
use std::io::BufRead;

use crate::error::{Error, Result};

/// What the user asked for next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Show exactly these methods.
    Select(BTreeSet<String>),
    /// Show every known method.
    SelectAll,
    /// Reload the dataset from disk.
    Reload,
}

/// Source of selection changes. `None` ends the session.
pub trait SelectionProvider {
    fn next_event(&mut self) -> Result<Option<SelectionEvent>>;
}

/// Reads one event per line:
///
/// ```text
/// m1,m2     select m1 and m2
/// *         select everything (also `all`)
///           (empty line) deselect everything
/// reload    reload the data directory
/// quit      stop (also end of input)
/// ```
pub struct LineSelectionProvider<R> {
    input: R,
    line: String,
}

impl<R: BufRead> LineSelectionProvider<R> {
    pub fn new(input: R) -> Self {
        Self { input, line: String::new() }
    }
}

/// Parse one line of user input.
pub fn parse_event(line: &str) -> Option<SelectionEvent> {
    match line.trim() {
        "quit" | "exit" => None,
        "*" | "all" => Some(SelectionEvent::SelectAll),
        "reload" => Some(SelectionEvent::Reload),
        list => Some(SelectionEvent::Select(
            list.split(',').map(str::trim).filter(|m| !m.is_empty()).map(String::from).collect(),
        )),
    }
}

impl<R: BufRead> SelectionProvider for LineSelectionProvider<R> {
    fn next_event(&mut self) -> Result<Option<SelectionEvent>> {
        self.line.clear();
        let read = self
            .input
            .read_line(&mut self.line)
            .map_err(|e| Error::io("<stdin>", e))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(parse_event(&self.line))
    }
}

/// Fixed list of events, handed out in order.
impl SelectionProvider for std::vec::IntoIter<SelectionEvent> {
    fn next_event(&mut self) -> Result<Option<SelectionEvent>> {
        Ok(self.next())
    }
}
