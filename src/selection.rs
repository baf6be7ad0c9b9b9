//! Interactive selection of components to remove.
//!
//! Candidates are presented one at a time in enumeration order. A
//! [`SelectionCollector`] decides on each; accepted ids are appended to a
//! [`SelectionSet`] in presentation order.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

use crate::console::{report_failure, write_component, REMOVE_PROMPT};
use crate::enumerate::ComponentInfo;
use crate::error::NetCfgError;

/// Outcome of presenting one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

/// Source of accept/reject decisions for removal candidates.
///
/// The interactive implementation is [`PromptCollector`]; non-interactive
/// runs use a [`Predicate`].
#[cfg_attr(test, automock)]
pub trait SelectionCollector {
    /// Block until a decision for `candidate` is available.
    fn decide(&mut self, candidate: &ComponentInfo) -> Result<Decision>;
}

/// Ids chosen for removal, in presentation order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet(Vec<String>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: String) {
        self.0.push(id);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for SelectionSet {
    fn from(ids: Vec<String>) -> Self {
        Self(ids)
    }
}

/// Reading of a single answer character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Answer {
    Accept,
    Reject,
    Retry,
    EndOfInput,
}

/// Prompts `Remove? [Y]es, [N]o: ` and reads one character per attempt.
///
/// Only `Y`/`y` and `N`/`n` are valid. Anything else discards the rest of
/// the input line and prompts again. End of input counts as a rejection,
/// for this and every later candidate.
pub struct PromptCollector<R, W> {
    input: R,
    output: W,
    eof: bool,
}

impl<R: BufRead, W: Write> PromptCollector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            eof: false,
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let buf = self.input.fill_buf()?;
        let Some(&byte) = buf.first() else {
            return Ok(None);
        };
        self.input.consume(1);
        Ok(Some(byte))
    }

    fn skip_line(&mut self) -> io::Result<()> {
        let mut rest = Vec::new();
        self.input.read_until(b'\n', &mut rest)?;
        Ok(())
    }

    fn read_answer(&mut self) -> io::Result<Answer> {
        if self.eof {
            return Ok(Answer::EndOfInput);
        }
        let answer = match self.read_byte()? {
            None => {
                self.eof = true;
                return Ok(Answer::EndOfInput);
            }
            Some(b'Y' | b'y') => Answer::Accept,
            Some(b'N' | b'n') => Answer::Reject,
            Some(b'\n') => return Ok(Answer::Retry),
            Some(_) => Answer::Retry,
        };
        self.skip_line()?;
        Ok(answer)
    }
}

impl<R: BufRead, W: Write> SelectionCollector for PromptCollector<R, W> {
    fn decide(&mut self, candidate: &ComponentInfo) -> Result<Decision> {
        let decision = loop {
            write!(self.output, "{}", REMOVE_PROMPT)?;
            self.output.flush()?;

            match self.read_answer()? {
                Answer::Accept => break Decision::Accept,
                Answer::Reject => break Decision::Reject,
                Answer::Retry => continue,
                Answer::EndOfInput => {
                    debug!(id = %candidate.id, "End of input, treating as no");
                    writeln!(self.output)?;
                    break Decision::Reject;
                }
            }
        };

        writeln!(self.output)?;
        Ok(decision)
    }
}

/// Non-interactive collector driven by a predicate.
pub struct Predicate<F>(pub F);

impl<F: FnMut(&ComponentInfo) -> bool> SelectionCollector for Predicate<F> {
    fn decide(&mut self, candidate: &ComponentInfo) -> Result<Decision> {
        Ok(if (self.0)(candidate) {
            Decision::Accept
        } else {
            Decision::Reject
        })
    }
}

/// Collector that accepts every candidate.
pub fn accept_all() -> Predicate<fn(&ComponentInfo) -> bool> {
    fn always(_: &ComponentInfo) -> bool {
        true
    }
    Predicate(always as fn(&ComponentInfo) -> bool)
}

/// Present each candidate: print its block and, when a collector is given,
/// ask for a decision.
///
/// Skipped items are reported as `<site>: Failed: ...` lines and do not stop
/// the pass. Returns the accepted ids; empty when no collector is given.
pub fn present<I, W>(
    candidates: I,
    site: &str,
    out: &mut W,
    mut collector: Option<&mut dyn SelectionCollector>,
) -> Result<SelectionSet>
where
    I: IntoIterator<Item = std::result::Result<ComponentInfo, NetCfgError>>,
    W: Write + ?Sized,
{
    let mut selected = SelectionSet::new();

    for candidate in candidates {
        let info = match candidate {
            Ok(info) => info,
            Err(e) => {
                report_failure(out, site, &e);
                continue;
            }
        };

        write_component(out, &info)?;
        out.flush()?;

        if let Some(collector) = collector.as_deref_mut() {
            if collector.decide(&info)? == Decision::Accept {
                debug!(id = %info.id, "Selected for removal");
                selected.push(info.id);
            }
        }
    }

    Ok(selected)
}
