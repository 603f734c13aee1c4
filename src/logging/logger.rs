use colored::Colorize;

use std::cell::RefCell;
use std::rc::Rc;

use super::event::LogEvent;


const TAG_WIDTH: usize = 6;


/// The observer of a rule learner.
/// A learner calls [`Logger::log`] at every decision point.
pub trait Logger {
    /// Receives a single event.
    fn log(&self, event: &LogEvent<'_>);
}


impl<L: Logger + ?Sized> Logger for Rc<L> {
    fn log(&self, event: &LogEvent<'_>) {
        (**self).log(event)
    }
}


impl<L: Logger + ?Sized> Logger for Box<L> {
    fn log(&self, event: &LogEvent<'_>) {
        (**self).log(event)
    }
}


/// A logger that ignores every event.
/// This is the default logger of every learner.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentLogger;


impl Logger for SilentLogger {
    #[inline(always)]
    fn log(&self, _event: &LogEvent<'_>) {}
}


/// A logger that prints every event to the standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalLogger;


impl TerminalLogger {
    /// Construct a new instance of `TerminalLogger`.
    pub fn new() -> Self {
        Self
    }
}


impl Logger for TerminalLogger {
    fn log(&self, event: &LogEvent<'_>) {
        let tag = event.tag();
        let tag = match tag {
            "FIT" => tag.bold().green(),
            "GROW" => tag.bold().blue(),
            "PRUNE" => tag.bold().yellow(),
            "MDL" => tag.bold().cyan(),
            "OPT" => tag.bold().magenta(),
            _ => tag.bold().red(),
        };
        println!("{tag:>TAG_WIDTH$}  {event}");
    }
}


/// A logger that keeps the rendered events in memory.
/// Share it with [`Rc`] to read the lines after fitting.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: RefCell<Vec<String>>,
}


impl MemoryLogger {
    /// Construct a new empty `MemoryLogger`.
    pub fn new() -> Self {
        Self::default()
    }


    /// Returns a copy of the recorded lines.
    /// Each line has the form `TAG: message`.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }


    /// Returns `true` if a recorded line contains `pattern`.
    pub fn contains(&self, pattern: &str) -> bool {
        self.lines.borrow()
            .iter()
            .any(|line| line.contains(pattern))
    }


    /// Removes the recorded lines.
    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}


impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent<'_>) {
        let line = format!("{}: {event}", event.tag());
        self.lines.borrow_mut().push(line);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_logger_records_through_rc() {
        let logger = Rc::new(MemoryLogger::new());
        let shared: Box<dyn Logger> = Box::new(Rc::clone(&logger));

        shared.log(&LogEvent::Remaining { pos: 3, neg: 2 });
        shared.log(&LogEvent::MdlExceeded);

        assert_eq!(
            logger.lines(),
            vec![
                "FIT: Pos: 3, Neg: 2 remaining.".to_string(),
                "MDL: Description length exceeds MDL, stopping".to_string(),
            ]
        );
        logger.clear();
        assert!(logger.lines().is_empty());
    }
}
