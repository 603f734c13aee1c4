//! Provides the observers that receive the progress of a rule learner.
//! 
//! Every learner reports its decisions as [`LogEvent`]s
//! to the [`Logger`] it holds.
//! The default logger ([`SilentLogger`]) ignores them.
//! 
//! ```
//! use std::rc::Rc;
//! use minirules::prelude::*;
//! 
//! let logger = Rc::new(MemoryLogger::new());
//! let mut learner = Irep::init()
//!     .seed(0)
//!     .logger(Rc::clone(&logger));
//! 
//! let x = vec![vec![0.0, 0.0, 1.0, 1.0]];
//! let names = vec!["x".to_string()];
//! let _ = learner.fit(&x, &[0, 0, 1, 1], &names, 1).unwrap();
//! 
//! assert!(!logger.lines().is_empty());
//! ```

// Provides the events.
pub(crate) mod event;
// Provides the logger trait and its instances.
pub(crate) mod logger;


pub use event::LogEvent;
pub use logger::{
    Logger,
    SilentLogger,
    TerminalLogger,
    MemoryLogger,
};
