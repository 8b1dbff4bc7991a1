//! Line input for `readLine`.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::Arc;

use parking_lot::Mutex;

pub enum InputHandlerImpl {
    /// Reads from stdin; end of input reads as an empty line.
    Stdin,
    /// Serves queued lines, then empty lines.
    Scripted(Mutex<VecDeque<String>>),
}

impl InputHandlerImpl {
    pub fn read_line(&self) -> String {
        match self {
            Self::Stdin => {
                let mut line = String::new();
                if let Err(err) = std::io::stdin().lock().read_line(&mut line) {
                    tracing::warn!(%err, "failed to read from stdin");
                }
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                line
            }
            Self::Scripted(lines) => lines.lock().pop_front().unwrap_or_default(),
        }
    }
}

pub type SharedInputHandler = Arc<InputHandlerImpl>;

pub fn stdin_handler() -> SharedInputHandler {
    Arc::new(InputHandlerImpl::Stdin)
}

pub fn scripted_handler<I, S>(lines: I) -> SharedInputHandler
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Arc::new(InputHandlerImpl::Scripted(Mutex::new(
        lines.into_iter().map(Into::into).collect(),
    )))
}
