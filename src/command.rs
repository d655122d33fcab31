//! Interactive commands read from stdin, one per line.
//!
//! ```text
//! select <ID>   set the pending zone (ids are upper-cased)
//! clear         clear the pending zone
//! add [<ID>]    add the pending zone, or select <ID> and add it
//! list          show the zone selector
//! help          show this list
//! quit | exit   leave
//! ```

use crate::engine::{AddOutcome, Clock};
use crate::error::{Error, Result};
use crate::Dashboard;
use std::time::Instant;
use tracing::debug;

pub const HELP: &str = "\
Commands:
  select <ID>   Choose a zone to add (e.g. select JST).
  clear         Clear the current choice.
  add [<ID>]    Add the chosen zone, or choose <ID> and add it.
  list          Show all zones; [x] marks zones already displayed.
  help          Show this help.
  quit          Exit (also: exit, Ctrl-D).";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(String),
    Clear,
    Add(Option<String>),
    List,
    Help,
    Quit,
}

/// What the host loop should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Redraw,
    ShowSelector,
    ShowHelp,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let re = regex!(r"^\s*(?i)([a-z]+)(?:\s+(\S+))?\s*$");
        let Some(caps) = re.captures(line) else {
            debug!(line, "unparseable command");
            return Err(Error::UnknownCommand(line.trim().to_string()));
        };
        let verb = caps[1].to_ascii_lowercase();
        let arg = caps.get(2).map(|m| m.as_str().to_ascii_uppercase());

        let cmd = match (verb.as_str(), arg) {
            ("select", Some(id)) => Command::Select(id),
            ("select", None) => return Err(Error::MissingArgument { command: "select", expected: "a zone id" }),
            ("add", arg) => Command::Add(arg),
            ("clear", None) => Command::Clear,
            ("list", None) => Command::List,
            ("help", None) => Command::Help,
            ("quit" | "exit", None) => Command::Quit,
            ("clear" | "list" | "help" | "quit" | "exit", Some(arg)) => return Err(Error::UnexpectedArgument(arg)),
            _ => return Err(Error::UnknownCommand(verb)),
        };
        Ok(Some(cmd))
    }

    /// Run the command against `dash`.
    ///
    /// Choosing a zone that is already displayed is refused here, the same way
    /// the selector disables it, and the pending choice is left as it was.
    pub fn apply<C: Clock>(self, dash: &mut Dashboard<C>, now: Instant) -> Result<Reply> {
        let reply = match self {
            Command::Select(id) => {
                choose(dash, &id)?;
                Reply::Redraw
            }
            Command::Clear => {
                dash.select_pending("");
                Reply::Redraw
            }
            Command::Add(id) => {
                if let Some(id) = id {
                    choose(dash, &id)?;
                }
                if let AddOutcome::Added(id) = dash.confirm_add(now) {
                    debug!(zone = id, "add confirmed from command");
                }
                Reply::Redraw
            }
            Command::List => Reply::ShowSelector,
            Command::Help => Reply::ShowHelp,
            Command::Quit => Reply::Quit,
        };
        Ok(reply)
    }
}

fn choose<C: Clock>(dash: &mut Dashboard<C>, id: &str) -> Result<()> {
    if !dash.is_selectable(id) {
        debug!(zone = id, "choice refused, zone already displayed");
        return Err(Error::ZoneUnavailable(id.to_string()));
    }
    dash.select_pending(id);
    Ok(())
}
