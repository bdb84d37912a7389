use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use crate::session::{Reply, Session};

fn write_prompt<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    write!(out, "{}", session.prompt())?;
    out.flush()
}

/// Read one line without its terminator. Invalid UTF-8 is replaced, not
/// rejected. Returns `None` at end of input.
fn read_line<R: BufRead>(input: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if input.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

/// Main loop: prompt, read a line, feed it to the session, print the reply.
///
/// Returns when the session asks to exit or the input is exhausted. A panic
/// inside a command is logged and reported, and the loop carries on.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    out: &mut W,
) -> io::Result<()> {
    write_prompt(session, out)?;

    let mut buf = Vec::new();
    while let Some(line) = read_line(&mut input, &mut buf)? {

        let reply = match panic::catch_unwind(AssertUnwindSafe(|| session.feed(&line))) {
            Ok(reply) => reply,
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown failure".to_string());
                tracing::error!(line = %line, reason = %reason, "Command panicked");
                Reply::Text(format!("Error executing command: {}", reason))
            }
        };

        match reply {
            Reply::Text(text) => {
                if !text.is_empty() {
                    writeln!(out, "{}", text)?;
                }
            }
            Reply::ClearScreen => {
                execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
            }
            Reply::Exit(message) => {
                writeln!(out, "{}", message)?;
                out.flush()?;
                tracing::info!("Session ended by user");
                return Ok(());
            }
        }

        write_prompt(session, out)?;
    }

    if session.is_editing() {
        tracing::warn!("Input closed while editing; unsaved lines discarded");
    }
    writeln!(out)?;
    tracing::info!("Input closed");
    Ok(())
}
