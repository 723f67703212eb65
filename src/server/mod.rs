use std::io::{self, BufRead, Write};

use crate::session::Session;

pub mod client;
pub mod handlers;
pub mod rpc;

/// Serve line-delimited requests until end of input. Stdout carries responses only.
pub fn run_stdio(session: &mut Session) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve_lines(session, stdin.lock(), stdout.lock())
}

/// One response line per non-blank request line, flushed immediately.
pub fn serve_lines<R: BufRead, W: Write>(
    session: &mut Session,
    mut reader: R,
    mut writer: W,
) -> io::Result<()> {
    tracing::info!("worker ready on stdio");
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Invalid UTF-8 is replaced so the line still gets a parse-error response.
        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            continue;
        }
        let response = handlers::handle_line(session, &line);
        writer.write_all(response.to_line().as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    tracing::info!("input closed, worker exiting");
    Ok(())
}
