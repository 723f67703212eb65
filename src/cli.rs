use crate::config::Settings;
use crate::data::cache::LATEST_VERSION;
use crate::error::AdvisorError;
use crate::server;
use crate::session::Session;

const USAGE: &str = "usage: draftwise <serve|plan|fetch>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Plan,
    Fetch,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("plan") => Some(Command::Plan),
        Some("fetch") => Some(Command::Fetch),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    if command == Command::Plan && plan_text(args).is_none() {
        eprintln!("usage: draftwise plan \"<free text matchup>\"");
        return 2;
    }

    let session = Settings::from_env().and_then(|settings| Session::from_settings(&settings));
    let mut session = match session {
        Ok(session) => session,
        Err(err) => {
            eprintln!("startup failed: {err}");
            return 1;
        }
    };

    match command {
        Command::Serve => handle_serve(&mut session),
        Command::Plan => handle_plan(&mut session, args),
        Command::Fetch => handle_fetch(&mut session, args),
    }
}

/// Everything after `plan`, joined, so unquoted sentences work too.
fn plan_text(args: &[String]) -> Option<String> {
    let text = args.get(2..)?.join(" ");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn handle_serve(session: &mut Session) -> i32 {
    match server::run_stdio(session) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("worker error: {err}");
            1
        }
    }
}

fn handle_plan(session: &mut Session, args: &[String]) -> i32 {
    let text = plan_text(args).unwrap_or_default();
    let outcome = session
        .fetch_static_data(Some(LATEST_VERSION), None)
        .and_then(|_| session.extract_matchup(&text))
        .and_then(|matchup| session.plan_build(matchup))
        .and_then(|report| serde_json::to_string_pretty(&report).map_err(AdvisorError::from));
    match outcome {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("plan failed: {err}");
            1
        }
    }
}

fn handle_fetch(session: &mut Session, args: &[String]) -> i32 {
    let version = args.get(2).map(String::as_str).unwrap_or(LATEST_VERSION);
    match session.fetch_static_data(Some(version), None) {
        Ok(summary) => {
            println!(
                "catalog ready: version={}, lang={}, entities={}",
                summary.version, summary.lang, summary.entities
            );
            0
        }
        Err(err) => {
            eprintln!("fetch failed: {err}");
            1
        }
    }
}
