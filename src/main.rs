//! IntelliChat CLI driver.
//!
//! A thin read-eval-stream loop around the library: it refuses to start
//! without a stored credential, then streams each query, printing token
//! deltas as they arrive and stage transitions to stderr. Visual rendering
//! beyond plain text is out of scope here.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use color_eyre::eyre::eyre;
use color_eyre::Result;

use intellichat::adapters::{FileSessionStore, ReqwestHttpClient};
use intellichat::client::{ChatClient, DEFAULT_BASE_URL};
use intellichat::session::{ChatSession, SessionGate};
use intellichat::sse::StreamEvent;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the backend base URL.
const API_URL_ENV: &str = "INTELLICHAT_API_URL";

fn main() -> Result<()> {
    // Handle --version flag before any initialization
    if std::env::args().any(|arg| arg == "--version") {
        println!("intellichat {}", VERSION);
        return Ok(());
    }

    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let runtime = tokio::runtime::Runtime::new()?;

    // =========================================================
    // Pre-flight session check - no network call without a credential
    // =========================================================

    let store = FileSessionStore::new()
        .ok_or_else(|| eyre!("could not determine a home directory for session storage"))?;
    let gate = SessionGate::new(Arc::new(store));

    if let Err(err) = gate.authorize() {
        eprintln!("{}", err.user_message());
        std::process::exit(1);
    }
    if let Some(name) = gate.username() {
        println!("Signed in as {}", name);
    }

    let base_url =
        std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = ChatClient::with_base_url(base_url, Arc::new(ReqwestHttpClient::new()));

    let mut session = ChatSession::new(client, gate);
    session.set_observer(Box::new(|event| match event {
        StreamEvent::TokenDelta { text } => {
            print!("{}", text);
            let _ = io::stdout().flush();
        }
        StreamEvent::NodeTransition { name: Some(name) } => {
            eprintln!("[stage: {}]", name);
        }
        _ => {}
    }));

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query == "/quit" || query == "/exit" {
            break;
        }

        match runtime.block_on(session.submit(query)) {
            Ok(_) => println!(),
            Err(err) => {
                eprintln!("{}", err.user_message());
                if err.requires_reauth() {
                    break;
                }
            }
        }
    }

    Ok(())
}
