//! Interactive chat mode for pdfchat
//!
//! Line-based loop: stage PDFs, run /process, then ask questions about
//! them. Anything that does not start with '/' is treated as a question.

use anyhow::Result;
use colored::*;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::error::ChatError;
use crate::extract::PdfDocument;
use crate::llm::{Message, Role};
use crate::progress::ProgressReporter;
use crate::session::Session;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command definition with name and description
struct Command {
    name: &'static str,
    description: &'static str,
}

const COMMANDS: &[Command] = &[
    Command { name: "/add", description: "Stage PDF files for processing" },
    Command { name: "/process", description: "Extract, chunk and index staged PDFs" },
    Command { name: "/docs", description: "List staged files" },
    Command { name: "/history", description: "Show the conversation so far" },
    Command { name: "/clear", description: "Clear screen" },
    Command { name: "/help", description: "Show this help" },
    Command { name: "/exit", description: "Exit" },
];

/// Print the welcome banner
fn print_banner(session: &Session) {
    println!();
    println!(
        "  {} v{}  {}",
        "pdfchat".green().bold(),
        VERSION,
        "Chat with your PDFs".dimmed()
    );
    println!(
        "  {} {}  {} {}",
        "embeddings:".dimmed(),
        session.config().embedding_model.white(),
        "model:".dimmed(),
        session.config().llm_model.white()
    );
    println!();
    println!(
        "  {} {}  then  {}",
        "Start with".dimmed(),
        "/add <file.pdf>".white(),
        "/process".white()
    );
    println!("  Type {} for all commands.", "/help".yellow());
    println!();
}

/// Render one dialogue turn; the role follows purely from its position.
fn render_turn(position: usize, msg: &Message) {
    debug_assert_eq!(
        msg.role,
        if position % 2 == 0 { Role::User } else { Role::Assistant }
    );
    if position % 2 == 0 {
        println!("{} {}", "You:".green().bold(), msg.content);
    } else {
        println!("{} {}", "Assistant:".cyan().bold(), msg.content);
    }
}

fn render_history(session: &Session) {
    if session.history().is_empty() {
        println!("{}", "No conversation yet.".dimmed());
        return;
    }
    for (i, msg) in session.history().iter().enumerate() {
        render_turn(i, msg);
    }
}

/// Run the interactive chat loop. `initial` files are staged up front.
pub async fn run_chat(mut session: Session, initial: Vec<PdfDocument>) -> Result<()> {
    let mut staged = initial;

    print_banner(&session);
    if !staged.is_empty() {
        println!(
            "  {} {} file(s) staged from the command line",
            "·".dimmed(),
            staged.len().to_string().white()
        );
        println!();
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", ">".green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let input = input.trim().to_string();
        if input.is_empty() {
            continue;
        }

        if input.starts_with('/') {
            if handle_command(&input, &mut session, &mut staged).await? {
                println!("{}", "Goodbye!".cyan());
                break;
            }
        } else {
            // A question
            match session.ask(&input).await {
                Ok(_) => {
                    // Re-render the whole transcript, like the turn display
                    // of a chat page
                    render_history(&session);
                }
                Err(ChatError::NotReady) => {
                    println!(
                        "{}",
                        "No documents processed yet. Stage PDFs with /add, then run /process."
                            .yellow()
                    );
                }
                Err(e) => {
                    println!("{} {}", "Error:".red().bold(), e);
                }
            }
        }

        println!(); // Empty line after output
    }

    Ok(())
}

/// Handle slash commands. Returns true if should exit.
async fn handle_command(
    input: &str,
    session: &mut Session,
    staged: &mut Vec<PdfDocument>,
) -> Result<bool> {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let args = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd.as_str() {
        "/exit" | "/quit" | "/q" => {
            return Ok(true);
        }
        "/help" | "/h" | "/?" => {
            println!("{}", "Commands:".green().bold());
            println!();
            println!(
                "  {}        {}",
                "<question>".dimmed(),
                "Ask about your processed documents".white()
            );
            println!();
            for cmd in COMMANDS {
                println!(
                    "  {}  {}",
                    format!("{:<12}", cmd.name).dimmed(),
                    cmd.description.white()
                );
            }
        }
        "/clear" => {
            print!("\x1B[2J\x1B[1;1H");
            io::stdout().flush()?;
        }
        "/add" | "/a" => {
            if args.is_empty() {
                println!("{}", "Usage: /add <file.pdf> [more.pdf ...]".yellow());
            } else {
                for raw in args.split_whitespace() {
                    match PdfDocument::from_path(Path::new(raw)) {
                        Ok(doc) => {
                            println!("{} {}", "Staged".green().bold(), doc.name.white());
                            staged.push(doc);
                        }
                        Err(e) => {
                            println!("{} {}", "Error:".red().bold(), e);
                        }
                    }
                }
            }
        }
        "/docs" | "/d" => {
            if staged.is_empty() {
                println!("{}", "No files staged. Use /add to stage PDFs.".yellow());
            } else {
                println!("{}", "Staged files:".green().bold());
                for doc in staged.iter() {
                    println!(
                        "  {}  {}",
                        doc.name.white().bold(),
                        format!("{} bytes", doc.bytes.len()).dimmed()
                    );
                }
            }
        }
        "/process" | "/p" => {
            if staged.is_empty() {
                println!("{}", "Nothing to process. Stage PDFs with /add first.".yellow());
            } else {
                let mut progress = ProgressReporter::new();
                match session.process(staged, &mut progress).await {
                    Ok(report) => {
                        println!(
                            "{} {} document(s), {} chunks indexed. Ask away!",
                            "Ready:".green().bold(),
                            report.documents.to_string().white(),
                            report.chunks.to_string().yellow()
                        );
                    }
                    Err(e) => {
                        println!("{} {}", "Error:".red().bold(), e);
                    }
                }
            }
        }
        "/history" => {
            render_history(session);
        }
        _ => {
            println!("{} Unknown command: {}", "Error:".red().bold(), cmd);
            println!("Type {} for available commands.", "/help".yellow());
        }
    }

    Ok(false)
}
