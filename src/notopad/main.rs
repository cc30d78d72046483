use chrono::{DateTime, Utc};
use clap::Parser;
use colored::*;
use notopad::api::{CmdMessage, CmdResult, ConfigAction, DocumentView, MessageLevel, NotopadApi};
use notopad::error::Result;
use notopad::highlight::{Token, TokenKind};
use notopad::init::initialize;
use notopad::search::Match;
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "notopad=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut api = NotopadApi::new(initialize()?);

    let outcome = match cli.command {
        Some(Commands::New { file }) => handle_document(api.new_file(&file)),
        Some(Commands::Stats { file }) => handle_document(api.open(&file)),
        Some(Commands::Find { file, query, flags }) => {
            handle_find(api.find(&file, &query, flags.into()))
        }
        Some(Commands::Replace {
            file,
            query,
            replacement,
            flags,
        }) => handle_document(api.replace(&file, &query, &replacement, flags.into())),
        Some(Commands::Export { file, out }) => handle_document(api.export_pdf(&file, &out)),
        Some(Commands::Highlight { file }) => handle_highlight(api.highlight(&file)),
        Some(Commands::Recent { clear }) => handle_recent(api.recent(clear)),
        Some(Commands::Recover { file }) => handle_document(api.recover(&file)),
        Some(Commands::Config { key, value }) => handle_config(&mut api, key, value),
        None => match cli.file {
            Some(file) => handle_document(api.open(&file)),
            None => handle_recent(api.recent(false)),
        },
    };

    api.shutdown();
    outcome
}

fn handle_document(result: Result<CmdResult>) -> Result<()> {
    let result = result?;
    if let Some(doc) = &result.document {
        print_document(doc);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_find(result: Result<CmdResult>) -> Result<()> {
    let result = result?;
    let content = result.content.as_deref().unwrap_or_default();
    print_matches(content, &result.matches);
    print_messages(&result.messages);
    Ok(())
}

fn handle_highlight(result: Result<CmdResult>) -> Result<()> {
    let result = result?;
    let content = result.content.as_deref().unwrap_or_default();
    print_highlighted(content, &result.tokens);
    print_messages(&result.messages);
    Ok(())
}

fn handle_recent(result: Result<CmdResult>) -> Result<()> {
    let result = result?;
    for (i, path) in result.paths.iter().enumerate() {
        print_recent_entry(i + 1, path);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(
    api: &mut NotopadApi<notopad::store::fs::FileTextStore>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
        (Some(k), None) => ConfigAction::Get(k),
        (None, _) => ConfigAction::ShowAll,
    };
    let result = api.config(action)?;
    for (key, value) in &result.config_values {
        println!("{} = {}", key.bold(), value);
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_document(doc: &DocumentView) {
    println!("{}", doc.title.bold());
    println!("{}", doc.stats.status_line().dimmed());
    if let Some(at) = doc.last_backup {
        println!("{}", format!("Backed up {}", format_time_ago(at)).dimmed());
    }
}

fn print_recent_entry(n: usize, path: &Path) {
    let marker = if path.exists() {
        "".normal()
    } else {
        " (missing)".red()
    };
    println!("{:>2}. {}{}", n.to_string().yellow(), path.display(), marker);
}

fn print_matches(content: &str, matches: &[Match]) {
    for m in matches {
        let line_start = content[..m.range.start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = content[m.range.end..]
            .find('\n')
            .map_or(content.len(), |i| m.range.end + i);
        println!(
            "{}:{}  {}{}{}",
            m.line.to_string().yellow(),
            m.column.to_string().yellow(),
            &content[line_start..m.range.start],
            content[m.range.clone()].bold().red(),
            &content[m.range.end..line_end]
        );
    }
}

fn print_highlighted(content: &str, tokens: &[Token]) {
    let mut pos = 0;
    let mut out = String::with_capacity(content.len());
    for token in tokens {
        if token.range.start < pos {
            continue;
        }
        out.push_str(&content[pos..token.range.start]);
        let text = &content[token.range.clone()];
        let colored = match token.kind {
            TokenKind::Keyword => text.blue().bold(),
            TokenKind::String => text.green(),
            TokenKind::Comment => text.bright_black(),
        };
        out.push_str(&colored.to_string());
        pos = token.range.end;
    }
    out.push_str(&content[pos..]);
    println!("{}", out);
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}
