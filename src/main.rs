use std::io::{self, BufRead, Write};
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use quickrun::config::load_config;
use quickrun::executor;
use quickrun::model::{Candidate, Origin};
use quickrun::sources::FileSystem;
use quickrun::state::{Commit, NavigationController};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the candidates for an input
    Query { text: String },
    /// Type an input and press Enter: launch or descend
    Run { text: String },
    /// Launch an existing file by path, ignoring candidates
    Launch { path: String },
    /// Set a display alias on a history entry
    Alias { path: String, name: String },
    /// Remove a history entry
    Forget { path: String },
    /// List history, most used first
    History,
    /// Line-driven session: text lines replace the input, :up :down :tab :enter :exit
    Interactive,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config()?;
    let mut engine = quickrun::build_engine(&config);

    match args.command.unwrap_or(Command::Interactive) {
        Command::Query { text } => {
            engine.on_input_changed(&text);
            print_candidates(&engine);
        }
        Command::Run { text } => {
            engine.on_input_changed(&text);
            let commit = engine.commit();
            report_warnings(&mut engine);
            match commit {
                Commit::Launch(request) => executor::launch(&request)?,
                Commit::Descend(text) => println!("{}", text),
                Commit::Nothing => bail!("nothing to launch for {:?}", text),
            }
        }
        Command::Launch { path } => {
            let commit = engine.commit_path(&path);
            report_warnings(&mut engine);
            match commit {
                Commit::Launch(request) => executor::launch(&request)?,
                _ => bail!("not an existing file: {:?}", path),
            }
        }
        Command::Alias { path, name } => {
            engine.rename(&path, &name)?;
            report_warnings(&mut engine);
        }
        Command::Forget { path } => {
            engine.delete(&path)?;
            report_warnings(&mut engine);
        }
        Command::History => {
            for entry in engine.resolver().history().search("") {
                let alias = entry.alias.as_deref().map(|a| format!(" [{}]", a)).unwrap_or_default();
                println!("{:>5}  {}{}", entry.use_count, entry.path, alias);
            }
        }
        Command::Interactive => interactive(&mut engine)?,
    }

    Ok(())
}

fn interactive<F: FileSystem>(engine: &mut NavigationController<F>) -> Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match line.as_str() {
            ":exit" => break,
            ":up" => {
                engine.move_selection(-1);
            }
            ":down" => {
                engine.move_selection(1);
            }
            ":tab" => {
                if let Some(text) = engine.autocomplete() {
                    println!("> {}", text);
                }
            }
            ":enter" => {
                if is_quit_command(engine.input()) {
                    break;
                }
                match engine.commit() {
                    Commit::Launch(request) => {
                        if let Err(e) = executor::launch(&request) {
                            eprintln!("Error: {}", e);
                        }
                    }
                    Commit::Descend(text) => println!("> {}", text),
                    Commit::Nothing => {}
                }
            }
            ":delete" => {
                if let Some(path) = selected_history_path(engine) {
                    if let Err(e) = engine.delete(&path) {
                        eprintln!("Error: {}", e);
                    }
                }
            }
            other => match other.strip_prefix(":rename ") {
                Some(alias) => {
                    if let Some(path) = selected_history_path(engine) {
                        if let Err(e) = engine.rename(&path, alias) {
                            eprintln!("Error: {}", e);
                        }
                    }
                }
                None => {
                    engine.on_input_changed(other);
                }
            },
        }
        report_warnings(engine);
        print_candidates(engine);
        io::stdout().flush()?;
    }
    Ok(())
}

fn is_quit_command(input: &str) -> bool {
    let input = input.trim();
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("/exit")
}

fn selected_history_path<F: FileSystem>(engine: &NavigationController<F>) -> Option<String> {
    engine
        .selected()
        .filter(|c| c.is_history())
        .map(|c| c.target_path.clone())
}

fn print_candidates<F: FileSystem>(engine: &NavigationController<F>) {
    for (i, candidate) in engine.candidates().iter().enumerate() {
        let marker = if engine.selection() == Some(i) { '>' } else { ' ' };
        println!("{} {:<32} {:<10} {}", marker, candidate.display_text, tag(candidate), candidate.target_path);
    }
}

fn tag(candidate: &Candidate) -> &'static str {
    match (candidate.origin, candidate.aliased, candidate.kind.is_directory()) {
        (Origin::History, true, _) => "(alias)",
        (Origin::History, false, _) => "(history)",
        (Origin::Filesystem, _, true) => "<dir>",
        (Origin::Filesystem, _, false) => "",
    }
}

fn report_warnings<F: FileSystem>(engine: &mut NavigationController<F>) {
    for warning in engine.take_warnings() {
        eprintln!("Warning: {}", warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_accepts_both_spellings_in_any_case() {
        assert!(is_quit_command("exit"));
        assert!(is_quit_command("EXIT"));
        assert!(is_quit_command("/exit"));
        assert!(is_quit_command(" /Exit "));
        assert!(!is_quit_command("exiting"));
        assert!(!is_quit_command("\\exit"));
    }
}
