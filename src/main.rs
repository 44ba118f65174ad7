//! Interactive menu frontend for the election registry.
//!
//! This is the presentation layer: it prompts, parses menu choices, and
//! renders the registry's return values. Every mutating decision is made by
//! the library; errors come back as values and are printed, never fatal.

use std::io::{self, ErrorKind, Write};

use clap::{Arg, ArgAction, Command};
use log::{error, info};

use ballotbox::error::{Error, Result};
use ballotbox::model::registry::ElectionRegistry;
use ballotbox::store::Store;

const PROGRAM_NAME: &str = "ballotbox";

const ABOUT_TEXT: &str =
    "Manage elections, candidates, voters, and votes from an interactive menu.";

const DATA_FILE: &str = "DATA_FILE";

const DATA_FILE_HELP: &str = "Path of the JSON snapshot to load on startup and save to";

const DEFAULT_DATA_FILE: &str = "voting_data.json";

const MENU: &str = "\
==================================================
                BALLOTBOX MENU
==================================================
1. Create election
2. Select election
3. Add candidate
4. Register voter
5. Cast vote
6. View results
7. List elections
8. Close election
9. Save
0. Save and exit
==================================================";

/// Construct the CLI configuration.
fn cli() -> Command {
    clap::command!(PROGRAM_NAME).about(ABOUT_TEXT).arg(
        Arg::new(DATA_FILE)
            .long("data-file")
            .help(DATA_FILE_HELP)
            .action(ArgAction::Set)
            .default_value(DEFAULT_DATA_FILE),
    )
}

/// Read one trimmed line of input, failing with `UnexpectedEof` when input
/// has run dry (e.g. ctrl-D or a piped script ending).
fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_owned())
}

fn create_election(registry: &mut ElectionRegistry) -> Result<()> {
    let id = prompt("Enter election ID: ")?;
    let title = prompt("Enter election title: ")?;
    let description = prompt("Enter description (optional): ")?;
    registry.create_election(id, title.clone(), description)?;
    println!("Election '{title}' created and selected.");
    Ok(())
}

fn select_election(registry: &mut ElectionRegistry) -> Result<()> {
    list_elections(registry);
    let id = prompt("Enter election ID to select: ")?;
    registry.select_election(&id)?;
    println!(
        "Current election set to: {}",
        registry.current_election()?.title
    );
    Ok(())
}

fn add_candidate(registry: &mut ElectionRegistry) -> Result<()> {
    let id = prompt("Enter candidate ID: ")?;
    let name = prompt("Enter candidate name: ")?;
    let party = prompt("Enter party: ")?;
    let description = prompt("Enter description (optional): ")?;
    registry.add_candidate(id, name.clone(), party, description)?;
    println!("Candidate '{name}' added.");
    Ok(())
}

fn register_voter(registry: &mut ElectionRegistry) -> Result<()> {
    let id = prompt("Enter voter ID: ")?;
    let name = prompt("Enter voter name: ")?;
    let email = prompt("Enter voter email: ")?;
    registry.register_voter(id, name.clone(), email)?;
    println!("Voter '{name}' registered.");
    Ok(())
}

fn cast_vote(registry: &mut ElectionRegistry) -> Result<()> {
    let voter_id = prompt("Enter your voter ID: ")?;

    // Show the field before asking who to vote for.
    if let Ok(election) = registry.current_election() {
        println!("\nAvailable candidates:");
        for (id, candidate) in &election.candidates {
            println!("ID: {id} - {} ({})", candidate.name, candidate.party);
        }
    }

    let candidate_id = prompt("Enter candidate ID to vote for: ")?;
    registry.cast_vote(&voter_id, &candidate_id)?;
    if let Some(candidate) = registry.current_election()?.candidates.get(&candidate_id) {
        println!("Vote cast successfully for {}!", candidate.name);
    }
    Ok(())
}

/// Width of the results bar for a percentage: one block per two percent.
fn bar(percentage: f64) -> String {
    "\u{2588}".repeat((percentage / 2.0) as usize)
}

fn view_results(registry: &ElectionRegistry) -> Result<()> {
    let results = registry.results()?;
    let rule = "=".repeat(50);
    println!("\n{rule}");
    println!("ELECTION RESULTS: {}", results.title);
    println!("{rule}");
    println!("Total votes cast: {}", results.total_votes);
    println!("Registered voters: {}", results.total_registered);
    println!("Voter turnout: {}%", results.turnout_percentage);
    println!("{rule}");
    for (rank, candidate) in results.results.iter().enumerate() {
        println!("{}. {} ({})", rank + 1, candidate.name, candidate.party);
        println!("   Votes: {} ({}%)", candidate.votes, candidate.percentage);
        println!("   {}", bar(candidate.percentage));
        println!();
    }
    Ok(())
}

fn list_elections(registry: &ElectionRegistry) {
    let rule = "-".repeat(40);
    let mut any = false;
    println!("\nElections:");
    println!("{rule}");
    for summary in registry.list_elections() {
        any = true;
        let status = if summary.is_active { "ACTIVE" } else { "CLOSED" };
        let current = if summary.is_current { " (CURRENT)" } else { "" };
        println!("ID: {}", summary.id);
        println!("Title: {}", summary.title);
        println!("Status: {status}{current}");
        println!("Candidates: {}", summary.candidate_count);
        println!("Voters: {}", summary.voter_count);
        println!("Votes cast: {}", summary.vote_count);
        println!("{rule}");
    }
    if !any {
        println!("No elections found.");
    }
}

fn close_election(registry: &mut ElectionRegistry) -> Result<()> {
    registry.close_election()?;
    println!(
        "Election '{}' has been closed.",
        registry.current_election()?.title
    );
    Ok(())
}

/// The interactive session: load the snapshot, loop over menu choices, save
/// on exit. Only I/O failures propagate; domain errors are rendered and the
/// loop continues.
fn run(store: &Store) -> Result<()> {
    let mut registry = store.load_or_default();

    loop {
        println!("\n{MENU}");
        let choice = match prompt("Enter your choice (0-9): ") {
            Ok(choice) => choice,
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(err.into()),
        };

        let outcome = match choice.as_str() {
            "1" => create_election(&mut registry),
            "2" => select_election(&mut registry),
            "3" => add_candidate(&mut registry),
            "4" => register_voter(&mut registry),
            "5" => cast_vote(&mut registry),
            "6" => view_results(&registry),
            "7" => {
                list_elections(&registry);
                Ok(())
            }
            "8" => close_election(&mut registry),
            "9" => store.save(&registry).map(|()| {
                println!("Data saved to {}.", store.path().display());
            }),
            "0" => break,
            _ => {
                println!("Invalid choice! Please try again.");
                Ok(())
            }
        };

        match outcome {
            Ok(()) => {}
            Err(Error::Io(err)) if err.kind() == ErrorKind::UnexpectedEof => break,
            Err(err @ Error::Io(_)) => return Err(err),
            Err(err) => println!("{err}"),
        }
    }

    store.save(&registry)?;
    println!("Data saved to {}. Goodbye!", store.path().display());
    Ok(())
}

fn main() {
    // Set up logging.
    log4rs::init_file("log4rs.yaml", Default::default())
        .expect("Failed to initialise logging");
    info!("Initialised logging");

    let args = cli().get_matches();
    let data_file: &String = args.get_one(DATA_FILE).unwrap(); // Defaulted argument is guaranteed to be present.
    let store = Store::new(data_file);

    if let Err(err) = run(&store) {
        error!("{err}");
        eprintln!("Fatal: {err}");
        std::process::exit(1);
    }
}
