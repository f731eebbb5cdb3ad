use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use growth_os::collab::{
    LocalIdentity, MemoryProfile, Notifier, NullNotifier, Persona, SmtpConfig, SmtpNotifier,
};
use growth_os::config::ProgramConfig;
use growth_os::content::Catalog;
use growth_os::engine::ProgramEngine;
use growth_os::error::Error;
use growth_os::store::JsonFileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ProgramConfig::from_env();

    let user_id = std::env::var("GROWTH_OS_USER").unwrap_or_else(|_| "local".to_string());
    let user_name = std::env::var("GROWTH_OS_USER_NAME").unwrap_or_else(|_| "Operator".to_string());
    let mut identity = LocalIdentity::new(user_id.clone(), user_name);
    if let Ok(email) = std::env::var("GROWTH_OS_EMAIL") {
        identity = identity.with_email(email);
    }

    let notifier: Arc<dyn Notifier> = match SmtpConfig::from_env() {
        Some(smtp) => {
            eprintln!("   Notifications: SMTP via {}", smtp.host);
            Arc::new(SmtpNotifier::new(smtp))
        }
        None => Arc::new(NullNotifier),
    };

    eprintln!("📦 Growth OS v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Data: {}", config.data_root.display());
    eprintln!("   User: {}", user_id);
    eprintln!("   Commands: tracks, open <card>, strategy <card>, persona <goal>, claim <track>, quit\n");

    let store = Arc::new(JsonFileStore::new(&config.data_root, &user_id));
    let mut engine = ProgramEngine::new(
        Arc::new(Catalog::builtin()),
        store,
        Arc::new(identity),
        Arc::new(MemoryProfile::new()),
        notifier,
    )
    .await;

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    if engine.needs_persona_prompt().await.unwrap_or(false) {
        eprintln!("Pick your goal first: ugc, influencer, viral or seller.");
    }

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            eprint!("> ");
            continue;
        }

        let (cmd, arg) = match line.split_once(' ') {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line.as_str(), ""),
        };

        match cmd {
            "quit" | "exit" => break,
            "tracks" => print_tracks(&engine),
            "open" => {
                if let Err(e) = run_dialogue(&mut engine, arg, &config, &mut lines).await {
                    eprintln!("{}", e);
                }
            }
            "strategy" => print_strategy(&engine, arg),
            "persona" => match arg.parse::<Persona>() {
                Ok(persona) => match engine.select_persona(persona).await {
                    Ok(()) => eprintln!("Goal set: {}", persona),
                    Err(e) => eprintln!("{}", e),
                },
                Err(e) => eprintln!("{}", e),
            },
            "claim" => {
                if engine.claim_achievement(arg).await {
                    eprintln!("Achievement claimed for track {}", arg);
                } else {
                    eprintln!("Track {} is not fully completed (or already claimed)", arg);
                }
            }
            other => eprintln!("Unknown command: {}", other),
        }
        eprint!("> ");
    }

    Ok(())
}

fn print_tracks(engine: &ProgramEngine) {
    for track in engine.catalog().tracks() {
        let status = if engine.is_track_active(&track.id) {
            format!("{}/{}", engine.completed_in(track), track.cards.len())
        } else {
            "inactive".to_string()
        };
        println!("\n{} — {} [{}]", track.title, track.description, status);
        for card in &track.cards {
            let marker = if engine.is_completed(&card.id) {
                "✓"
            } else if engine.is_unlocked(&card.id) {
                "○"
            } else {
                "🔒"
            };
            println!("  {} {:4} {} — {}", marker, card.id, card.card_title, card.card_subtitle);
        }
    }
    println!();
}

fn print_strategy(engine: &ProgramEngine, card_id: &str) {
    match engine.strategy_for(card_id) {
        Some(saved) => {
            println!("\nAnswers: {}", saved.responses.join(" | "));
            match &saved.final_strategy {
                Some(strategy) => println!("\n{}\n", strategy),
                None => println!("(no synthesis recorded)\n"),
            }
        }
        None => println!("No saved run for {}\n", card_id),
    }
}

/// Run one card's dialogue to completion (or until the user types /exit).
/// Input is only read after the pending reply has been printed, and each
/// reply is delayed by the configured typing pause.
async fn run_dialogue(
    engine: &mut ProgramEngine,
    card_id: &str,
    config: &ProgramConfig,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<(), Error> {
    let mut session = engine.open_dialogue(card_id)?;

    // The opening turn was already produced by open().
    if let Some(entry) = session.transcript().last() {
        tokio::time::sleep(config.typing_delay).await;
        println!("\n{}\n", entry.text);
    }

    while !session.is_complete() {
        eprint!("{}> ", card_id);
        let Some(line) = lines.next_line().await.ok().flatten() else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/exit" {
            eprintln!("Dialogue discarded.");
            return Ok(());
        }
        let turn = engine.submit(&mut session, input).await?;
        tokio::time::sleep(config.typing_delay).await;
        println!("\n{}\n", turn.text);
    }

    if session.is_complete() {
        eprintln!("Protocol {} complete. Strategy saved.", card_id);
    }
    Ok(())
}
