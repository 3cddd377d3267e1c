mod logging;

use anyhow::Result;
use clap::Parser;
use humanity_core::{HumanityConfig, Role};
use humanity_limbic::IdleThoughts;
use humanity_memory::ConversationStore;
use humanity_reasoning::{CognitiveCycle, ControlCommand, TurnKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Map};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

const IDLE_TICK: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "humanity", author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = "HUMANITY_CONFIG", default_value = "humanity.toml")]
    config: PathBuf,

    /// Resume (or start) the conversation with this id
    #[arg(long)]
    conversation: Option<String>,

    /// Ignore any configured backend and answer with canned replies
    #[arg(long)]
    no_llm: bool,

    /// Log an occasional idle thought while waiting for input
    #[arg(long)]
    idle_thoughts: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let mut config = HumanityConfig::load_or_default(&args.config);
    if args.no_llm {
        config.llm.provider = "none".to_string();
    }
    let _log_guard = logging::init(&config.log)?;

    info!("Initializing AI Humanity...");
    let mut store = ConversationStore::new(&config.memory.storage_dir, config.memory.max_history)?;
    let mut cycle = CognitiveCycle::from_config(&config)?;
    info!(
        "Safety mode: {}, backend: {}",
        config.safety.mode.as_str(),
        if cycle.has_backend() { config.llm.provider.as_str() } else { "offline" }
    );

    match args.conversation.as_deref() {
        Some(id) if store.load(id)? => {
            let turns = store.history(None, Some(config.memory.seed_turns));
            info!("Resuming conversation {} with {} turns", id, turns.len());
            cycle.seed_working_memory(turns);
        }
        Some(id) => {
            store.create_conversation(Some(id))?;
        }
        None => {
            store.create_conversation(None)?;
        }
    }

    if args.idle_thoughts {
        tokio::spawn(idle_loop());
    }

    println!("AI Humanity онлайн. Команды: /status, /reset, /skills, /state, /history. 'quit' для выхода.");
    prompt()?;

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let trimmed = input.trim();

        match trimmed {
            "quit" | "exit" => break,
            "" => {}
            "/skills" => println!("\n{}\n", cycle.skills().report()),
            "/state" => println!("\n{}\n", serde_json::to_string_pretty(&cycle.get_state())?),
            "/history" => println!("\n{}\n", store.context(None, 1000)),
            _ => {
                let reply = cycle.respond(trimmed).await;
                println!("\nAI: {}\n", reply.text);
                match reply.kind {
                    TurnKind::Dialogue { remembered } => {
                        let answer = remembered.then_some(reply.text.as_str());
                        record_turn(&mut store, &cycle, trimmed, answer);
                    }
                    TurnKind::Control(ControlCommand::Reset) => forget_history(&mut store),
                    TurnKind::Control(ControlCommand::Status) | TurnKind::Rejected => {}
                }
            }
        }
        prompt()?;
    }

    if let Err(e) = store.save(None) {
        error!("Failed to save conversation: {:#}", e);
    }
    info!("Goodbye after {} cycles", cycle.cycle_count());
    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

/// Append the exchange to the history store and persist it, mirroring what
/// entered working memory: `reply` is `None` when the cycle kept it out.
/// Storage failures are logged, never fatal to the session.
fn record_turn(
    store: &mut ConversationStore,
    cycle: &CognitiveCycle,
    input: &str,
    reply: Option<&str>,
) {
    let state = cycle.get_state();
    let mut meta = Map::new();
    meta.insert("emotion".into(), json!(state.dominant_emotion.as_str()));
    meta.insert("cycle".into(), json!(state.cycle_count));

    let result = store
        .add_message(Role::User, input, None, None)
        .and_then(|_| match reply {
            Some(reply) => store.add_message(Role::Assistant, reply, None, Some(meta)),
            None => Ok(()),
        })
        .and_then(|_| store.save(None));
    if let Err(e) = result {
        error!("Failed to record conversation turn: {:#}", e);
    }
}

/// `/reset` empties the stored conversation too, so resuming starts clean.
fn forget_history(store: &mut ConversationStore) {
    store.clear(None);
    if let Err(e) = store.save(None) {
        error!("Failed to save cleared conversation: {:#}", e);
    }
}

async fn idle_loop() {
    let mut idle = IdleThoughts::default();
    let mut rng = StdRng::from_entropy();
    let mut interval = tokio::time::interval(IDLE_TICK);
    // The first tick fires immediately.
    interval.tick().await;
    loop {
        interval.tick().await;
        if let Some(thought) = idle.tick(&mut rng) {
            info!("💭 {}", thought);
        }
    }
}
