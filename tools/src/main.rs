//! fireroom-runner: headless driver for the fire room.
//!
//! Usage:
//!   fireroom-runner --seed 12345
//!   fireroom-runner --seed 12345 --config game.json
//!   fireroom-runner --seed 12345 --ipc-mode
//!
//! IPC lines (one JSON object each, one reply line each):
//!   {"type":"command","cmd":"add_fuel"}      -> {"events":[...],"state":{...}}
//!   {"type":"advance","millis":1000}         -> same; at most one hour per line
//!   {"type":"get_state"}                     -> same
//!   {"type":"resource","name":"wood"}        -> {"name":"wood","count":5}
//!   {"type":"building","name":"hut"}         -> {"name":"hut","count":1}
//!   {"type":"quit"}
//! Malformed or rejected lines reply {"error":"..."}.

use anyhow::Result;
use fireroom_core::{
    command::PlayerCommand,
    config::GameConfig,
    engine::GameEngine,
    error::GameResult,
    event::GameEvent,
    snapshot::GameSnapshot,
    types::{Building, Millis, Resource},
};
use std::cell::RefCell;
use std::env;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Advance {
        millis: Millis,
    },
    Command {
        #[serde(flatten)]
        command: PlayerCommand,
    },
    Resource {
        name: String,
    },
    Building {
        name: String,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct CountReply {
    name:  String,
    count: u32,
}

#[derive(serde::Serialize)]
struct IpcReply {
    events: Vec<GameEvent>,
    state:  GameSnapshot,
}

type EventLog = Rc<RefCell<Vec<GameEvent>>>;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());

    let config = match config_path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if !ipc_mode {
        println!("A Fire Room: fireroom-runner");
        println!("  seed:      {seed}");
        println!("  config:    {}", config_path.unwrap_or("(defaults)"));
        println!();
    }

    let mut engine = GameEngine::new(config, seed);
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    engine.bus().subscribe_all(move |e| sink.borrow_mut().push(e.clone()));

    engine.start()?;

    if ipc_mode {
        run_ipc_loop(&mut engine, &log)?;
    } else {
        run_scripted_session(&mut engine, &log)?;
        print_summary(&engine);
    }

    Ok(())
}

fn run_ipc_loop(engine: &mut GameEngine, log: &EventLog) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("rejected ipc line: {e}");
                reply_error(&mut stdout, &e)?;
                continue;
            }
        };

        let outcome = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Advance { millis } => engine.try_advance(millis).map(|_| ()),
            IpcCommand::GetState => Ok(()),
            IpcCommand::Command { command } => engine.apply(command),
            IpcCommand::Resource { name } => {
                let count = engine.resource_named(&name);
                reply_count(&mut stdout, name, count)?;
                continue;
            }
            IpcCommand::Building { name } => {
                let count = engine.building_named(&name);
                reply_count(&mut stdout, name, count)?;
                continue;
            }
        };
        if let Err(e) = outcome {
            reply_error(&mut stdout, &e)?;
            continue;
        }

        let reply = IpcReply {
            events: log.borrow_mut().drain(..).collect(),
            state:  engine.snapshot(),
        };
        writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn reply_error(out: &mut impl Write, err: &dyn std::fmt::Display) -> Result<()> {
    let err_json = serde_json::json!({ "error": err.to_string() });
    writeln!(out, "{}", err_json)?;
    out.flush()?;
    Ok(())
}

fn reply_count(out: &mut impl Write, name: String, count: GameResult<u32>) -> Result<()> {
    match count {
        Ok(count) => {
            writeln!(out, "{}", serde_json::to_string(&CountReply { name, count })?)?;
            out.flush()?;
            Ok(())
        }
        Err(e) => reply_error(out, &e),
    }
}

/// Start, light the fire, sit through the story, then gather and build.
fn run_scripted_session(engine: &mut GameEngine, log: &EventLog) -> Result<()> {
    let intro_delay = engine.config().start.intro_delay;
    engine.advance(intro_delay);
    print_events(engine, log);

    engine.apply(PlayerCommand::AddFuel)?;
    let reached = engine.run_until_idle(300_000);
    log::debug!("story finished at t={reached}ms");
    print_events(engine, log);

    for _ in 0..12 {
        engine.apply(PlayerCommand::ChopWood)?;
    }
    print_events(engine, log);

    let script = [
        PlayerCommand::BuildCart,
        PlayerCommand::ChopWood,
        PlayerCommand::ChopWood,
        PlayerCommand::BuildHut,
        PlayerCommand::BuildTrap,
        PlayerCommand::BuildTrap,
        PlayerCommand::CheckTraps,
        PlayerCommand::AddFuel,
    ];
    for command in script {
        engine.apply(command)?;
        print_events(engine, log);
    }

    engine.advance(60_000);
    print_events(engine, log);
    Ok(())
}

fn print_events(engine: &GameEngine, log: &EventLog) {
    let now = engine.now();
    for event in log.borrow_mut().drain(..) {
        match event {
            GameEvent::Message { text } => println!("[{now:>7}ms] {text}"),
            GameEvent::ResourcesChanged { resources } => {
                println!("[{now:>7}ms]   stock: {resources:?}")
            }
            GameEvent::BuildingsChanged { buildings } => {
                println!("[{now:>7}ms]   buildings: {buildings:?}")
            }
            GameEvent::PhaseChanged { settlement } => {
                println!("[{now:>7}ms]   settlement: {settlement}")
            }
            GameEvent::SceneChanged { scene } => println!("[{now:>7}ms]   scene: {scene}"),
        }
    }
}

fn print_summary(engine: &GameEngine) {
    let snapshot = engine.snapshot();

    println!();
    println!("=== RUN SUMMARY ===");
    println!("  final time:     {}ms", snapshot.now);
    println!("  settlement:     {}", snapshot.settlement);
    println!("  room:           {} (heat {})", snapshot.room_status, snapshot.room_heat);
    println!("  timers:         {:?}", snapshot.room_timers);
    for resource in Resource::ALL {
        println!("  {:<15} {}", format!("{resource}:"), engine.resource(resource));
    }
    for building in Building::ALL {
        println!("  {:<15} {}", format!("{building}s:"), engine.building(building));
    }
    println!("  population cap: {}", snapshot.population_capacity);
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
