use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tileslide_worker::{Host, JsonFileStore, KvStore, MemoryStore};
use web_time::Instant;

mod app;
mod client;
mod clock;
mod command;
mod render;
mod settings;

use app::{App, Flow};
use command::Command;
use settings::Settings;

#[derive(Parser, Debug)]
#[command(version, about = "Tile Slide: push every tile into a hole", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Post the level and leaderboard belong to
    #[arg(long, default_value = "local")]
    post_id: String,

    /// Player name reported by the host
    #[arg(short, long)]
    username: Option<String>,

    /// JSON file keeping levels and scores between runs, in memory when absent
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("{:?}", args);

    let settings = Settings::load(args.config.as_deref())?;
    let store: Box<dyn KvStore> = match &args.store {
        Some(path) => Box::new(JsonFileStore::open(path)?),
        None => Box::new(MemoryStore::new()),
    };
    let host = Host::new(args.post_id, args.username, store);

    let mut app = App::new(host, &settings, Instant::now())?;
    log::debug!("started as {}", app.client().username());
    run(&mut app)
}

fn run<S: KvStore>(app: &mut App<S>) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    writeln!(stdout, "Tile Slide, type help for commands")?;
    app.execute(Command::Menu, Instant::now(), &mut stdout)?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(stdout, "{}", err)?;
                continue;
            }
        };

        match app.execute(command, Instant::now(), &mut stdout) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => return Ok(()),
            Err(err) => {
                log::debug!("command failed: {:?}", err);
                writeln!(stdout, "{}", err)?;
            }
        }
    }
}
