//! Keepsake CLI - terminal host for the presentation
//!
//! Usage:
//!   keepsake                                # Interactive mode (stdin, real time)
//!   keepsake --script walkthrough.txt       # Scripted mode (virtual time)
//!   keepsake --config keepsake.json         # Override timings, letter, keys
//!   keepsake --script s.txt --json          # JSON output

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing_subscriber::EnvFilter;

use keepsake::config::PresentationConfig;
use keepsake::core::{Command, CommandParser, PresentationController, RecordingStage};
use keepsake::types::{EventOutcome, StageEffect};
use keepsake::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "keepsake",
    version = VERSION,
    about = "Keepsake - a guided, page-by-page gift presentation",
    long_about = "Keepsake walks one person through a fixed sequence of pages.\n\n\
                  Each page has a single heart that unlocks once the page is done:\n  \
                  gift    - open it\n  \
                  cards   - touch a card\n  \
                  clip    - watch to the end\n  \
                  cinema  - press play\n  \
                  future  - always open\n  \
                  letter  - read until typed out\n  \
                  finale  - the end\n\n\
                  Commands: gift, heart <n>, back, touch <n>, play <n>, ended <n>,\n\
                  key <Name>, wait <ms>, status, quit"
)]
struct Args {
    /// Run commands from a file with virtual time instead of stdin
    #[arg(short, long)]
    script: Option<String>,

    /// JSON config file (timings, letter, future items, key bindings)
    #[arg(short, long)]
    config: Option<String>,

    /// Simulate an environment that blocks audio autoplay
    #[arg(long)]
    block_autoplay: bool,

    /// Output as JSON lines
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let config = match &args.config {
        Some(path) => match PresentationConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(1);
            }
        },
        None => PresentationConfig::default(),
    };

    let mut stage = RecordingStage::new();
    if args.block_autoplay {
        stage.set_autoplay_blocked(true);
    }
    let controller = PresentationController::new(config, stage);
    let mut printer = Printer::new(&args);

    if let Some(ref path) = args.script {
        run_script(path, controller, &mut printer);
    } else {
        run_interactive(controller, &mut printer).await;
    }
}

/// tracing to stderr; RUST_LOG wins over --verbose
fn init_logging(verbose: bool) {
    let default = if verbose { "keepsake=debug" } else { "keepsake=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run a script file with virtual time
fn run_script(path: &str, mut controller: PresentationController<RecordingStage>, printer: &mut Printer) {
    let script = match std::fs::read_to_string(path) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("Cannot read script {}: {}", path, e);
            std::process::exit(1);
        }
    };
    let parser = CommandParser::new(controller.deck().len());
    let commands = match parser.parse_script(&script) {
        Ok(commands) => commands,
        Err(e) => {
            eprintln!("Script error in {}: {}", path, e);
            std::process::exit(1);
        }
    };

    printer.header("Script", &controller);
    printer.flush_stage(&mut controller);

    for command in commands {
        match command {
            Command::Event(event) => {
                let outcome = controller.handle(event);
                printer.flush_stage(&mut controller);
                printer.outcome(&outcome);
            }
            Command::Wait(ms) => {
                for outcome in controller.advance_clock(ms) {
                    printer.flush_stage(&mut controller);
                    printer.outcome(&outcome);
                }
                printer.flush_stage(&mut controller);
            }
            Command::Status => printer.status(&controller),
            Command::Quit => break,
        }
    }

    printer.status(&controller);
}

/// Run interactively: stdin commands, timers on the wall clock
async fn run_interactive(mut controller: PresentationController<RecordingStage>, printer: &mut Printer) {
    let parser = CommandParser::new(controller.deck().len());
    let start = Instant::now();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    printer.header("Interactive", &controller);
    println!("Type 'gift' to begin. Type 'quit' to exit.");
    println!();
    printer.flush_stage(&mut controller);

    loop {
        let deadline = controller
            .next_deadline()
            .map(|ms| start + Duration::from_millis(ms));

        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) | Err(_) => break,
                };
                catch_up(&mut controller, start, printer);
                match parser.parse(&line) {
                    Ok(Some(Command::Event(event))) => {
                        let outcome = controller.handle(event);
                        printer.flush_stage(&mut controller);
                        printer.outcome(&outcome);
                    }
                    Ok(Some(Command::Wait(_))) => {
                        println!("{}", "wait only applies to scripts".dimmed());
                    }
                    Ok(Some(Command::Status)) => printer.status(&controller),
                    Ok(Some(Command::Quit)) => break,
                    Ok(None) => {}
                    Err(e) => println!("{}", format!("⚠ {}", e).yellow()),
                }
            }
            _ = sleep_until(deadline) => {
                catch_up(&mut controller, start, printer);
            }
        }
    }

    printer.end_text();
    println!();
    println!("Session ended on page {}.", controller.current());
}

/// Fire every timer due by now
fn catch_up(controller: &mut PresentationController<RecordingStage>, start: Instant, printer: &mut Printer) {
    let now_ms = start.elapsed().as_millis() as u64;
    for outcome in controller.advance_clock_to(now_ms) {
        printer.flush_stage(controller);
        printer.outcome(&outcome);
    }
    printer.flush_stage(controller);
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

/// Renders effects and outcomes in the selected format
struct Printer {
    json: bool,
    no_color: bool,
    verbose: bool,
    /// Typed text is on the current line
    in_text: bool,
}

impl Printer {
    fn new(args: &Args) -> Self {
        Self {
            json: args.json,
            no_color: args.no_color,
            verbose: args.verbose,
            in_text: false,
        }
    }

    fn header(&self, mode: &str, controller: &PresentationController<RecordingStage>) {
        if self.json {
            return;
        }
        if self.no_color {
            println!("========================================");
            println!("  Keepsake v{} - {}", VERSION, mode);
            println!("========================================");
        } else {
            println!("{}", "╔════════════════════════════════════════╗".bold());
            println!("{}", format!("║  ♥ Keepsake v{} - {:<12}          ║", VERSION, mode).bold());
            println!("{}", "╚════════════════════════════════════════╝".bold());
        }
        for (i, page) in controller.deck().iter().enumerate() {
            println!("  {}. {:<7} {}", i, page.role.label(), page.title);
        }
        println!();
    }

    fn flush_stage(&mut self, controller: &mut PresentationController<RecordingStage>) {
        for effect in controller.stage_mut().drain() {
            self.effect(&effect);
        }
    }

    fn effect(&mut self, effect: &StageEffect) {
        if self.json {
            println!("{}", serde_json::to_string(effect).unwrap_or_default());
            return;
        }
        if let StageEffect::AppendText { ch, .. } = effect {
            print!("{}", ch);
            let _ = std::io::stdout().flush();
            self.in_text = true;
            return;
        }
        if !self.verbose && matches!(effect, StageEffect::Blur | StageEffect::Focus { .. }) {
            return;
        }
        self.end_text();
        if self.no_color {
            println!("{}", effect.to_parseable_string());
        } else {
            println!("{}", effect.to_terminal_string());
        }
    }

    fn outcome(&mut self, outcome: &EventOutcome) {
        if self.json {
            println!("{}", serde_json::to_string(outcome).unwrap_or_default());
            return;
        }
        if !self.verbose && outcome.reason == keepsake::types::ReasonCode::T003_TYPED {
            return;
        }
        self.end_text();
        if self.no_color {
            println!("{}", outcome.to_parseable_string());
        } else {
            println!("{}", outcome.to_terminal_string());
        }
    }

    fn status(&mut self, controller: &PresentationController<RecordingStage>) {
        let status = controller.status();
        if self.json {
            println!("{}", serde_json::to_string(&status).unwrap_or_default());
            return;
        }
        self.end_text();
        if self.no_color {
            println!("{}", status.to_parseable_string());
        } else {
            println!("{}", status.to_terminal_string());
        }
    }

    fn end_text(&mut self) {
        if self.in_text {
            println!();
            self.in_text = false;
        }
    }
}
