//! Name Forge - AI-powered startup name generation
//!
//! Serves the HTTP API, or runs a generation session right in the terminal.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Select, Text};
use name_forge::domain::{registrar_search_url, AvailabilityCheck};
use name_forge::llm::NameSource;
use name_forge::orchestrator::{RunPhase, SessionSnapshot};
use name_forge::server::{self, AppState};
use name_forge::{
    ApiClient, AppConfig, DomainChecker, DomainStatus, NameGenerator, Orchestrator, RunOutcome, Tone,
};
use std::io::IsTerminal;
use std::net::SocketAddr;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "name-forge", version, about = "AI-powered startup names with a domain availability sweep")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides NAME_FORGE_ADDR)
        #[arg(long)]
        addr: Option<SocketAddr>,

        #[command(flatten)]
        check: CheckArgs,
    },
    /// Generate names and sweep them through the availability check
    Generate {
        /// What the startup does
        description: Vec<String>,

        /// creative, luxury, playful, vcbait, magical, practical or inclusive
        #[arg(short, long)]
        tone: Option<String>,

        /// Use a running name-forge server instead of calling the model directly
        #[arg(long)]
        server: Option<String>,

        #[command(flatten)]
        check: CheckArgs,
    },
    /// Run the (simulated) availability check for a single name
    Check {
        name: String,

        #[command(flatten)]
        check: CheckArgs,
    },
}

#[derive(Args)]
struct CheckArgs {
    /// Artificial latency per check in milliseconds (overrides NAME_FORGE_CHECK_DELAY_MS)
    #[arg(long)]
    check_delay_ms: Option<u64>,
}

impl CheckArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(ms) = self.check_delay_ms {
            config.check.delay = Duration::from_millis(ms);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = name_forge::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    init_logging(cli.verbose, matches!(cli.command, Command::Serve { .. }));

    if let Err(e) = run(cli.command).await {
        match e.downcast_ref::<name_forge::NameForgeError>() {
            Some(err) => eprintln!("{}", err.user_message()),
            None => eprintln!("❌ Error: {:#}", e),
        }
        process::exit(1);
    }
}

fn init_logging(verbose: u8, serving: bool) {
    let filter = match verbose {
        0 if serving => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Command) -> Result<()> {
    let mut config = AppConfig::from_env()?;

    match command {
        Command::Serve { addr, check } => {
            check.apply(&mut config);
            if let Some(addr) = addr {
                config.addr = addr;
            }
            serve(config).await
        }
        Command::Generate {
            description,
            tone,
            server,
            check,
        } => {
            check.apply(&mut config);
            generate(config, description.join(" "), tone, server).await
        }
        Command::Check { name, check } => {
            check.apply(&mut config);
            check_one(config, &name).await
        }
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    let generator = NameGenerator::from_config(&config.llm).context("Failed to configure the LLM provider")?;
    let checker = DomainChecker::with_config(config.check.clone());

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;

    println!("🔥 Name Forge listening on http://{}", listener.local_addr()?);
    server::serve(listener, AppState::new(generator, checker), server::shutdown_signal()).await?;
    Ok(())
}

async fn check_one(config: AppConfig, name: &str) -> Result<()> {
    let checker = DomainChecker::with_config(config.check);
    let available = checker.check_domain(name).await?;

    if available {
        println!("✅ {} - AVAILABLE (simulated check)", name);
        println!("   🔗 {}", registrar_search_url(name));
    } else {
        println!("❌ {} - UNAVAILABLE (simulated check)", name);
    }
    Ok(())
}

async fn generate(
    config: AppConfig,
    description: String,
    tone: Option<String>,
    server_url: Option<String>,
) -> Result<()> {
    let interactive = std::io::stdin().is_terminal();

    let description = if description.trim().is_empty() && interactive {
        Text::new("What does your startup do?").prompt()?
    } else {
        description
    };
    if description.trim().is_empty() {
        bail!("A description is required, e.g. name-forge generate \"AI bookkeeping for bakeries\"");
    }

    let tone = match tone {
        Some(label) => Tone::from_label(&label),
        None if interactive => prompt_tone()?,
        None => Tone::default(),
    };

    let names: Arc<dyn NameSource>;
    let checker: Arc<dyn AvailabilityCheck>;
    match server_url {
        Some(url) => {
            let client = Arc::new(ApiClient::new(url)?);
            names = client.clone();
            checker = client;
        }
        None => {
            let generator = NameGenerator::from_config(&config.llm).context("Failed to configure the LLM provider")?;
            names = Arc::new(generator);
            checker = Arc::new(DomainChecker::with_config(config.check.clone()));
        }
    }

    println!("🔥 Name Forge - AI-powered startup names");
    println!("═══════════════════════════════════════");
    println!("🎯 {} ({})", description.trim(), tone.display_name());
    println!();

    let orchestrator = Orchestrator::new(names, checker);
    let mut rx = orchestrator.subscribe();
    let pending = orchestrator
        .start_with(description, tone)
        .context("Nothing to generate for an empty description")?;
    let task = tokio::spawn(pending.drive());

    let mut view = SweepView::new();
    loop {
        let snapshot = rx.borrow_and_update().clone();
        view.render(&snapshot);
        if !snapshot.is_generating {
            break;
        }
        if rx.changed().await.is_err() {
            break;
        }
    }
    view.finish();

    match task.await? {
        RunOutcome::Failed(e) => return Err(e.into()),
        RunOutcome::Completed { .. } => print_summary(&orchestrator.snapshot()),
        RunOutcome::Skipped | RunOutcome::Superseded => {}
    }
    Ok(())
}

fn prompt_tone() -> Result<Tone> {
    let options: Vec<&str> = Tone::ALL.iter().map(|t| t.display_name()).collect();
    let choice = Select::new("Pick a tone:", options).raw_prompt()?;
    Ok(Tone::ALL[choice.index])
}

/// Terminal rendering of a session's progress
struct SweepView {
    spinner: ProgressBar,
    bar: Option<ProgressBar>,
    reported: usize,
}

impl SweepView {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message("🤖 Generating names with AI...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self {
            spinner,
            bar: None,
            reported: 0,
        }
    }

    fn render(&mut self, snapshot: &SessionSnapshot) {
        if self.bar.is_none() && !snapshot.results.is_empty() {
            self.spinner.finish_and_clear();
            print_generated(snapshot);

            let bar = ProgressBar::new(snapshot.results.len() as u64);
            let style = ProgressStyle::with_template("{spinner} [{bar:24}] {pos}/{len} {msg}")
                .map(|s| s.progress_chars("=> "))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style);
            bar.enable_steady_tick(Duration::from_millis(100));
            self.bar = Some(bar);
        }

        let Some(bar) = &self.bar else {
            return;
        };

        let done_upto = match snapshot.phase {
            RunPhase::Checking { index } => index,
            RunPhase::Done => snapshot.results.len(),
            _ => self.reported,
        };

        for candidate in snapshot.results.iter().take(done_upto).skip(self.reported) {
            bar.println(status_line(&candidate.name, candidate.domain_status));
            bar.inc(1);
        }
        self.reported = self.reported.max(done_upto);

        if let RunPhase::Checking { index } = snapshot.phase {
            if let Some(candidate) = snapshot.results.get(index) {
                bar.set_message(format!("🔍 checking {}", candidate.name));
            }
        }
    }

    fn finish(self) {
        self.spinner.finish_and_clear();
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

fn status_line(name: &str, status: DomainStatus) -> String {
    match status {
        DomainStatus::Available => format!("✅ {} - AVAILABLE", name),
        DomainStatus::Unavailable => format!("❌ {} - TAKEN", name),
        DomainStatus::Idle | DomainStatus::Checking => format!("⚠️  {} - not checked", name),
    }
}

/// Display generated names in a compact grid
fn print_generated(snapshot: &SessionSnapshot) {
    println!("🎨 Generated Names ({}):", snapshot.results.len());
    println!("═══════════════════");

    for (i, candidate) in snapshot.results.iter().enumerate() {
        print!("{:2}. {:<18}", i + 1, candidate.name);
        if (i + 1) % 3 == 0 {
            println!();
        }
    }
    if snapshot.results.len() % 3 != 0 {
        println!();
    }
    println!();
}

fn print_summary(snapshot: &SessionSnapshot) {
    println!();
    println!("📈 Summary:");
    println!("   ✅ Available: {}", snapshot.available_count());
    println!("   📊 Total checked: {}", snapshot.results.len());
    if let (Some(start), Some(end)) = (snapshot.started_at, snapshot.finished_at) {
        let elapsed = (end - start).num_milliseconds() as f64 / 1000.0;
        println!("   ⏱️  Total time: {:.2}s", elapsed);
    }
    println!("   ℹ️  Availability is simulated, confirm with a registrar");

    if snapshot.available_count() == 0 {
        println!();
        println!("😔 No available names this time. Run again to regenerate!");
        return;
    }

    println!();
    println!("🎉 Look them up:");
    let available = snapshot
        .results
        .iter()
        .filter(|c| c.domain_status == DomainStatus::Available);
    for candidate in available {
        println!("   {} → {}", candidate.name, registrar_search_url(&candidate.name));
    }
}
