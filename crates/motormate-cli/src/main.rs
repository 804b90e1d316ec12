//! motormate - terminal chat client for the MotorMate automotive assistant

mod commands;
mod config;
mod ui;

use clap::Parser;
use motormate_api::ChatClient;
use motormate_chat::{ChatController, MessageKind, Outcome, Transport};
use motormate_tui::Theme;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

/// motormate - ask an automotive expert about cars
#[derive(Parser, Debug)]
#[command(name = "motormate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Chat server base URL (default: http://127.0.0.1:5000)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Send a single message, print the reply and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Color theme (dark, light)
    #[arg(short, long)]
    theme: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable TUI mode (use simple stdin/stdout)
    #[arg(long)]
    no_tui: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup tracing
    if args.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter("motormate_cli=debug,motormate_chat=debug,motormate_api=debug")
            .init();
    }

    // Initialize config and exit
    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Load config file
    let cfg = config::Config::load();

    // Merge config with CLI args (CLI takes precedence)
    let client = match args.endpoint.or(cfg.endpoint.clone()) {
        Some(endpoint) => match ChatClient::new(endpoint) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => ChatClient::local(),
    };
    tracing::debug!(url = %client.chat_url(), "using chat endpoint");

    let theme_name = args
        .theme
        .or(cfg.theme.clone())
        .unwrap_or_else(|| "dark".to_string());
    let theme = Theme::from_name(&theme_name).unwrap_or_else(|| {
        eprintln!("Warning: unknown theme '{}', using dark", theme_name);
        Theme::dark()
    });

    let mut controller = match cfg.greeting {
        Some(ref greeting) => ChatController::with_greeting(greeting.clone()),
        None => ChatController::new(),
    };

    // Non-interactive mode
    if let Some(command) = args.command {
        let ok = run_command(
            &client,
            controller,
            &command,
            &mut std::io::stdout(),
            &mut std::io::stderr(),
        )
        .await?;
        if !ok {
            std::process::exit(1);
        }
        return Ok(());
    }

    controller.greet();

    let use_tui = !args.no_tui
        && cfg.tui.unwrap_or(true)
        && std::io::stdin().is_terminal()
        && std::io::stdout().is_terminal();

    // TUI mode
    if use_tui {
        let endpoint = client.base_url().to_string();
        return ui::run_tui(Arc::new(client), controller, theme, &endpoint).await;
    }

    // Interactive mode (simple stdin/stdout)
    run_interactive(&client, controller).await
}

/// Send one message and print the reply. Returns false if nothing came back.
async fn run_command(
    transport: &dyn Transport,
    mut controller: ChatController,
    command: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    match controller.send(transport, command).await {
        Some(Outcome::Replied) => {
            if let Some(reply) = controller.messages().last() {
                writeln!(out, "{}", reply.text)?;
            }
            Ok(true)
        }
        Some(Outcome::Failed) => {
            if let Some(error) = controller.messages().last() {
                writeln!(err, "{}", error.text)?;
            }
            Ok(false)
        }
        None => {
            writeln!(err, "Error: nothing to send")?;
            Ok(false)
        }
    }
}

/// Print display entries appended since `shown`. The user's own lines are
/// already on screen; the placeholder goes to `err` and is not counted, so the
/// reply that replaces it is printed next time.
fn print_new(
    controller: &ChatController,
    shown: &mut usize,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    let messages = controller.messages();
    let mut next = (*shown).min(messages.len());

    for (i, msg) in messages.iter().enumerate().skip(next) {
        match msg.kind {
            MessageKind::Placeholder => {
                writeln!(err, "{}", msg)?;
                continue;
            }
            MessageKind::User => {}
            MessageKind::Bot | MessageKind::Error => writeln!(out, "{}\n", msg)?,
        }
        next = i + 1;
    }
    *shown = next;
    Ok(())
}

/// Line-mode session state
struct LineSession<'a> {
    transport: &'a dyn Transport,
    controller: ChatController,
    /// Display entries already printed
    shown: usize,
}

impl<'a> LineSession<'a> {
    fn new(transport: &'a dyn Transport, controller: ChatController) -> Self {
        Self {
            transport,
            controller,
            shown: 0,
        }
    }

    /// Print whatever is new
    fn flush(&mut self, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        print_new(&self.controller, &mut self.shown, out, err)
    }

    /// Handle one input line. Returns false to quit.
    async fn handle_line(
        &mut self,
        line: &str,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> io::Result<bool> {
        let input = line.trim();
        if input.is_empty() {
            return Ok(true);
        }

        // Handle slash commands
        if let Some(result) = commands::execute_command(input, &self.controller) {
            match result {
                commands::CommandResult::Clear => {
                    if self.controller.reset() {
                        self.shown = 0;
                        writeln!(out, "Cleared conversation.\n")?;
                        self.flush(out, err)?;
                    }
                }
                commands::CommandResult::Exit => return Ok(false),
                commands::CommandResult::Message(msg) => {
                    writeln!(out, "{}", msg)?;
                }
                commands::CommandResult::Unknown(cmd) => {
                    writeln!(out, "Unknown command: /{}", cmd)?;
                    writeln!(out, "Type /help for available commands.")?;
                }
            }
            return Ok(true);
        }

        let Some(request) = self.controller.begin_submit(input) else {
            return Ok(true);
        };
        self.flush(out, err)?;

        let result = self.transport.send(request).await;
        self.controller.finish(result);
        self.flush(out, err)?;
        Ok(true)
    }
}

async fn run_interactive(
    transport: &dyn Transport,
    controller: ChatController,
) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let mut session = LineSession::new(transport, controller);
    session.flush(&mut stdout, &mut stderr)?;

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF
            break;
        }

        if !session.handle_line(&input, &mut stdout, &mut stderr).await? {
            break;
        }
    }

    Ok(())
}
