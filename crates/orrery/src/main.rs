use anyhow::Context;
use clap::{Parser, Subcommand};
use orbital::Size;
use orrery::config;
use orrery::events::NavEvent;
use orrery::host::{MemoryHost, ScrollSurface};
use orrery::menu::{Frame, NavigationController, Settings};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "orrery", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read settings from this file instead of the user config
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Open the menu, let it animate for a while and print the frame as JSON.
    Frame {
        /// Time since the menu opened
        #[arg(long, default_value_t = 0.0)]
        at: f64,
        #[arg(long, default_value_t = 1280.0)]
        width: f64,
        #[arg(long, default_value_t = 800.0)]
        height: f64,
        /// Item under the pointer
        #[arg(long)]
        hover: Option<usize>,
    },
    /// Run a script of events against a headless document.
    Replay {
        /// Script file, one event per line; stdin if omitted
        script: Option<PathBuf>,
        #[arg(long, default_value_t = 1280.0)]
        width: f64,
        #[arg(long, default_value_t = 800.0)]
        height: f64,
    },
    /// Write the default config file and print its path.
    Init,
    /// Draw a frame of the open menu to a PNG.
    #[cfg(feature = "render")]
    Render {
        #[arg(short, long)]
        out: PathBuf,
        #[arg(long, default_value_t = 0.0)]
        at: f64,
        #[arg(long, default_value_t = 1280.0)]
        width: f64,
        #[arg(long, default_value_t = 800.0)]
        height: f64,
        #[arg(long)]
        hover: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Frame {
            at,
            width,
            height,
            hover,
        } => {
            let settings = load_settings(cli.config.as_deref())?;
            let frame = snapshot(settings, Size::new(width, height), at, hover)?;
            println!("{}", serde_json::to_string_pretty(&frame)?);
            Ok(())
        }
        Commands::Replay {
            script,
            width,
            height,
        } => {
            let settings = load_settings(cli.config.as_deref())?;
            let text = match &script {
                Some(path) => fs_err::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            replay(settings, Size::new(width, height), &text)
        }
        Commands::Init => {
            let path = config::user_config_path()?;
            config::install_default_config(&path)?;
            println!("{}", path.display());
            Ok(())
        }
        #[cfg(feature = "render")]
        Commands::Render {
            out,
            at,
            width,
            height,
            hover,
        } => {
            let settings = load_settings(cli.config.as_deref())?;
            let size = Size::new(width, height);
            let frame = snapshot(settings, size, at, hover)?;
            orrery::render::write_png(&frame, size, &out)
                .with_context(|| format!("Failed to render {}", out.display()))?;
            Ok(())
        }
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let config = match path {
        Some(p) => config::load_config_from(p, true)
            .with_context(|| format!("Failed to load {}", p.display()))?,
        None => config::load_or_default(),
    };
    Ok(config.build()?)
}

fn snapshot(settings: Settings, size: Size, at: f64, hover: Option<usize>) -> anyhow::Result<Frame> {
    let mut nav = NavigationController::mount(settings, MemoryHost::new(size))?;
    nav.open_menu();
    nav.tick(at);
    if hover.is_some() {
        nav.set_hover(hover);
    }
    nav.frame().context("Menu did not open")
}

/// Host-side actions a script can take besides navigation events.
enum Step {
    Resize(Size),
    Scroll(f64),
    Nav(NavEvent),
}

fn parse_step(line: &str) -> anyhow::Result<Step> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["resize", w, h] => Ok(Step::Resize(Size::new(w.parse()?, h.parse()?))),
        ["scroll", y] => Ok(Step::Scroll(y.parse()?)),
        _ => Ok(Step::Nav(line.parse()?)),
    }
}

fn replay(settings: Settings, size: Size, script: &str) -> anyhow::Result<()> {
    let host = MemoryHost::new(size).shared();
    let mut nav = NavigationController::mount(settings, host.clone())?;

    for (n, raw) in script.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let step = parse_step(line).with_context(|| format!("line {}: '{}'", n + 1, line))?;
        let mut note = String::new();
        match step {
            Step::Resize(size) => {
                host.borrow_mut().resize(size);
                nav.dispatch(NavEvent::Resize);
            }
            Step::Scroll(y) => {
                if !host.borrow_mut().scroll_to(y) {
                    let pin = host.borrow().body_pin().map(|p| p.css()).unwrap_or_default();
                    note = format!(" (pinned: {})", pin);
                }
            }
            Step::Nav(event) => {
                if let Some(href) = nav.dispatch(event).navigate {
                    note = format!(" -> {}", href);
                }
            }
        }

        let state = nav.state();
        println!(
            "{:<18} open={:<5} active={:<4} mobile={:<5} scroll={}{}",
            line,
            state.is_open,
            state
                .active_index
                .map(|i| i.to_string())
                .unwrap_or_else(|| "-".to_string()),
            state.is_mobile,
            host.scroll_offset(),
            note
        );
    }
    Ok(())
}
