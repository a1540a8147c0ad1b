use clap::{Parser, Subcommand};
use colored::Colorize;
use diapo_common::Config;
use diapo_runtime::{
    Key, KeyPress, ManualClock, MemoryHost, Presentation, Renderer, SectionChange, SlideChange,
    TouchPoint, WheelTick,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;

/// Diapo - a full-viewport presentation navigator

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Drive a deck with a scripted input string
    Run {
        /// Path to the deck manifest
        deck_path: PathBuf,
        /// Comma-separated commands (e.g. "n,n,tick:700,w:120,g:2,q")
        input_string: String,
        /// Optional diapo.toml with navigation options
        #[arg(long)]
        config: Option<PathBuf>,
        /// Startup URL fragment (e.g. "#gallery--g2")
        #[arg(long)]
        fragment: Option<String>,
    },
}

/// Prints each committed change the way the render collaborator would
/// repaint it.
struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    fn section_changed(&mut self, change: &SectionChange) {
        let title = change.title.as_deref().unwrap_or("(untitled)");
        println!(
            "{} {}",
            format!("[{}/{}]", change.active + 1, change.section_count).blue(),
            title.bold()
        );
    }

    fn slide_changed(&mut self, change: &SlideChange) {
        let mut edges = String::new();
        if change.at_first {
            edges.push_str(" |<");
        }
        if change.at_last {
            edges.push_str(" >|");
        }
        println!(
            "  {}{}",
            format!("slide {}/{}", change.active + 1, change.slide_count).cyan(),
            edges.dimmed()
        );
    }
}

fn main() {
    let cli = Args::parse();

    match cli.command {
        Commands::Run {
            deck_path,
            input_string,
            config,
            fragment,
        } => {
            let config = load_config(config.as_deref(), &deck_path);

            env_logger::Builder::from_default_env()
                .filter_level(if config.debug {
                    log::LevelFilter::Debug
                } else {
                    log::LevelFilter::Warn
                })
                .init();

            let deck = load_deck(&deck_path);

            let clock = Rc::new(ManualClock::new());
            let host = Rc::new(RefCell::new(match fragment {
                Some(frag) => MemoryHost::with_fragment(frag.trim_start_matches('#')),
                None => MemoryHost::new(),
            }));

            let mut presentation = match Presentation::new(
                deck,
                config,
                Box::new(host.clone()),
                Box::new(ConsoleRenderer),
                clock.clone(),
            ) {
                Ok(presentation) => presentation,
                Err(err) => {
                    eprintln!("{}", err);
                    std::process::exit(1);
                }
            };

            presentation.init();

            for input in input_string.split(',') {
                if !process_input(input.trim(), &mut presentation, &clock, &deck_path) {
                    break;
                }
            }

            let fragment = host
                .borrow()
                .fragment
                .as_ref()
                .map(|f| format!("#{}", f))
                .unwrap_or_default();
            println!(
                "position: section {} slide {} {}",
                presentation.current_section(),
                presentation.current_slide(),
                fragment.green()
            );

            presentation.destroy();
        }
    }
}

/// An explicit `--config` file wins; otherwise a `diapo.toml` next to the
/// deck is picked up when present, and the defaults apply without one.
fn load_config(explicit: Option<&Path>, deck_path: &Path) -> Config {
    if let Some(path) = explicit {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                eprintln!("Error reading config file: {}", err);
                std::process::exit(1);
            }
        };

        return match Config::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error in config file: {}", err);
                std::process::exit(1);
            }
        };
    }

    let deck_dir = match deck_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !deck_dir.join("diapo.toml").exists() {
        return Config::default();
    }

    match Config::load(deck_dir) {
        Ok(config) => config,
        // Config::load already reported the failure
        Err(_) => std::process::exit(1),
    }
}

fn load_deck(path: &std::path::Path) -> diapo_common::Deck {
    let source = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("Error reading deck file: {}", err);
            std::process::exit(1);
        }
    };

    match diapo_parser::parse(&source) {
        Ok(deck) => deck,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}

fn process_input(
    input: &str,
    presentation: &mut Presentation,
    clock: &Rc<ManualClock>,
    deck_path: &std::path::Path,
) -> bool {
    match input {
        "" => true,
        "q" => false,
        "n" => {
            presentation.next();
            true
        }
        "p" => {
            presentation.prev();
            true
        }
        "N" => {
            presentation.next_section();
            true
        }
        "P" => {
            presentation.prev_section();
            true
        }
        ">" => {
            presentation.next_slide();
            true
        }
        "<" => {
            presentation.prev_slide();
            true
        }
        "refresh" => {
            let deck = load_deck(deck_path);
            if let Err(err) = presentation.refresh(deck) {
                eprintln!("{}", err);
                return false;
            }
            true
        }
        command => process_argument_command(command, presentation, clock),
    }
}

fn process_argument_command(
    command: &str,
    presentation: &mut Presentation,
    clock: &Rc<ManualClock>,
) -> bool {
    let Some((name, value)) = command.split_once(':') else {
        eprintln!("Unknown command: {}", command);
        return false;
    };

    match name {
        "g" => match value.parse::<usize>() {
            Ok(index) => {
                presentation.go_to_section(index, false);
                true
            }
            Err(_) => invalid(command),
        },
        "s" => match value.parse::<usize>() {
            Ok(index) => {
                presentation.go_to_slide(index);
                true
            }
            Err(_) => invalid(command),
        },
        "w" => match value.parse::<f32>() {
            Ok(delta_y) => {
                presentation.handle_wheel(&WheelTick {
                    delta_y,
                    ancestors: Vec::new(),
                });
                true
            }
            Err(_) => invalid(command),
        },
        // t:<dx>x<dy> - swipe deltas, start minus end
        "t" => match parse_swipe(value) {
            Some((dx, dy)) => {
                presentation.handle_touch_start(0.0, 0.0);
                presentation.handle_touch_end(&TouchPoint {
                    x: -dx,
                    y: -dy,
                    ancestors: Vec::new(),
                });
                true
            }
            None => invalid(command),
        },
        "k" => match parse_key(value) {
            Some(key) => {
                presentation.handle_key(&KeyPress {
                    key,
                    editable_target: false,
                });
                true
            }
            None => invalid(command),
        },
        "h" => {
            presentation.handle_fragment_change(value.trim_start_matches('#'));
            true
        }
        "tick" => match value.parse::<u64>() {
            Ok(ms) => {
                clock.advance(ms);
                true
            }
            Err(_) => invalid(command),
        },
        _ => {
            eprintln!("Unknown command: {}", command);
            false
        }
    }
}

fn invalid(command: &str) -> bool {
    eprintln!("Invalid command argument: {}", command);
    false
}

fn parse_swipe(value: &str) -> Option<(f32, f32)> {
    let (dx, dy) = value.split_once('x')?;
    Some((dx.parse().ok()?, dy.parse().ok()?))
}

fn parse_key(value: &str) -> Option<Key> {
    let key = match value {
        "up" => Key::ArrowUp,
        "down" => Key::ArrowDown,
        "left" => Key::ArrowLeft,
        "right" => Key::ArrowRight,
        "pgup" => Key::PageUp,
        "pgdn" => Key::PageDown,
        "space" => Key::Space,
        "home" => Key::Home,
        "end" => Key::End,
        _ => return None,
    };
    Some(key)
}
