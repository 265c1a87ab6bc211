// Hide console window on Windows for release builds (GUI app).
// In debug builds, keep the console so panics/backtraces are visible.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use bevy::prelude::*;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use dicestage::dice3d::{DiceStagePlugin, QuitFlag, StageSettings};
use dicestage::headless::{self, RollReport};

/// Dice Stage - two dice rolled on a 3D stage
#[derive(Parser)]
#[command(name = "dicestage")]
#[command(author, version, about = "Dice Stage - a pair of physically simulated dice")]
struct Cli {
    /// Path to a RON or JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the random generator (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Log controller and physics details
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll without opening a window and print the results
    Simulate {
        /// Number of rolls
        #[arg(short, long, default_value = "1")]
        rolls: u32,

        /// Give up on a roll after this many frames
        #[arg(long, default_value = "3000")]
        max_frames: u32,

        /// Print the reports as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let settings = load_settings(&cli);

    match cli.command {
        Some(Commands::Simulate { rolls, max_frames, json }) => {
            run_simulate_mode(&settings, rolls, max_frames, json);
        }
        None => run_3d_mode(settings, cli.debug),
    }
}

fn load_settings(cli: &Cli) -> StageSettings {
    let mut settings = match &cli.config {
        Some(path) => StageSettings::load_from_file(path).unwrap_or_else(|err| {
            eprintln!("{} {}; using default settings", "Warning:".yellow().bold(), err);
            StageSettings::default()
        }),
        None => StageSettings::default(),
    };

    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    settings
}

// ============================================================================
// 3D Mode
// ============================================================================

fn run_3d_mode(settings: StageSettings, debug: bool) {
    let filter = if debug {
        "info,wgpu=error,naga=warn,dicestage=debug"
    } else {
        "info,wgpu=error,naga=warn"
    };
    let window = settings.window.clone();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: window.title,
                        resolution: (window.width, window.height).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: filter.to_string(),
                    ..default()
                }),
        )
        .add_plugins(DiceStagePlugin {
            settings,
            quit: QuitFlag::default(),
        })
        .run();
}

// ============================================================================
// Headless Mode
// ============================================================================

fn run_simulate_mode(settings: &StageSettings, rolls: u32, max_frames: u32, json: bool) {
    let quit = QuitFlag::default();

    let reports = match headless::run(settings, rolls, max_frames, &quit) {
        Ok(reports) => reports,
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(text) => println!("{}", text),
            Err(err) => {
                eprintln!("{} {}", "Error:".red().bold(), err);
                std::process::exit(1);
            }
        }
        return;
    }

    for report in &reports {
        print_report(report);
    }
}

fn print_report(report: &RollReport) {
    println!("\n{}", "=======================================".cyan());
    println!("{} {}", "Roll:".bold().white(), report.roll.to_string().yellow().bold());

    match (report.faces, report.settled_at) {
        (Some([a, b]), Some(frame)) => {
            println!(
                "{} {} {}",
                "Dice:".bold().white(),
                format!("[{}] [{}]", a, b).bright_green().bold(),
                format!("(settled on frame {})", frame).dimmed()
            );
            println!("{} {}", "Total:".bold().white(), (a + b).to_string().green().bold());
        }
        _ => {
            println!(
                "{} {}",
                "Dice:".bold().white(),
                format!("still rolling after {} frames", report.frames).red()
            );
        }
    }

    for (i, [x, y, z]) in report.positions.iter().enumerate() {
        println!("  die {}: ({:.2}, {:.2}, {:.2})", i + 1, x, y, z);
    }
}
