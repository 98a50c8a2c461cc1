// Hide console window on Windows for release builds (GUI app).
// In debug builds, keep the console so panics/backtraces are visible.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;
use colored::Colorize;

use dicetray::dice3d::{
    AppSettings, DiceCountSelection, DiceRng, DiceTheme, DiceTrayPlugin, EchoRolls, SettingsPath,
    SettleMode, ThemeColor, DEFAULT_SETTINGS_FILE, MAX_DICE, MIN_DICE,
};

const DEFAULT_LOG_FILTER: &str = "info,wgpu=error,naga=warn";

/// 3D dice tray: throw up to five six-sided dice and read the result
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of dice to roll (1-5)
    #[arg(short, long, value_parser = parse_dice_count)]
    dice: Option<u32>,

    /// Dice color, any CSS color (e.g. "#1e90ff", "white")
    #[arg(short, long, value_parser = parse_theme)]
    theme: Option<ThemeColor>,

    /// Seed for reproducible throws
    #[arg(long)]
    seed: Option<u64>,

    /// Resolve as soon as every die comes to rest instead of waiting out the timer
    #[arg(long)]
    settle_at_rest: bool,

    /// Path to the settings file
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Print every resolved roll to stdout
    #[arg(long)]
    echo: bool,

    /// Log filter (tracing env-filter syntax)
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

fn parse_dice_count(s: &str) -> Result<u32, String> {
    let count: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid dice count: {}", s))?;
    if !(MIN_DICE..=MAX_DICE).contains(&count) {
        return Err(format!(
            "Dice count must be between {} and {}, got {}",
            MIN_DICE, MAX_DICE, count
        ));
    }
    Ok(count)
}

fn parse_theme(s: &str) -> Result<ThemeColor, String> {
    ThemeColor::parse(s)
}

fn warn_startup(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}

fn main() {
    let args = Args::parse();

    let settings = AppSettings::load(&args.settings).unwrap_or_else(|e| {
        warn_startup(&format!("{}; using default settings", e));
        AppSettings::default()
    });

    let theme = match args.theme.clone() {
        Some(theme) => theme,
        None => settings.theme_color().unwrap_or_else(|e| {
            warn_startup(&format!("{}; using default theme", e));
            ThemeColor::default()
        }),
    };
    let dice_count = args.dice.unwrap_or_else(|| settings.clamped_dice_count());
    let settle_mode = if args.settle_at_rest {
        SettleMode::AtRestOrTimeout
    } else {
        settings.settle_mode
    };
    let seed = args.seed.or(settings.seed);

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Dice Tray 3D".to_string(),
                    resolution: (1280u32, 720u32).into(),
                    ..default()
                }),
                ..default()
            })
            .set(bevy::log::LogPlugin {
                level: bevy::log::Level::INFO,
                filter: args.log_filter.clone(),
                ..default()
            }),
    )
    .insert_resource(DiceTheme(theme))
    .insert_resource(DiceCountSelection::new(dice_count))
    .insert_resource(settle_mode)
    .insert_resource(DiceRng::from_seed(seed))
    .insert_resource(settings)
    .insert_resource(SettingsPath(args.settings.clone()))
    .add_plugins(DiceTrayPlugin);

    if args.echo {
        app.insert_resource(EchoRolls);
    }

    app.run();
}
