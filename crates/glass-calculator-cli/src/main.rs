//! glass-calc: the glass calculator in a terminal
//!
//! ## Usage
//!
//! ```bash
//! glass-calc press 2 + 3 '*' 4 Enter   # prints 20
//! glass-calc press --json 1/3=         # view as JSON
//! glass-calc repl                      # interactive
//! glass-calc theme toggle              # light <-> dark
//! glass-calc keys                      # keyboard mapping
//! ```

use clap::Parser;
use glass_calculator::config::CalculatorConfig;
use glass_calculator::feedback::{FileThemeStore, ThemeController};
use glass_calculator::input::Keypad;
use glass_calculator::widget::CalculatorWidget;
use glass_calculator_cli::{
    logging, output, press, repl, Cli, CliConfig, CliResult, ColorChoice, Commands, PressArgs,
    ThemeAction, Verbosity,
};
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    logging::init(config.verbosity);
    console::set_colors_enabled(config.color.should_color());

    match cli.command {
        Commands::Press(args) => run_press(&config, &args),
        Commands::Repl => run_repl(&config),
        Commands::Theme(args) => run_theme(&config, args.action),
        Commands::Keys => {
            run_keys(&config);
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.clone().into();

    let mut config = CliConfig::new().with_verbosity(verbosity).with_color(color);
    if let Some(path) = &cli.config {
        config = config.with_widget(CalculatorConfig::load(path)?);
    }
    if let Some(path) = &cli.theme_file {
        config = config.with_theme_file(path);
    }
    Ok(config)
}

fn build_widget(config: &CliConfig) -> CalculatorWidget {
    CalculatorWidget::new(&config.widget)
        .with_theme_store(Box::new(FileThemeStore::new(config.theme_file())))
}

fn run_press(config: &CliConfig, args: &PressArgs) -> CliResult<()> {
    let mut widget = build_widget(config);
    press::apply_tokens(&mut widget, &args.tokens, 0)?;
    let view = widget.view(0);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else if config.verbosity.is_quiet() {
        println!("{}", view.display);
    } else {
        for line in output::render_screen(&view, &Keypad::new()) {
            println!("{line}");
        }
    }
    Ok(())
}

fn run_repl(config: &CliConfig) -> CliResult<()> {
    info!(theme_file = %config.theme_file().display(), "starting repl");
    repl::run(build_widget(config))
}

fn run_theme(config: &CliConfig, action: ThemeAction) -> CliResult<()> {
    let store = FileThemeStore::new(config.theme_file());
    let mut controller = ThemeController::load(store, config.widget.default_theme);

    match action {
        ThemeAction::Show => {}
        ThemeAction::Toggle => {
            controller.set(controller.theme().toggled())?;
        }
        ThemeAction::Set { theme } => controller.set(theme.into())?,
    }

    println!("{}", controller.theme());
    if config.verbosity.is_verbose() {
        eprintln!("theme file: {}", config.theme_file().display());
    }
    Ok(())
}

fn run_keys(config: &CliConfig) {
    if config.verbosity.is_quiet() {
        return;
    }
    for line in output::render_keys() {
        println!("{line}");
    }
}
