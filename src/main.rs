use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use weatherwatch::app::App;
use weatherwatch::events;
use weatherwatch::monitor::{classify, Classification, Thresholds, ThresholdMonitor};
use weatherwatch::notify::{DesktopNotifier, NotificationPort};
use weatherwatch::state::{PermissionStatus, WeatherViewState};
use weatherwatch::ui;
use weatherwatch::{OpenWeatherClient, WeatherProvider, WeatherWatchConfig};

#[derive(Parser, Debug)]
#[command(name = "weatherwatch")]
#[command(version)]
#[command(about = "Terminal weather monitor with temperature-threshold desktop notifications")]
struct Args {
    /// City to look up on startup
    city: Option<String>,

    /// Minimum temperature threshold in Celsius
    #[arg(long)]
    min: Option<f64>,

    /// Maximum temperature threshold in Celsius
    #[arg(long)]
    max: Option<f64>,

    /// Seconds between scheduled weather checks
    #[arg(long)]
    interval: Option<u64>,

    /// Path to a config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fetch once, print the reading, and exit (no TUI, no monitoring)
    #[arg(long)]
    once: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = WeatherWatchConfig::load_from_path(args.config.clone())?;

    // CLI flags override config file values.
    let thresholds = Thresholds {
        min_celsius: args.min.or(config.monitor.min_celsius),
        max_celsius: args.max.or(config.monitor.max_celsius),
    };
    if let (Some(min), Some(max)) = (thresholds.min_celsius, thresholds.max_celsius) {
        if min > max {
            bail!("Invalid input: minimum threshold ({min}) cannot exceed maximum threshold ({max})");
        }
    }
    let period = Duration::from_secs(args.interval.unwrap_or(config.monitor.poll_interval_secs));

    if args.once {
        return run_once(&args, &config, thresholds);
    }

    run_tui(&args, &config, thresholds, period)
}

/// Fetch once and print the reading, without entering the TUI.
fn run_once(args: &Args, config: &WeatherWatchConfig, thresholds: Thresholds) -> Result<()> {
    init_stderr_tracing(config);

    let city = args.city.as_deref().unwrap_or("").trim().to_string();
    if city.is_empty() {
        bail!("Invalid input: city must not be empty");
    }

    let client = OpenWeatherClient::new(config)?;
    let rt = tokio::runtime::Runtime::new()?;
    let reading = rt.block_on(client.current_weather(&city))?;

    println!("Weather in {city}");
    println!("  Temperature  {}", reading.format_temperature());
    println!("  Condition    {}", reading.description);
    println!("  Humidity     {}", reading.format_humidity());
    println!("  Wind speed   {}", reading.format_wind());

    match classify(reading.temperature_c, &thresholds) {
        Classification::BelowMin => {
            if let Some(min) = thresholds.min_celsius {
                println!("  Threshold    Below the minimum threshold of {min}°C!");
            }
        }
        Classification::AboveMax => {
            if let Some(max) = thresholds.max_celsius {
                println!("  Threshold    Exceeded the maximum threshold of {max}°C!");
            }
        }
        Classification::WithinRange => {
            println!("  Threshold    Within the acceptable range.");
        }
        Classification::NotConfigured => {}
    }

    Ok(())
}

/// Run the interactive widget.
fn run_tui(
    args: &Args,
    config: &WeatherWatchConfig,
    thresholds: Thresholds,
    period: Duration,
) -> Result<()> {
    init_file_tracing(config)?;

    // Resolve notification permission once, before the terminal enters
    // raw mode; the outcome gates the side-effect channel for the whole
    // session.
    let notifier = DesktopNotifier::new();
    let permission = if notifier.supported() {
        PermissionStatus::from(notifier.request_permission())
    } else {
        eprintln!("This system does not support notifications.");
        PermissionStatus::Unsupported
    };

    let client = OpenWeatherClient::new(config)?;

    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let (events_tx, events_rx) = tokio::sync::mpsc::unbounded_channel();
    let monitor = ThresholdMonitor::new(
        Arc::new(client),
        Arc::new(notifier),
        permission == PermissionStatus::Granted,
        thresholds,
        period,
        events_tx,
    );
    let view = WeatherViewState::new(permission, thresholds);
    let mut app = App::new(monitor, events_rx, view);

    if let Some(city) = &args.city {
        app.city_input = city.clone();
        app.search();
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal; dropping the app tears down the monitor and its
    // schedule with it.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        app.drain_events();

        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}

fn init_stderr_tracing(config: &WeatherWatchConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Log to a file while the TUI owns the terminal.
fn init_file_tracing(config: &WeatherWatchConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let file = File::create(&config.logging.file)
        .with_context(|| format!("Failed to create log file: {}", config.logging.file))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
