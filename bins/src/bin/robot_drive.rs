use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use nearzero::{Intent, Robot, RobotConfig, TransportConfig, HELP_KEY, KEY_HELP, QUIT_KEY};
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Drives the robot with the keyboard
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// I2C device of the wheel board
    #[arg(long, default_value = "/dev/i2c-0")]
    wheel_dev: PathBuf,

    /// I2C address of the wheel board
    #[arg(long, default_value_t = 0x40)]
    wheel_addr: u16,

    /// I2C device of the head board
    #[arg(long, default_value = "/dev/i2c-0")]
    head_dev: PathBuf,

    /// I2C address of the head board
    #[arg(long, default_value_t = 0x41)]
    head_addr: u16,

    /// I2C address of the head roll board, if one is fitted
    #[arg(long)]
    head_roll_addr: Option<u16>,

    /// Only log the commands instead of writing to the bus
    #[arg(long)]
    debug: bool,

    /// Log the wheel commands of every move
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let args = Args::parse();
    let config = RobotConfig {
        wheel_dev: args.wheel_dev,
        wheel_addr: args.wheel_addr,
        head_dev: args.head_dev,
        head_addr: args.head_addr,
        head_roll_addr: args.head_roll_addr,
        transport: TransportConfig {
            debug: args.debug,
            ..TransportConfig::default()
        },
        verbose: args.verbose,
    };
    let mut bot = Robot::new(&config)?;

    print_help();
    enable_raw_mode()?;
    let result = drive(&mut bot);
    disable_raw_mode()?;
    result?;

    bot.stop_move()?;
    Ok(())
}

fn drive(bot: &mut Robot) -> anyhow::Result<()> {
    loop {
        let Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
            continue;
        };
        if kind != KeyEventKind::Press {
            continue;
        }
        let KeyCode::Char(key) = code else {
            continue;
        };
        if key == QUIT_KEY {
            return Ok(());
        }
        if key == HELP_KEY {
            print_help();
            continue;
        }
        if let Some(intent) = Intent::from_key(key) {
            match bot.apply(intent) {
                Err(nearzero::Error::Unsupported(what)) => warn!("{what} is not available"),
                other => other?,
            }
        }
    }
}

fn print_help() {
    // Raw mode does not translate \n into \r\n.
    let mut out = std::io::stdout().lock();
    for line in KEY_HELP.lines() {
        let _ = write!(out, "{line}\r\n");
    }
    let _ = out.flush();
}
