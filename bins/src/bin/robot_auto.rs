use clap::Parser;
use nearzero::{Robot, RobotConfig, TransportConfig};
use std::path::PathBuf;
use std::thread::sleep;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Lets the robot run through a short scripted drive on its own
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
        transport: TransportConfig {
            debug: args.debug,
            ..TransportConfig::default()
        },
        verbose: args.verbose,
        ..RobotConfig::default()
    };
    let mut bot = Robot::new(&config)?;

    info!("The robot will do some basic moves");
    bot.stop_move()?;
    bot.go_forward()?;
    sleep(Duration::from_secs(1));
    bot.go_left()?;
    sleep(Duration::from_secs(1));
    bot.go_right()?;
    sleep(Duration::from_secs(1));
    bot.stop_move()?;

    info!("Speed up");
    for speed in (0..150).step_by(20) {
        bot.move_ahead(speed)?;
        sleep(Duration::from_millis(300));
    }
    info!("Slow down");
    for speed in (1..=150).rev().step_by(20) {
        bot.move_ahead(speed)?;
        sleep(Duration::from_millis(300));
    }
    bot.stop_move()?;
    Ok(())
}
