mod classifier;
mod config;
mod models;
mod notify;
mod sensor;

use linux_embedded_hal::I2cdev;
use log::{debug, error, info, warn};
use tokio::time::{sleep, Duration};

use classifier::process_reading;
use config::Config;
use models::PollState;
use notify::{Notifier, NotifyError};
use sensor::Apds9960;

const I2C_BUS: &str = "/dev/i2c-1";
const POLL_INTERVAL_MS: u64 = 250;

async fn main_loop(
    mut sensor: Apds9960<I2cdev>,
    notifier: Notifier,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting polling loop");

    let mut state = PollState::new();

    loop {
        sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;

        // A bus failure here is fatal; there is no sensible fallback reading
        let reading = i32::from(sensor.read_ambient_light()?);
        debug!("Sampled ambient light: {}", reading);

        // Readings inside the dead-band are dropped without further notice
        let update = match process_reading(&mut state, reading) {
            Some(update) => update,
            None => continue,
        };

        if update.changed {
            match notifier.post_brightness(update.tier).await {
                Ok(()) => info!("Successfully posted [Brightness: {}]", update.tier),
                Err(NotifyError::Status(code)) => {
                    warn!("Post failed: server answered HTTP {}", code)
                }
                Err(NotifyError::Transport(e)) => warn!("Failed to connect to server: {}", e),
            }
        }

        info!("Ambient Light: {}, Brightness = {}", reading, update.tier);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    // Load configuration
    info!("Reading server information from matrix settings");
    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let notifier = Notifier::new(&config)?;

    info!("Setting up APDS9960 sensor");
    let i2c = I2cdev::new(I2C_BUS)?;
    let mut sensor = Apds9960::new(i2c);
    if !sensor.is_supported_device()? {
        return Err("Unrecognized device id on the light sensor bus".into());
    }
    sensor.enable_light_sensor()?;

    // Inert interrupt line, held for the process lifetime and released on
    // drop whichever way main returns
    let _interrupt_pin = sensor::claim_interrupt_pin()?;

    // Handle Ctrl+C gracefully
    let (tx, mut rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        let _ = tx.send(());
    });

    // Run main loop or wait for shutdown signal
    tokio::select! {
        result = main_loop(sensor, notifier) => {
            if let Err(e) = result {
                error!("Fatal error: {}", e);
                return Err(e);
            }
        }
        _ = &mut rx => {
            info!("Program terminated by user. Exiting gracefully.");
        }
    }

    Ok(())
}
