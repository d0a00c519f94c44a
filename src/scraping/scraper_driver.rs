use std::process::{Child, Command};
use std::time::Duration;

use fantoccini::{error::NewSessionError, Client, ClientBuilder};

/// A fantoccini client bound to a geckodriver process this struct owns.
/// Dropping the driver tears down both.
pub struct ScraperDriver {
    driver_process: Option<Child>,
    pub client: Client,
}

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0";

/// Time geckodriver gets to start listening before the first connection
/// attempt.
const STARTUP_GRACE: Duration = Duration::from_millis(500);

fn random_port() -> u16 {
    rand::random::<u16>() % (65535 - 1024) + 1024
}

fn spawn_geckodriver_process(port: u16) -> anyhow::Result<Child> {
    Command::new("geckodriver")
        .arg("--port")
        .arg(port.to_string())
        .arg("--log")
        .arg("fatal")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map_err(|error| anyhow::anyhow!(format!("Failed to start geckodriver: {}", error)))
}

async fn create_and_configure_client(port: u16) -> anyhow::Result<Client> {
    tokio::time::sleep(STARTUP_GRACE).await;

    let client = ClientBuilder::native()
        .connect(format!("http://localhost:{}", port).as_str())
        .await
        .map_err(|error: NewSessionError| {
            anyhow::anyhow!(format!("Failed to connect to WebDriver: {}", error))
        })?;

    client.set_ua(USER_AGENT).await?;

    Ok(client)
}

impl ScraperDriver {
    pub async fn new() -> anyhow::Result<Self> {
        let port = random_port();
        let driver_process = spawn_geckodriver_process(port)?;
        let client = create_and_configure_client(port).await?;

        Ok(ScraperDriver {
            driver_process: Some(driver_process),
            client,
        })
    }

    pub fn close(&mut self) {
        log::debug!("Closing scraper driver");
        let process = self.driver_process.take();

        let client_clone = self.client.clone();
        let client = std::mem::replace(&mut self.client, client_clone);

        let future = async {
            client
                .close()
                .await
                .unwrap_or_else(|error| log::error!("Failed to close WebDriver client: {}", error));

            if let Some(mut process) = process {
                process.kill().unwrap_or_else(|error| {
                    log::error!("Failed to kill geckodriver process: {}", error)
                })
            }
        };

        tokio::spawn(future);
    }
}

impl Drop for ScraperDriver {
    fn drop(&mut self) {
        self.close();

        // Give the spawned close future a chance to run before the runtime
        // drops it.
        std::thread::sleep(std::time::Duration::from_secs(1));
    }
}
