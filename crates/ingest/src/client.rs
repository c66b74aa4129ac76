use std::time::Duration;
use tele_config::{TransportConfig, TransportKind};
use tele_core::{Result, TelemetryError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Line-oriented telemetry feed client.
///
/// Reads newline-delimited messages from a TCP endpoint or stdin and forwards
/// each non-blank line, undecoded, on the returned channel.  The TCP variant
/// reconnects automatically if the connection drops.
#[derive(Debug, Clone)]
pub struct TelemetryListener {
    kind:             TransportKind,
    address:          String,
    reconnect:        Duration,
    channel_capacity: usize,
}

impl TelemetryListener {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        if config.kind == TransportKind::Tcp && config.address.trim().is_empty() {
            return Err(TelemetryError::Transport("no feed address configured".into()));
        }

        Ok(Self {
            kind:             config.kind,
            address:          config.address.clone(),
            reconnect:        Duration::from_secs(config.reconnect_secs),
            channel_capacity: config.channel_capacity.max(1),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Spawn a background task that reads the feed and forwards raw lines on
    /// the returned channel.
    ///
    /// The channel closes when the receiver is dropped or, for stdin, at EOF.
    pub fn spawn_listener(self) -> mpsc::Receiver<String> {
        match self.kind {
            TransportKind::Tcp => {
                let (tx, rx) = mpsc::channel(self.channel_capacity);
                tokio::spawn(tcp_loop(self.address, self.reconnect, tx));
                rx
            }
            TransportKind::Stdin => {
                spawn_reader(BufReader::new(tokio::io::stdin()), self.channel_capacity)
            }
        }
    }
}

/// Forward lines from any buffered reader on a new channel until EOF.
///
/// This is the stdin transport; it works on anything line-oriented.
pub fn spawn_reader<R>(reader: R, channel_capacity: usize) -> mpsc::Receiver<String>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(channel_capacity.max(1));

    tokio::spawn(async move {
        if forward_lines(reader, &tx).await.is_ok() {
            info!("Telemetry feed ended");
        }
    });

    rx
}

async fn tcp_loop(address: String, reconnect: Duration, tx: mpsc::Sender<String>) {
    loop {
        match TcpStream::connect(&address).await {
            Ok(stream) => {
                info!("Connected to telemetry feed at {address}");
                if forward_lines(BufReader::new(stream), &tx).await.is_err() {
                    return; // all receivers dropped
                }
                warn!("Telemetry feed connection lost; reconnecting in {reconnect:?}…");
            }
            Err(e) => {
                error!("Cannot connect to telemetry feed at {address}: {e}; retrying in {reconnect:?}…");
            }
        }

        if tx.is_closed() {
            return;
        }
        tokio::time::sleep(reconnect).await;
    }
}

/// Forward every non-blank line until the reader hits EOF or an I/O error.
///
/// A line that isn't valid UTF-8 is logged and skipped; the lines after it
/// are still forwarded. `Err(())` means the receiving side is gone and the
/// caller should stop.
async fn forward_lines<R>(mut reader: R, tx: &mpsc::Sender<String>) -> std::result::Result<(), ()>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => return Ok(()),
            Ok(_) => {
                let line = match std::str::from_utf8(&buf) {
                    Ok(line) => line.trim_end_matches(&['\n', '\r'][..]),
                    Err(e) => {
                        warn!("Skipping telemetry line that is not UTF-8: {e}");
                        continue;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                if tx.send(line.to_string()).await.is_err() {
                    return Err(());
                }
            }
            Err(e) => {
                warn!("Telemetry feed read error: {e}");
                return Ok(());
            }
        }
    }
}
