//! A single direct connection to one remote peer.

use super::error::{PeerError, PeerErrorKind};
use super::message::PeerMessage;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Longest line accepted from a peer, newline included. A longer line ends
/// the connection with a `Decode` failure.
pub const MAX_LINE_BYTES: usize = 4096;

/// Notifications from the connection tasks to the UI loop.
#[derive(Debug, Clone)]
pub enum PeerEvent {
    /// Listening; `id` is what the other peer joins with.
    Opened {
        /// Session identifier (listening socket address).
        id: String,
    },
    /// The remote peer is connected.
    Connected {
        /// Remote socket address.
        remote: SocketAddr,
    },
    /// A message arrived.
    Data(PeerMessage),
    /// The remote peer closed the connection.
    Disconnected,
    /// Something failed; the session may still be open (decode errors).
    Failed(PeerError),
}

/// Entry points for opening a session.
pub struct PeerSession;

impl PeerSession {
    /// Listens on `bind` and accepts exactly one remote peer.
    ///
    /// Must be called inside a tokio runtime. Progress arrives on `events`.
    #[instrument(skip(events))]
    pub fn create(bind: String, events: mpsc::UnboundedSender<PeerEvent>) -> PeerHandle {
        PeerHandle::spawn(events, move |events, outbound, connected| async move {
            let listener = match TcpListener::bind(&bind).await {
                Ok(l) => l,
                Err(e) => {
                    let err = PeerError::new(PeerErrorKind::Bind, format!("{}: {}", bind, e));
                    let _ = events.send(PeerEvent::Failed(err));
                    return;
                }
            };
            let id = match listener.local_addr() {
                Ok(addr) => addr.to_string(),
                Err(e) => {
                    let _ = events.send(PeerEvent::Failed(e.into()));
                    return;
                }
            };
            info!(%id, "Session open, waiting for peer");
            let _ = events.send(PeerEvent::Opened { id });

            match listener.accept().await {
                Ok((stream, remote)) => {
                    drop(listener);
                    run_link(stream, remote, outbound, events, connected).await;
                }
                Err(e) => {
                    let err = PeerError::new(PeerErrorKind::Connect, format!("accept: {}", e));
                    let _ = events.send(PeerEvent::Failed(err));
                }
            }
        })
    }

    /// Connects to the session identified by `id` (a socket address).
    ///
    /// Must be called inside a tokio runtime. Progress arrives on `events`.
    #[instrument(skip(events))]
    pub fn join(id: String, events: mpsc::UnboundedSender<PeerEvent>) -> PeerHandle {
        PeerHandle::spawn(events, move |events, outbound, connected| async move {
            match TcpStream::connect(&id).await {
                Ok(stream) => {
                    let remote = match stream.peer_addr() {
                        Ok(addr) => addr,
                        Err(e) => {
                            let _ = events.send(PeerEvent::Failed(e.into()));
                            return;
                        }
                    };
                    run_link(stream, remote, outbound, events, connected).await;
                }
                Err(e) => {
                    let err = PeerError::new(PeerErrorKind::Connect, format!("{}: {}", id, e));
                    let _ = events.send(PeerEvent::Failed(err));
                }
            }
        })
    }
}

/// Owner of a session's background task. Dropping it closes the session.
#[derive(Debug)]
pub struct PeerHandle {
    outbound: mpsc::UnboundedSender<PeerMessage>,
    connected: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl PeerHandle {
    fn spawn<F, Fut>(events: mpsc::UnboundedSender<PeerEvent>, f: F) -> Self
    where
        F: FnOnce(
            mpsc::UnboundedSender<PeerEvent>,
            mpsc::UnboundedReceiver<PeerMessage>,
            Arc<AtomicBool>,
        ) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        let connected = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(f(events, outbound_rx, connected.clone()));
        Self {
            outbound,
            connected,
            task,
        }
    }

    /// Whether a remote peer is currently connected.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Queues `message` for the remote peer.
    ///
    /// Returns `false` (and drops the message) when no peer is connected.
    #[instrument(skip(self))]
    pub fn send(&self, message: PeerMessage) -> bool {
        if !self.is_connected() {
            debug!("No peer connected, message dropped");
            return false;
        }
        self.outbound.send(message).is_ok()
    }
}

impl Drop for PeerHandle {
    fn drop(&mut self) {
        debug!("Closing peer session");
        self.task.abort();
    }
}

/// Pumps one established connection until either side closes it.
#[instrument(skip(stream, outbound, events, connected))]
async fn run_link(
    stream: TcpStream,
    remote: SocketAddr,
    mut outbound: mpsc::UnboundedReceiver<PeerMessage>,
    events: mpsc::UnboundedSender<PeerEvent>,
    connected: Arc<AtomicBool>,
) {
    let (read_half, mut write_half) = stream.into_split();
    connected.store(true, Ordering::Release);
    info!("Peer connected");
    let _ = events.send(PeerEvent::Connected { remote });

    let writer_events = events.clone();
    let writer_connected = connected.clone();
    let writer = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            let line = match message.encode() {
                Ok(line) => line,
                Err(e) => {
                    let _ = writer_events.send(PeerEvent::Failed(e));
                    continue;
                }
            };
            debug!(line = line.trim_end(), "Sending");
            if let Err(e) = write_half.write_all(line.as_bytes()).await {
                warn!(error = %e, "Write failed");
                let _ = writer_events.send(PeerEvent::Failed(e.into()));
                if writer_connected.swap(false, Ordering::AcqRel) {
                    let _ = writer_events.send(PeerEvent::Disconnected);
                }
                break;
            }
        }
    });

    let mut reader = BufReader::new(read_half);
    let mut line = String::new();
    loop {
        line.clear();
        let read = (&mut reader)
            .take(MAX_LINE_BYTES as u64)
            .read_line(&mut line)
            .await;
        match read {
            Ok(0) => {
                info!("Peer closed the connection");
                break;
            }
            Ok(_) if !line.ends_with('\n') && line.len() >= MAX_LINE_BYTES => {
                warn!(limit = MAX_LINE_BYTES, "Line too long, closing");
                let err = PeerError::new(
                    PeerErrorKind::Decode,
                    format!("line exceeds {} bytes", MAX_LINE_BYTES),
                );
                let _ = events.send(PeerEvent::Failed(err));
                break;
            }
            Ok(_) => {
                let text = line.trim();
                if text.is_empty() {
                    continue;
                }
                debug!(line = text, "Received");
                match PeerMessage::decode(text) {
                    Ok(message) => {
                        let _ = events.send(PeerEvent::Data(message));
                    }
                    Err(e) => {
                        warn!(error = %e, "Dropping malformed line");
                        let _ = events.send(PeerEvent::Failed(e));
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Read failed");
                let _ = events.send(PeerEvent::Failed(e.into()));
                break;
            }
        }
    }

    if connected.swap(false, Ordering::AcqRel) {
        let _ = events.send(PeerEvent::Disconnected);
    }
    writer.abort();
}
