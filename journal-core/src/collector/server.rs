use crate::collector::constants::{BUFFER_SIZE, IDLE_TICK};
use crate::collector::error::CollectorError;
use crate::collector::framing::{Framer, Framing};
use crate::collector::render::render_report;
use crate::collector::stats::MessageStats;
use crate::collector::trigger::ReportTrigger;
use crate::conf::CollectorConfig;
use std::io::{self, ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// What the socket reader hands to the collector loop.
#[derive(Debug)]
enum ReaderEvent {
    Message { text: String, received_at: i64 },
}

/// Outcome of serving one client.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub stats: MessageStats,
    /// Messages that arrived after the last printed report.
    pub unreported: u64,
}

/// A bound collector waiting for its single client.
#[derive(Debug)]
pub struct StatsCollector {
    listener: TcpListener,
    report_every: u64,
    report_interval: Duration,
    framing: Framing,
}

impl StatsCollector {
    pub fn bind(config: &CollectorConfig) -> Result<Self, CollectorError> {
        let addr = config.bind_addr();
        // std sets SO_REUSEADDR on Unix listeners.
        let listener = TcpListener::bind(&addr).map_err(|source| CollectorError::Bind {
            addr: addr.clone(),
            source,
        })?;

        info!(addr = %addr, framing = %config.framing, "collector listening");

        Ok(Self {
            listener,
            report_every: config.report_every,
            report_interval: config.report_interval(),
            framing: config.framing,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept one client and aggregate everything it sends until it goes
    /// away. Reports are written to `out`.
    pub fn run<W: Write>(self, out: &mut W) -> Result<SessionSummary, CollectorError> {
        let (stream, peer) = self.listener.accept().map_err(CollectorError::Accept)?;
        info!(peer = %peer, "client connected");

        let summary = self.serve(stream, out)?;

        info!(
            peer = %peer,
            total = summary.stats.total(),
            "client disconnected"
        );
        Ok(summary)
    }

    fn serve<W: Write>(
        &self,
        stream: TcpStream,
        out: &mut W,
    ) -> Result<SessionSummary, CollectorError> {
        let control = stream.try_clone().map_err(CollectorError::Stream)?;

        // Channel from reader thread -> collector loop.
        let (tx, rx) = mpsc::channel::<ReaderEvent>();
        let framing = self.framing;

        let reader = thread::Builder::new()
            .name("collector-reader".to_string())
            .spawn(move || read_stream(stream, framing, tx))
            .map_err(CollectorError::Spawn)?;

        let result = self.aggregate(&rx, out);

        // On error the peer may still be connected; close it so the reader
        // unblocks and the client sees the collector go away.
        if result.is_err() {
            let _ = control.shutdown(Shutdown::Both);
        }
        drop(rx);
        if reader.join().is_err() {
            warn!("collector reader thread panicked");
        }

        result
    }

    fn aggregate<W: Write>(
        &self,
        rx: &mpsc::Receiver<ReaderEvent>,
        out: &mut W,
    ) -> Result<SessionSummary, CollectorError> {
        let mut stats = MessageStats::new();
        let mut trigger =
            ReportTrigger::new(self.report_every, self.report_interval, Instant::now());

        loop {
            match rx.recv_timeout(IDLE_TICK) {
                Ok(ReaderEvent::Message { text, received_at }) => {
                    let importance = stats.record(&text, received_at);
                    debug!(
                        importance = %importance,
                        len = text.len(),
                        total = stats.total(),
                        text = %text,
                        "message received"
                    );

                    let now = Instant::now();
                    if trigger.on_message(stats.total(), now) {
                        write_report(out, &stats)?;
                        trigger.reported(now);
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    let now = Instant::now();
                    if trigger.on_idle(now) {
                        write_report(out, &stats)?;
                        trigger.reported(now);
                    }
                }
                // Reader dropped its sender: the connection is closed.
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }

        Ok(SessionSummary {
            stats,
            unreported: trigger.since_last(),
        })
    }
}

fn write_report<W: Write>(out: &mut W, stats: &MessageStats) -> Result<(), CollectorError> {
    out.write_all(render_report(stats).as_bytes())
        .and_then(|_| out.flush())
        .map_err(CollectorError::Report)
}

fn read_stream(mut stream: TcpStream, framing: Framing, tx: mpsc::Sender<ReaderEvent>) {
    let mut framer = Framer::new(framing);
    let mut buf = [0u8; BUFFER_SIZE];

    loop {
        match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                for text in framer.push(&buf[..n]) {
                    if !forward(&tx, text) {
                        return;
                    }
                }
            }
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
                ) =>
            {
                continue;
            }
            Err(e) => {
                warn!(error = %e, "receive failed, closing connection");
                break;
            }
        }
    }

    if let Some(text) = framer.finish() {
        forward(&tx, text);
    }
    // tx is dropped here, which disconnects the collector loop.
}

/// Returns false once the collector loop has gone away.
fn forward(tx: &mpsc::Sender<ReaderEvent>, text: String) -> bool {
    let received_at = chrono::Utc::now().timestamp();
    tx.send(ReaderEvent::Message { text, received_at }).is_ok()
}
