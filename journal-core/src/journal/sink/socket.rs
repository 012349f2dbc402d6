use crate::journal::sink::{Sink, SinkError};
use std::io::{self, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, warn};

/// TCP sink that streams one line per write to a collector.
///
/// Connects when built. A write on a disconnected sink makes exactly one
/// reconnect attempt; a failed send drops the connection and reports the
/// error without retrying.
#[derive(Debug)]
pub struct SocketSink {
    addr: String,
    connect_timeout: Option<Duration>,
    stream: Option<TcpStream>,
}

impl SocketSink {
    pub fn connect(host: &str, port: u16) -> Result<Self, SinkError> {
        Self::connect_with_timeout(host, port, None)
    }

    pub fn connect_with_timeout(
        host: &str,
        port: u16,
        connect_timeout: Option<Duration>,
    ) -> Result<Self, SinkError> {
        let addr = format!("{host}:{port}");
        let stream = open_stream(&addr, connect_timeout).map_err(|source| SinkError::Connect {
            addr: addr.clone(),
            source,
        })?;

        debug!(%addr, "journal socket connected");
        Ok(Self {
            addr,
            connect_timeout,
            stream: Some(stream),
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    fn disconnect(&mut self) {
        if let Some(stream) = self.stream.take() {
            // The peer may already be gone; nothing left to flush either way.
            let _ = stream.shutdown(Shutdown::Both);
            debug!(addr = %self.addr, "journal socket disconnected");
        }
    }
}

fn open_stream(addr: &str, timeout: Option<Duration>) -> io::Result<TcpStream> {
    let Some(timeout) = timeout else {
        return TcpStream::connect(addr);
    };

    let mut last_err = None;
    for candidate in addr.to_socket_addrs()? {
        match TcpStream::connect_timeout(&candidate, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }

    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "address resolved to nothing")
    }))
}

impl Sink for SocketSink {
    fn write(&mut self, line: &str) -> Result<(), SinkError> {
        let stream = match &mut self.stream {
            Some(stream) => stream,
            slot @ None => {
                let stream = open_stream(&self.addr, self.connect_timeout).map_err(|source| {
                    SinkError::Reconnect {
                        addr: self.addr.clone(),
                        source,
                    }
                })?;
                debug!(addr = %self.addr, "journal socket reconnected");
                slot.insert(stream)
            }
        };

        let mut record = String::with_capacity(line.len() + 1);
        record.push_str(line);
        record.push('\n');

        if let Err(source) = stream.write_all(record.as_bytes()) {
            warn!(addr = %self.addr, error = %source, "journal socket send failed");
            self.disconnect();
            return Err(SinkError::Send {
                addr: self.addr.clone(),
                source,
            });
        }

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.disconnect();
        Ok(())
    }
}
