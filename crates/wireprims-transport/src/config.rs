use std::time::Duration;

/// Socket options applied to a connection before it is handed out.
///
/// The transport itself has no timeouts. These map to OS socket options, so
/// an expired timeout surfaces as `ReadFailed`/`WriteFailed` like any other
/// I/O error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectConfig {
    /// Per-candidate connect timeout. `None` blocks until the OS gives up.
    pub connect_timeout: Option<Duration>,
    /// Read timeout for blocking reads.
    pub read_timeout: Option<Duration>,
    /// Write timeout for blocking writes.
    pub write_timeout: Option<Duration>,
    /// Disable Nagle's algorithm.
    pub nodelay: bool,
}

impl ConnectConfig {
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    /// Set both read and write timeouts.
    pub fn with_io_timeout(self, timeout: Duration) -> Self {
        self.with_read_timeout(timeout).with_write_timeout(timeout)
    }

    pub fn with_nodelay(mut self, nodelay: bool) -> Self {
        self.nodelay = nodelay;
        self
    }
}
