//! Durable append-only address log.
//!
//! Every source writes through one [`MailLog`]. Each call appends a whole
//! batch, flushes and syncs it before returning, all while holding the file
//! lock, so batches from concurrent sources never interleave. The order of
//! batches from different sources is whatever order they acquire the lock.

use std::io;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Shared sink for fresh addresses.
#[derive(Debug)]
pub struct MailLog {
    file: Mutex<File>,
    echo: bool,
}

impl MailLog {
    /// Open (or create) the log in append mode, readable and writable by the owner only.
    ///
    /// # Arguments
    ///
    /// * `path` - Log file location
    /// * `echo` - Also print each batch to stdout
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>, echo: bool) -> io::Result<Self> {
        let mut options = OpenOptions::new();
        options.append(true).create(true);
        #[cfg(unix)]
        options.mode(0o600);

        let file = options.open(path.as_ref()).await?;
        debug!(echo, "Mail log opened");
        Ok(Self {
            file: Mutex::new(file),
            echo,
        })
    }

    /// Append one newline-joined batch and force it to disk.
    ///
    /// The batch gets a trailing newline. When echo is enabled the same batch
    /// is printed to stdout before the lock is released.
    pub async fn write(&self, batch: &str) -> io::Result<()> {
        let mut record = String::with_capacity(batch.len() + 1);
        record.push_str(batch);
        record.push('\n');

        let mut file = self.file.lock().await;
        file.write_all(record.as_bytes()).await?;
        file.flush().await?;
        file.sync_data().await?;
        if self.echo {
            println!("{batch}");
        }
        Ok(())
    }
}
