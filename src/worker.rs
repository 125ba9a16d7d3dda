//! Background encoding over message passing.
//!
//! An [`EncodeWorker`] owns one thread. Requests go in as `(text, level)`
//! messages and completed matrices come back on a per-request reply channel;
//! no mutable state is shared between the caller and the worker. A request
//! that has been dispatched always runs to completion.

use crate::encoder::{BitstreamEncoder, MatrixBuilder};
use crate::error::{QrError, Result};
use crate::models::{BitMatrix, ECLevel};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, trace};

/// Text and level to encode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest {
    /// Text to encode
    pub text: String,
    /// Error correction level
    pub level: ECLevel,
}

type Job = (EncodeRequest, Sender<Result<BitMatrix>>);

/// Encode a single request into its module matrix
pub fn encode_matrix(request: &EncodeRequest) -> Result<BitMatrix> {
    let bitstream = BitstreamEncoder::encode(&request.text, request.level)?;
    Ok(MatrixBuilder::build(&bitstream))
}

/// Handle to a background encoding thread
pub struct EncodeWorker {
    sender: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl EncodeWorker {
    /// Start the worker thread
    pub fn spawn() -> Result<Self> {
        let (sender, receiver) = mpsc::channel::<Job>();
        let handle = thread::Builder::new()
            .name("qr-encode-worker".to_string())
            .spawn(move || serve(receiver))
            .map_err(QrError::WorkerSpawn)?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Queue a request; the reply arrives through the returned handle
    pub fn submit(&self, text: impl Into<String>, level: ECLevel) -> Result<PendingEncode> {
        let sender = self.sender.as_ref().ok_or(QrError::WorkerDisconnected)?;
        let (reply_tx, reply_rx) = mpsc::channel();
        let request = EncodeRequest {
            text: text.into(),
            level,
        };
        sender
            .send((request, reply_tx))
            .map_err(|_| QrError::WorkerDisconnected)?;
        Ok(PendingEncode { reply: reply_rx })
    }

    /// Submit and block until the matrix is ready
    pub fn encode(&self, text: impl Into<String>, level: ECLevel) -> Result<BitMatrix> {
        self.submit(text, level)?.wait()
    }
}

impl Drop for EncodeWorker {
    fn drop(&mut self) {
        // Closing the channel ends the serve loop once queued jobs are done
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Reply handle for a submitted request
pub struct PendingEncode {
    reply: Receiver<Result<BitMatrix>>,
}

impl PendingEncode {
    /// Block until the worker replies
    pub fn wait(self) -> Result<BitMatrix> {
        self.reply.recv().map_err(|_| QrError::WorkerDisconnected)?
    }
}

fn serve(jobs: Receiver<Job>) {
    debug!("encode worker started");
    let mut served = 0usize;
    for (request, reply) in jobs {
        trace!(characters = request.text.chars().count(), level = %request.level, "encode request");
        let result = encode_matrix(&request);
        // The caller may have dropped its handle; the work is still complete
        let _ = reply.send(result);
        served += 1;
    }
    debug!(served, "encode worker stopped");
}
