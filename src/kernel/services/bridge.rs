//! Artifact bridge: typed injection points for backend results.
//!
//! Requests are issued by one side of the shell and their results shown by
//! another, so completions travel through one single-consumer channel per
//! artifact kind. Every message carries the display key it was computed for.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Explanation,
    Testbench,
}

impl ArtifactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Explanation => "explanation",
            ArtifactKind::Testbench => "testbench",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMessage {
    pub kind: ArtifactKind,
    pub key: String,
    pub payload: String,
}

type Slot = Arc<Mutex<Option<Sender<ArtifactMessage>>>>;

#[derive(Clone)]
pub struct InjectionPoint {
    kind: ArtifactKind,
    slot: Slot,
}

impl InjectionPoint {
    fn new(kind: ArtifactKind) -> Self {
        Self {
            kind,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Registers the consumer. A later attach replaces the earlier one.
    pub fn attach(&self) -> Receiver<ArtifactMessage> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(tx);
        }
        rx
    }

    pub fn detach(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }

    pub fn is_attached(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }

    /// Returns whether a consumer received the message. Without one this is a no-op.
    pub fn inject(&self, key: impl Into<String>, payload: impl Into<String>) -> bool {
        let Ok(mut slot) = self.slot.lock() else {
            return false;
        };
        let Some(tx) = slot.as_ref() else {
            tracing::debug!(kind = self.kind.as_str(), "artifact dropped: no consumer attached");
            return false;
        };

        let msg = ArtifactMessage {
            kind: self.kind,
            key: key.into(),
            payload: payload.into(),
        };
        if tx.send(msg).is_err() {
            tracing::debug!(kind = self.kind.as_str(), "artifact dropped: consumer went away");
            *slot = None;
            return false;
        }
        true
    }
}

#[derive(Clone)]
pub struct ArtifactBridge {
    pub explanation: InjectionPoint,
    pub testbench: InjectionPoint,
}

impl ArtifactBridge {
    pub fn new() -> Self {
        Self {
            explanation: InjectionPoint::new(ArtifactKind::Explanation),
            testbench: InjectionPoint::new(ArtifactKind::Testbench),
        }
    }

    pub fn point(&self, kind: ArtifactKind) -> &InjectionPoint {
        match kind {
            ArtifactKind::Explanation => &self.explanation,
            ArtifactKind::Testbench => &self.testbench,
        }
    }

    pub fn inject(
        &self,
        kind: ArtifactKind,
        key: impl Into<String>,
        payload: impl Into<String>,
    ) -> bool {
        self.point(kind).inject(key, payload)
    }

    /// Attaches one consumer to every injection point.
    pub fn attach(&self) -> ArtifactReceiver {
        ArtifactReceiver {
            explanation: self.explanation.attach(),
            testbench: self.testbench.attach(),
        }
    }
}

impl Default for ArtifactBridge {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ArtifactReceiver {
    explanation: Receiver<ArtifactMessage>,
    testbench: Receiver<ArtifactMessage>,
}

impl ArtifactReceiver {
    pub fn try_recv(&self) -> Option<ArtifactMessage> {
        for rx in [&self.explanation, &self.testbench] {
            match rx.try_recv() {
                Ok(msg) => return Some(msg),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {}
            }
        }
        None
    }

    pub fn drain(&self) -> Vec<ArtifactMessage> {
        let mut out = Vec::new();
        while let Some(msg) = self.try_recv() {
            out.push(msg);
        }
        out
    }

    /// Waits up to `timeout` for the next message of either kind.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ArtifactMessage> {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            if let Some(msg) = self.try_recv() {
                return Some(msg);
            }
            let now = std::time::Instant::now();
            if now >= deadline {
                return None;
            }
            let step = (deadline - now).min(Duration::from_millis(5));
            match self.explanation.recv_timeout(step) {
                Ok(msg) => return Some(msg),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => std::thread::sleep(step),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/services/bridge.rs"]
mod tests;
