use serde::{Deserialize, Serialize};

/// Liveness body for `/health`.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Plain `{"ok": true}` acknowledgement returned by mutating endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub fn ok() -> Self { Self { ok: true } }
}
