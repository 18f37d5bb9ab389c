//! Internal helpers shared by both clients.

pub(crate) mod diagnostics;
pub(crate) mod redact;
pub(crate) mod url;
