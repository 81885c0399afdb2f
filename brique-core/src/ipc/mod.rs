//! Wire types pushed from the backend over the shell's event bridge.
//!
//! All types derive `serde::Serialize` + `serde::Deserialize` so the same
//! definitions serve the emitting side and the decoding side.

pub mod events;
