//! # Pool de Workers
//! src/pool/mod.rs
//!
//! Este módulo implementa el mecanismo productor/consumidor que desacopla
//! al acceptor del procesamiento de requests:
//!
//! - `queue`: cola FIFO acotada, protegida por mutex y condvar
//! - `worker`: pool fijo de threads que consumen la cola
//!
//! ```text
//! Acceptor ──push──▶ TaskQueue ──pop──▶ Worker 1..N
//! ```
//!
//! El acceptor nunca bloquea: si la cola está llena, `push` rechaza la tarea
//! y el acceptor decide qué hacer con la conexión (responder 503 y cerrar).

pub mod queue;
pub mod worker;

pub use queue::{QueueFullError, TaskQueue};
pub use worker::WorkerPool;
