//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP:
//! 1. Bind con reintento de puerto
//! 2. Acceptor single-thread multiplexado con poll()
//! 3. Despacho de conexiones legibles al pool de workers
//! 4. Handler por conexión: parsear el request y responder
//!
//! El acceptor nunca lee bytes de los clientes; todo el I/O de request y
//! response ocurre dentro de los workers.

pub mod handler;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::Server;
