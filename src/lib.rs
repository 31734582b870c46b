//! # myHttp
//! src/lib.rs
//!
//! Servidor de archivos HTTP/1.0 concurrente implementado desde cero para
//! demostrar conceptos de sistemas operativos: multiplexación de E/S con
//! poll(), pools de threads acotados y sincronización con mutex/condvar.
//!
//! ## Arquitectura
//!
//! ```text
//! Config → Acceptor (poll) → TaskQueue → Worker → Parser → Composer → close
//! ```
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de requests y composición de responses HTTP/1.0
//! - `pool`: Cola de tareas acotada y pool de workers
//! - `server`: Acceptor multiplexado con poll() y handler por conexión
//! - `config`: Configuración por CLI, variables de entorno o archivo
//!
//! ## Ejemplo de uso
//!
//! ```ignore
//! use myhttp::config::Config;
//! use myhttp::server::Server;
//!
//! let config = Config::default();
//! let mut server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod http;
pub mod pool;
pub mod server;
