//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.0 que necesita el
//! servidor de archivos, sin librerías de alto nivel. Incluye:
//!
//! - Parsing de requests HTTP/1.0 (request line, headers, body)
//! - Composición de responses en streaming sobre el socket
//! - Manejo de status codes
//! - Tabla estática de tipos MIME
//!
//! ## Especificación HTTP/1.0
//!
//! El protocolo HTTP/1.0 (RFC 1945) es más simple que HTTP/1.1:
//! - No requiere el header `Host`
//! - No tiene chunked transfer encoding
//! - No mantiene conexiones persistentes
//!
//! ### Formato de Request
//!
//! ```text
//! GET /index.html HTTP/1.0\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Server: myHttp\r\n
//! Content-Type: text/html\r\n
//! \r\n
//! <contenido del archivo>
//! ```

pub mod mime;
pub mod request;   // Parsing de HTTP requests
pub mod response;  // Composición de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, Request};
pub use status::StatusCode;
