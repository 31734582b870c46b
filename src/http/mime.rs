//! # Tipos MIME
//! src/http/mime.rs
//!
//! Tabla estática de extensión → Content-Type para los archivos servidos.

use std::path::Path;

/// Resuelve el Content-Type de un archivo por su extensión
///
/// Extensiones desconocidas (o archivos sin extensión) se sirven como
/// `application/octet-stream`.
///
/// # Ejemplo
/// ```
/// use myhttp::http::mime::mime_type;
///
/// assert_eq!(mime_type("index.html"), "text/html");
/// assert_eq!(mime_type("foto.jpg"), "image/jpeg");
/// ```
pub fn mime_type(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "txt" => "text/plain",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}
