//! # Composición de Respuestas HTTP
//! src/http/response.rs
//!
//! Este módulo serializa respuestas HTTP/1.0 directamente sobre el socket
//! (o cualquier `Write`, lo que permite testearlo contra un buffer).
//!
//! Hay dos formas de respuesta:
//!
//! - **Mínima** (`respond_status`): status line + `Server` +
//!   `Content-Length: 0` + línea vacía. Se usa para 400, 404, 501 y 503.
//! - **Archivo** (`respond_file`): 200 OK con `Content-Type` derivado de la
//!   extensión y el contenido del archivo en chunks de tamaño fijo.
//!
//! ## Plantillas por POST
//!
//! Si el request traía body, cada chunk del archivo se escanea buscando el
//! marcador literal `</body>`: al primer match dentro del chunk se trunca
//! ahí, se inserta el body del request y se re-emite el marcador. Un
//! marcador partido entre dos chunks no se detecta (limitación documentada;
//! el escaneo es local a cada chunk a propósito).
//!
//! ## Content-Length asimétrico
//!
//! Las respuestas 200 de archivo solo llevan `Content-Length` cuando el
//! request traía body, y el valor es la longitud declarada del *request*,
//! nunca la del archivo. Es el comportamiento observado del diseño original
//! y se preserva deliberadamente (desviación documentada de HTTP/1.0
//! estricto; ver los tests).

use crate::http::mime::mime_type;
use crate::http::request::Request;
use crate::http::status::StatusCode;
use std::io::{self, Read, Write};

/// Tamaño de chunk con el que se transmite el archivo
pub const CHUNK_SIZE: usize = 1024;

/// Header de identificación del servidor
const SERVER_HEADER: &str = "Server: myHttp\r\n";

/// Marcador donde se inyecta el body del request
const BODY_MARKER: &[u8] = b"</body>";

/// Escribe una respuesta mínima sin body
///
/// ```text
/// HTTP/1.0 404 Not Found\r\n
/// Server: myHttp\r\n
/// Content-Length: 0\r\n
/// \r\n
/// ```
pub fn respond_status<W: Write>(writer: &mut W, status: StatusCode) -> io::Result<()> {
    write!(writer, "HTTP/1.0 {}\r\n", status)?;
    writer.write_all(SERVER_HEADER.as_bytes())?;
    writer.write_all(b"Content-Length: 0\r\n")?;
    writer.write_all(b"\r\n")?;
    writer.flush()
}

/// Escribe una respuesta 200 con el contenido del archivo en streaming
///
/// El archivo se lee y transmite en chunks de `CHUNK_SIZE` bytes; nunca se
/// carga completo en memoria. Si el request traía body se aplica la
/// inyección de plantilla descrita en la documentación del módulo.
pub fn respond_file<W, R>(writer: &mut W, request: &Request, mut resource: R) -> io::Result<()>
where
    W: Write,
    R: Read,
{
    write!(writer, "HTTP/1.0 {}\r\n", StatusCode::Ok)?;
    writer.write_all(SERVER_HEADER.as_bytes())?;

    // Content-Length solo cuando el request traía body, y con la longitud
    // declarada del request (asimetría preservada del diseño original)
    if request.body().is_some() {
        write!(
            writer,
            "Content-Length: {}\r\n",
            request.content_length().unwrap_or(0)
        )?;
    }

    write!(writer, "Content-Type: {}\r\n", mime_type(request.path()))?;
    writer.write_all(b"\r\n")?;

    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        let bytes_read = resource.read(&mut chunk)?;
        if bytes_read == 0 {
            break;
        }

        write_chunk(writer, &chunk[..bytes_read], request.body())?;
    }

    writer.flush()
}

/// Escribe un chunk del archivo, aplicando la inyección si corresponde
///
/// Sin body de request el chunk pasa tal cual. Con body, el primer match
/// del marcador dentro del chunk trunca ahí: prefijo + body + marcador,
/// descartando el resto del chunk. El escaneo no cruza límites de chunk.
fn write_chunk<W: Write>(writer: &mut W, chunk: &[u8], body: Option<&[u8]>) -> io::Result<()> {
    let Some(body) = body else {
        return writer.write_all(chunk);
    };

    match find_marker(chunk) {
        Some(pos) => {
            writer.write_all(&chunk[..pos])?;
            writer.write_all(body)?;
            writer.write_all(BODY_MARKER)
        }
        None => writer.write_all(chunk),
    }
}

/// Busca el marcador `</body>` dentro de un chunk
fn find_marker(chunk: &[u8]) -> Option<usize> {
    chunk
        .windows(BODY_MARKER.len())
        .position(|window| window == BODY_MARKER)
}
