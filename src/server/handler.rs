//! # Handler por Conexión
//! src/server/handler.rs
//!
//! Función que ejecuta cada worker con la conexión que le entregó el
//! acceptor: una sola lectura del socket, parseo del request, y la
//! respuesta que corresponda según el método y el filesystem.
//!
//! La conexión se cierra exactamente una vez, al hacer drop del stream
//! cuando esta función retorna.

use crate::http::request::{Method, Request};
use crate::http::response::{respond_file, respond_status};
use crate::http::status::StatusCode;
use std::fs::File;
use std::io::{Read, Write};

/// Tamaño del buffer de lectura: la request completa debe caber en una
/// sola lectura (limitación documentada del diseño)
pub const BUFFER_SIZE: usize = 8192;

/// Procesa una conexión completa: recv → parse → respond → close
///
/// Los errores de transporte se registran y la conexión se abandona;
/// nunca son fatales para el proceso.
pub fn process_connection<S: Read + Write>(mut stream: S, root: &str) {
    let mut buffer = [0u8; BUFFER_SIZE];

    let bytes_read = match stream.read(&mut buffer) {
        // El peer cerró sin enviar nada
        Ok(0) => return,
        Ok(n) => n,
        Err(e) => {
            eprintln!("   ❌ Error leyendo del cliente: {}", e);
            return;
        }
    };

    let request = Request::parse(&buffer[..bytes_read], root);
    println!("   ✅ {} {}", request.method().as_str(), request.path());

    // Un POST sin Content-Length declarado se rechaza antes de tocar
    // el filesystem (None es el centinela "header ausente", distinto
    // de Some(0))
    if request.method() == Method::Post && request.content_length().is_none() {
        send(respond_status(&mut stream, StatusCode::BadRequest));
        return;
    }

    match request.method() {
        Method::Get | Method::Post => serve_file(&mut stream, &request),
        Method::Unknown => send(respond_status(&mut stream, StatusCode::NotImplemented)),
    }
}

/// Resuelve el path del request contra el filesystem y responde
fn serve_file<S: Write>(stream: &mut S, request: &Request) {
    match File::open(request.path()) {
        Ok(file) => send(respond_file(stream, request, file)),
        Err(_) => send(respond_status(stream, StatusCode::NotFound)),
    }
}

/// Registra un error de escritura sin propagarlo: la conexión se abandona
fn send(result: std::io::Result<()>) {
    if let Err(e) = result {
        eprintln!("   ❌ Error escribiendo al cliente: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{self, Cursor};
    use std::path::PathBuf;

    /// Stream falso: lee de un buffer fijo y acumula lo escrito
    struct FakeStream {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
    }

    impl FakeStream {
        fn new(input: &[u8]) -> Self {
            Self {
                input: Cursor::new(input.to_vec()),
                output: Vec::new(),
            }
        }
    }

    impl Read for FakeStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for FakeStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn temp_root(marker: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "myhttp_handler_test_{}_{}",
            std::process::id(),
            marker
        ));
        fs::create_dir_all(&root).unwrap();
        root
    }

    #[test]
    fn test_get_existing_file() {
        let root = temp_root("get");
        fs::write(root.join("index.html"), "<html>hola</html>").unwrap();

        let mut stream = FakeStream::new(b"GET / HTTP/1.0\r\n\r\n");
        process_connection(&mut stream, root.to_str().unwrap());

        let text = String::from_utf8_lossy(&stream.output);
        assert!(text.starts_with("HTTP/1.0 200 OK\r\n"));
        assert!(text.ends_with("<html>hola</html>"));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_get_missing_file_is_404() {
        let root = temp_root("404");

        let mut stream = FakeStream::new(b"GET /no_existe.html HTTP/1.0\r\n\r\n");
        process_connection(&mut stream, root.to_str().unwrap());

        let text = String::from_utf8_lossy(&stream.output);
        assert!(text.starts_with("HTTP/1.0 404 Not Found\r\n"));
        assert!(text.contains("Content-Length: 0\r\n"));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_unknown_method_is_501() {
        let mut stream = FakeStream::new(b"DELETE /x HTTP/1.0\r\n\r\n");
        process_connection(&mut stream, "./html");

        let text = String::from_utf8_lossy(&stream.output);
        assert!(text.starts_with("HTTP/1.0 501 Not Implemented\r\n"));
    }

    #[test]
    fn test_post_without_content_length_is_400() {
        let root = temp_root("400");
        fs::write(root.join("index.html"), "<body></body>").unwrap();

        let mut stream = FakeStream::new(b"POST / HTTP/1.0\r\n\r\n");
        process_connection(&mut stream, root.to_str().unwrap());

        let text = String::from_utf8_lossy(&stream.output);
        // 400 antes de resolver el archivo, aunque exista
        assert!(text.starts_with("HTTP/1.0 400 Bad Request\r\n"));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_post_with_zero_length_is_served() {
        // Content-Length: 0 explícito NO es lo mismo que ausente
        let root = temp_root("cl0");
        fs::write(root.join("index.html"), "<html></html>").unwrap();

        let mut stream = FakeStream::new(b"POST / HTTP/1.0\r\nContent-Length: 0\r\n\r\n");
        process_connection(&mut stream, root.to_str().unwrap());

        let text = String::from_utf8_lossy(&stream.output);
        assert!(text.starts_with("HTTP/1.0 200 OK\r\n"));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_post_templating_echo() {
        let root = temp_root("tpl");
        fs::write(root.join("form.html"), "<body>hi</body>").unwrap();

        let mut stream =
            FakeStream::new(b"POST /form.html HTTP/1.0\r\nContent-Length: 8\r\n\r\nINSERTED");
        process_connection(&mut stream, root.to_str().unwrap());

        let text = String::from_utf8_lossy(&stream.output);
        assert!(text.contains("<body>hiINSERTED</body>"));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_empty_read_closes_silently() {
        let mut stream = FakeStream::new(b"");
        process_connection(&mut stream, "./html");

        assert!(stream.output.is_empty());
    }
}
