//! Tests de integración para el servidor de archivos
//! tests/integration_test.rs
//!
//! Levantan un servidor completo en un puerto efímero (acceptor con poll,
//! pool de workers, document root temporal) y le hablan HTTP/1.0 crudo por
//! un TcpStream, como lo haría un cliente real.

use myhttp::config::Config;
use myhttp::server::Server;
use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

/// Document root compartido por todos los tests del archivo
fn document_root() -> &'static PathBuf {
    static ROOT: OnceLock<PathBuf> = OnceLock::new();
    ROOT.get_or_init(|| {
        let root = std::env::temp_dir().join(format!("myhttp_integration_{}", std::process::id()));
        fs::create_dir_all(root.join("docs")).unwrap();

        fs::write(
            root.join("index.html"),
            "<html><body>bienvenido</body></html>",
        )
        .unwrap();
        fs::write(root.join("form.html"), "<body>resultado: </body>").unwrap();
        fs::write(root.join("style.css"), "body { margin: 0; }").unwrap();
        fs::write(root.join("docs").join("index.html"), "<html>docs</html>").unwrap();

        root
    })
}

/// Servidor único compartido: se levanta una vez, en puerto efímero
fn server_addr() -> SocketAddr {
    static ADDR: OnceLock<SocketAddr> = OnceLock::new();
    *ADDR.get_or_init(|| {
        let mut config = Config::default();
        config.port = 0;
        config.workers = 4;
        config.queue_capacity = 64;
        config.document_root = document_root().to_string_lossy().to_string();

        let mut server = Server::new(config);
        server.bind().expect("bind del servidor de test");
        let addr = server.local_addr().unwrap();

        thread::spawn(move || {
            let _ = server.run();
        });

        addr
    })
}

/// Helper: envía bytes crudos y retorna la response completa como texto
fn send_raw(raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(server_addr()).expect("conexión al servidor de test");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    stream
        .set_write_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    stream.write_all(raw).unwrap();
    stream.flush().unwrap();
    stream.shutdown(std::net::Shutdown::Write).unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

/// Helper: extrae el body de una response HTTP
fn extract_body(response: &str) -> &str {
    match response.find("\r\n\r\n") {
        Some(pos) => &response[pos + 4..],
        None => "",
    }
}

#[test]
fn test_get_index_via_slash() {
    let response = send_raw(b"GET / HTTP/1.0\r\n\r\n");

    assert!(response.starts_with("HTTP/1.0 200 OK\r\n"), "got: {}", response);
    assert!(response.contains("Server: myHttp\r\n"));
    assert!(response.contains("Content-Type: text/html\r\n"));
    assert_eq!(extract_body(&response), "<html><body>bienvenido</body></html>");
}

#[test]
fn test_get_directory_appends_index() {
    let response = send_raw(b"GET /docs/ HTTP/1.0\r\n\r\n");

    assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
    assert_eq!(extract_body(&response), "<html>docs</html>");
}

#[test]
fn test_get_with_query_string() {
    // El query se descarta al resolver el path
    let response = send_raw(b"GET /style.css?version=2 HTTP/1.0\r\n\r\n");

    assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
    assert!(response.contains("Content-Type: text/css\r\n"));
    assert_eq!(extract_body(&response), "body { margin: 0; }");
}

#[test]
fn test_get_response_has_no_content_length() {
    // Desviación documentada del diseño: las respuestas 200 de un GET puro
    // nunca declaran Content-Length
    let response = send_raw(b"GET / HTTP/1.0\r\n\r\n");

    assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
    assert!(!response.contains("Content-Length"));
}

#[test]
fn test_missing_file_is_404() {
    let response = send_raw(b"GET /no_existe.html HTTP/1.0\r\n\r\n");

    assert!(response.starts_with("HTTP/1.0 404 Not Found\r\n"));
    assert!(response.contains("Content-Length: 0\r\n"));
    assert_eq!(extract_body(&response), "");
}

#[test]
fn test_unknown_method_is_501() {
    let response = send_raw(b"PUT /index.html HTTP/1.0\r\n\r\n");

    assert!(response.starts_with("HTTP/1.0 501 Not Implemented\r\n"));
    assert!(response.contains("Content-Length: 0\r\n"));
}

#[test]
fn test_post_without_content_length_is_400() {
    let response = send_raw(b"POST /form.html HTTP/1.0\r\n\r\n");

    assert!(response.starts_with("HTTP/1.0 400 Bad Request\r\n"));
}

#[test]
fn test_post_injects_body_into_template() {
    let response =
        send_raw(b"POST /form.html HTTP/1.0\r\nContent-Length: 6\r\n\r\nhola!!");

    assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
    // El body del request reusa el header Content-Length en la response
    assert!(response.contains("Content-Length: 6\r\n"));
    assert_eq!(extract_body(&response), "<body>resultado: hola!!</body>");
}

#[test]
fn test_post_with_explicit_zero_length_is_served() {
    let response = send_raw(b"POST /form.html HTTP/1.0\r\nContent-Length: 0\r\n\r\n");

    // Some(0) no es el centinela "ausente": se sirve el archivo sin inyección
    assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
    assert_eq!(extract_body(&response), "<body>resultado: </body>");
}

#[test]
fn test_malformed_request_line_is_not_fatal() {
    let response = send_raw(b"GARBAGE\r\n\r\n");

    // Método Unknown → 501; el proceso sigue vivo para el resto de tests
    assert!(response.starts_with("HTTP/1.0 501 Not Implemented\r\n"));
}

#[test]
fn test_concurrent_requests() {
    let handles: Vec<_> = (0..10)
        .map(|_| thread::spawn(|| send_raw(b"GET / HTTP/1.0\r\n\r\n")))
        .collect();

    for handle in handles {
        let response = handle.join().unwrap();
        assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
    }
}

#[test]
fn test_sequential_requests_reuse_nothing() {
    // Sin keep-alive: cada request es una conexión nueva
    for _ in 0..5 {
        let response = send_raw(b"GET / HTTP/1.0\r\n\r\n");
        assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
    }
}
