//! # myHttp - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de archivos HTTP/1.0.

use myhttp::config::Config;
use myhttp::server::Server;

fn main() {
    println!("=================================");
    println!("  myHttp - Servidor HTTP/1.0");
    println!("  Principios de Sistemas Operativos");
    println!("=================================\n");

    // Crear configuración (CLI, env o archivo)
    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("💥 Configuración inválida: {}", e);
            std::process::exit(1);
        }
    };

    config.print_summary();

    // Crear el servidor
    let mut server = Server::new(config);

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
