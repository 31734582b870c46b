//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor de archivos HTTP con
//! soporte para argumentos CLI, variables de entorno y un archivo de
//! configuración estilo `key=value` (el formato clásico `config.cfg`).
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./myhttp --port 8080 --workers 4 --root ./html
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 ./myhttp
//! ```
//!
//! ### Archivo de configuración
//! ```text
//! port=8080
//! threads=4
//! root=./html
//! ```

use clap::Parser;
use std::fs;

/// Configuración del servidor de archivos HTTP/1.0
#[derive(Debug, Clone, Parser)]
#[command(name = "myhttp")]
#[command(about = "Servidor de archivos HTTP/1.0 concurrente para Principios de Sistemas Operativos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Document root: directorio del que se sirven los archivos
    #[arg(long = "root", default_value = "./html", env = "HTTP_ROOT")]
    pub document_root: String,

    /// Número de worker threads del pool
    #[arg(short, long, default_value = "4", env = "HTTP_WORKERS")]
    pub workers: usize,

    /// Capacidad máxima de la cola de tareas
    #[arg(long = "queue", default_value = "256", env = "HTTP_QUEUE")]
    pub queue_capacity: usize,

    /// Máximo de descriptores vigilados por el acceptor (listener incluido)
    #[arg(long = "max-clients", default_value = "1024", env = "HTTP_MAX_CLIENTS")]
    pub max_clients: usize,

    /// Timeout de lectura por conexión en milisegundos
    #[arg(long = "read-timeout", default_value = "5000", env = "HTTP_READ_TIMEOUT")]
    pub read_timeout_ms: u64,

    /// Timeout de escritura por conexión en milisegundos
    #[arg(long = "write-timeout", default_value = "5000", env = "HTTP_WRITE_TIMEOUT")]
    pub write_timeout_ms: u64,

    /// Archivo de configuración opcional (formato key=value)
    #[arg(short, long, env = "HTTP_CONFIG")]
    pub config: Option<String>,
}

impl Config {
    /// Crea la configuración parseando argumentos CLI y, si se indicó
    /// `--config`, aplicando encima los valores del archivo.
    ///
    /// Retorna error si el archivo no se puede leer o si la configuración
    /// resultante no pasa `validate()`.
    pub fn new() -> Result<Self, String> {
        let mut config = Config::parse();

        if let Some(path) = config.config.clone() {
            config.apply_file(&path)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Aplica un archivo de configuración `key=value` sobre esta configuración
    ///
    /// Claves soportadas: `port`, `threads`, `root`. Las claves desconocidas
    /// se ignoran, igual que las líneas sin `=`. Los espacios y tabs alrededor
    /// de clave y valor se descartan.
    ///
    /// # Ejemplo
    /// ```text
    /// port=9090
    /// threads=8
    /// root=/var/www
    /// ```
    pub fn apply_file(&mut self, path: &str) -> Result<(), String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("No se pudo leer '{}': {}", path, e))?;

        for line in contents.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            let key = key.trim();
            let value = value.trim();

            match key {
                "port" => {
                    self.port = value
                        .parse()
                        .map_err(|_| format!("Valor de port inválido: '{}'", value))?;
                }
                "threads" => {
                    self.workers = value
                        .parse()
                        .map_err(|_| format!("Valor de threads inválido: '{}'", value))?;
                }
                "root" => {
                    self.document_root = value.to_string();
                }
                // Claves desconocidas se ignoran
                _ => {}
            }
        }

        Ok(())
    }

    /// Obtiene la dirección completa para bind (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }

        if self.queue_capacity == 0 {
            return Err("Queue capacity must be >= 1".to_string());
        }

        // Necesitamos espacio para el listener más al menos un cliente
        if self.max_clients < 2 {
            return Err("Max clients must be >= 2".to_string());
        }

        if self.document_root.is_empty() {
            return Err("Document root must not be empty".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("⚙️  Configuración:");
        println!("   Address:      {}", self.address());
        println!("   Root:         {}", self.document_root);
        println!("   Workers:      {}", self.workers);
        println!("   Queue cap:    {}", self.queue_capacity);
        println!("   Max clients:  {}", self.max_clients);
        println!(
            "   Timeouts:     {} ms read / {} ms write",
            self.read_timeout_ms, self.write_timeout_ms
        );
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            document_root: "./html".to_string(),
            workers: 4,
            queue_capacity: 256,
            max_clients: 1024,
            read_timeout_ms: 5_000,
            write_timeout_ms: 5_000,
            config: None,
        }
    }
}
