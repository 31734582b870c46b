//! # Acceptor Multiplexado
//! src/server/tcp.rs
//!
//! Implementación del acceptor: un solo thread que vigila con poll() el
//! socket de escucha y todos los sockets de clientes aceptados. Cuando un
//! cliente queda legible se saca del watch set y se entrega al pool de
//! workers como una tarea; el acceptor nunca bloquea en recv/send.
//!
//! ## Watch set
//!
//! Dos vectores paralelos y acotados: `poll_fds` (el slot 0 es el
//! listener) y `clients` (desplazado en 1 respecto a `poll_fds`). La
//! remoción es swap-con-el-último: el orden entre descriptores vigilados
//! no significa nada.
//!
//! Cada entrada recuerda su instante de llegada: poll() despierta a más
//! tardar cada `read_timeout_ms` y las conexiones que nunca se volvieron
//! legibles dentro de ese plazo se cierran y salen del watch set. Sin ese
//! barrido, clientes que conectan y no envían nada retendrían sus slots
//! para siempre.
//!
//! ## Políticas de saturación
//!
//! - Watch set lleno: la conexión recién aceptada se cierra de inmediato.
//! - Cola de tareas llena: se responde `503 Service Unavailable` desde el
//!   acceptor (respuesta mínima, acotada por el write timeout de la
//!   conexión) y se cierra.

use crate::config::Config;
use crate::http::response::respond_status;
use crate::http::StatusCode;
use crate::pool::WorkerPool;
use crate::server::handler;
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::os::unix::io::AsRawFd;
use std::time::{Duration, Instant};

/// Conexión vigilada por el acceptor, con su instante de llegada
struct Watched {
    stream: TcpStream,
    since: Instant,
}

/// Servidor de archivos HTTP/1.0 concurrente
pub struct Server {
    config: Config,
    pool: WorkerPool,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor y levanta su pool de workers
    pub fn new(config: Config) -> Self {
        let pool = WorkerPool::new(config.workers, config.queue_capacity);

        Self {
            config,
            pool,
            listener: None,
        }
    }

    /// Hace bind del socket de escucha, reintentando puertos
    ///
    /// Si el puerto configurado está ocupado se prueba el siguiente, hasta
    /// 65535. Cualquier otro error de bind es fatal para el arranque.
    pub fn bind(&mut self) -> io::Result<()> {
        let mut port = self.config.port;

        let listener = loop {
            match TcpListener::bind((self.config.host.as_str(), port)) {
                Ok(listener) => break listener,
                Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                    // En 65535 ya no queda puerto siguiente que probar
                    if port == u16::MAX {
                        return Err(io::Error::new(
                            io::ErrorKind::AddrInUse,
                            "No hay puertos libres disponibles",
                        ));
                    }

                    eprintln!("   ⚠️  Puerto {} ocupado, probando {}", port, port + 1);
                    port += 1;
                }
                Err(e) => return Err(e),
            }
        };

        println!("[+] Servidor escuchando en {}", listener.local_addr()?);
        self.listener = Some(listener);

        Ok(())
    }

    /// Dirección real de escucha (disponible después de `bind`)
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Arranca el servidor: bind (si hace falta) y loop del acceptor
    ///
    /// Bloquea el thread llamador indefinidamente.
    pub fn run(&mut self) -> io::Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }

        println!(
            "[*] Acceptor multiplexado: {} workers, cola de {}\n",
            self.pool.workers(),
            self.config.queue_capacity
        );

        self.accept_loop()
    }

    /// Loop del acceptor: poll → aceptar nuevos → despachar legibles →
    /// barrer ociosas
    fn accept_loop(&self) -> io::Result<()> {
        let listener = self
            .listener
            .as_ref()
            .expect("accept_loop requiere bind previo");
        let listener_fd = listener.as_raw_fd();

        // Watch set: poll_fds[0] es el listener; clients[i] acompaña a
        // poll_fds[i + 1]
        let mut poll_fds: Vec<libc::pollfd> = vec![libc::pollfd {
            fd: listener_fd,
            events: libc::POLLIN,
            revents: 0,
        }];
        let mut clients: Vec<Watched> = Vec::new();

        // poll despierta a más tardar cada read_timeout_ms para que el
        // barrido de ociosas corra aunque no haya eventos
        let idle_timeout = Duration::from_millis(self.config.read_timeout_ms);
        let poll_timeout = self.config.read_timeout_ms.clamp(1, i32::MAX as u64) as libc::c_int;

        loop {
            let ready = unsafe {
                libc::poll(
                    poll_fds.as_mut_ptr(),
                    poll_fds.len() as libc::nfds_t,
                    poll_timeout,
                )
            };

            if ready < 0 {
                eprintln!("   ❌ poll falló: {}", io::Error::last_os_error());
                continue;
            }

            // Recoger primero los clientes legibles en orden de índice:
            // las remociones por swap invalidan índices, así que se
            // identifica por descriptor
            let ready_clients: Vec<i32> = poll_fds[1..]
                .iter()
                .filter(|p| p.revents & (libc::POLLIN | libc::POLLHUP | libc::POLLERR) != 0)
                .map(|p| p.fd)
                .collect();

            // Conexiones nuevas en el listener
            if poll_fds[0].revents & libc::POLLIN != 0 {
                self.accept_client(&mut poll_fds, &mut clients);
            }

            // Despachar cada cliente legible al pool
            for fd in ready_clients {
                let Some(pos) = clients.iter().position(|c| c.stream.as_raw_fd() == fd) else {
                    continue;
                };

                let watched = clients.swap_remove(pos);
                poll_fds.swap_remove(pos + 1);

                self.dispatch(watched.stream);
            }

            // Barrido de ociosas: una conexión que nunca se volvió legible
            // no retiene su slot más allá del timeout de lectura
            let mut i = 0;
            while i < clients.len() {
                if clients[i].since.elapsed() >= idle_timeout {
                    eprintln!("   ⚠️  Conexión ociosa superó el timeout, cerrando");
                    clients.swap_remove(i);
                    poll_fds.swap_remove(i + 1);
                } else {
                    i += 1;
                }
            }
        }
    }

    /// Acepta una conexión nueva y la agrega al watch set
    ///
    /// Un error de accept no es fatal: se registra y se sigue. Si el watch
    /// set está lleno, la conexión se cierra de inmediato (política
    /// explícita en vez de overflow indefinido).
    fn accept_client(&self, poll_fds: &mut Vec<libc::pollfd>, clients: &mut Vec<Watched>) {
        let listener = self.listener.as_ref().unwrap();

        let stream = match listener.accept() {
            Ok((stream, addr)) => {
                println!("   ✅ Nueva conexión desde {}", addr);
                stream
            }
            Err(e) => {
                eprintln!("   ❌ Error al aceptar conexión: {}", e);
                return;
            }
        };

        if poll_fds.len() >= self.config.max_clients {
            eprintln!(
                "   ⚠️  Watch set lleno ({}), cerrando conexión nueva",
                self.config.max_clients
            );
            return;
        }

        // Deadline por conexión: un cliente lento agota su timeout en el
        // worker en vez de colgarlo para siempre. Antes del despacho rige
        // el barrido de ociosas del accept_loop.
        let read_timeout = Duration::from_millis(self.config.read_timeout_ms);
        let write_timeout = Duration::from_millis(self.config.write_timeout_ms);
        stream.set_read_timeout(Some(read_timeout)).ok();
        stream.set_write_timeout(Some(write_timeout)).ok();

        poll_fds.push(libc::pollfd {
            fd: stream.as_raw_fd(),
            events: libc::POLLIN,
            revents: 0,
        });
        clients.push(Watched {
            stream,
            since: Instant::now(),
        });
    }

    /// Entrega una conexión legible al pool como tarea
    ///
    /// Si la cola está llena se responde 503 y se cierra desde acá; el
    /// acceptor nunca espera a que la cola drene. La escritura del 503 es
    /// mínima pero bloqueante, acotada por el write timeout que la
    /// conexión recibió al ser aceptada.
    fn dispatch(&self, mut stream: TcpStream) {
        if self.pool.is_full() {
            eprintln!("   ⚠️  Cola de tareas llena, respondiendo 503");
            respond_status(&mut stream, StatusCode::ServiceUnavailable).ok();
            return;
        }

        let root = self.config.document_root.clone();
        let result = self
            .pool
            .execute(move || handler::process_connection(stream, &root));

        if let Err(e) = result {
            // Carrera improbable (un solo productor); solo se registra
            eprintln!("   ❌ No se pudo encolar la conexión: {}", e);
        }
    }
}
