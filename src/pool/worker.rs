//! # Workers
//! src/pool/worker.rs
//!
//! Pool fijo de threads que consumen la cola de tareas. Cada worker corre un
//! loop infinito: desencolar, ejecutar, repetir. Una tarea lenta ocupa a su
//! worker hasta que retorna, así que el throughput del pool está acotado por
//! `n` requests en vuelo.

use crate::pool::queue::{QueueFullError, TaskQueue};
use std::sync::Arc;
use std::thread;

/// Pool de workers con una cola de tareas compartida
///
/// No hay work-stealing, redimensionamiento dinámico ni timeout por tarea.
/// El pool vive lo que vive el proceso: no se especifica un camino de
/// shutdown/join, igual que en el diseño original.
pub struct WorkerPool {
    queue: Arc<TaskQueue>,
    workers: usize,
}

impl WorkerPool {
    /// Crea un pool con `workers` threads y una cola de capacidad
    /// `queue_capacity`
    pub fn new(workers: usize, queue_capacity: usize) -> Self {
        assert!(workers > 0, "el pool necesita al menos un worker");

        let queue = Arc::new(TaskQueue::new(queue_capacity));

        for id in 0..workers {
            let queue = Arc::clone(&queue);

            thread::Builder::new()
                .name(format!("worker-{}", id))
                .spawn(move || Self::work_loop(queue))
                .expect("No se pudo crear el worker thread");
        }

        Self { queue, workers }
    }

    /// Loop de un worker: pop bloqueante y ejecución síncrona
    fn work_loop(queue: Arc<TaskQueue>) {
        loop {
            let task = queue.pop();
            task();
        }
    }

    /// Encola una tarea para que la ejecute algún worker
    ///
    /// Retorna `Err` si la cola está llena (política de rechazo).
    pub fn execute<F>(&self, f: F) -> Result<(), QueueFullError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.queue.push(Box::new(f))
    }

    /// Número de workers del pool
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Verifica si la cola de tareas está llena
    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }
}
