//! # Cola de Tareas
//! src/pool/queue.rs
//!
//! Implementa una cola FIFO acotada y thread-safe para las tareas que el
//! acceptor delega a los workers.
//!
//! Cada tarea es una clausura que ya capturó su conexión; la cola solo
//! necesita saber cómo invocarla.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

/// Una unidad de trabajo diferida: la clausura captura el socket del cliente
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Error retornado cuando la cola está llena
///
/// La política de overflow es rechazar: `push` nunca bloquea al productor
/// ni crece más allá de la capacidad fijada en la construcción.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFullError {
    /// Capacidad de la cola que rechazó la tarea
    pub capacity: usize,
}

impl std::fmt::Display for QueueFullError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task queue is full (capacity: {})", self.capacity)
    }
}

impl std::error::Error for QueueFullError {}

/// Cola FIFO acotada protegida por mutex + condvar
///
/// Invariante: `0 <= len <= capacity`. El condvar señala no-vacuidad,
/// así que `pop` puede bloquear liberando el lock mientras espera.
pub struct TaskQueue {
    /// VecDeque hace de ring buffer: push al final, pop del frente en O(1)
    tasks: Mutex<VecDeque<Task>>,

    /// Señala a los workers cuando hay tareas disponibles
    not_empty: Condvar,

    /// Capacidad máxima, fijada al crear la cola
    capacity: usize,
}

impl TaskQueue {
    /// Crea una cola con capacidad máxima fija
    pub fn new(capacity: usize) -> Self {
        Self {
            tasks: Mutex::new(VecDeque::with_capacity(capacity)),
            not_empty: Condvar::new(),
            capacity,
        }
    }

    /// Encola una tarea al final y despierta a un worker
    ///
    /// Retorna `Err(QueueFullError)` si la cola está llena; la tarea
    /// rechazada se devuelve al olvido y el productor decide la respuesta.
    pub fn push(&self, task: Task) -> Result<(), QueueFullError> {
        let mut tasks = self.tasks.lock().unwrap();

        if tasks.len() >= self.capacity {
            return Err(QueueFullError {
                capacity: self.capacity,
            });
        }

        tasks.push_back(task);

        // Despertar exactamente a un worker esperando
        self.not_empty.notify_one();

        Ok(())
    }

    /// Desencola la tarea más antigua (FIFO estricto)
    ///
    /// Bloquea liberando el lock hasta que haya al menos una tarea.
    pub fn pop(&self) -> Task {
        let mut tasks = self.tasks.lock().unwrap();

        loop {
            if let Some(task) = tasks.pop_front() {
                return task;
            }

            tasks = self.not_empty.wait(tasks).unwrap();
        }
    }

    /// Retorna el tamaño actual de la cola
    pub fn len(&self) -> usize {
        let tasks = self.tasks.lock().unwrap();
        tasks.len()
    }

    /// Verifica si la cola está vacía
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verifica si la cola está llena
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Retorna la capacidad máxima
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
