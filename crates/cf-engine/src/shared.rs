//! Single-writer handle for multi-threaded hosts

use std::sync::Arc;

use parking_lot::Mutex;

use crate::engine::FlipEngine;

/// Cloneable handle; every call holds the lock for its whole duration
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<FlipEngine>>,
}

impl SharedEngine {
    pub fn new(engine: FlipEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut FlipEngine) -> R) -> R {
        let mut engine = self.inner.lock();
        f(&mut engine)
    }
}

impl From<FlipEngine> for SharedEngine {
    fn from(engine: FlipEngine) -> Self {
        Self::new(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::outcome::FlipOverrides;
    use crate::rng::ScriptedSource;

    #[test]
    fn test_flips_from_many_threads() {
        let engine = FlipEngine::new(GameConfig::simulation()).with_rng(ScriptedSource::new(vec![0.99]));
        let shared = SharedEngine::new(engine);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        shared.with(|e| e.flip(FlipOverrides::heads())).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        shared.with(|e| {
            assert_eq!(e.total_flips(), 100);
            assert_eq!(e.streak().count(), 100);
        });
    }
}
