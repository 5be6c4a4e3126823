//! Bookkeeping for hosts that run many games at once.
//!
//! Each player key maps to its own [`Session`] behind an async mutex, so
//! moves within one game are serialized while separate games proceed
//! independently.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use log::info;
use tokio::sync::Mutex;

use crate::common::PlacementError;
use crate::config::FleetSpec;
use crate::game::Session;

/// A session shared between the registry and whoever is handling a move.
pub type SharedSession = Arc<Mutex<Session>>;

pub struct SessionRegistry<K> {
    fleet: FleetSpec,
    sessions: Mutex<HashMap<K, SharedSession>>,
}

impl<K> SessionRegistry<K>
where
    K: Eq + Hash + Debug,
{
    pub fn new(fleet: FleetSpec) -> Self {
        Self {
            fleet,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Begin a new game for `key`, replacing any game it already had.
    pub async fn start(&self, key: K) -> Result<SharedSession, PlacementError> {
        let session = Session::start(self.fleet.clone())?;
        Ok(self.insert(key, session).await)
    }

    pub async fn start_seeded(&self, key: K, seed: u64) -> Result<SharedSession, PlacementError> {
        let session = Session::start_seeded(self.fleet.clone(), seed)?;
        Ok(self.insert(key, session).await)
    }

    pub async fn get(&self, key: &K) -> Option<SharedSession> {
        self.sessions.lock().await.get(key).cloned()
    }

    /// Forget the game for `key`. Handles already given out stay valid.
    pub async fn remove(&self, key: &K) -> Option<SharedSession> {
        self.sessions.lock().await.remove(key)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    async fn insert(&self, key: K, session: Session) -> SharedSession {
        let shared = Arc::new(Mutex::new(session));
        let mut sessions = self.sessions.lock().await;
        info!("new game for {:?} ({} active)", key, sessions.len() + 1);
        if sessions.insert(key, Arc::clone(&shared)).is_some() {
            info!("previous game replaced");
        }
        shared
    }
}
