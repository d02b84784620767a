use std::sync::Arc;

use loadout_core::UserId;
use loadout_engine::{Request, Response, StatsService};
use loadout_storage::{MemoryRecordStore, RecordStore, SqliteRecordStore, StorageError};
use uuid::Uuid;

use crate::resolver::SharedResolver;

pub struct TestPlayer {
    pub token: String,
    pub user_id: UserId,
}

impl TestPlayer {
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub fn request(&self, method: &str, path: &str) -> Request {
        Request::new(method, path).with_header("Authorization", &self.authorization())
    }
}

/// A stats service wired to an in-process resolver and store.
pub struct TestBackend {
    pub service: StatsService<Arc<SharedResolver>, Arc<dyn RecordStore>>,
    resolver: Arc<SharedResolver>,
    memory: Option<Arc<MemoryRecordStore>>,
    players: Vec<TestPlayer>,
}

impl TestBackend {
    pub fn in_memory() -> Self {
        let memory = Arc::new(MemoryRecordStore::new());
        let store: Arc<dyn RecordStore> = memory.clone();
        Self::build(store, Some(memory))
    }

    pub fn sqlite(path: &str) -> Result<Self, StorageError> {
        let store: Arc<dyn RecordStore> = Arc::new(SqliteRecordStore::open(path)?);
        Ok(Self::build(store, None))
    }

    fn build(store: Arc<dyn RecordStore>, memory: Option<Arc<MemoryRecordStore>>) -> Self {
        let resolver = Arc::new(SharedResolver::new());
        Self {
            service: StatsService::new(resolver.clone(), store),
            resolver,
            memory,
            players: Vec::new(),
        }
    }

    /// Issues a token for a fresh user id. The player has no record yet.
    pub fn add_player(&mut self) -> usize {
        let user_id = UserId::parse(&format!("player-{}", Uuid::now_v7()))
            .unwrap_or_else(|e| panic!("generated user id rejected: {e}"));
        let token = Uuid::now_v7().simple().to_string();
        self.resolver.issue(&token, user_id.clone());
        let index = self.players.len();
        self.players.push(TestPlayer { token, user_id });
        index
    }

    /// Adds a player and creates their all-zero record.
    pub fn add_registered_player(&mut self) -> usize {
        let index = self.add_player();
        let response = self.handle(&self.players[index].request("POST", "/stats"));
        assert_eq!(response.status, 200, "registration failed: {:?}", response.body);
        index
    }

    pub fn player(&self, index: usize) -> &TestPlayer {
        &self.players[index]
    }

    pub fn revoke(&self, index: usize) {
        self.resolver.revoke(&self.players[index].token);
    }

    pub fn handle(&self, request: &Request) -> Response {
        self.service.handle(request)
    }

    /// Toggles the in-memory store offline. No-op for sqlite backends.
    pub fn set_store_offline(&self, offline: bool) {
        if let Some(memory) = &self.memory {
            memory.set_offline(offline);
        }
    }
}
