pub mod config;
pub mod error;
pub mod handler;
pub mod identity;
pub mod logging;

pub use config::ServiceConfig;
pub use error::EngineError;
pub use handler::{Request, Response};
pub use identity::{
    AuthError, IdentityResolver, StaticTokenResolver, TokenTableError, bearer_token,
};

use serde::Deserialize;

use loadout_core::{PlayerRecord, RawFieldMap, Stat, UserId, codec};
use loadout_storage::RecordStore;

/// Body of an upgrade call. Indices only matter for assignment skills.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpgradeRequest {
    pub skill: String,
    #[serde(default)]
    pub character_index: u32,
    #[serde(default)]
    pub upgrade_point_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Win,
    Loss,
}

impl MatchOutcome {
    fn stat(self) -> Stat {
        match self {
            Self::Win => Stat::Wins,
            Self::Loss => Stat::Losses,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MatchRequest {
    outcome: MatchOutcome,
}

/// A resolved user together with their decoded stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStats {
    pub user_id: UserId,
    pub record: PlayerRecord,
}

impl PlayerStats {
    pub fn to_raw(&self) -> RawFieldMap {
        codec::encode(&self.user_id, &self.record)
    }
}

/// Request handlers over an identity provider and a record store.
///
/// Each call authenticates, then does at most one read and one write.
/// Nothing is held between calls.
pub struct StatsService<R, S> {
    resolver: R,
    store: S,
}

impl<R: IdentityResolver, S: RecordStore> StatsService<R, S> {
    pub fn new(resolver: R, store: S) -> Self {
        Self { resolver, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves the user behind an `Authorization` header value.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<UserId, EngineError> {
        let token = bearer_token(authorization).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected credential");
        })?;
        let user_id = self.resolver.resolve(token).inspect_err(|e| {
            tracing::warn!(error = %e, "identity resolution failed");
        })?;
        Ok(user_id)
    }

    fn load(&self, user_id: &UserId) -> Result<PlayerRecord, EngineError> {
        let raw = self
            .store
            .get(user_id)
            .inspect_err(|e| tracing::warn!(user = %user_id, error = %e, "store read failed"))?
            .ok_or_else(|| EngineError::RecordNotFound(user_id.to_string()))?;
        Ok(codec::decode(&raw))
    }

    fn persist(&self, user_id: &UserId, record: &PlayerRecord) -> Result<(), EngineError> {
        self.store
            .put(user_id, &codec::encode(user_id, record))
            .inspect_err(|e| tracing::warn!(user = %user_id, error = %e, "store write failed"))?;
        Ok(())
    }

    pub fn get_stats(&self, authorization: Option<&str>) -> Result<PlayerStats, EngineError> {
        let user_id = self.authenticate(authorization)?;
        let record = self.load(&user_id)?;
        tracing::info!(user = %user_id, "stats fetched");
        Ok(PlayerStats { user_id, record })
    }

    /// Creates an all-zero record for a new player. An existing record is
    /// returned unchanged.
    pub fn create_stats(&self, authorization: Option<&str>) -> Result<PlayerStats, EngineError> {
        let user_id = self.authenticate(authorization)?;
        let fresh = PlayerRecord::new();
        let created = self
            .store
            .insert_new(&user_id, &codec::encode(&user_id, &fresh))?;
        let record = if created { fresh } else { self.load(&user_id)? };
        tracing::info!(user = %user_id, created, "stats initialized");
        Ok(PlayerStats { user_id, record })
    }

    /// Overwrites the full record. The body goes through the codec, so
    /// malformed fields land as zero and the key always comes from the
    /// credential, never from the body.
    pub fn save_stats(
        &self,
        authorization: Option<&str>,
        body: &RawFieldMap,
    ) -> Result<PlayerStats, EngineError> {
        let user_id = self.authenticate(authorization)?;
        let record = codec::decode(body);
        self.persist(&user_id, &record)?;
        tracing::info!(user = %user_id, "stats saved");
        Ok(PlayerStats { user_id, record })
    }

    pub fn upgrade(
        &self,
        authorization: Option<&str>,
        request: &UpgradeRequest,
    ) -> Result<PlayerStats, EngineError> {
        let user_id = self.authenticate(authorization)?;
        let mut record = self.load(&user_id)?;
        match codec::apply_upgrade(
            &mut record,
            &request.skill,
            request.character_index,
            request.upgrade_point_index,
        ) {
            Some(rule) => {
                tracing::info!(
                    user = %user_id,
                    skill = rule.name,
                    stat = %rule.stat,
                    value = record.get(rule.stat),
                    "upgrade applied"
                );
            }
            None => {
                tracing::info!(user = %user_id, skill = %request.skill, "unknown skill ignored");
            }
        }
        self.persist(&user_id, &record)?;
        Ok(PlayerStats { user_id, record })
    }

    pub fn record_match(
        &self,
        authorization: Option<&str>,
        outcome: MatchOutcome,
    ) -> Result<PlayerStats, EngineError> {
        let user_id = self.authenticate(authorization)?;
        let mut record = self.load(&user_id)?;
        record.increment(outcome.stat(), 1);
        self.persist(&user_id, &record)?;
        tracing::info!(user = %user_id, ?outcome, "match recorded");
        Ok(PlayerStats { user_id, record })
    }
}
