use thiserror::Error;
use tileslide_core::LeaderboardEntry;
use tileslide_protocol::{
    ANONYMOUS_USERNAME, HostMessage, Message, ProtocolError, ScoreRecord, ViewMessage,
    decode_leaderboard, encode_leaderboard, leaderboard_key,
};

use crate::{KvStore, StoreError};

#[derive(Error, Debug)]
pub enum HostError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

pub type Result<T> = std::result::Result<T, HostError>;

/// Answers the embedded view on behalf of one post: its level and its leaderboard.
#[derive(Debug)]
pub struct Host<S> {
    post_id: String,
    username: String,
    store: S,
}

impl<S: KvStore> Host<S> {
    pub fn new(post_id: impl Into<String>, username: Option<String>, store: S) -> Self {
        let username = username
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS_USERNAME.to_string());
        Self {
            post_id: post_id.into(),
            username,
            store,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decodes and handles a raw message, encoding the reply.
    pub fn handle_json(&mut self, json: &str) -> Result<Option<String>> {
        let message = match ViewMessage::decode(json) {
            Ok(message) => message,
            Err(ProtocolError::UnknownMessage(kind)) => {
                tileslide_protocol::report_unknown(&kind);
                return Err(ProtocolError::UnknownMessage(kind).into());
            }
            Err(err) => return Err(err.into()),
        };

        self.handle(message)?
            .map(|reply| reply.encode())
            .transpose()
            .map_err(HostError::from)
    }

    pub fn handle(&mut self, message: ViewMessage) -> Result<Option<HostMessage>> {
        log::debug!("[{}] received {:?}", self.post_id, message);

        Ok(match message {
            ViewMessage::InitialData => Some(HostMessage::SetInitialData {
                username: self.username.clone(),
                leaderboard: "[]".to_string(),
                custom_level_data: self.stored_level()?.unwrap_or_else(|| "{}".to_string()),
                custom_level_leaderboard: self
                    .store
                    .get(&leaderboard_key(&self.post_id))?
                    .unwrap_or_else(|| "[]".to_string()),
            }),
            ViewMessage::AddCustomLevelScore(record) | ViewMessage::AddScore(record) => {
                Some(HostMessage::UpdateCustomLevelLeaderboard {
                    custom_level_leaderboard: self.append_score(record)?,
                })
            }
            ViewMessage::AddCustomLevel { level_data } => {
                // refuse to store something no client could load
                level_data.clone().into_level()?;
                let json = serde_json::to_string(&level_data).map_err(ProtocolError::from)?;
                self.store.set(&self.post_id, json.clone())?;
                log::info!("[{}] level published", self.post_id);
                Some(HostMessage::UpdateCustomLevel {
                    custom_level_data: json,
                })
            }
            ViewMessage::FetchUsername => Some(HostMessage::UpdateUsername {
                username: self.username.clone(),
            }),
            ViewMessage::FetchScores => Some(HostMessage::UpdateLeaderboard {
                leaderboard: "[]".to_string(),
            }),
            ViewMessage::GetCustomLevel => self
                .stored_level()?
                .map(|custom_level_data| HostMessage::UpdateCustomLevel { custom_level_data }),
        })
    }

    fn stored_level(&self) -> Result<Option<String>> {
        Ok(self.store.get(&self.post_id)?)
    }

    fn append_score(&mut self, record: ScoreRecord) -> Result<String> {
        let key = leaderboard_key(&self.post_id);
        let mut leaderboard = match self.store.get(&key)? {
            Some(json) => decode_leaderboard(&json)?,
            None => Default::default(),
        };

        leaderboard.append(LeaderboardEntry::from(record));
        let json = encode_leaderboard(&leaderboard)?;
        self.store.set(&key, json.clone())?;
        log::info!("[{}] {} scores recorded", self.post_id, leaderboard.len());
        Ok(json)
    }
}
