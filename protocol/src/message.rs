use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{LevelRecord, ProtocolError, Result, ScoreRecord};

/// Messages sent from the embedded view to its host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ViewMessage {
    InitialData,
    AddCustomLevelScore(ScoreRecord),
    /// Legacy campaign submission; the campaign is disabled so it lands in the same ledger.
    AddScore(ScoreRecord),
    AddCustomLevel {
        #[serde(rename = "levelData")]
        level_data: LevelRecord,
    },
    FetchUsername,
    FetchScores,
    GetCustomLevel,
}

/// Messages sent from the host back to the embedded view.
///
/// Levels and leaderboards travel as JSON strings, the way they sit in the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum HostMessage {
    SetInitialData {
        username: String,
        leaderboard: String,
        #[serde(rename = "customLevelData")]
        custom_level_data: String,
        #[serde(rename = "customLevelLeaderboard")]
        custom_level_leaderboard: String,
    },
    UpdateCustomLevelLeaderboard {
        #[serde(rename = "customLevelLeaderboard")]
        custom_level_leaderboard: String,
    },
    UpdateCustomLevel {
        #[serde(rename = "customLevelData")]
        custom_level_data: String,
    },
    UpdateUsername {
        username: String,
    },
    UpdateLeaderboard {
        leaderboard: String,
    },
}

/// A message type of the boundary with its closed set of `type` tags.
pub trait Message: Serialize + DeserializeOwned {
    const KINDS: &'static [&'static str];

    /// Decodes a message, telling an unknown `type` apart from a malformed payload.
    fn decode(json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(rename = "type")]
            kind: String,
        }

        let envelope: Envelope = serde_json::from_str(json)?;
        if !Self::KINDS.contains(&envelope.kind.as_str()) {
            return Err(ProtocolError::UnknownMessage(envelope.kind));
        }

        Ok(serde_json::from_str(json)?)
    }

    fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Message for ViewMessage {
    const KINDS: &'static [&'static str] = &[
        "initialData",
        "addCustomLevelScore",
        "addScore",
        "addCustomLevel",
        "fetchUsername",
        "fetchScores",
        "getCustomLevel",
    ];
}

impl Message for HostMessage {
    const KINDS: &'static [&'static str] = &[
        "setInitialData",
        "updateCustomLevelLeaderboard",
        "updateCustomLevel",
        "updateUsername",
        "updateLeaderboard",
    ];
}

/// Reports a message the receiver does not understand.
///
/// Such a message means both sides disagree on the protocol, so debug builds stop here.
pub fn report_unknown(kind: &str) {
    log::error!("Unknown message type: {}", kind);
    debug_assert!(false, "unknown message type {:?}", kind);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_unit_and_payload_messages() {
        assert_eq!(
            ViewMessage::decode(r#"{"type":"initialData"}"#).unwrap(),
            ViewMessage::InitialData
        );

        let message = ViewMessage::decode(
            r#"{"type":"addCustomLevelScore","data":{"playerName":"ana","playerScore":390,"levelReached":1}}"#,
        )
        .unwrap();
        assert_eq!(
            message,
            ViewMessage::AddCustomLevelScore(ScoreRecord {
                player_name: "ana".to_string(),
                player_score: 390,
                level_reached: 1,
            })
        );
    }

    #[test]
    fn unknown_type_is_distinguished_from_bad_payload() {
        assert!(matches!(
            ViewMessage::decode(r#"{"type":"deleteEverything"}"#),
            Err(ProtocolError::UnknownMessage(kind)) if kind == "deleteEverything"
        ));
        assert!(matches!(
            ViewMessage::decode(r#"{"type":"addScore","data":{"playerName":1}}"#),
            Err(ProtocolError::Json(_))
        ));
    }

    #[test]
    fn host_message_uses_camel_case_fields() {
        let json = HostMessage::UpdateCustomLevel {
            custom_level_data: "{}".to_string(),
        }
        .encode()
        .unwrap();

        assert_eq!(
            json,
            r#"{"type":"updateCustomLevel","data":{"customLevelData":"{}"}}"#
        );
        assert_eq!(
            HostMessage::decode(&json).unwrap(),
            HostMessage::UpdateCustomLevel {
                custom_level_data: "{}".to_string()
            }
        );
    }
}
