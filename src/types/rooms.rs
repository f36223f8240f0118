use serde::{Deserialize, Serialize};

/// Chat room kind, as reported by `GET /rooms`.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    My,
    Direct,
    Group,
    /// Kinds this SDK does not know about yet.
    #[serde(other)]
    Unknown,
}

/// One entry of `GET /rooms`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Room {
    pub room_id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub sticky: bool,
    #[serde(default)]
    pub unread_num: u64,
    #[serde(default)]
    pub mention_num: u64,
    #[serde(default)]
    pub mytask_num: u64,
    #[serde(default)]
    pub message_num: u64,
    #[serde(default)]
    pub file_num: u64,
    #[serde(default)]
    pub task_num: u64,
    #[serde(default)]
    pub icon_path: Option<String>,
    #[serde(default)]
    pub last_update_time: Option<i64>,
}

/// `GET /rooms/{room_id}`: room fields plus a description.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RoomInfo {
    #[serde(flatten)]
    pub room: Room,
    #[serde(default)]
    pub description: Option<String>,
}

/// Author of a [`Message`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Account {
    pub account_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_image_url: Option<String>,
}

/// One entry of `GET /rooms/{room_id}/messages`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Message {
    pub message_id: String,
    pub account: Account,
    pub body: String,
    #[serde(default)]
    pub send_time: Option<i64>,
    #[serde(default)]
    pub update_time: Option<i64>,
}

/// `POST /rooms/{room_id}/messages` result.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PostedMessage {
    pub message_id: String,
}
