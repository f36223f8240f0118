use crate::transport::request::Request;
use crate::types::{Message, PostedMessage, Room, RoomInfo, RoomType};
use crate::{Client, Error};

/// Chat room APIs.
///
/// Every operation wraps one dispatcher call with fixed endpoint segments
/// and explicit headers (`Accept: application/json` plus the credential;
/// the token value matches what the dispatcher would inject by default).
#[derive(Clone)]
pub struct RoomsService {
    client: Client,
}

impl RoomsService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn with_resource_headers(&self, req: Request) -> Result<Request, Error> {
        Ok(req.headers(self.client.resource_headers()?))
    }

    /// `GET /rooms`
    pub fn list(&self) -> Result<Vec<Room>, Error> {
        let req = self.with_resource_headers(Request::get(["rooms"]))?;
        self.client.send_json(req)
    }

    /// Direct-message rooms: [`Self::list`] filtered client-side to
    /// `type == "direct"`, order preserved. No extra network call.
    pub fn contacts(&self) -> Result<Vec<Room>, Error> {
        let rooms = self.list()?;
        Ok(rooms
            .into_iter()
            .filter(|room| room.room_type == RoomType::Direct)
            .collect())
    }

    /// `GET /rooms/{room_id}`
    pub fn info(&self, room_id: u64) -> Result<RoomInfo, Error> {
        let req =
            self.with_resource_headers(Request::get(["rooms".to_string(), room_id.to_string()]))?;
        self.client.send_json(req)
    }

    /// `GET /rooms/{room_id}/messages`
    ///
    /// With `force`, the latest 100 messages are returned regardless of
    /// whether they were already fetched (`?force=1`). A `204 No Content`
    /// means nothing new and yields an empty vector.
    pub fn messages(&self, room_id: u64, force: bool) -> Result<Vec<Message>, Error> {
        let mut req = Request::get([
            "rooms".to_string(),
            room_id.to_string(),
            "messages".to_string(),
        ]);
        if force {
            req = req.query_pair("force", "1");
        }
        let req = self.with_resource_headers(req)?;
        Ok(self.client.send_json_opt(req)?.unwrap_or_default())
    }

    /// `POST /rooms/{room_id}/messages`
    ///
    /// `self_unread` marks the posted message unread for the author; the
    /// field is always sent, as `"1"` or `"0"`.
    pub fn post_message(
        &self,
        room_id: u64,
        message: impl Into<String>,
        self_unread: bool,
    ) -> Result<PostedMessage, Error> {
        let req = Request::post([
            "rooms".to_string(),
            room_id.to_string(),
            "messages".to_string(),
        ])
        .form_pair("self_unread", if self_unread { "1" } else { "0" })
        .form_pair("body", message);
        let req = self.with_resource_headers(req)?;
        self.client.send_json(req)
    }
}
