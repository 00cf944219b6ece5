use std::fmt;

use anyhow::Error;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use yew::format::{Json, Nothing};
use yew::services::fetch::{FetchService, FetchTask, Request, Response};
use yew::services::ConsoleService;
use yew::Callback;

pub type MilestoneId = u64;

/// Progress state of a milestone. The remote service encodes this as a
/// single-key marker object (`{"InProgress": null}`), so serialization is
/// implemented by hand instead of derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Completed];

    const KEYS: &'static [&'static str] = &["NotStarted", "InProgress", "Completed"];

    pub fn key(&self) -> &'static str {
        match self {
            Status::NotStarted => "NotStarted",
            Status::InProgress => "InProgress",
            Status::Completed => "Completed",
        }
    }

    pub fn from_key(key: &str) -> Option<Status> {
        match key {
            "NotStarted" => Some(Status::NotStarted),
            "InProgress" => Some(Status::InProgress),
            "Completed" => Some(Status::Completed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Complete",
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key(), &())?;
        map.end()
    }
}

struct StatusVisitor;

impl<'de> Visitor<'de> for StatusVisitor {
    type Value = Status;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a single-key status marker object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Status, A::Error> {
        let key: String = map
            .next_key()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let _: IgnoredAny = map.next_value()?;

        let status =
            Status::from_key(&key).ok_or_else(|| de::Error::unknown_variant(&key, Status::KEYS))?;

        if map.next_key::<IgnoredAny>()?.is_some() {
            return Err(de::Error::custom("status marker has more than one key"));
        }

        Ok(status)
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StatusVisitor)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Milestone {
    pub id: MilestoneId,
    pub title: String,
    pub description: String,
    #[serde(rename = "completionDate")]
    pub completion_date: i64,
    pub status: Status,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateMilestoneRequest {
    pub title: String,
    pub description: String,
    #[serde(rename = "completionDate")]
    pub completion_date: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateStatusRequest {
    pub id: MilestoneId,
    pub status: Status,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeleteMilestoneRequest {
    pub id: MilestoneId,
}

pub type JsonFetchResponse<T> = Response<Json<Result<T, anyhow::Error>>>;

pub fn log_error_to_js(e: anyhow::Error) {
    ConsoleService::log(format!("{}", e).as_str());
}

/// Handle to the remote milestone service. Constructed once and handed to the
/// milestones component, so tests and embedders can point it elsewhere.
#[derive(Clone, Debug, PartialEq)]
pub struct MilestoneClient {
    api_root: String,
}

impl MilestoneClient {
    pub fn new() -> Self {
        MilestoneClient::with_api_root("/api")
    }

    pub fn with_api_root(api_root: impl Into<String>) -> Self {
        MilestoneClient {
            api_root: api_root.into(),
        }
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.api_root, name)
    }

    pub fn get_milestones(
        &self,
        callback: Callback<JsonFetchResponse<Vec<Milestone>>>,
    ) -> Result<FetchTask, Error> {
        let request = Request::get(self.endpoint("get_milestones")).body(Nothing)?;

        FetchService::fetch(request, callback)
    }

    pub fn create_milestone(
        &self,
        request_object: &CreateMilestoneRequest,
        callback: Callback<JsonFetchResponse<String>>,
    ) -> Result<FetchTask, Error> {
        let request = Request::post(self.endpoint("create_milestone"))
            .header("Content-Type", "application/json")
            .body(Json(request_object))?;

        FetchService::fetch(request, callback)
    }

    pub fn update_milestone_status(
        &self,
        request_object: &UpdateStatusRequest,
        callback: Callback<JsonFetchResponse<String>>,
    ) -> Result<FetchTask, Error> {
        let request = Request::post(self.endpoint("update_milestone_status"))
            .header("Content-Type", "application/json")
            .body(Json(request_object))?;

        FetchService::fetch(request, callback)
    }

    pub fn remove_milestone(
        &self,
        request_object: &DeleteMilestoneRequest,
        callback: Callback<JsonFetchResponse<String>>,
    ) -> Result<FetchTask, Error> {
        let request = Request::post(self.endpoint("remove_milestone"))
            .header("Content-Type", "application/json")
            .body(Json(request_object))?;

        FetchService::fetch(request, callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_serializes_as_single_key_marker() {
        assert_eq!(
            serde_json::to_value(&Status::InProgress).unwrap(),
            json!({ "InProgress": null })
        );
    }

    #[test]
    fn status_decodes_from_wire_marker() {
        for status in Status::ALL.iter() {
            let encoded = serde_json::to_string(status).unwrap();
            let decoded: Status = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, *status);
        }
    }

    #[test]
    fn unknown_status_marker_is_rejected() {
        let result: Result<Status, _> = serde_json::from_value(json!({ "Paused": null }));
        assert!(result.is_err());
    }

    #[test]
    fn multi_key_status_marker_is_rejected() {
        let result: Result<Status, _> =
            serde_json::from_value(json!({ "NotStarted": null, "Completed": null }));
        assert!(result.is_err());
    }

    #[test]
    fn milestone_decodes_from_remote_shape() {
        let milestone: Milestone = serde_json::from_value(json!({
            "id": 3,
            "title": "Ship v1",
            "description": "Release first version",
            "completionDate": 1748736000000i64,
            "status": { "NotStarted": null }
        }))
        .unwrap();

        assert_eq!(milestone.id, 3);
        assert_eq!(milestone.title, "Ship v1");
        assert_eq!(milestone.completion_date, 1748736000000);
        assert_eq!(milestone.status, Status::NotStarted);
    }

    #[test]
    fn create_request_uses_remote_field_names() {
        let request_object = CreateMilestoneRequest {
            title: "Ship v1".to_string(),
            description: "Release first version".to_string(),
            completion_date: 1748736000000,
        };

        assert_eq!(
            serde_json::to_value(&request_object).unwrap(),
            json!({
                "title": "Ship v1",
                "description": "Release first version",
                "completionDate": 1748736000000i64
            })
        );
    }

    #[test]
    fn update_status_request_carries_tagged_marker() {
        let request_object = UpdateStatusRequest {
            id: 7,
            status: Status::Completed,
        };

        assert_eq!(
            serde_json::to_value(&request_object).unwrap(),
            json!({ "id": 7, "status": { "Completed": null } })
        );
    }
}
