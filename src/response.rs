use crate::error::{ApiError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `meta` block of every response envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Status code reported by the service
    #[serde(default)]
    pub code: i32,

    /// Empty on success, set on failure
    #[serde(default)]
    pub error_id: String,

    #[serde(default)]
    pub error_message: String,

    /// Remaining keys, such as `min_id`, `max_id` and `more` on paged streams
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Meta {
    pub fn is_error(&self) -> bool {
        !self.error_id.is_empty()
    }

    /// Build the API error for a failing meta block
    pub fn to_error(&self) -> Option<ApiError> {
        self.is_error().then(|| ApiError {
            code: self.code,
            error_id: self.error_id.clone(),
            error_message: self.error_message.clone(),
        })
    }

    /// Whether more items are available, when the service reports it
    pub fn more(&self) -> Option<bool> {
        self.extra.get("more").and_then(Value::as_bool)
    }
}

/// Wire form of a response: opaque `data` plus `meta`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub data: Value,
    /// A missing block reads as an empty, successful one
    #[serde(default)]
    pub meta: Meta,
}

impl Envelope {
    /// Parse an envelope from raw response bytes
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Check `meta` and, on success, decode `data` into `T`.
    ///
    /// `meta.error_id` is checked before `data` is touched, so a payload that
    /// does not match `T` never hides an API error.
    pub fn apply<T>(self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if let Some(err) = self.meta.to_error() {
            return Err(err.into());
        }
        Ok(serde_json::from_value(self.data)?)
    }

    /// Check `meta` and, on success, decode `data` into `destination`.
    ///
    /// A null or missing `data` leaves `destination` unchanged.
    pub fn apply_into<T>(self, destination: &mut T) -> Result<()>
    where
        T: DeserializeOwned,
    {
        if let Some(err) = self.meta.to_error() {
            return Err(err.into());
        }
        if !self.data.is_null() {
            *destination = serde_json::from_value(self.data)?;
        }
        Ok(())
    }

    /// Like [`Envelope::apply`], keeping the meta block alongside the data
    pub fn into_response<T>(self) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        if let Some(err) = self.meta.to_error() {
            return Err(err.into());
        }
        Ok(Response {
            data: serde_json::from_value(self.data)?,
            meta: self.meta,
        })
    }
}

/// A successful, decoded response
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub data: T,
    pub meta: Meta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AdnError, ErrorKind};

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        id: String,
        username: String,
    }

    #[test]
    fn test_envelope_success() {
        let body = br#"{
            "data": {"id": "123", "username": "dalton"},
            "meta": {"code": 200}
        }"#;

        let user: User = Envelope::from_slice(body).unwrap().apply().unwrap();
        assert_eq!(
            user,
            User {
                id: "123".to_string(),
                username: "dalton".to_string()
            }
        );
    }

    #[test]
    fn test_envelope_error_wins_over_data_shape() {
        let body = br#"{
            "data": null,
            "meta": {"code": 400, "error_id": "bad-param", "error_message": "x required"}
        }"#;

        let err = Envelope::from_slice(body).unwrap().apply::<User>().unwrap_err();
        match err {
            AdnError::Api(api) => {
                assert_eq!(api.code, 400);
                assert_eq!(api.error_id, "bad-param");
                assert_eq!(api.error_message, "x required");
            }
            other => panic!("expected AdnError::Api, got {:?}", other),
        }
    }

    #[test]
    fn test_envelope_shape_mismatch_is_decode_error() {
        let body = br#"{"data": [1, 2, 3], "meta": {"code": 200}}"#;
        let err = Envelope::from_slice(body).unwrap().apply::<User>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_missing_data_decodes_as_null() {
        let body = br#"{"meta": {"code": 200}}"#;
        let value: Option<User> = Envelope::from_slice(body).unwrap().apply().unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_meta_extra_keys() {
        let body = br#"{
            "data": [],
            "meta": {"code": 200, "min_id": "10", "max_id": "20", "more": true}
        }"#;

        let response: Response<Vec<User>> = Envelope::from_slice(body)
            .unwrap()
            .into_response()
            .unwrap();
        assert!(response.data.is_empty());
        assert_eq!(response.meta.more(), Some(true));
        assert_eq!(response.meta.extra.get("max_id"), Some(&Value::from("20")));
        assert!(!response.meta.is_error());
    }

    #[test]
    fn test_missing_meta_is_success() {
        let body = br#"{"data": {"id": "1", "username": "dalton"}}"#;
        let envelope = Envelope::from_slice(body).unwrap();
        assert!(!envelope.meta.is_error());

        let user: User = envelope.apply().unwrap();
        assert_eq!(user.id, "1");
    }

    #[test]
    fn test_apply_into_keeps_destination_on_null_data() {
        let mut user = User {
            id: "keep".to_string(),
            username: "me".to_string(),
        };

        let body = br#"{"data": null, "meta": {"code": 200}}"#;
        Envelope::from_slice(body).unwrap().apply_into(&mut user).unwrap();
        assert_eq!(user.id, "keep");

        let body = br#"{"meta": {"code": 204}}"#;
        Envelope::from_slice(body).unwrap().apply_into(&mut user).unwrap();
        assert_eq!(user.username, "me");
    }

    #[test]
    fn test_apply_into_reports_api_error_on_null_data() {
        let mut user = User {
            id: "keep".to_string(),
            username: "me".to_string(),
        };
        let body = br#"{"data": null, "meta": {"code": 401, "error_id": "auth", "error_message": "login"}}"#;
        let err = Envelope::from_slice(body).unwrap().apply_into(&mut user).unwrap_err();
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(user.id, "keep");
    }

    #[test]
    fn test_malformed_body() {
        let err = Envelope::from_slice(b"<html>502</html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.api_error().is_none());
    }
}
