//! Decoding responses into caller types.
//!
//! # Design
//! `ResponseMapper` is the seam for turning a final `Response` into a caller
//! type. `JsonMapper` treats an empty body as "no value" instead of a
//! decode failure.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::response::Response;

/// Turns a `Response` into a value of type `Output`.
pub trait ResponseMapper {
    type Output;

    fn map(&self, response: &Response) -> Result<Self::Output>;
}

/// Deserializes a JSON response body into `T`.
///
/// An empty or whitespace-only body maps to `None` rather than an error.
pub struct JsonMapper<T> {
    _target: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> JsonMapper<T> {
    pub fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }

    /// Same as `map`, with an absent response mapping to `None`.
    pub fn map_optional(&self, response: Option<&Response>) -> Result<Option<T>> {
        match response {
            Some(response) => self.map(response),
            None => Ok(None),
        }
    }
}

impl<T: DeserializeOwned> Default for JsonMapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonMapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonMapper")
            .field("target", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> ResponseMapper for JsonMapper<T> {
    type Output = Option<T>;

    fn map(&self, response: &Response) -> Result<Option<T>> {
        let json = String::from_utf8_lossy(response.body());
        if json.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&json)?))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::error::Error;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Shape {
        a: i64,
    }

    fn response(body: &str) -> Response {
        Response::new(200, "OK", vec![("Content-Type", "application/json")], body.as_bytes().to_vec())
    }

    #[test]
    fn decodes_json_body() {
        let shape = JsonMapper::<Shape>::new().map(&response(r#"{"a":1}"#)).unwrap();
        assert_eq!(shape, Some(Shape { a: 1 }));
    }

    #[test]
    fn decodes_into_dynamic_values() {
        let value = JsonMapper::<serde_json::Value>::new()
            .map(&response(r#"[1, "two", null]"#))
            .unwrap()
            .unwrap();
        assert_eq!(value[1], "two");
    }

    #[test]
    fn empty_body_is_none() {
        let mapper = JsonMapper::<Shape>::new();
        assert_eq!(mapper.map(&response("")).unwrap(), None);
        assert_eq!(mapper.map(&response("  \n")).unwrap(), None);
    }

    #[test]
    fn absent_response_is_none() {
        assert_eq!(JsonMapper::<Shape>::new().map_optional(None).unwrap(), None);
        assert_eq!(
            JsonMapper::<Shape>::new()
                .map_optional(Some(&response(r#"{"a":7}"#)))
                .unwrap(),
            Some(Shape { a: 7 })
        );
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = JsonMapper::<Shape>::new().map(&response("not json")).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn custom_mappers_plug_in() {
        struct Status;
        impl ResponseMapper for Status {
            type Output = u16;
            fn map(&self, response: &Response) -> Result<u16> {
                Ok(response.status_code())
            }
        }
        assert_eq!(Status.map(&response("")).unwrap(), 200);
    }
}
