//! Request identifiers as [Ulid]s.

use http::Request;
use tower_http::request_id::{MakeRequestId, RequestId};
use ulid::Ulid;

/// Make a [Ulid] request id for `x-request-id` headers.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeRequestUlid;

impl MakeRequestId for MakeRequestUlid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let req_id = Ulid::new().to_string().parse().ok()?;
        Some(RequestId::new(req_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_ulids() {
        let request = Request::builder().body(()).unwrap();
        let id = MakeRequestUlid.make_request_id(&request).unwrap();

        let value = id.header_value().to_str().unwrap();
        assert!(Ulid::from_string(value).is_ok());
    }
}
