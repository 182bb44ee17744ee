//! Hit validation and payload construction.

use super::options::HitOptions;
use super::params::TrackingParameters;
use crate::error::{GaError, Result};
use crate::identity::ClientId;

/// Validate `options` and encode the merged hit.
///
/// Merge order, later wins: `defaults`, then `client_id` as `cid`, then the
/// caller's options. `client_id` is `Some` only when id generation is on;
/// with `None` the caller must supply `cid` or `uid`. Empty caller values
/// for `cid` and `uid` are treated as absent and never override the
/// generated id.
pub fn prepare(
    defaults: &TrackingParameters,
    client_id: Option<&ClientId>,
    options: &HitOptions,
) -> Result<String> {
    let mut caller = options.to_parameters();
    caller.remove_if_empty("cid");
    caller.remove_if_empty("uid");

    if !caller.has_value("tid") {
        return Err(GaError::missing_tid());
    }

    if client_id.is_none() && !caller.has_value("cid") && !caller.has_value("uid") {
        return Err(GaError::missing_identity());
    }

    let mut merged = defaults.clone();
    if let Some(cid) = client_id {
        merged.insert("cid", cid.as_str());
    }
    merged.merge(caller);

    merged.encode()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid() -> ClientId {
        ClientId::from_stored("35009a79-1a05-49d7-b876-2b884d0f825b")
    }

    #[test]
    fn test_missing_tid() {
        let defaults = TrackingParameters::defaults();
        let err = prepare(&defaults, Some(&cid()), &HitOptions::new()).unwrap_err();
        assert!(matches!(err, GaError::MissingRequiredField { field: "tid", .. }));

        let err = prepare(&defaults, Some(&cid()), &HitOptions::new().tid("")).unwrap_err();
        assert!(err.is_missing_field());
    }

    #[test]
    fn test_missing_identity_without_generation() {
        let defaults = TrackingParameters::defaults();
        let err = prepare(&defaults, None, &HitOptions::new().tid("UA-1-1")).unwrap_err();
        assert!(matches!(err, GaError::MissingRequiredField { field: "cid|uid", .. }));

        let opts = HitOptions::new().tid("UA-1-1").cid("").uid("");
        assert!(prepare(&defaults, None, &opts).unwrap_err().is_missing_field());
    }

    #[test]
    fn test_uid_alone_is_enough_without_generation() {
        let defaults = TrackingParameters::defaults();
        let opts = HitOptions::new().tid("UA-1-1").uid("u-7");
        let payload = prepare(&defaults, None, &opts).unwrap();
        assert_eq!(payload, "v=1&tid=UA-1-1&t=pageview&uid=u-7");
    }

    #[test]
    fn test_generated_cid_included() {
        let defaults = TrackingParameters::defaults();
        let opts = HitOptions::new().tid("UA-1-1");
        let payload = prepare(&defaults, Some(&cid()), &opts).unwrap();
        assert_eq!(
            payload,
            "v=1&tid=UA-1-1&t=pageview&cid=35009a79-1a05-49d7-b876-2b884d0f825b"
        );
    }

    #[test]
    fn test_caller_cid_overrides_generated() {
        let defaults = TrackingParameters::defaults();
        let opts = HitOptions::new().tid("UA-1-1").cid("mine");
        let payload = prepare(&defaults, Some(&cid()), &opts).unwrap();
        assert_eq!(payload, "v=1&tid=UA-1-1&t=pageview&cid=mine");
    }

    #[test]
    fn test_empty_caller_cid_keeps_generated() {
        let defaults = TrackingParameters::defaults();
        let opts = HitOptions::new().tid("UA-1-1").cid("");
        let payload = prepare(&defaults, Some(&cid()), &opts).unwrap();
        assert_eq!(
            payload,
            "v=1&tid=UA-1-1&t=pageview&cid=35009a79-1a05-49d7-b876-2b884d0f825b"
        );

        let opts = HitOptions::new().tid("UA-1-1").param("cid", "").uid("");
        let payload = prepare(&defaults, Some(&cid()), &opts).unwrap();
        assert!(payload.ends_with("cid=35009a79-1a05-49d7-b876-2b884d0f825b"));
        assert!(!payload.contains("uid="));
    }

    #[test]
    fn test_caller_wins_on_collision() {
        let defaults = TrackingParameters::defaults();
        let opts = HitOptions::new().tid("UA-1-1").param("t", "event").document_path("/x");
        let payload = prepare(&defaults, Some(&cid()), &opts).unwrap();
        assert!(payload.contains("t=event"));
        assert!(!payload.contains("t=pageview"));
        assert!(payload.contains("dp=%2Fx"));
    }
}
