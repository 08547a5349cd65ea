//! Shared precondition and completeness checks.
//!
//! Formatters and bindings use these so that every argument failure and
//! every incomplete event is reported with the same error shape.

use std::fmt::Display;

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::CloudEvent;

/// Unwraps `value`, failing with an error naming `param` if it is `None`.
pub fn check_not_none<T>(value: Option<T>, param: &'static str) -> Result<T> {
    value.ok_or_else(|| Error::invalid_argument(param, "must not be none"))
}

/// Fails with an error naming `param` unless `condition` holds.
pub fn check_argument(condition: bool, param: &'static str, message: impl Display) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::invalid_argument(param, message.to_string()))
    }
}

/// Returns the event if every required attribute is populated, otherwise an
/// error listing every missing attribute.
pub fn check_valid_event(event: &CloudEvent) -> Result<&CloudEvent> {
    event.validate()
}

/// Checks every event of a batch, in order.
///
/// Slices cannot hold absent elements, so only completeness is checked. The
/// first invalid event's error is returned unchanged.
pub fn check_valid_batch(events: &[CloudEvent]) -> Result<()> {
    for (index, event) in events.iter().enumerate() {
        if let Err(e) = event.validate() {
            debug!(index, "invalid event in batch");
            return Err(e);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::model::EventBuilder;

    fn valid(id: &str) -> CloudEvent {
        EventBuilder::new()
            .id(id)
            .source("/source")
            .ty("com.example.test")
            .build()
            .unwrap()
    }

    #[test]
    fn test_check_not_none() {
        assert_eq!(check_not_none(Some(3), "count").unwrap(), 3);
        let err = check_not_none::<u8>(None, "event").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidArgument {
                param: "event",
                message: "must not be none".to_string()
            }
        );
        assert_eq!(err.to_string(), "[E007] invalid argument event: must not be none");
    }

    #[test]
    fn test_check_argument() {
        assert!(check_argument(true, "len", "unused").is_ok());
        let err = check_argument(false, "len", format_args!("expected at most {}", 4)).unwrap_err();
        assert_eq!(err.to_string(), "[E007] invalid argument len: expected at most 4");
    }

    #[test]
    fn test_check_valid_event() {
        let event = valid("1");
        assert!(check_valid_event(&event).is_ok());

        let empty = CloudEvent::new();
        let err = check_valid_event(&empty).unwrap_err();
        assert_eq!(err.to_string(), "[E004] missing required attributes: id, source, type");
    }

    #[test]
    fn test_check_valid_batch() {
        assert!(check_valid_batch(&[]).is_ok());
        assert!(check_valid_batch(&[valid("1"), valid("2")]).is_ok());
    }

    #[test]
    #[traced_test]
    fn test_check_valid_batch_reports_first_invalid() {
        let mut broken = valid("2");
        broken.remove("type").unwrap();
        let err = check_valid_batch(&[valid("1"), broken, CloudEvent::new()]).unwrap_err();
        assert_eq!(
            err,
            Error::MissingRequiredAttributes {
                missing: vec!["type".to_string()]
            }
        );
        assert!(logs_contain("invalid event in batch"));
        assert!(logs_contain("index=1"));
    }
}
