//! Access-control and notification hooks around a property write.

use crate::{BacnetObject, PeerAddress};
use baclist_core::types::PropertyValue;

/// Decides whether `source` may change a property of `object`.
///
/// Called before any shape validation, so it also sees requests that would
/// later fail.
pub trait AccessControl: Send + Sync {
    fn check_allow_write(
        &self,
        source: &PeerAddress,
        object: &dyn BacnetObject,
        value: &PropertyValue,
    ) -> bool;
}

/// Observes successfully published writes.
pub trait Notifier: Send + Sync {
    fn property_written(
        &self,
        source: &PeerAddress,
        object: &dyn BacnetObject,
        value: &PropertyValue,
    );
}

/// Grants every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessControl for AllowAll {
    fn check_allow_write(&self, _: &PeerAddress, _: &dyn BacnetObject, _: &PropertyValue) -> bool {
        true
    }
}

/// Logs each published write at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn property_written(
        &self,
        source: &PeerAddress,
        object: &dyn BacnetObject,
        value: &PropertyValue,
    ) {
        log::info!(
            "{source} changed {} {:?}{}",
            object.object_id(),
            value.property_id,
            value
                .array_index
                .map(|index| format!("[{index}]"))
                .unwrap_or_default()
        );
    }
}
