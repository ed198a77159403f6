//! Server side of the BACnet list-element services.
//!
//! [`ListElementHandler`] applies decoded AddListElement and
//! RemoveListElement requests to objects held by a [`PropertyStore`],
//! publishing each mutated property in one write or reporting a
//! [`ChangeListError`](baclist_core::services::ChangeListError) that names
//! the first failing element. [`ServiceDispatcher`] wraps the handler with
//! APDU decoding and response encoding on a tokio runtime.

pub mod address;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod hooks;
pub mod locks;
pub mod object;

pub use address::PeerAddress;
pub use dispatcher::{ServiceDispatcher, DEFAULT_MAX_APDU_OCTETS};
pub use error::{ServerError, WriteError};
pub use handler::ListElementHandler;
pub use hooks::{AccessControl, AllowAll, LogNotifier, Notifier};
pub use locks::{PropertyGuard, PropertyLocks};
pub use object::{BacnetObject, MemoryObject, MemoryStore, PropertyStore};
