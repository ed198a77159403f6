//! Object and property storage contracts, with an in-memory implementation.

use crate::WriteError;
use baclist_core::types::{DataValue, ObjectId, PropertyId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

/// A BACnet object whose properties can be read and replaced.
pub trait BacnetObject: Send + Sync {
    fn object_id(&self) -> ObjectId;

    /// Current value of `property`, or `None` if the object lacks it.
    fn read_property(&self, property: PropertyId) -> Option<DataValue>;

    /// Replaces the whole value of `property`.
    fn write_property(&self, property: PropertyId, value: DataValue) -> Result<(), WriteError>;
}

/// Object lookup by identifier.
pub trait PropertyStore: Send + Sync {
    fn object(&self, id: ObjectId) -> Option<Arc<dyn BacnetObject>>;
}

/// Object with its properties held in memory.
#[derive(Debug)]
pub struct MemoryObject {
    id: ObjectId,
    properties: RwLock<HashMap<PropertyId, DataValue>>,
    read_only: HashSet<PropertyId>,
    max_elements: Option<usize>,
}

impl MemoryObject {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            properties: RwLock::new(HashMap::new()),
            read_only: HashSet::new(),
            max_elements: None,
        }
    }

    pub fn with_property(self, property: PropertyId, value: impl Into<DataValue>) -> Self {
        self.properties
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(property, value.into());
        self
    }

    /// Marks `property` as rejecting every write.
    pub fn with_read_only(mut self, property: PropertyId) -> Self {
        self.read_only.insert(property);
        self
    }

    /// Caps the number of elements any list or array property may hold.
    pub fn with_max_elements(mut self, limit: usize) -> Self {
        self.max_elements = Some(limit);
        self
    }

    /// Property identifiers currently present, in ascending numeric order.
    pub fn property_ids(&self) -> Vec<PropertyId> {
        let mut ids: Vec<_> = self
            .properties
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        ids.sort_by_key(|id| id.to_u32());
        ids
    }
}

impl BacnetObject for MemoryObject {
    fn object_id(&self) -> ObjectId {
        self.id
    }

    fn read_property(&self, property: PropertyId) -> Option<DataValue> {
        self.properties
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&property)
            .cloned()
    }

    fn write_property(&self, property: PropertyId, value: DataValue) -> Result<(), WriteError> {
        if self.read_only.contains(&property) {
            return Err(WriteError::ReadOnly);
        }
        let len = match &value {
            DataValue::List(list) => list.len(),
            DataValue::Array(array) => array.len(),
            _ => 1,
        };
        if let Some(limit) = self.max_elements {
            if len > limit {
                return Err(WriteError::NoSpace { len, limit });
            }
        }
        self.properties
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(property, value);
        Ok(())
    }
}

/// Objects held in memory, keyed by identifier.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<ObjectId, Arc<MemoryObject>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an object, returning a handle to it.
    pub fn insert(&self, object: MemoryObject) -> Arc<MemoryObject> {
        let object = Arc::new(object);
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(object.id, Arc::clone(&object));
        object
    }

    pub fn get(&self, id: ObjectId) -> Option<Arc<MemoryObject>> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Object identifiers in ascending raw order.
    pub fn object_ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<_> = self
            .objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        ids.sort_by_key(|id| id.raw());
        ids
    }
}

impl PropertyStore for MemoryStore {
    fn object(&self, id: ObjectId) -> Option<Arc<dyn BacnetObject>> {
        self.get(id).map(|object| object as Arc<dyn BacnetObject>)
    }
}
