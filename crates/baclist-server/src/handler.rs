//! AddListElement / RemoveListElement mutation engine.
//!
//! Each request is checked in a fixed order (object, property definition,
//! current value, write access) before any element is looked at. Elements
//! are then validated and applied one by one to a private copy of the
//! property value. The copy is published with a single write only after
//! every element passed; the first failing element aborts the request and
//! the stored value is left as it was.

use crate::hooks::{AccessControl, AllowAll, LogNotifier, Notifier};
use crate::locks::PropertyLocks;
use crate::object::PropertyStore;
use crate::PeerAddress;
use baclist_core::registry::{PropertyTypeDefinition, TypeRegistry};
use baclist_core::services::{ChangeListError, ListElementRequest, ListElementService};
use baclist_core::types::{
    DataValue, ErrorClass, ErrorCode, FixedArray, PropertyValue, SequenceOf,
};
use core::fmt;
use std::sync::Arc;

/// Progress of a single request, used for trace logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerStage {
    Decoded,
    ObjectResolved,
    PropertyResolved,
    AccessChecked,
    Validating(u32),
    Applying,
    Done,
    Failed(u32),
}

impl fmt::Display for HandlerStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decoded => f.write_str("decoded"),
            Self::ObjectResolved => f.write_str("object resolved"),
            Self::PropertyResolved => f.write_str("property resolved"),
            Self::AccessChecked => f.write_str("access checked"),
            Self::Validating(element) => write!(f, "validating element {element}"),
            Self::Applying => f.write_str("applying"),
            Self::Done => f.write_str("done"),
            Self::Failed(element) => write!(f, "failed at element {element}"),
        }
    }
}

/// Rejection of a request before it reaches the wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Failure {
    class: ErrorClass,
    code: ErrorCode,
    element: u32,
}

impl Failure {
    const fn new(class: ErrorClass, code: ErrorCode, element: u32) -> Self {
        Self {
            class,
            code,
            element,
        }
    }

    const fn into_error(self, service: ListElementService) -> ChangeListError {
        ChangeListError::new(service.service_choice(), self.class, self.code, self.element)
    }
}

fn element_number(position: usize) -> u32 {
    u32::try_from(position + 1).unwrap_or(u32::MAX)
}

pub struct ListElementHandler {
    store: Arc<dyn PropertyStore>,
    registry: Arc<dyn TypeRegistry + Send + Sync>,
    access: Arc<dyn AccessControl>,
    notifier: Arc<dyn Notifier>,
    locks: PropertyLocks,
}

impl ListElementHandler {
    pub fn new(
        store: Arc<dyn PropertyStore>,
        registry: Arc<dyn TypeRegistry + Send + Sync>,
    ) -> Self {
        Self {
            store,
            registry,
            access: Arc::new(AllowAll),
            notifier: Arc::new(LogNotifier),
            locks: PropertyLocks::new(),
        }
    }

    pub fn with_access_control(mut self, access: impl AccessControl + 'static) -> Self {
        self.access = Arc::new(access);
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    pub fn registry(&self) -> &(dyn TypeRegistry + Send + Sync) {
        self.registry.as_ref()
    }

    /// Applies `request` on behalf of `source`.
    ///
    /// `Ok(())` is the only success signal and corresponds to a simple
    /// acknowledgement.
    pub fn handle(
        &self,
        request: &ListElementRequest,
        source: &PeerAddress,
    ) -> Result<(), ChangeListError> {
        let service = request.service;
        self.trace(request, HandlerStage::Decoded);
        match self.apply(request, source) {
            Ok(()) => {
                self.trace(request, HandlerStage::Done);
                Ok(())
            }
            Err(failure) => {
                self.trace(request, HandlerStage::Failed(failure.element));
                let err = failure.into_error(service);
                log::debug!(
                    "{service:?} {} {:?} from {source} failed: {err}",
                    request.object_id,
                    request.property_id
                );
                Err(err)
            }
        }
    }

    fn apply(&self, request: &ListElementRequest, source: &PeerAddress) -> Result<(), Failure> {
        let object = self.store.object(request.object_id).ok_or(Failure::new(
            ErrorClass::Object,
            ErrorCode::UnknownObject,
            0,
        ))?;
        self.trace(request, HandlerStage::ObjectResolved);

        let unknown_property = Failure::new(ErrorClass::Property, ErrorCode::UnknownProperty, 0);
        let definition = self
            .registry
            .lookup(request.object_id.object_type(), request.property_id)
            .ok_or(unknown_property)?;

        let guard = self.locks.lock(request.object_id, request.property_id);
        let current = object
            .read_property(request.property_id)
            .ok_or(unknown_property)?;
        self.trace(request, HandlerStage::PropertyResolved);

        let descriptor = PropertyValue {
            property_id: request.property_id,
            array_index: request.array_index,
            value: DataValue::List(request.elements.clone()),
            priority: None,
        };
        if !self
            .access
            .check_allow_write(source, object.as_ref(), &descriptor)
        {
            return Err(Failure::new(
                ErrorClass::Property,
                ErrorCode::WriteAccessDenied,
                0,
            ));
        }
        self.trace(request, HandlerStage::AccessChecked);

        let validating = |number| self.trace(request, HandlerStage::Validating(number));
        let updated = match request.array_index {
            None => {
                let list = into_list(current)?;
                let list = match request.service {
                    ListElementService::Add => {
                        add_to_list(list, &definition, &request.elements, &validating)?
                    }
                    ListElementService::Remove => {
                        remove_from_list(list, &request.elements, &validating)?
                    }
                };
                DataValue::List(list)
            }
            Some(start) => {
                let array = into_array(current)?;
                let array = match request.service {
                    ListElementService::Add => {
                        write_slots(array, &definition, start, &request.elements, &validating)?
                    }
                    ListElementService::Remove => {
                        clear_slots(array, start, &request.elements, &validating)?
                    }
                };
                DataValue::Array(array)
            }
        };

        self.trace(request, HandlerStage::Applying);
        object
            .write_property(request.property_id, updated)
            .map_err(|err| {
                log::debug!("publishing {} {:?}: {err}", request.object_id, request.property_id);
                let error = err.bacnet_error();
                Failure::new(error.error_class, error.error_code, 0)
            })?;
        drop(guard);

        self.notifier
            .property_written(source, object.as_ref(), &descriptor);
        Ok(())
    }

    fn trace(&self, request: &ListElementRequest, stage: HandlerStage) {
        log::trace!(
            "{:?} invoke {} {} {:?}: {stage}",
            request.service,
            request.invoke_id,
            request.object_id,
            request.property_id
        );
    }
}

impl fmt::Debug for ListElementHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListElementHandler")
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}

fn into_list(value: DataValue) -> Result<SequenceOf<DataValue>, Failure> {
    match value {
        DataValue::List(list) => Ok(list),
        _ => Err(Failure::new(
            ErrorClass::Property,
            ErrorCode::PropertyIsNotAList,
            0,
        )),
    }
}

fn into_array(value: DataValue) -> Result<FixedArray<DataValue>, Failure> {
    match value {
        DataValue::Array(array) => Ok(array),
        _ => Err(Failure::new(
            ErrorClass::Property,
            ErrorCode::PropertyIsNotAnArray,
            0,
        )),
    }
}

fn check_type(
    definition: &PropertyTypeDefinition,
    element: &DataValue,
    number: u32,
) -> Result<(), Failure> {
    if definition.accepts_element(element) {
        Ok(())
    } else {
        Err(Failure::new(
            ErrorClass::Property,
            ErrorCode::DatatypeNotSupported,
            number,
        ))
    }
}

/// Appends elements not already present; value-equal duplicates are skipped.
fn add_to_list(
    mut list: SequenceOf<DataValue>,
    definition: &PropertyTypeDefinition,
    elements: &SequenceOf<DataValue>,
    validating: &dyn Fn(u32),
) -> Result<SequenceOf<DataValue>, Failure> {
    for (position, element) in elements.iter().enumerate() {
        let number = element_number(position);
        validating(number);
        check_type(definition, element, number)?;
        if !list.contains(element) {
            list.push(element.clone());
        }
    }
    Ok(list)
}

fn remove_from_list(
    mut list: SequenceOf<DataValue>,
    elements: &SequenceOf<DataValue>,
    validating: &dyn Fn(u32),
) -> Result<SequenceOf<DataValue>, Failure> {
    for (position, element) in elements.iter().enumerate() {
        validating(element_number(position));
        if !list.remove_first(element) {
            return Err(Failure::new(
                ErrorClass::Services,
                ErrorCode::ListElementNotFound,
                element_number(position),
            ));
        }
    }
    Ok(list)
}

/// Target slot for the element at `position`, checked against the array.
///
/// The 1-based element counter is bounded by the array length first; the
/// computed slot must then address an existing element as well.
fn target_slot(array_len: usize, start: u32, position: usize) -> Result<u32, Failure> {
    let number = element_number(position);
    let invalid = Failure::new(ErrorClass::Property, ErrorCode::InvalidArrayIndex, number);
    if number as usize > array_len {
        return Err(invalid);
    }
    let slot = u32::try_from(position)
        .ok()
        .and_then(|offset| start.checked_add(offset))
        .ok_or(invalid)?;
    if slot == 0 || slot as usize > array_len {
        return Err(invalid);
    }
    Ok(slot)
}

fn write_slots(
    mut array: FixedArray<DataValue>,
    definition: &PropertyTypeDefinition,
    start: u32,
    elements: &SequenceOf<DataValue>,
    validating: &dyn Fn(u32),
) -> Result<FixedArray<DataValue>, Failure> {
    for (position, element) in elements.iter().enumerate() {
        validating(element_number(position));
        check_type(definition, element, element_number(position))?;
        let slot = target_slot(array.len(), start, position)?;
        array.set(slot, element.clone());
    }
    Ok(array)
}

/// Resets each addressed slot to Null; the slot must hold the element.
fn clear_slots(
    mut array: FixedArray<DataValue>,
    start: u32,
    elements: &SequenceOf<DataValue>,
    validating: &dyn Fn(u32),
) -> Result<FixedArray<DataValue>, Failure> {
    for (position, element) in elements.iter().enumerate() {
        validating(element_number(position));
        let slot = target_slot(array.len(), start, position)?;
        if array.get(slot) != Some(element) {
            return Err(Failure::new(
                ErrorClass::Services,
                ErrorCode::ListElementNotFound,
                element_number(position),
            ));
        }
        array.set(slot, DataValue::Null);
    }
    Ok(array)
}

#[cfg(test)]
mod tests {
    use super::{HandlerStage, ListElementHandler};
    use crate::hooks::{AccessControl, Notifier};
    use crate::object::{BacnetObject, MemoryObject, MemoryStore};
    use crate::PeerAddress;
    use baclist_core::registry::StandardRegistry;
    use baclist_core::services::{ChangeListError, ListElementRequest};
    use baclist_core::types::{
        DataValue, DeviceObjectReference, ErrorClass, ErrorCode, FixedArray, ObjectId,
        ObjectType, PropertyId, PropertyValue, SequenceOf,
    };
    use std::sync::{Arc, Mutex};

    const MSV: ObjectId = ObjectId::new(ObjectType::MultiStateValue, 1);
    const DEVICE: ObjectId = ObjectId::new(ObjectType::Device, 1);
    const VIEW: ObjectId = ObjectId::new(ObjectType::StructuredView, 1);
    const ZONE: ObjectId = ObjectId::new(ObjectType::LifeSafetyZone, 1);
    const AV: ObjectId = ObjectId::new(ObjectType::AnalogValue, 1);

    fn source() -> PeerAddress {
        PeerAddress::Mstp(3)
    }

    fn unsigned(values: &[u32]) -> Vec<DataValue> {
        values.iter().copied().map(DataValue::Unsigned).collect()
    }

    fn oid(instance: u32) -> DataValue {
        DataValue::ObjectId(ObjectId::new(ObjectType::AnalogInput, instance))
    }

    fn text(s: &str) -> DataValue {
        DataValue::CharacterString(s.to_string())
    }

    fn member(instance: u32) -> DataValue {
        DataValue::DeviceObjectReference(DeviceObjectReference::local(ObjectId::new(
            ObjectType::LifeSafetyPoint,
            instance,
        )))
    }

    struct Fixture {
        store: Arc<MemoryStore>,
        handler: ListElementHandler,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with(|handler| handler)
        }

        fn with(configure: impl FnOnce(ListElementHandler) -> ListElementHandler) -> Self {
            let store = Arc::new(MemoryStore::new());
            store.insert(
                MemoryObject::new(MSV).with_property(
                    PropertyId::AlarmValues,
                    SequenceOf::from(unsigned(&[1, 2])),
                ),
            );
            store.insert(MemoryObject::new(DEVICE).with_property(
                PropertyId::ObjectList,
                FixedArray::new(vec![oid(1), oid(2), oid(3)]),
            ));
            store.insert(MemoryObject::new(VIEW).with_property(
                PropertyId::SubordinateAnnotations,
                FixedArray::new(vec![text("first"), text("second")]),
            ));
            store.insert(
                MemoryObject::new(ZONE)
                    .with_property(PropertyId::ZoneMembers, SequenceOf::from(vec![member(1)])),
            );
            store.insert(
                MemoryObject::new(AV).with_property(PropertyId::PresentValue, DataValue::Real(1.0)),
            );
            let handler = configure(ListElementHandler::new(
                store.clone(),
                Arc::new(StandardRegistry::new()),
            ));
            Self { store, handler }
        }

        fn run(&self, request: ListElementRequest) -> Result<(), ChangeListError> {
            self.handler.handle(&request, &source())
        }

        fn value(&self, id: ObjectId, property: PropertyId) -> Option<DataValue> {
            self.store.get(id)?.read_property(property)
        }
    }

    fn failure(class: ErrorClass, code: ErrorCode, element: u32) -> ChangeListError {
        ChangeListError::new(8, class, code, element)
    }

    #[test]
    fn adding_to_a_list_skips_present_elements() {
        let fx = Fixture::new();
        fx.run(ListElementRequest::add(MSV, PropertyId::AlarmValues, unsigned(&[2, 3])))
            .unwrap();
        assert_eq!(
            fx.value(MSV, PropertyId::AlarmValues),
            Some(DataValue::List(SequenceOf::from(unsigned(&[1, 2, 3]))))
        );
    }

    #[test]
    fn adding_present_elements_is_idempotent() {
        let fx = Fixture::new();
        fx.run(ListElementRequest::add(MSV, PropertyId::AlarmValues, unsigned(&[1, 2])))
            .unwrap();
        assert_eq!(
            fx.value(MSV, PropertyId::AlarmValues),
            Some(DataValue::List(SequenceOf::from(unsigned(&[1, 2]))))
        );

        fx.run(ListElementRequest::add(ZONE, PropertyId::ZoneMembers, vec![member(1)]))
            .unwrap();
        fx.run(ListElementRequest::add(ZONE, PropertyId::ZoneMembers, vec![member(2), member(1)]))
            .unwrap();
        assert_eq!(
            fx.value(ZONE, PropertyId::ZoneMembers),
            Some(DataValue::List(SequenceOf::from(vec![member(1), member(2)])))
        );
    }

    #[test]
    fn writing_array_slots_from_a_start_index() {
        let fx = Fixture::new();
        fx.run(
            ListElementRequest::add(DEVICE, PropertyId::ObjectList, vec![oid(8), oid(9)])
                .with_array_index(2),
        )
        .unwrap();
        assert_eq!(
            fx.value(DEVICE, PropertyId::ObjectList),
            Some(DataValue::Array(FixedArray::new(vec![oid(1), oid(8), oid(9)])))
        );
    }

    #[test]
    fn too_many_array_elements_fail_at_the_first_excess_element() {
        let fx = Fixture::new();
        let err = fx
            .run(
                ListElementRequest::add(
                    VIEW,
                    PropertyId::SubordinateAnnotations,
                    vec![text("a"), text("b"), text("c")],
                )
                .with_array_index(1),
            )
            .unwrap_err();
        assert_eq!(
            err,
            failure(ErrorClass::Property, ErrorCode::InvalidArrayIndex, 3)
        );
        assert_eq!(
            fx.value(VIEW, PropertyId::SubordinateAnnotations),
            Some(DataValue::Array(FixedArray::new(vec![text("first"), text("second")])))
        );
    }

    #[test]
    fn property_without_definition_is_unknown() {
        let fx = Fixture::new();
        let err = fx
            .run(ListElementRequest::add(
                MSV,
                PropertyId::Proprietary(700),
                unsigned(&[1]),
            ))
            .unwrap_err();
        assert_eq!(err, failure(ErrorClass::Property, ErrorCode::UnknownProperty, 0));
    }

    #[test]
    fn property_without_value_is_unknown() {
        let fx = Fixture::new();
        let err = fx
            .run(ListElementRequest::add(MSV, PropertyId::FaultValues, unsigned(&[1])))
            .unwrap_err();
        assert_eq!(err, failure(ErrorClass::Property, ErrorCode::UnknownProperty, 0));
    }

    #[test]
    fn missing_object_is_unknown() {
        let fx = Fixture::new();
        let err = fx
            .run(ListElementRequest::remove(
                ObjectId::new(ObjectType::MultiStateValue, 99),
                PropertyId::AlarmValues,
                unsigned(&[1]),
            ))
            .unwrap_err();
        assert_eq!(
            err,
            ChangeListError::new(9, ErrorClass::Object, ErrorCode::UnknownObject, 0)
        );
    }

    #[test]
    fn failed_element_leaves_the_list_untouched() {
        let fx = Fixture::new();
        let elements = vec![
            DataValue::Unsigned(5),
            DataValue::Unsigned(6),
            DataValue::Real(7.0),
            DataValue::Unsigned(8),
            DataValue::Unsigned(9),
        ];
        let err = fx
            .run(ListElementRequest::add(MSV, PropertyId::AlarmValues, elements))
            .unwrap_err();
        assert_eq!(
            err,
            failure(ErrorClass::Property, ErrorCode::DatatypeNotSupported, 3)
        );
        assert_eq!(
            fx.value(MSV, PropertyId::AlarmValues),
            Some(DataValue::List(SequenceOf::from(unsigned(&[1, 2]))))
        );
    }

    #[test]
    fn wrong_shape_is_reported() {
        let fx = Fixture::new();
        let err = fx
            .run(ListElementRequest::add(DEVICE, PropertyId::ObjectList, vec![oid(4)]))
            .unwrap_err();
        assert_eq!(
            err,
            failure(ErrorClass::Property, ErrorCode::PropertyIsNotAList, 0)
        );

        let err = fx
            .run(
                ListElementRequest::add(MSV, PropertyId::AlarmValues, unsigned(&[4]))
                    .with_array_index(1),
            )
            .unwrap_err();
        assert_eq!(
            err,
            failure(ErrorClass::Property, ErrorCode::PropertyIsNotAnArray, 0)
        );

        let err = fx
            .run(ListElementRequest::add(AV, PropertyId::PresentValue, vec![DataValue::Real(2.0)]))
            .unwrap_err();
        assert_eq!(
            err,
            failure(ErrorClass::Property, ErrorCode::PropertyIsNotAList, 0)
        );
    }

    struct DenyAll;

    impl AccessControl for DenyAll {
        fn check_allow_write(
            &self,
            _: &PeerAddress,
            _: &dyn BacnetObject,
            _: &PropertyValue,
        ) -> bool {
            false
        }
    }

    #[test]
    fn access_denial_is_reported_before_shape_checks() {
        let fx = Fixture::with(|handler| handler.with_access_control(DenyAll));
        let err = fx
            .run(ListElementRequest::add(AV, PropertyId::PresentValue, vec![DataValue::Real(2.0)]))
            .unwrap_err();
        assert_eq!(
            err,
            failure(ErrorClass::Property, ErrorCode::WriteAccessDenied, 0)
        );
    }

    #[test]
    fn array_bound_accepts_counter_equal_to_length() {
        let fx = Fixture::new();
        fx.run(
            ListElementRequest::add(DEVICE, PropertyId::ObjectList, vec![oid(7), oid(8), oid(9)])
                .with_array_index(1),
        )
        .unwrap();

        let err = fx
            .run(
                ListElementRequest::add(
                    DEVICE,
                    PropertyId::ObjectList,
                    vec![oid(4), oid(5), oid(6), oid(7)],
                )
                .with_array_index(1),
            )
            .unwrap_err();
        assert_eq!(
            err,
            failure(ErrorClass::Property, ErrorCode::InvalidArrayIndex, 4)
        );
        assert_eq!(
            fx.value(DEVICE, PropertyId::ObjectList),
            Some(DataValue::Array(FixedArray::new(vec![oid(7), oid(8), oid(9)])))
        );
    }

    #[test]
    fn array_slot_past_end_is_rejected_despite_counter_in_range() {
        let fx = Fixture::new();
        // Counter 2 is within the length but its slot (4) is not. The array
        // cannot grow, so the slot bound applies as well.
        let err = fx
            .run(
                ListElementRequest::add(DEVICE, PropertyId::ObjectList, vec![oid(8), oid(9)])
                    .with_array_index(3),
            )
            .unwrap_err();
        assert_eq!(
            err,
            failure(ErrorClass::Property, ErrorCode::InvalidArrayIndex, 2)
        );

        let err = fx
            .run(
                ListElementRequest::add(DEVICE, PropertyId::ObjectList, vec![oid(8)])
                    .with_array_index(0),
            )
            .unwrap_err();
        assert_eq!(
            err,
            failure(ErrorClass::Property, ErrorCode::InvalidArrayIndex, 1)
        );
        assert_eq!(
            fx.value(DEVICE, PropertyId::ObjectList),
            Some(DataValue::Array(FixedArray::new(vec![oid(1), oid(2), oid(3)])))
        );
    }

    #[test]
    fn array_type_check_precedes_bound_check() {
        let fx = Fixture::new();
        let err = fx
            .run(
                ListElementRequest::add(
                    DEVICE,
                    PropertyId::ObjectList,
                    vec![oid(5), DataValue::Unsigned(1)],
                )
                .with_array_index(3),
            )
            .unwrap_err();
        assert_eq!(
            err,
            failure(ErrorClass::Property, ErrorCode::DatatypeNotSupported, 2)
        );
    }

    #[test]
    fn removing_from_a_list() {
        let fx = Fixture::new();
        fx.run(ListElementRequest::remove(MSV, PropertyId::AlarmValues, unsigned(&[1])))
            .unwrap();
        assert_eq!(
            fx.value(MSV, PropertyId::AlarmValues),
            Some(DataValue::List(SequenceOf::from(unsigned(&[2]))))
        );

        let err = fx
            .run(ListElementRequest::remove(MSV, PropertyId::AlarmValues, unsigned(&[2, 5])))
            .unwrap_err();
        assert_eq!(
            err,
            ChangeListError::new(9, ErrorClass::Services, ErrorCode::ListElementNotFound, 2)
        );
        assert_eq!(
            fx.value(MSV, PropertyId::AlarmValues),
            Some(DataValue::List(SequenceOf::from(unsigned(&[2]))))
        );
    }

    #[test]
    fn removing_array_slots_resets_them_to_null() {
        let fx = Fixture::new();
        fx.run(
            ListElementRequest::remove(DEVICE, PropertyId::ObjectList, vec![oid(2)])
                .with_array_index(2),
        )
        .unwrap();
        assert_eq!(
            fx.value(DEVICE, PropertyId::ObjectList),
            Some(DataValue::Array(FixedArray::new(vec![oid(1), DataValue::Null, oid(3)])))
        );

        let err = fx
            .run(
                ListElementRequest::remove(DEVICE, PropertyId::ObjectList, vec![oid(3)])
                    .with_array_index(1),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ChangeListError::new(9, ErrorClass::Services, ErrorCode::ListElementNotFound, 1)
        );
    }

    #[test]
    fn removing_past_the_array_end_clears_nothing() {
        let fx = Fixture::new();
        let err = fx
            .run(
                ListElementRequest::remove(DEVICE, PropertyId::ObjectList, vec![oid(3), oid(4)])
                    .with_array_index(3),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ChangeListError::new(9, ErrorClass::Property, ErrorCode::InvalidArrayIndex, 2)
        );
        assert_eq!(
            fx.value(DEVICE, PropertyId::ObjectList),
            Some(DataValue::Array(FixedArray::new(vec![oid(1), oid(2), oid(3)])))
        );
    }

    #[test]
    fn store_write_errors_are_reported_without_element() {
        let fx = Fixture::new();
        fx.store.insert(
            MemoryObject::new(MSV)
                .with_property(PropertyId::AlarmValues, SequenceOf::from(unsigned(&[1])))
                .with_property(PropertyId::FaultValues, SequenceOf::from(unsigned(&[1])))
                .with_read_only(PropertyId::FaultValues)
                .with_max_elements(2),
        );

        let err = fx
            .run(ListElementRequest::add(MSV, PropertyId::FaultValues, unsigned(&[2])))
            .unwrap_err();
        assert_eq!(
            err,
            failure(ErrorClass::Property, ErrorCode::WriteAccessDenied, 0)
        );

        let err = fx
            .run(ListElementRequest::add(MSV, PropertyId::AlarmValues, unsigned(&[2, 3])))
            .unwrap_err();
        assert_eq!(
            err,
            failure(ErrorClass::Resources, ErrorCode::NoSpaceToAddListElement, 0)
        );
    }

    #[derive(Clone, Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<(ObjectId, PropertyValue)>>>,
    }

    impl Notifier for Recorder {
        fn property_written(
            &self,
            _: &PeerAddress,
            object: &dyn BacnetObject,
            value: &PropertyValue,
        ) {
            self.calls
                .lock()
                .expect("poisoned lock")
                .push((object.object_id(), value.clone()));
        }
    }

    #[test]
    fn notifier_sees_only_published_writes() {
        let recorder = Recorder::default();
        let fx = Fixture::with(|handler| handler.with_notifier(recorder.clone()));

        fx.run(ListElementRequest::add(MSV, PropertyId::AlarmValues, unsigned(&[3])))
            .unwrap();
        fx.run(ListElementRequest::add(MSV, PropertyId::AlarmValues, vec![DataValue::Null]))
            .unwrap_err();

        let calls = recorder.calls.lock().expect("poisoned lock");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, MSV);
        assert_eq!(calls[0].1.property_id, PropertyId::AlarmValues);
        assert_eq!(calls[0].1.array_index, None);
        assert_eq!(
            calls[0].1.value,
            DataValue::List(SequenceOf::from(unsigned(&[3])))
        );
    }

    #[test]
    fn stage_display() {
        assert_eq!(HandlerStage::Validating(2).to_string(), "validating element 2");
        assert_eq!(HandlerStage::Failed(0).to_string(), "failed at element 0");
    }
}
