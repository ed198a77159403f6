use baclist_core::apdu::{RejectPdu, SimpleAck};
use baclist_core::encoding::{reader::Reader, writer::Writer};
use baclist_core::registry::StandardRegistry;
use baclist_core::services::{ChangeListError, ListElementRequest, ListElementService};
use baclist_core::types::{
    DataValue, DeviceObjectPropertyReference, ErrorClass, ErrorCode, ObjectId, ObjectType,
    PropertyId, RejectReason,
};

#[test]
fn add_list_element_frame_matches_fixture() {
    let mut buf = [0u8; 64];
    let mut w = Writer::new(&mut buf);
    ListElementRequest::add(
        ObjectId::new(ObjectType::MultiStateValue, 1),
        PropertyId::AlarmValues,
        vec![DataValue::Unsigned(2), DataValue::Unsigned(3)],
    )
    .with_invoke_id(7)
    .encode(&mut w)
    .unwrap();

    assert_eq!(
        w.as_written(),
        &[
            0x00, 0x05, 0x07, 0x08, 0x0C, 0x04, 0xC0, 0x00, 0x01, 0x19, 0x07, 0x3E, 0x21, 0x02,
            0x21, 0x03, 0x3F,
        ]
    );
}

#[test]
fn remove_list_element_frame_with_composite_matches_fixture() {
    let mut buf = [0u8; 64];
    let mut w = Writer::new(&mut buf);
    let mut reference = DeviceObjectPropertyReference::new(
        ObjectId::new(ObjectType::AnalogValue, 3),
        PropertyId::PresentValue,
    );
    reference.array_index = Some(1);
    ListElementRequest::remove(
        ObjectId::new(ObjectType::Schedule, 1),
        PropertyId::ListOfObjectPropertyReferences,
        vec![DataValue::DeviceObjectPropertyReference(reference)],
    )
    .with_invoke_id(4)
    .encode(&mut w)
    .unwrap();

    let expected = [
        0x00, 0x05, 0x04, 0x09, // header
        0x0C, 0x04, 0x40, 0x00, 0x01, // [0] Schedule:1
        0x19, 0x36, // [1] list-of-object-property-references
        0x3E, // [3] {
        0x0C, 0x00, 0x80, 0x00, 0x03, // [0] AnalogValue:3
        0x19, 0x55, // [1] present-value
        0x29, 0x01, // [2] 1
        0x3F, // }
    ];
    assert_eq!(w.as_written(), &expected);

    let mut r = Reader::new(&expected);
    let decoded = ListElementRequest::decode(&mut r, &StandardRegistry::new()).unwrap();
    assert_eq!(decoded.service, ListElementService::Remove);
    assert_eq!(
        decoded.elements.get(1),
        Some(&DataValue::DeviceObjectPropertyReference(reference))
    );
}

#[test]
fn change_list_error_frame_matches_fixture() {
    let mut buf = [0u8; 16];
    let mut w = Writer::new(&mut buf);
    ChangeListError::new(8, ErrorClass::Property, ErrorCode::InvalidArrayIndex, 3)
        .encode_apdu(&mut w, 0x21)
        .unwrap();
    assert_eq!(
        w.as_written(),
        &[0x50, 0x21, 0x08, 0x0E, 0x91, 0x02, 0x91, 0x2A, 0x0F, 0x19, 0x03]
    );
}

#[test]
fn simple_ack_and_reject_frames() {
    let mut buf = [0u8; 8];
    let mut w = Writer::new(&mut buf);
    SimpleAck {
        invoke_id: 7,
        service_choice: 8,
    }
    .encode(&mut w)
    .unwrap();
    RejectPdu::new(7, RejectReason::MissingRequiredParameter)
        .encode(&mut w)
        .unwrap();
    assert_eq!(w.as_written(), &[0x20, 0x07, 0x08, 0x60, 0x07, 0x05]);
}
