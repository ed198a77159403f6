macro_rules! property_ids {
    ($($name:ident = $value:literal,)+) => {
        /// BACnet property identifiers.
        ///
        /// Standard properties used by list and array services are named
        /// variants; anything else is [`Proprietary`](Self::Proprietary).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum PropertyId {
            $($name,)+
            Proprietary(u32),
        }

        impl PropertyId {
            pub const fn to_u32(self) -> u32 {
                match self {
                    $(Self::$name => $value,)+
                    Self::Proprietary(v) => v,
                }
            }

            pub const fn from_u32(value: u32) -> Self {
                match value {
                    $($value => Self::$name,)+
                    v => Self::Proprietary(v),
                }
            }
        }
    };
}

property_ids! {
    AlarmValues = 7,
    DateList = 23,
    Description = 28,
    DeviceAddressBinding = 30,
    FaultValues = 39,
    ListOfObjectPropertyReferences = 54,
    ObjectIdentifier = 75,
    ObjectList = 76,
    ObjectName = 77,
    ObjectType = 79,
    OutOfService = 81,
    PresentValue = 85,
    PriorityArray = 87,
    RelinquishDefault = 104,
    StateText = 110,
    StatusFlags = 111,
    Units = 117,
    VendorName = 121,
    LogDeviceObjectProperty = 132,
    MemberOf = 159,
    ZoneMembers = 165,
    StructuredObjectList = 209,
    SubordinateAnnotations = 210,
    SubordinateList = 211,
}
