use core::fmt;

/// BACnet error class reported in Error PDUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ErrorClass {
    Device = 0,
    Object = 1,
    Property = 2,
    Resources = 3,
    Security = 4,
    Services = 5,
    Vt = 6,
    Communication = 7,
}

/// BACnet error codes used by the list-element services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum ErrorCode {
    Other = 0,
    ConfigurationInProgress = 2,
    DeviceBusy = 3,
    InvalidDataType = 9,
    MissingRequiredParameter = 16,
    NoSpaceToAddListElement = 19,
    NoSpaceToWriteProperty = 20,
    PropertyIsNotAList = 22,
    ServiceRequestDenied = 29,
    UnknownObject = 31,
    UnknownProperty = 32,
    ValueOutOfRange = 37,
    WriteAccessDenied = 40,
    InvalidArrayIndex = 42,
    DatatypeNotSupported = 47,
    PropertyIsNotAnArray = 50,
    ListElementNotFound = 81,
}

/// Reason carried in a Reject PDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RejectReason {
    Other = 0,
    BufferOverflow = 1,
    InconsistentParameters = 2,
    InvalidParameterDataType = 3,
    InvalidTag = 4,
    MissingRequiredParameter = 5,
    ParameterOutOfRange = 6,
    TooManyArguments = 7,
    UndefinedEnumeration = 8,
    UnrecognizedService = 9,
}

impl ErrorClass {
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Device),
            1 => Some(Self::Object),
            2 => Some(Self::Property),
            3 => Some(Self::Resources),
            4 => Some(Self::Security),
            5 => Some(Self::Services),
            6 => Some(Self::Vt),
            7 => Some(Self::Communication),
            _ => None,
        }
    }
}

impl ErrorCode {
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Other),
            2 => Some(Self::ConfigurationInProgress),
            3 => Some(Self::DeviceBusy),
            9 => Some(Self::InvalidDataType),
            16 => Some(Self::MissingRequiredParameter),
            19 => Some(Self::NoSpaceToAddListElement),
            20 => Some(Self::NoSpaceToWriteProperty),
            22 => Some(Self::PropertyIsNotAList),
            29 => Some(Self::ServiceRequestDenied),
            31 => Some(Self::UnknownObject),
            32 => Some(Self::UnknownProperty),
            37 => Some(Self::ValueOutOfRange),
            40 => Some(Self::WriteAccessDenied),
            42 => Some(Self::InvalidArrayIndex),
            47 => Some(Self::DatatypeNotSupported),
            50 => Some(Self::PropertyIsNotAnArray),
            81 => Some(Self::ListElementNotFound),
            _ => None,
        }
    }

    /// Protocol spelling, e.g. `"property-is-not-a-list"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Other => "other",
            Self::ConfigurationInProgress => "configuration-in-progress",
            Self::DeviceBusy => "device-busy",
            Self::InvalidDataType => "invalid-data-type",
            Self::MissingRequiredParameter => "missing-required-parameter",
            Self::NoSpaceToAddListElement => "no-space-to-add-list-element",
            Self::NoSpaceToWriteProperty => "no-space-to-write-property",
            Self::PropertyIsNotAList => "property-is-not-a-list",
            Self::ServiceRequestDenied => "service-request-denied",
            Self::UnknownObject => "unknown-object",
            Self::UnknownProperty => "unknown-property",
            Self::ValueOutOfRange => "value-out-of-range",
            Self::WriteAccessDenied => "write-access-denied",
            Self::InvalidArrayIndex => "invalid-array-index",
            Self::DatatypeNotSupported => "datatype-not-supported",
            Self::PropertyIsNotAnArray => "property-is-not-an-array",
            Self::ListElementNotFound => "list-element-not-found",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl RejectReason {
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Other),
            1 => Some(Self::BufferOverflow),
            2 => Some(Self::InconsistentParameters),
            3 => Some(Self::InvalidParameterDataType),
            4 => Some(Self::InvalidTag),
            5 => Some(Self::MissingRequiredParameter),
            6 => Some(Self::ParameterOutOfRange),
            7 => Some(Self::TooManyArguments),
            8 => Some(Self::UndefinedEnumeration),
            9 => Some(Self::UnrecognizedService),
            _ => None,
        }
    }
}
