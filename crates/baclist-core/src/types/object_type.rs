macro_rules! object_types {
    ($($name:ident = $value:literal,)+) => {
        /// BACnet object type identifiers.
        ///
        /// Known standard types are named variants; vendor-specific types use
        /// [`Proprietary`](Self::Proprietary).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum ObjectType {
            $($name,)+
            Proprietary(u16),
        }

        impl ObjectType {
            /// Converts this object type to its numeric BACnet identifier.
            pub const fn to_u16(self) -> u16 {
                match self {
                    $(Self::$name => $value,)+
                    Self::Proprietary(v) => v,
                }
            }

            /// Values without a standard mapping become [`Proprietary`](Self::Proprietary).
            pub const fn from_u16(value: u16) -> Self {
                match value {
                    $($value => Self::$name,)+
                    v => Self::Proprietary(v),
                }
            }
        }
    };
}

object_types! {
    AnalogInput = 0,
    AnalogOutput = 1,
    AnalogValue = 2,
    BinaryInput = 3,
    BinaryOutput = 4,
    BinaryValue = 5,
    Calendar = 6,
    Command = 7,
    Device = 8,
    EventEnrollment = 9,
    File = 10,
    Group = 11,
    Loop = 12,
    MultiStateInput = 13,
    MultiStateOutput = 14,
    NotificationClass = 15,
    Program = 16,
    Schedule = 17,
    Averaging = 18,
    MultiStateValue = 19,
    TrendLog = 20,
    LifeSafetyPoint = 21,
    LifeSafetyZone = 22,
    Accumulator = 23,
    PulseConverter = 24,
    EventLog = 25,
    GlobalGroup = 26,
    TrendLogMultiple = 27,
    StructuredView = 29,
    AccessDoor = 30,
}

#[cfg(test)]
mod tests {
    use super::ObjectType;

    #[test]
    fn standard_and_proprietary_numbers() {
        assert_eq!(ObjectType::from_u16(8), ObjectType::Device);
        assert_eq!(ObjectType::StructuredView.to_u16(), 29);
        assert_eq!(ObjectType::from_u16(28), ObjectType::Proprietary(28));
        assert_eq!(ObjectType::Proprietary(700).to_u16(), 700);
    }
}
