use baclist_core::encoding::writer::encode_to_vec;
use baclist_core::registry::{PropertyTypeDefinition, StandardRegistry};
use baclist_core::services::{ListElementRequest, ListElementService};
use baclist_core::types::{DataValue, ObjectId, ObjectType, PropertyId};
use baclist_core::EncodeError;
use baclist_server::{BacnetObject, MemoryObject, MemoryStore, DEFAULT_MAX_APDU_OCTETS};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI-friendly enum for selecting BACnet object types.
///
/// Maps human-readable names to [`ObjectType`] variants for use with clap argument parsing.
#[derive(Debug, Clone, ValueEnum)]
pub enum ObjectTypeArg {
    AnalogInput,
    AnalogOutput,
    AnalogValue,
    BinaryInput,
    BinaryOutput,
    BinaryValue,
    Device,
    LifeSafetyPoint,
    LifeSafetyZone,
    MultiStateInput,
    MultiStateOutput,
    MultiStateValue,
    Schedule,
    StructuredView,
    TrendLog,
}

impl ObjectTypeArg {
    /// Convert to the core [`ObjectType`] representation.
    pub const fn into_object_type(self) -> ObjectType {
        match self {
            Self::AnalogInput => ObjectType::AnalogInput,
            Self::AnalogOutput => ObjectType::AnalogOutput,
            Self::AnalogValue => ObjectType::AnalogValue,
            Self::BinaryInput => ObjectType::BinaryInput,
            Self::BinaryOutput => ObjectType::BinaryOutput,
            Self::BinaryValue => ObjectType::BinaryValue,
            Self::Device => ObjectType::Device,
            Self::LifeSafetyPoint => ObjectType::LifeSafetyPoint,
            Self::LifeSafetyZone => ObjectType::LifeSafetyZone,
            Self::MultiStateInput => ObjectType::MultiStateInput,
            Self::MultiStateOutput => ObjectType::MultiStateOutput,
            Self::MultiStateValue => ObjectType::MultiStateValue,
            Self::Schedule => ObjectType::Schedule,
            Self::StructuredView => ObjectType::StructuredView,
            Self::TrendLog => ObjectType::TrendLog,
        }
    }
}

/// How `--values` entries are interpreted.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ElementArg {
    Unsigned,
    Signed,
    Real,
    Enumerated,
    CharacterString,
    /// `<object-type number>:<instance>`, e.g. `0:3` for analog-input 3.
    ObjectId,
}

impl ElementArg {
    pub fn parse(self, text: &str) -> Result<DataValue, String> {
        let invalid = |e: &dyn std::fmt::Display| format!("invalid {self:?} value '{text}': {e}");
        Ok(match self {
            Self::Unsigned => DataValue::Unsigned(text.parse().map_err(|e| invalid(&e))?),
            Self::Signed => DataValue::Signed(text.parse().map_err(|e| invalid(&e))?),
            Self::Real => DataValue::Real(text.parse().map_err(|e| invalid(&e))?),
            Self::Enumerated => DataValue::Enumerated(text.parse().map_err(|e| invalid(&e))?),
            Self::CharacterString => DataValue::CharacterString(text.to_string()),
            Self::ObjectId => {
                let (object_type, instance) = text
                    .split_once(':')
                    .ok_or_else(|| invalid(&"expected <type>:<instance>"))?;
                let object_type: u16 = object_type.parse().map_err(|e| invalid(&e))?;
                let instance: u32 = instance.parse().map_err(|e| invalid(&e))?;
                if instance > ObjectId::MAX_INSTANCE {
                    return Err(invalid(&"instance out of range"));
                }
                DataValue::ObjectId(ObjectId::new(ObjectType::from_u16(object_type), instance))
            }
        })
    }
}

/// Request arguments shared by the add and remove tools.
#[derive(Debug, Clone, Args)]
pub struct RequestArgs {
    #[arg(long, value_enum, default_value = "multi-state-value")]
    pub object_type: ObjectTypeArg,
    #[arg(long)]
    pub instance: u32,
    #[arg(long)]
    pub property_id: u32,
    #[arg(long)]
    pub property_array_index: Option<u32>,
    #[arg(long, value_enum, default_value = "unsigned")]
    pub element_type: ElementArg,
    #[arg(long, value_delimiter = ',')]
    pub values: Vec<String>,
    #[arg(long, default_value_t = 0)]
    pub invoke_id: u8,
}

impl RequestArgs {
    pub fn to_request(&self, service: ListElementService) -> Result<ListElementRequest, String> {
        let elements = self
            .values
            .iter()
            .map(|text| self.element_type.parse(text))
            .collect::<Result<Vec<_>, _>>()?;
        let object_id = ObjectId::new(self.object_type.clone().into_object_type(), self.instance);
        let property_id = PropertyId::from_u32(self.property_id);
        let request = match service {
            ListElementService::Add => ListElementRequest::add(object_id, property_id, elements),
            ListElementService::Remove => {
                ListElementRequest::remove(object_id, property_id, elements)
            }
        }
        .with_invoke_id(self.invoke_id);
        Ok(match self.property_array_index {
            Some(index) => request.with_array_index(index),
            None => request,
        })
    }
}

pub fn encode_request(request: &ListElementRequest) -> Result<Vec<u8>, EncodeError> {
    encode_to_vec(DEFAULT_MAX_APDU_OCTETS, |w| request.encode(w))
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses hex octets; whitespace between digits is ignored.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits in '{text}'"));
    }
    digits
        .chunks(2)
        .map(|pair| {
            let byte: String = pair.iter().collect();
            u8::from_str_radix(&byte, 16).map_err(|_| format!("invalid hex octet '{byte}'"))
        })
        .collect()
}

/// JSON description of a device: its objects and any registry additions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceFile {
    pub objects: Vec<ObjectEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registry: Vec<RegistryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub id: ObjectId,
    pub properties: Vec<PropertyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyEntry {
    pub property: PropertyId,
    pub value: DataValue,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub object_type: ObjectType,
    pub property: PropertyId,
    pub definition: PropertyTypeDefinition,
}

impl DeviceFile {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn registry(&self) -> StandardRegistry {
        let mut registry = StandardRegistry::new();
        for entry in &self.registry {
            registry.register(entry.object_type, entry.property, entry.definition);
        }
        registry
    }

    pub fn build_store(&self) -> MemoryStore {
        let store = MemoryStore::new();
        for entry in &self.objects {
            let mut object = MemoryObject::new(entry.id);
            for property in &entry.properties {
                object = object.with_property(property.property, property.value.clone());
                if property.read_only {
                    object = object.with_read_only(property.property);
                }
            }
            store.insert(object);
        }
        store
    }

    /// Replaces every object's property values with those held by `store`.
    pub fn refresh_from(&mut self, store: &MemoryStore) {
        for entry in &mut self.objects {
            let Some(object) = store.get(entry.id) else {
                continue;
            };
            for property in &mut entry.properties {
                if let Some(value) = object.read_property(property.property) {
                    property.value = value;
                }
            }
        }
    }
}
