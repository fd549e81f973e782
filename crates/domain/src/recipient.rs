use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Contact data frozen into a `Reminder` when it is created or edited.
///
/// The field names are the ones used by the contact sheet and by the
/// message template tokens, so they are kept in Spanish on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub nombre: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub telefono: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub ciudad: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub monto: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub fecha: Option<String>,
    #[serde(
        default,
        rename = "fechaNacimiento",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub fecha_nacimiento: Option<String>,
    /// Any other contact column, kept as is
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Recipient {
    pub fn new(nombre: &str, telefono: &str) -> Self {
        Self {
            nombre: Some(nombre.to_string()),
            telefono: Some(telefono.to_string()),
            ..Default::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        non_empty(&self.nombre)
    }

    pub fn phone(&self) -> Option<&str> {
        non_empty(&self.telefono)
    }

    pub fn city(&self) -> Option<&str> {
        non_empty(&self.ciudad)
    }

    pub fn amount(&self) -> Option<&str> {
        non_empty(&self.monto)
    }

    /// `fecha` with `fechaNacimiento` as fallback
    pub fn date(&self) -> Option<&str> {
        non_empty(&self.fecha).or_else(|| non_empty(&self.fecha_nacimiento))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Contact imports store phone numbers and amounts both as strings and as numbers
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}
