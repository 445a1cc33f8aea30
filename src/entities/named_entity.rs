use crate::core::schema::{clean_optional, clean_text};
use crate::core::{DataType, Document, Field, NamedDocument, Schema, Value};
use serde::{Deserialize, Serialize};

/// A controlled-vocabulary entry such as an interest or a favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NamedEntity {
    pub fn new(name: impl Into<String>, description: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            description: description.map(Into::into),
        }
    }
}

impl Document for NamedEntity {
    fn schema() -> Schema {
        Schema::new(
            "NamedEntity",
            vec![
                Field::new("name", DataType::Text),
                Field::new("description", DataType::Text).optional(),
            ],
        )
    }

    fn field(&self, name: &str) -> Value {
        match name {
            "name" => Value::from(self.name.clone()),
            "description" => Value::from(self.description.clone()),
            _ => Value::Null,
        }
    }

    fn clean(&mut self) {
        clean_text(&mut self.name);
        clean_optional(&mut self.description);
    }
}

impl NamedDocument for NamedEntity {
    const NAME_FIELD: &'static str = "name";

    fn name(&self) -> &str {
        &self.name
    }
}
