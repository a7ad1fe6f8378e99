use std::path::Path;

use serde_derive::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

use toon_xml_macros::element;

use crate::properties::Property;
use crate::{Error, Named};

#[derive(Deserialize, Debug, Default, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct MaterialDocument {
    #[serde(default, rename = "material")]
    pub materials: Vec<Material>,
}

impl MaterialDocument {
    pub fn parse(s: &str) -> Result<Self, Error> {
        Ok(quick_xml::de::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&s)
    }
}

impl std::str::FromStr for MaterialDocument {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::parse(s)
    }
}

#[element]
struct Keyword {}

#[serde_as]
#[element]
struct Material {
    /// `None` when the material has lost its shader reference.
    shader: Option<String>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    render_queue: Option<i32>,
    keywords: Vec<Keyword>,
    #[serde(default)]
    #[rename = "properties"]
    properties: PropertyList,
}

#[derive(Deserialize, Debug, Default, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct PropertyList {
    #[serde(default, rename = "$value")]
    pub entries: Vec<Property>,
}

impl Material {
    pub fn new(name: &str, shader: Option<&str>) -> Self {
        Self {
            name: name.to_owned(),
            shader: shader.map(str::to_owned),
            render_queue: None,
            keywords: vec![],
            properties: PropertyList::default(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.entries.iter().find(|p| p.name() == name)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties.entries.iter_mut().find(|p| p.name() == name)
    }

    /// Replaces the property of the same name, or appends it.
    pub fn set_property(&mut self, property: Property) {
        match self.property_mut(property.name()) {
            Some(existing) => *existing = property,
            None => self.properties.entries.push(property),
        }
    }

    pub fn enable_keyword(&mut self, keyword: &str) {
        if !self.keywords.iter().any(|k| k.name == keyword) {
            self.keywords.push(Keyword {
                name: keyword.to_owned(),
            });
        }
    }
}
