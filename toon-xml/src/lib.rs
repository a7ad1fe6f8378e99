//! The material interchange document: a named shader reference plus a bag of
//! optional, typed properties, as exported from the asset database.

use enum_dispatch::enum_dispatch;

/// Declares plain unit-variant enums that deserialize from snake_case attribute text.
#[macro_export]
macro_rules! enums {
    (
        $(
            $(#[$meta:meta])*
            $enum:ident {
                $($variant:ident),*$(,)?
            }
        )*
    ) => {
        $(
            $(#[$meta])*
            #[derive(::serde_derive::Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
            #[serde(rename_all = "snake_case")]
            pub enum $enum {
                $($variant),*
            }
        )*
    }
}

#[enum_dispatch]
pub trait Named {
    fn name(&self) -> &str;
    fn name_mut(&mut self) -> &mut String;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed material document: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

pub mod properties;
pub mod schema;
pub mod source;

pub use properties::{Color, Property, PropertyKind, TexEnv, TextureRef};
pub use schema::{Material, MaterialDocument};
pub use source::PropertySource;
