// zia-provider: resource and data source framework for Zscaler Internet Access
//
// Each resource is a schema plus CRUD functions that expand resource data
// into API requests and flatten responses back, optionally followed by a
// configuration activation.

pub mod activation;
pub mod convert;
pub mod data_sources;
pub mod error;
pub mod provider;
pub mod resource;
pub mod resource_data;
pub mod resources;
pub mod schema;

pub use activation::{ActivationSettings, trigger_activation};
pub use error::{Diagnostic, ProviderError};
pub use provider::{Meta, Provider, ProviderConfig};
pub use resource::{DataSource, Resource};
pub use resource_data::ResourceData;
pub use schema::{Attribute, AttributeType, Elem, Schema, Validation};
