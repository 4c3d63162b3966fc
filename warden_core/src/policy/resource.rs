//! Parsing of resource descriptors: `type:value, type:value`

use std::{fmt::Display, str::FromStr};

use indexmap::IndexMap;

use crate::WardenError;

/// The scope of a policy: resource type (e.g. `database`) to resource value.
/// Entries keep the order they were written in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceDescriptor(IndexMap<String, String>);

impl ResourceDescriptor {
    /// Iterate over (type, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    /// Look up the value for a resource type.
    pub fn get(&self, resource_type: &str) -> Option<&str> {
        self.0.get(resource_type).map(String::as_str)
    }

    /// Number of resource types in the descriptor.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the descriptor is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for ResourceDescriptor {
    type Err = WardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut resources = IndexMap::new();
        for item in s.split(',') {
            let parts = item.split(':').collect::<Vec<_>>();
            let (key, value) = match parts.as_slice() {
                [key, value] => (key.trim(), value.trim()),
                [_] => {
                    return Err(WardenError::MalformedResource {
                        input: s.to_owned(),
                        reason: format!("`{}` is not of the form type:value", item.trim()),
                    })
                }
                _ => {
                    return Err(WardenError::MalformedResource {
                        input: s.to_owned(),
                        reason: format!("`{}` has more than one `:`", item.trim()),
                    })
                }
            };
            // a repeated type overrides the earlier value
            resources.insert(key.to_owned(), value.to_owned());
        }
        Ok(ResourceDescriptor(resources))
    }
}

impl Display for ResourceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self
            .0
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{text}")
    }
}
