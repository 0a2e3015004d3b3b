// ABOUTME: Ordered, non-empty, duplicate-free list of services to transfer.
// ABOUTME: Ships the default petclinic service set.

use super::service_name::{ServiceName, ServiceNameError};
use nonempty::NonEmpty;
use std::collections::HashSet;
use thiserror::Error;

/// Services transferred when no list is configured.
pub const DEFAULT_SERVICES: [&str; 8] = [
    "spring-petclinic-config-server",
    "spring-petclinic-discovery-server",
    "spring-petclinic-customers-service",
    "spring-petclinic-visits-service",
    "spring-petclinic-vets-service",
    "spring-petclinic-genai-service",
    "spring-petclinic-api-gateway",
    "spring-petclinic-admin-server",
];

#[derive(Debug, Error)]
pub enum ServiceListError {
    #[error("service list cannot be empty")]
    Empty,

    #[error("duplicate service in list: {0}")]
    Duplicate(ServiceName),

    #[error(transparent)]
    InvalidName(#[from] ServiceNameError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceList(NonEmpty<ServiceName>);

impl ServiceList {
    pub fn new(services: Vec<ServiceName>) -> Result<Self, ServiceListError> {
        {
            let mut seen = HashSet::with_capacity(services.len());
            for service in &services {
                if !seen.insert(service.as_str()) {
                    return Err(ServiceListError::Duplicate(service.clone()));
                }
            }
        }

        NonEmpty::from_vec(services)
            .map(Self)
            .ok_or(ServiceListError::Empty)
    }

    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, ServiceListError> {
        let services = names
            .iter()
            .map(|name| ServiceName::new(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(services)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceName> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for ServiceList {
    fn default() -> Self {
        // Compile-time constant list; covered by `default_list_is_valid`.
        Self::parse(&DEFAULT_SERVICES).expect("default service list is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_is_valid() {
        let list = ServiceList::default();
        assert_eq!(list.len(), 8);
        assert_eq!(
            list.iter().next().map(ServiceName::as_str),
            Some("spring-petclinic-config-server")
        );
    }

    #[test]
    fn rejects_duplicates() {
        let err = ServiceList::parse(&["a", "b", "a"]).unwrap_err();
        assert!(matches!(err, ServiceListError::Duplicate(name) if name.as_str() == "a"));
    }

    #[test]
    fn rejects_empty() {
        let names: [&str; 0] = [];
        assert!(matches!(
            ServiceList::parse(&names),
            Err(ServiceListError::Empty)
        ));
    }

    #[test]
    fn preserves_order() {
        let list = ServiceList::parse(&["zeta", "alpha", "mid"]).unwrap();
        let names: Vec<_> = list.iter().map(ServiceName::as_str).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }
}
