// ABOUTME: Source and destination references for every service in a run.
// ABOUTME: Built once from the run configuration before any runtime call.

use crate::config::RunConfig;
use crate::types::{ImageRef, ParseImageRefError, ServiceList, ServiceName};

/// One service's image move: `source` gets retagged as `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTransfer {
    pub service: ServiceName,
    pub source: ImageRef,
    pub destination: ImageRef,
}

/// Ordered transfers, one per service.
#[derive(Debug, Clone)]
pub struct TransferPlan {
    transfers: Vec<ImageTransfer>,
}

impl TransferPlan {
    /// Source is `<source_prefix>/<service>` with the default tag;
    /// destination is `<registry_prefix>/<service>:<version>`.
    pub fn build(config: &RunConfig, services: &ServiceList) -> Result<Self, ParseImageRefError> {
        let transfers = services
            .iter()
            .map(|service| {
                Ok(ImageTransfer {
                    service: service.clone(),
                    source: ImageRef::compose(&config.source_prefix, service, None)?,
                    destination: ImageRef::compose(
                        &config.registry_prefix,
                        service,
                        Some(&config.version),
                    )?,
                })
            })
            .collect::<Result<Vec<_>, ParseImageRefError>>()?;

        Ok(Self { transfers })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageTransfer> {
        self.transfers.iter()
    }

    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }
}
