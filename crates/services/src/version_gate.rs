//! Central kill switch for client versions.

use domains::traits::VersionPolicyStore;
use domains::version;
use std::sync::Arc;

/// Result of a version policy lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionStatus {
    pub disabled: bool,
    pub message: String,
}

impl VersionStatus {
    fn disabled_silently() -> Self {
        Self {
            disabled: true,
            message: String::new(),
        }
    }
}

/// Looks up the enable/disable policy for a client version.
///
/// The gate fails closed: a malformed version, an unreachable policy store,
/// or an absent record all report the version as disabled with an empty
/// message. An existing record is returned verbatim.
#[derive(Clone)]
pub struct VersionGate {
    store: Arc<dyn VersionPolicyStore>,
}

impl VersionGate {
    pub fn new(store: Arc<dyn VersionPolicyStore>) -> Self {
        Self { store }
    }

    pub async fn is_disabled(&self, version: &str) -> VersionStatus {
        let version = match version::normalize(version) {
            Ok(v) => v,
            Err(_) => return VersionStatus::disabled_silently(),
        };

        match self.store.policy(&version).await {
            Ok(Some(policy)) => VersionStatus {
                disabled: policy.disabled,
                message: policy.message,
            },
            Ok(None) => VersionStatus::disabled_silently(),
            Err(e) => {
                tracing::error!("version policy lookup failed for {}: {}", version, e);
                VersionStatus::disabled_silently()
            }
        }
    }
}
