//! Peer discovery registry.
//!
//! The central place where peers announce their existence and learn about
//! the rest of the mesh: user registration, lease-based peer registration
//! with live counts and lists, and the advisory peer count.

use chrono::Duration;
use domains::error::{RegisterPeerOutcome, RegistryError};
use domains::models::{Peer, UserRegistration};
use domains::traits::{Clock, PeerStore};
use domains::version;
use std::sync::Arc;
use uuid::Uuid;

use crate::version_gate::VersionGate;

pub struct PeerRegistry {
    store: Arc<dyn PeerStore>,
    gate: VersionGate,
    clock: Arc<dyn Clock>,
    /// How far ahead a fresh lease is dated, in minutes.
    lease_minutes: i64,
}

impl PeerRegistry {
    pub fn new(
        store: Arc<dyn PeerStore>,
        gate: VersionGate,
        clock: Arc<dyn Clock>,
        lease_minutes: i64,
    ) -> Self {
        Self {
            store,
            gate,
            clock,
            lease_minutes,
        }
    }

    /// Records a client user's email address. Uniqueness beyond what storage
    /// enforces is the caller's concern.
    pub async fn register_user(&self, email: &str, ip: &str) -> Result<(), RegistryError> {
        if email.trim().is_empty() {
            return Err(RegistryError::Validation("email is required".into()));
        }

        let user = UserRegistration {
            email: email.to_string(),
            ip_address: ip.to_string(),
            registered_at: self.clock.now(),
        };
        self.store.add_user(&user).await.map_err(|e| {
            tracing::error!("user registration failed for {}: {}", ip, e);
            RegistryError::Storage
        })
    }

    /// Registers the caller's lease and returns the live membership for its
    /// (version, channel). A disabled or unknown version writes nothing.
    pub async fn register_peer(
        &self,
        version: &str,
        channel: &str,
        guid: Uuid,
        ip: &str,
    ) -> RegisterPeerOutcome {
        if version.trim().is_empty() || channel.trim().is_empty() {
            tracing::warn!("peer registration with missing parameters from {}", ip);
            return RegisterPeerOutcome::GlobalFailure;
        }
        let version = match version::normalize(version) {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("peer registration with malformed version from {}", ip);
                return RegisterPeerOutcome::GlobalFailure;
            }
        };

        if self.gate.is_disabled(&version).await.disabled {
            return RegisterPeerOutcome::GlobalFailure;
        }

        let now = self.clock.now();
        let peer = Peer {
            channel: channel.to_string(),
            ip_address: ip.to_string(),
            version: version.clone(),
            guid,
            lease: now + Duration::minutes(self.lease_minutes),
            first_contact: now,
        };
        if let Err(e) = self.store.register(&peer).await {
            tracing::error!("peer lease upsert failed for {}: {}", ip, e);
            return RegisterPeerOutcome::Failure;
        }

        match self.store.live_peers(&version, channel, now).await {
            Ok(peers) => RegisterPeerOutcome::Success {
                count: peers.len() as i64,
                peers,
            },
            Err(e) => {
                tracing::error!("live peer query failed for {}: {}", ip, e);
                RegisterPeerOutcome::Failure
            }
        }
    }

    /// Advisory live-peer count for a (version, channel). Never an error:
    /// missing parameters and lookup failures both report zero.
    pub async fn peer_count(&self, version: &str, channel: &str) -> i64 {
        if version.trim().is_empty() || channel.trim().is_empty() {
            return 0;
        }
        let version = match version::normalize(version) {
            Ok(v) => v,
            Err(_) => return 0,
        };

        match self
            .store
            .count_peers(&version, channel, self.clock.now())
            .await
        {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("peer count lookup failed: {}", e);
                0
            }
        }
    }

    /// Echoes the address this server observed for the caller, letting a
    /// peer learn how the rest of the mesh will see it.
    pub fn validate_peer(&self, observed_ip: &str) -> String {
        observed_ip.to_string()
    }
}
