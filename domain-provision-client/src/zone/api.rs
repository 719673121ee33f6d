//! `ZoneProvider` trait implementation.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::traits::ZoneProvider;
use crate::types::{DelegationStatus, DeleteZoneOutcome, Zone};

use super::{HostedZoneClient, ZoneEnvelope, ZonePayload};

impl HostedZoneClient {
    fn payload_to_zone(payload: ZonePayload) -> Zone {
        Zone {
            id: payload.id,
            domain: payload.domain,
            nameservers: payload.nameservers,
        }
    }
}

#[async_trait]
impl ZoneProvider for HostedZoneClient {
    async fn create_zone(&self, domain: &str) -> Result<Zone> {
        #[derive(Serialize)]
        struct CreateZoneBody<'a> {
            domain: &'a str,
        }

        let envelope: ZoneEnvelope = self
            .post("/v1/zones", &CreateZoneBody { domain }, domain)
            .await?;
        Ok(Self::payload_to_zone(envelope.zone))
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<DeleteZoneOutcome> {
        let path = format!("/v1/zones/{}", urlencoding::encode(zone_id));
        let status = self.delete(&path, zone_id).await?;
        if status == 404 {
            log::debug!("[zone] Zone {zone_id} already absent");
            Ok(DeleteZoneOutcome::AlreadyAbsent)
        } else {
            Ok(DeleteZoneOutcome::Deleted)
        }
    }

    async fn check_delegation(&self, zone_id: &str) -> Result<DelegationStatus> {
        let path = format!("/v1/zones/{}/delegation", urlencoding::encode(zone_id));
        self.get(&path, zone_id).await
    }
}
