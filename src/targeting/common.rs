//! Identifiers and pagination shared by the targeting endpoints.

use serde::{Deserialize, Serialize};

use crate::codec::{Codecs, IntegerCodec, ObjectCodec};
use crate::named::NamedCodec;
use crate::registry::{CodecRegistry, RegistryError};

pub type TargetId = i64;
pub type CampaignId = i64;
pub type AdGroupId = i64;
pub type CategoryId = i64;
pub type BrandId = i64;

/// Offset pagination accepted by the list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

/// Handles to the identifier and pagination shapes.
#[derive(Debug, Clone)]
pub struct CommonShapes {
    pub target_id: NamedCodec<TargetId>,
    pub target_ids: NamedCodec<Vec<TargetId>>,
    pub campaign_id: NamedCodec<CampaignId>,
    pub campaign_ids: NamedCodec<Vec<CampaignId>>,
    pub ad_group_id: NamedCodec<AdGroupId>,
    pub ad_group_ids: NamedCodec<Vec<AdGroupId>>,
    pub category_id: NamedCodec<CategoryId>,
    pub brand_id: NamedCodec<BrandId>,
    pub list_pagination: NamedCodec<ListPagination>,
}

fn id() -> IntegerCodec {
    Codecs::integer()
}

fn list_pagination() -> ObjectCodec {
    Codecs::partial_object()
        .field("startIndex", Codecs::integer())
        .field("count", Codecs::integer())
}

impl CommonShapes {
    pub fn register(registry: &CodecRegistry) -> Result<Self, RegistryError> {
        let target_id: NamedCodec<TargetId> = registry.define("TargetId", id())?;
        let target_ids: NamedCodec<Vec<TargetId>> =
            registry.define("TargetIds", Codecs::array(target_id.clone()))?;
        let campaign_id: NamedCodec<CampaignId> = registry.define("CampaignId", id())?;
        let campaign_ids: NamedCodec<Vec<CampaignId>> =
            registry.define("CampaignIds", Codecs::array(campaign_id.clone()))?;
        let ad_group_id: NamedCodec<AdGroupId> = registry.define("AdGroupId", id())?;
        let ad_group_ids: NamedCodec<Vec<AdGroupId>> =
            registry.define("AdGroupIds", Codecs::array(ad_group_id.clone()))?;

        Ok(Self {
            target_id,
            target_ids,
            campaign_id,
            campaign_ids,
            ad_group_id,
            ad_group_ids,
            category_id: registry.define("CategoryId", id())?,
            brand_id: registry.define("BrandId", id())?,
            list_pagination: registry.define("ListPagination", list_pagination())?,
        })
    }
}
