//! Sponsored-brands targeting shapes.
//!
//! Several response shapes reuse a request shape verbatim; those are
//! registered as aliases so both names resolve to one codec.

use serde::{Deserialize, Serialize};

use crate::codec::{Codecs, ObjectCodec};
use crate::named::NamedCodec;
use crate::registry::{CodecRegistry, RegistryError};

use super::common::{AdGroupId, CampaignId, CommonShapes, TargetId};
use super::products::TargetingClauseResponse;

literal_enum! {
    /// State filter value of a sponsored-brands target listing.
    pub enum SbTargetState {
        Enabled => "ENABLED",
        Paused => "PAUSED",
        Pending => "PENDING",
        Archived => "ARCHIVED",
        Draft => "DRAFT",
    }
}

literal_enum! {
    pub enum SbFilterType {
        State => "STATE",
        CampaignId => "CAMPAIGN_ID",
        AdGroupId => "AD_GROUP_ID",
    }
}

literal_enum! {
    /// Predicate of a sponsored-brands product expression.
    pub enum ProductPredicateType {
        AsinCategorySameAs => "asinCategorySameAs",
        AsinBrandSameAs => "asinBrandSameAs",
        AsinPriceLessThan => "asinPriceLessThan",
        AsinPriceBetween => "asinPriceBetween",
        AsinPriceGreaterThan => "asinPriceGreaterThan",
        AsinReviewRatingLessThan => "asinReviewRatingLessThan",
        AsinReviewRatingBetween => "asinReviewRatingBetween",
        AsinReviewRatingGreaterThan => "asinReviewRatingGreaterThan",
        AsinSameAs => "asinSameAs",
    }
}

literal_enum! {
    /// Lifecycle state of a sponsored-brands target.
    pub enum SbExpressionState {
        Enabled => "enabled",
        Paused => "paused",
        Pending => "pending",
        Archived => "archived",
        Draft => "draft",
    }
}

literal_enum! {
    pub enum SbNegativeExpressionType {
        AsinBrandSameAs => "asinBrandSameAs",
        AsinSameAs => "asinSameAs",
    }
}

/// One value of a target filter: a state, or a campaign or ad group id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SbFilterValue {
    State(SbTargetState),
    Id(i64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbTargetFilter {
    pub filter_type: SbFilterType,
    pub values: Vec<SbFilterValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbListTargetsRequest {
    pub next_token: String,
    pub max_results: i64,
    pub filters: Vec<SbTargetFilter>,
}

pub type SbListNegativeTargetsRequest = SbListTargetsRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbExpression {
    #[serde(rename = "type")]
    pub kind: ProductPredicateType,
    pub value: String,
}

pub type SbResolvedExpression = SbExpression;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbTargetingClause {
    pub target_id: TargetId,
    pub ad_group_id: AdGroupId,
    pub campaign_id: CampaignId,
    pub expressions: SbExpression,
    pub resolved_expressions: SbResolvedExpression,
    pub state: SbExpressionState,
    pub bid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbListTargetsResponse {
    pub next_token: String,
    pub targets: Vec<SbTargetingClause>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbUpdateTargetsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<TargetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_group_id: Option<AdGroupId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<CampaignId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SbExpressionState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<f64>,
}

pub type SbCreateTargetsResponse = SbUpdateTargetsRequest;
pub type SbCreateNegativeTargetsResponse = SbCreateTargetsResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbUpdateTargetSuccess {
    pub target_id: TargetId,
    pub target_request_index: i64,
}

/// A target the batch call could not process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbUpdateTargetError {
    pub code: String,
    pub details: String,
    pub target_id: TargetId,
    pub target_request_index: i64,
}

pub type SbBatchGetTargetError = SbUpdateTargetError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbUpdateTargetsResponse {
    pub update_target_success_results: Vec<SbUpdateTargetSuccess>,
    pub update_target_error_results: Vec<SbUpdateTargetError>,
}

pub type SbUpdateNegativeTargetsResponse = SbUpdateTargetsResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbCreateTargetingClauseRequest {
    pub ad_group_id: AdGroupId,
    pub campaign_id: CampaignId,
    pub expressions: SbExpression,
    pub bid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbCreateTargetsRequest {
    pub targets: Vec<SbCreateTargetingClauseRequest>,
}

pub type SbTargetingClauseResponse = TargetingClauseResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbBatchGetTargetsRequest {
    pub target_ids: Vec<TargetId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbBatchGetTargetSuccess {
    pub targeting_clause: SbTargetingClause,
    pub target_request_index: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbBatchGetTargetsResponse {
    pub batch_get_target_success_results: Vec<SbBatchGetTargetSuccess>,
    pub batch_get_target_error_results: Vec<SbBatchGetTargetError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbListNegativeTargetsResponse {
    pub next_token: String,
    pub negative_targets: Vec<SbTargetingClause>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbUpdateNegativeTargetingClauseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<TargetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_group_id: Option<AdGroupId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SbExpressionState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbUpdateNegativeTargetsRequest {
    pub negative_targets: Vec<SbUpdateNegativeTargetingClauseRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbNegativeExpression {
    #[serde(rename = "type")]
    pub kind: SbNegativeExpressionType,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbCreateNegativeTargetingClauseRequest {
    pub ad_group_id: AdGroupId,
    pub campaign_id: CampaignId,
    pub expressions: SbNegativeExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbCreateNegativeTargetsRequest {
    pub negative_targets: Vec<SbCreateNegativeTargetingClauseRequest>,
}

/// Handles to the sponsored-brands shapes.
#[derive(Debug, Clone)]
pub struct BrandShapes {
    pub target_state: NamedCodec<SbTargetState>,
    pub filter_type: NamedCodec<SbFilterType>,
    pub filter_value: NamedCodec<SbFilterValue>,
    pub target_filter: NamedCodec<SbTargetFilter>,
    pub list_targets_request: NamedCodec<SbListTargetsRequest>,
    pub product_predicate_type: NamedCodec<ProductPredicateType>,
    pub expression: NamedCodec<SbExpression>,
    pub resolved_expression: NamedCodec<SbResolvedExpression>,
    pub expression_state: NamedCodec<SbExpressionState>,
    pub targeting_clause: NamedCodec<SbTargetingClause>,
    pub list_targets_response: NamedCodec<SbListTargetsResponse>,
    pub update_targets_request: NamedCodec<SbUpdateTargetsRequest>,
    pub update_targets_response: NamedCodec<SbUpdateTargetsResponse>,
    pub create_targeting_clause_request: NamedCodec<SbCreateTargetingClauseRequest>,
    pub create_targets_request: NamedCodec<SbCreateTargetsRequest>,
    pub create_targets_response: NamedCodec<SbCreateTargetsResponse>,
    pub targeting_clause_response: NamedCodec<SbTargetingClauseResponse>,
    pub batch_get_targets_request: NamedCodec<SbBatchGetTargetsRequest>,
    pub batch_get_targets_response: NamedCodec<SbBatchGetTargetsResponse>,
    pub list_negative_targets_request: NamedCodec<SbListNegativeTargetsRequest>,
    pub list_negative_targets_response: NamedCodec<SbListNegativeTargetsResponse>,
    pub update_negative_targeting_clause_request: NamedCodec<SbUpdateNegativeTargetingClauseRequest>,
    pub update_negative_targets_request: NamedCodec<SbUpdateNegativeTargetsRequest>,
    pub update_negative_targets_response: NamedCodec<SbUpdateNegativeTargetsResponse>,
    pub negative_expression_type: NamedCodec<SbNegativeExpressionType>,
    pub negative_expression: NamedCodec<SbNegativeExpression>,
    pub create_negative_targeting_clause_request: NamedCodec<SbCreateNegativeTargetingClauseRequest>,
    pub create_negative_targets_request: NamedCodec<SbCreateNegativeTargetsRequest>,
    pub create_negative_targets_response: NamedCodec<SbCreateNegativeTargetsResponse>,
}

fn target_error_result(common: &CommonShapes) -> ObjectCodec {
    Codecs::strict_object()
        .field("code", Codecs::string())
        .field("details", Codecs::string())
        .field("targetId", common.target_id.clone())
        .field("targetRequestIndex", Codecs::integer())
}

impl BrandShapes {
    pub fn register(registry: &CodecRegistry, common: &CommonShapes) -> Result<Self, RegistryError> {
        let target_state: NamedCodec<SbTargetState> =
            registry.define("SBTargetState", SbTargetState::codec())?;
        let filter_type: NamedCodec<SbFilterType> =
            registry.define("SBFilterType", SbFilterType::codec())?;
        let filter_value: NamedCodec<SbFilterValue> = registry.define(
            "SBFilterValue",
            Codecs::union(target_state.clone(), common.campaign_id.clone())
                .or(common.ad_group_id.clone()),
        )?;
        let target_filter: NamedCodec<SbTargetFilter> = registry.define(
            "SBTargetFilter",
            Codecs::strict_object()
                .field("filterType", filter_type.clone())
                .field("values", Codecs::array(filter_value.clone())),
        )?;
        let list_targets_request = registry.define(
            "SBListTargetsRequest",
            Codecs::strict_object()
                .field("nextToken", Codecs::string())
                .field("maxResults", Codecs::integer())
                .field("filters", Codecs::array(target_filter.clone())),
        )?;

        let product_predicate_type: NamedCodec<ProductPredicateType> =
            registry.define("ProductPredicateType", ProductPredicateType::codec())?;
        let predicate_expression = || {
            Codecs::strict_object()
                .field("type", product_predicate_type.clone())
                .field("value", Codecs::string())
        };
        let expression: NamedCodec<SbExpression> =
            registry.define("SBExpression", predicate_expression())?;
        let resolved_expression: NamedCodec<SbResolvedExpression> =
            registry.define("SBResolvedExpression", predicate_expression())?;
        let expression_state: NamedCodec<SbExpressionState> =
            registry.define("SBExpressionState", SbExpressionState::codec())?;

        let targeting_clause: NamedCodec<SbTargetingClause> = registry.define(
            "SBTargetingClause",
            Codecs::strict_object()
                .field("targetId", common.target_id.clone())
                .field("adGroupId", common.ad_group_id.clone())
                .field("campaignId", common.campaign_id.clone())
                .field("expressions", expression.clone())
                .field("resolvedExpressions", resolved_expression.clone())
                .field("state", expression_state.clone())
                .field("bid", Codecs::float()),
        )?;
        let list_targets_response = registry.define(
            "SBListTargetsResponse",
            Codecs::strict_object()
                .field("nextToken", Codecs::string())
                .field("targets", Codecs::array(targeting_clause.clone())),
        )?;

        let update_targets_request = registry.define(
            "SBUpdateTargetsRequest",
            Codecs::partial_object()
                .field("targetId", common.target_id.clone())
                .field("adGroupId", common.ad_group_id.clone())
                .field("campaignId", common.campaign_id.clone())
                .field("state", expression_state.clone())
                .field("bid", Codecs::float()),
        )?;
        let update_targets_response = registry.define(
            "SBUpdateTargetsResponse",
            Codecs::strict_object()
                .field(
                    "updateTargetSuccessResults",
                    Codecs::array(
                        Codecs::strict_object()
                            .field("targetId", common.target_id.clone())
                            .field("targetRequestIndex", Codecs::integer()),
                    ),
                )
                .field("updateTargetErrorResults", Codecs::array(target_error_result(common))),
        )?;

        let create_targeting_clause_request: NamedCodec<SbCreateTargetingClauseRequest> = registry
            .define(
                "SBCreateTargetingClauseRequest",
                Codecs::strict_object()
                    .field("adGroupId", common.ad_group_id.clone())
                    .field("campaignId", common.campaign_id.clone())
                    .field("expressions", expression.clone())
                    .field("bid", Codecs::float()),
            )?;
        let create_targets_request = registry.define(
            "SBCreateTargetsRequest",
            Codecs::strict_object()
                .field("targets", Codecs::array(create_targeting_clause_request.clone())),
        )?;
        let create_targets_response =
            registry.alias("SBCreateTargetsResponse", "SBUpdateTargetsRequest")?;

        let targeting_clause_response = registry.define(
            "SBTargetingClauseResponse",
            Codecs::partial_object()
                .field("targetId", common.target_id.clone())
                .field("code", Codecs::string())
                .field("details", Codecs::string()),
        )?;

        let batch_get_targets_request = registry.define(
            "SBBatchGetTargetsRequest",
            Codecs::strict_object().field("targetIds", common.target_ids.clone()),
        )?;
        let batch_get_targets_response = registry.define(
            "SBBatchGetTargetsResponse",
            Codecs::strict_object()
                .field(
                    "batchGetTargetSuccessResults",
                    Codecs::array(
                        Codecs::strict_object()
                            .field("targetingClause", targeting_clause.clone())
                            .field("targetRequestIndex", Codecs::integer()),
                    ),
                )
                .field("batchGetTargetErrorResults", Codecs::array(target_error_result(common))),
        )?;

        let list_negative_targets_request =
            registry.alias("SBListNegativeTargetsRequest", "SBListTargetsRequest")?;
        let list_negative_targets_response = registry.define(
            "SBListNegativeTargetsResponse",
            Codecs::strict_object()
                .field("nextToken", Codecs::string())
                .field("negativeTargets", Codecs::array(targeting_clause.clone())),
        )?;

        let update_negative_targeting_clause_request: NamedCodec<SbUpdateNegativeTargetingClauseRequest> =
            registry.define(
                "SBUpdateNegativeTargetingClauseRequest",
                Codecs::partial_object()
                    .field("targetId", common.target_id.clone())
                    .field("adGroupId", common.ad_group_id.clone())
                    .field("state", expression_state.clone()),
            )?;
        let update_negative_targets_request = registry.define(
            "SBUpdateNegativeTargetsRequest",
            Codecs::strict_object().field(
                "negativeTargets",
                Codecs::array(update_negative_targeting_clause_request.clone()),
            ),
        )?;
        let update_negative_targets_response =
            registry.alias("SBUpdateNegativeTargetsResponse", "SBUpdateTargetsResponse")?;

        let negative_expression_type: NamedCodec<SbNegativeExpressionType> =
            registry.define("SBNegativeExpressionType", SbNegativeExpressionType::codec())?;
        let negative_expression: NamedCodec<SbNegativeExpression> = registry.define(
            "SBNegativeExpression",
            Codecs::strict_object()
                .field("type", negative_expression_type.clone())
                .field("value", Codecs::string()),
        )?;
        let create_negative_targeting_clause_request: NamedCodec<SbCreateNegativeTargetingClauseRequest> =
            registry.define(
                "SBCreateNegativeTargetingClauseRequest",
                Codecs::strict_object()
                    .field("adGroupId", common.ad_group_id.clone())
                    .field("campaignId", common.campaign_id.clone())
                    .field("expressions", negative_expression.clone()),
            )?;
        let create_negative_targets_request = registry.define(
            "SBCreateNegativeTargetsRequest",
            Codecs::strict_object().field(
                "negativeTargets",
                Codecs::array(create_negative_targeting_clause_request.clone()),
            ),
        )?;
        let create_negative_targets_response =
            registry.alias("SBCreateNegativeTargetsResponse", "SBCreateTargetsResponse")?;

        Ok(Self {
            target_state,
            filter_type,
            filter_value,
            target_filter,
            list_targets_request,
            product_predicate_type,
            expression,
            resolved_expression,
            expression_state,
            targeting_clause,
            list_targets_response,
            update_targets_request,
            update_targets_response,
            create_targeting_clause_request,
            create_targets_request,
            create_targets_response,
            targeting_clause_response,
            batch_get_targets_request,
            batch_get_targets_response,
            list_negative_targets_request,
            list_negative_targets_response,
            update_negative_targeting_clause_request,
            update_negative_targets_request,
            update_negative_targets_response,
            negative_expression_type,
            negative_expression,
            create_negative_targeting_clause_request,
            create_negative_targets_request,
            create_negative_targets_response,
        })
    }
}
