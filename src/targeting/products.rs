//! Sponsored-products targeting shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{Codecs, IntersectionCodec, ObjectCodec};
use crate::named::NamedCodec;
use crate::registry::{CodecRegistry, RegistryError};

use super::common::{AdGroupId, BrandId, CampaignId, CategoryId, CommonShapes, ListPagination, TargetId};

literal_enum! {
    /// Lifecycle state of a targeting clause.
    pub enum TargetingClauseState {
        Enabled => "enabled",
        Paused => "paused",
        Archived => "archived",
    }
}

literal_enum! {
    /// Predicate of a targeting expression.
    pub enum TargetingExpressionType {
        AsinCategorySameAs => "asinCategorySameAs",
        AsinBrandSameAs => "asinBrandSameAs",
        AsinPriceLessThan => "asinPriceLessThan",
        AsinPriceBetween => "asinPriceBetween",
        AsinPriceGreaterThan => "asinPriceGreaterThan",
        AsinReviewRatingLessThan => "asinReviewRatingLessThan",
        AsinReviewRatingBetween => "asinReviewRatingBetween",
        AsinReviewRatingGreaterThan => "asinReviewRatingGreaterThan",
        AsinSameAs => "asinSameAs",
        AsinIsPrimeShippingEligible => "asinIsPrimeShippingEligible",
        AsinAgeRangeSameAs => "asinAgeRangeSameAs",
        AsinGenreSameAs => "asinGenreSameAs",
        QueryHighRelMatches => "queryHighRelMatches",
        QueryBroadRelMatches => "queryBroadRelMatches",
        AsinSubstituteRelated => "asinSubstituteRelated",
        AsinAccessoryRelated => "asinAccessoryRelated",
    }
}

literal_enum! {
    /// Whether targeting was generated automatically or chosen by hand.
    pub enum ExpressionType {
        Auto => "auto",
        Manual => "manual",
    }
}

literal_enum! {
    /// Delivery status reported for a targeting clause.
    pub enum TargetingClauseServingStatus {
        TargetingClauseArchived => "TARGETING_CLAUSE_ARCHIVED",
        TargetingClausePaused => "TARGETING_CLAUSE_PAUSED",
        TargetingClauseStatusLive => "TARGETING_CLAUSE_STATUS_LIVE",
        TargetingClausePolicingSuspended => "TARGETING_CLAUSE_POLICING_SUSPENDED",
        CampaignOutOfBudget => "CAMPAIGN_OUT_OF_BUDGET",
        AdGroupPaused => "AD_GROUP_PAUSED",
        AdGroupArchived => "AD_GROUP_ARCHIVED",
        CampaignPaused => "CAMPAIGN_PAUSED",
        CampaignArchived => "CAMPAIGN_ARCHIVED",
        AccountOutOfBudget => "ACCOUNT_OUT_OF_BUDGET",
        PortfolioEnded => "PORTFOLIO_ENDED",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetingExpression {
    #[serde(rename = "type")]
    pub kind: TargetingExpressionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingClause {
    pub target_id: TargetId,
    pub campaign_id: CampaignId,
    pub ad_group_id: AdGroupId,
    pub state: TargetingClauseState,
    pub expression: Vec<TargetingExpression>,
    pub expression_type: ExpressionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<f64>,
}

/// A targeting clause with its audit dates and serving status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingClauseExtended {
    #[serde(flatten)]
    pub clause: TargetingClause,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub creation_date: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_updated_date: DateTime<Utc>,
    pub serving_status: TargetingClauseServingStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecommendationRequest {
    pub page_size: i64,
    pub page_number: i64,
    pub asins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedTargetAsin {
    pub recommended_target_asin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecommendationResponse {
    pub total_result_count: i64,
    pub recommended_products: Vec<RecommendedTargetAsin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
    pub is_targetable: bool,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeRange {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandResponse {
    pub id: BrandId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementsResponse {
    pub category_id: CategoryId,
    pub age_ranges: Vec<AgeRange>,
    pub brands: Vec<BrandResponse>,
}

/// Per-clause outcome of a create, update or archive call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingClauseResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<TargetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub type NegativeTargetingClauseResponse = TargetingClauseResponse;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTargetingClausesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<CampaignId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_group_id: Option<AdGroupId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<TargetingClauseState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<Vec<TargetingExpression>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_type: Option<ExpressionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTargetingClausesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<TargetId>,
    #[serde(flatten)]
    pub changes: CreateTargetingClausesParams,
}

/// Pagination plus the optional filters of a clause listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTargetingClausesParams {
    #[serde(flatten)]
    pub pagination: ListPagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_filter: Option<TargetingClauseState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id_filter: Option<Vec<CampaignId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_group_id_filter: Option<Vec<AdGroupId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id_filter: Option<Vec<TargetId>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBrandRecommendationsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNegativeTargetingClausesParams {
    pub campaign_id: CampaignId,
    pub ad_group_id: AdGroupId,
    pub state: TargetingClauseState,
    pub expression: Vec<TargetingExpression>,
    pub expression_type: ExpressionType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegativeTargetingClause {
    pub target_id: TargetId,
    #[serde(flatten)]
    pub clause: CreateNegativeTargetingClausesParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegativeTargetingClauseExtended {
    #[serde(flatten)]
    pub clause: NegativeTargetingClause,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub creation_date: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_updated_date: DateTime<Utc>,
    pub serving_status: TargetingClauseServingStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNegativeTargetingClausesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<TargetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<CampaignId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_group_id: Option<AdGroupId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<TargetingClauseState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<Vec<TargetingExpression>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_type: Option<ExpressionType>,
}

/// Handles to the sponsored-products shapes.
#[derive(Debug, Clone)]
pub struct ProductShapes {
    pub targeting_clause_state: NamedCodec<TargetingClauseState>,
    pub targeting_expression_type: NamedCodec<TargetingExpressionType>,
    pub expression_type: NamedCodec<ExpressionType>,
    pub serving_status: NamedCodec<TargetingClauseServingStatus>,
    pub targeting_expression: NamedCodec<TargetingExpression>,
    pub targeting_clause: NamedCodec<TargetingClause>,
    pub targeting_clause_extended: NamedCodec<TargetingClauseExtended>,
    pub product_recommendation_request: NamedCodec<ProductRecommendationRequest>,
    pub recommended_target_asin: NamedCodec<RecommendedTargetAsin>,
    pub product_recommendation_response: NamedCodec<ProductRecommendationResponse>,
    pub category_response: NamedCodec<CategoryResponse>,
    pub age_range: NamedCodec<AgeRange>,
    pub brand_response: NamedCodec<BrandResponse>,
    pub refinements_response: NamedCodec<RefinementsResponse>,
    pub targeting_clause_response: NamedCodec<TargetingClauseResponse>,
    pub create_targeting_clauses_params: NamedCodec<CreateTargetingClausesParams>,
    pub list_targeting_clauses_params: NamedCodec<ListTargetingClausesParams>,
    pub update_targeting_clauses_params: NamedCodec<UpdateTargetingClausesParams>,
    pub get_brand_recommendations_params: NamedCodec<GetBrandRecommendationsParams>,
    pub negative_targeting_clause_response: NamedCodec<NegativeTargetingClauseResponse>,
    pub create_negative_targeting_clauses_params: NamedCodec<CreateNegativeTargetingClausesParams>,
    pub negative_targeting_clause: NamedCodec<NegativeTargetingClause>,
    pub negative_targeting_clause_extended: NamedCodec<NegativeTargetingClauseExtended>,
    pub list_negative_targeting_clauses_params: NamedCodec<ListTargetingClausesParams>,
    pub update_negative_targeting_clauses_params: NamedCodec<UpdateNegativeTargetingClausesParams>,
}

/// Codecs reused across several shapes.
struct Parts<'a> {
    common: &'a CommonShapes,
    state: NamedCodec<TargetingClauseState>,
    expression: NamedCodec<TargetingExpression>,
    expression_type: NamedCodec<ExpressionType>,
    serving_status: NamedCodec<TargetingClauseServingStatus>,
}

impl Parts<'_> {
    /// The fields every clause payload carries, in wire order.
    fn clause_fields(&self, object: ObjectCodec) -> ObjectCodec {
        object
            .field("campaignId", self.common.campaign_id.clone())
            .field("adGroupId", self.common.ad_group_id.clone())
            .field("state", self.state.clone())
            .field("expression", Codecs::array(self.expression.clone()))
            .field("expressionType", self.expression_type.clone())
    }

    fn audit_fields(&self) -> ObjectCodec {
        Codecs::strict_object()
            .field("creationDate", Codecs::date_from_millis())
            .field("lastUpdatedDate", Codecs::date_from_millis())
            .field("servingStatus", self.serving_status.clone())
    }

    fn clause_outcome(&self) -> ObjectCodec {
        Codecs::partial_object()
            .field("targetId", self.common.target_id.clone())
            .field("code", Codecs::string())
            .field("details", Codecs::string())
    }

    fn list_params(&self) -> IntersectionCodec {
        Codecs::intersection(
            self.common.list_pagination.clone(),
            Codecs::partial_object()
                .field("stateFilter", self.state.clone())
                .field("campaignIdFilter", self.common.campaign_ids.clone())
                .field("adGroupIdFilter", self.common.ad_group_ids.clone())
                .field("targetIdFilter", self.common.target_ids.clone()),
        )
    }
}

impl ProductShapes {
    pub fn register(registry: &CodecRegistry, common: &CommonShapes) -> Result<Self, RegistryError> {
        let targeting_clause_state: NamedCodec<TargetingClauseState> =
            registry.define("TargetingClauseState", TargetingClauseState::codec())?;
        let targeting_expression_type: NamedCodec<TargetingExpressionType> =
            registry.define("TargetingExpressionType", TargetingExpressionType::codec())?;
        let expression_type: NamedCodec<ExpressionType> =
            registry.define("ExpressionType", ExpressionType::codec())?;
        let serving_status: NamedCodec<TargetingClauseServingStatus> = registry.define(
            "TargetingClauseServingStatus",
            TargetingClauseServingStatus::codec(),
        )?;

        let targeting_expression: NamedCodec<TargetingExpression> = registry.define(
            "TargetingExpression",
            Codecs::intersection(
                Codecs::strict_object().field("type", targeting_expression_type.clone()),
                Codecs::partial_object().field("value", Codecs::string()),
            ),
        )?;

        let parts = Parts {
            common,
            state: targeting_clause_state.clone(),
            expression: targeting_expression.clone(),
            expression_type: expression_type.clone(),
            serving_status: serving_status.clone(),
        };

        let targeting_clause: NamedCodec<TargetingClause> = registry.define(
            "TargetingClause",
            Codecs::intersection(
                parts.clause_fields(
                    Codecs::strict_object().field("targetId", common.target_id.clone()),
                ),
                Codecs::partial_object().field("bid", Codecs::float()),
            ),
        )?;
        let targeting_clause_extended = registry.define(
            "TargetingClauseExtended",
            Codecs::intersection(targeting_clause.clone(), parts.audit_fields()),
        )?;

        let product_recommendation_request = registry.define(
            "ProductRecommendationRequest",
            Codecs::strict_object()
                .field("pageSize", Codecs::integer())
                .field("pageNumber", Codecs::integer())
                .field("asins", Codecs::array(Codecs::string())),
        )?;
        let recommended_target_asin: NamedCodec<RecommendedTargetAsin> = registry.define(
            "RecommendedTargetAsin",
            Codecs::strict_object().field("recommendedTargetAsin", Codecs::string()),
        )?;
        let product_recommendation_response = registry.define(
            "ProductRecommendationResponse",
            Codecs::strict_object()
                .field("totalResultCount", Codecs::integer())
                .field("recommendedProducts", Codecs::array(recommended_target_asin.clone())),
        )?;

        let category_response = registry.define(
            "CategoryResponse",
            Codecs::strict_object()
                .field("id", common.category_id.clone())
                .field("name", Codecs::string())
                .field("isTargetable", Codecs::boolean())
                .field("path", Codecs::string()),
        )?;
        let age_range: NamedCodec<AgeRange> = registry.define(
            "AgeRange",
            Codecs::strict_object()
                .field("id", Codecs::integer())
                .field("name", Codecs::string()),
        )?;
        let brand_response: NamedCodec<BrandResponse> = registry.define(
            "BrandResponse",
            Codecs::strict_object()
                .field("id", common.brand_id.clone())
                .field("name", Codecs::string()),
        )?;
        let refinements_response = registry.define(
            "RefinementsResponse",
            Codecs::strict_object()
                .field("categoryId", common.category_id.clone())
                .field("ageRanges", Codecs::array(age_range.clone()))
                .field("brands", Codecs::array(brand_response.clone())),
        )?;

        let targeting_clause_response =
            registry.define("TargetingClauseResponse", parts.clause_outcome())?;
        let create_targeting_clauses_params = registry.define(
            "CreateTargetingClausesParams",
            parts
                .clause_fields(Codecs::partial_object())
                .field("bid", Codecs::float()),
        )?;
        let list_targeting_clauses_params =
            registry.define("ListTargetingClausesParams", parts.list_params())?;
        let update_targeting_clauses_params = registry.define(
            "UpdateTargetingClausesParams",
            parts
                .clause_fields(Codecs::partial_object().field("targetId", common.target_id.clone()))
                .field("bid", Codecs::float()),
        )?;
        let get_brand_recommendations_params = registry.define(
            "GetBrandRecommendationsParams",
            Codecs::partial_object()
                .field("keyword", Codecs::string())
                .field("categoryId", common.category_id.clone()),
        )?;

        let negative_targeting_clause_response =
            registry.define("NegativeTargetingClauseResponse", parts.clause_outcome())?;
        let create_negative_targeting_clauses_params = registry.define(
            "CreateNegativeTargetingClausesParams",
            parts.clause_fields(Codecs::strict_object()),
        )?;
        let negative_targeting_clause: NamedCodec<NegativeTargetingClause> = registry.define(
            "NegativeTargetingClause",
            parts.clause_fields(Codecs::strict_object().field("targetId", common.target_id.clone())),
        )?;
        let negative_targeting_clause_extended = registry.define(
            "NegativeTargetingClauseExtended",
            Codecs::intersection(negative_targeting_clause.clone(), parts.audit_fields()),
        )?;
        let list_negative_targeting_clauses_params =
            registry.define("ListNegativeTargetingClausesParams", parts.list_params())?;
        let update_negative_targeting_clauses_params = registry.define(
            "UpdateNegativeTargetingClausesParams",
            parts.clause_fields(Codecs::partial_object().field("targetId", common.target_id.clone())),
        )?;

        Ok(Self {
            targeting_clause_state,
            targeting_expression_type,
            expression_type,
            serving_status,
            targeting_expression,
            targeting_clause,
            targeting_clause_extended,
            product_recommendation_request,
            recommended_target_asin,
            product_recommendation_response,
            category_response,
            age_range,
            brand_response,
            refinements_response,
            targeting_clause_response,
            create_targeting_clauses_params,
            list_targeting_clauses_params,
            update_targeting_clauses_params,
            get_brand_recommendations_params,
            negative_targeting_clause_response,
            create_negative_targeting_clauses_params,
            negative_targeting_clause,
            negative_targeting_clause_extended,
            list_negative_targeting_clauses_params,
            update_negative_targeting_clauses_params,
        })
    }
}
