//! Product-targeting shapes.
//!
//! Every request and response payload of the product-targeting API, for
//! sponsored products and sponsored brands, defined as named shapes in a
//! [`CodecRegistry`] and paired with a serde type.
//!
//! # Example
//!
//! ```rust
//! use adshape::targeting::{TargetingClauseState, TargetingShapes};
//! use adshape::{Codec, CodecRegistry};
//! use serde_json::json;
//!
//! let registry = CodecRegistry::new();
//! let shapes = TargetingShapes::register(&registry).unwrap();
//!
//! let clause = shapes
//!     .products
//!     .targeting_clause
//!     .decode(&json!({
//!         "targetId": 1,
//!         "campaignId": 2,
//!         "adGroupId": 3,
//!         "state": "enabled",
//!         "expression": [{"type": "asinSameAs", "value": "B00EXAMPLE"}],
//!         "expressionType": "manual"
//!     }))
//!     .into_result()
//!     .unwrap();
//! assert_eq!(clause.state, TargetingClauseState::Enabled);
//! assert_eq!(clause.bid, None);
//!
//! // The registry knows every shape by name.
//! assert!(registry.contains("SBBatchGetTargetsResponse"));
//! ```

/// Declares a closed string enum together with its wire literals.
///
/// Generates the serde renames, `VALUES` in declaration order, `as_str`,
/// `parse_str`, `Display` and a matching [`EnumCodec`](crate::codec::EnumCodec).
macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            pub fn parse_str(raw: &str) -> Option<Self> {
                match raw {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn codec() -> $crate::codec::EnumCodec {
                $crate::codec::EnumCodec::new(Self::VALUES.iter().copied())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod brands;
mod common;
mod products;

pub use brands::{
    BrandShapes, ProductPredicateType, SbBatchGetTargetError, SbBatchGetTargetSuccess,
    SbBatchGetTargetsRequest, SbBatchGetTargetsResponse, SbCreateNegativeTargetingClauseRequest,
    SbCreateNegativeTargetsRequest, SbCreateNegativeTargetsResponse,
    SbCreateTargetingClauseRequest, SbCreateTargetsRequest, SbCreateTargetsResponse,
    SbExpression, SbExpressionState, SbFilterType, SbFilterValue, SbListNegativeTargetsRequest,
    SbListNegativeTargetsResponse, SbListTargetsRequest, SbListTargetsResponse,
    SbNegativeExpression, SbNegativeExpressionType, SbResolvedExpression, SbTargetFilter,
    SbTargetState, SbTargetingClause, SbTargetingClauseResponse,
    SbUpdateNegativeTargetingClauseRequest, SbUpdateNegativeTargetsRequest,
    SbUpdateNegativeTargetsResponse, SbUpdateTargetError, SbUpdateTargetSuccess,
    SbUpdateTargetsRequest, SbUpdateTargetsResponse,
};
pub use common::{AdGroupId, BrandId, CampaignId, CategoryId, CommonShapes, ListPagination, TargetId};
pub use products::{
    AgeRange, BrandResponse, CategoryResponse, CreateNegativeTargetingClausesParams,
    CreateTargetingClausesParams, ExpressionType, GetBrandRecommendationsParams,
    ListTargetingClausesParams, NegativeTargetingClause, NegativeTargetingClauseExtended,
    NegativeTargetingClauseResponse, ProductRecommendationRequest, ProductRecommendationResponse,
    ProductShapes, RecommendedTargetAsin, RefinementsResponse, TargetingClause,
    TargetingClauseExtended, TargetingClauseResponse, TargetingClauseServingStatus,
    TargetingClauseState, TargetingExpression, TargetingExpressionType,
    UpdateNegativeTargetingClausesParams, UpdateTargetingClausesParams,
};

use crate::registry::{CodecRegistry, RegistryError};

/// Typed handles to every product-targeting shape.
#[derive(Debug, Clone)]
pub struct TargetingShapes {
    pub common: CommonShapes,
    pub products: ProductShapes,
    pub brands: BrandShapes,
}

impl TargetingShapes {
    /// Defines every product-targeting shape in `registry`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if any of the shape names is
    /// already defined, for example when called twice on one registry.
    pub fn register(registry: &CodecRegistry) -> Result<Self, RegistryError> {
        let common = CommonShapes::register(registry)?;
        let products = ProductShapes::register(registry, &common)?;
        let brands = BrandShapes::register(registry, &common)?;
        tracing::debug!(shapes = registry.len(), "registered product-targeting shapes");
        Ok(Self {
            common,
            products,
            brands,
        })
    }
}
