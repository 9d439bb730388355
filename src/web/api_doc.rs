use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::visibility::{
    QuickCheckRequest, QuickCheckResponse, VisibilityRequest, VisibilityResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::visibility::visibility,
        super::api::visibility::quick_check,
    ),
    components(
        schemas(
            VisibilityRequest,
            VisibilityResponse,
            QuickCheckRequest,
            QuickCheckResponse,
            ErrorResponse,
            crate::astro::AstroObject,
            crate::site::SiteConfig,
            crate::predict::VisibilityInfo,
            crate::predict::VisibilityWindow,
            crate::predict::QuickCheck,
        )
    ),
    info(
        title = "Balcony Stargazer API",
        description = "Visibility windows for targets seen through a fence opening",
        version = "0.1.0"
    ),
    tags(
        (name = "visibility", description = "Visibility queries")
    )
)]
pub struct ApiDoc;
