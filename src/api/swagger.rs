use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Jobboard Service API",
        version = "1.0.0",
        description = "API documentation for the job board backend. \n\n**Authentication:** protected endpoints read the `auth_token` httpOnly cookie set by POST /api/auth. Clients without a cookie jar can send the same token as a Bearer header.\n\n**Features:**\n- User and recruiter accounts with separate sessions\n- Public profiles by user id\n- Job offers from verified recruiters, accepted or declined by users\n- Avatar upload relayed to an external image host\n- Health monitoring",
        contact(
            name = "Jobboard Team",
            email = "support@jobboard.example"
        )
    ),
    paths(
        // Auth endpoints
        crate::api::auth::join,
        crate::api::auth::company_join,
        crate::api::auth::login,

        // Profiles
        crate::api::profile::public_profile,
        crate::api::profile::my_profile,
        crate::api::profile::company_profile,
        crate::api::profile::edit_profile,
        crate::api::avatar::edit_avatar,

        // Offers
        crate::api::offers::create_offer,
        crate::api::offers::respond_offer,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            // Auth
            crate::services::auth_service::JoinPayload,
            crate::services::auth_service::LoginPayload,
            crate::services::auth_service::JoinResponse,
            crate::services::auth_service::AuthResponse,

            // Profiles
            crate::models::UserInfo,
            crate::models::RecruiterInfo,
            crate::services::profile_service::PublicProfileResponse,
            crate::services::profile_service::EditProfilePayload,
            crate::services::profile_service::EditProfileResponse,
            crate::api::avatar::AvatarPayload,

            // Offers
            crate::services::offer_service::OfferPayload,
            crate::services::offer_service::CreateOfferResponse,
            crate::services::offer_service::RespondOfferResponse,

            // Health
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Account creation and session endpoints for users and recruiters."),
        (name = "Profile", description = "Public profiles, session-owner profiles and profile editing."),
        (name = "Offers", description = "Job offers from verified recruiters to users."),
        (name = "Health", description = "Health check endpoint for monitoring service status."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "auth_token",
                    "Session token issued by POST /api/auth",
                ))),
            );
        }
    }
}
