use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Recruiter {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub recruiter_id: String, // PRIMARY IDENTIFIER - hex de ObjectId
    pub name: String,
    pub email: String,
    /// bcrypt hash, nunca o texto puro
    pub password: String,
    /// Só recrutadores verificados podem criar ofertas
    #[serde(default)]
    pub verified: bool,
    pub created_at: Option<BsonDateTime>,
    pub updated_at: Option<BsonDateTime>,
}

/// Visão do recrutador exposta pela API (sem o hash de senha)
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RecruiterInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub verified: bool,
}

impl From<Recruiter> for RecruiterInfo {
    fn from(recruiter: Recruiter) -> Self {
        Self {
            id: recruiter.recruiter_id,
            name: recruiter.name,
            email: recruiter.email,
            verified: recruiter.verified,
        }
    }
}
