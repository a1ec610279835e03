use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Oferta pendente de um recrutador para um usuário.
/// No máximo uma oferta por par (from, to) - índice único garante.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Offer {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub offer_id: String,
    /// recruiter_id de quem enviou
    pub from: String,
    /// user_id de quem recebe
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: Option<BsonDateTime>,
}
