use serde::Serialize;

use super::{CardId, SetId};

/// A flashcard belongs to exactly one set; `ord` fixes the display order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: CardId,
    pub set_id: SetId,
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub ord: i64,
}
