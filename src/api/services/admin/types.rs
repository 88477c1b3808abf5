//! Admin API 类型定义

use serde::{Deserialize, Serialize};

use crate::links::{KeyDirection, ReorderFailure, ReorderIntent};
use crate::services::{LinkView, SessionSnapshot};

/// 统一响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
    /// Where the client should navigate instead (sign-in, onboarding)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AvailabilityQuery {
    #[serde(default)]
    pub username: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ClaimRequest {
    pub username: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ClickQuery {
    #[serde(rename = "linkId")]
    pub link_id: Option<String>,
}

/// Local text edits; omitted fields stay untouched
#[derive(Deserialize, Clone, Debug, Default)]
pub struct EditLinkRequest {
    pub title: Option<String>,
    pub target_url: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// Reorder body: an explicit intent, a drag-and-drop gesture, or a key press
#[derive(Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum ReorderRequest {
    Intent(ReorderIntent),
    Drag {
        active_id: String,
        over_id: Option<String>,
    },
    Keyboard {
        id: String,
        direction: KeyDirection,
    },
}

#[derive(Serialize, Clone, Debug)]
pub struct CommitResponse {
    /// `false` when there was nothing to write
    pub written: bool,
    pub link: Option<LinkView>,
}

#[derive(Serialize, Clone, Debug)]
pub struct ToggleResponse {
    pub is_active: bool,
    pub link: Option<LinkView>,
}

#[derive(Serialize, Clone, Debug)]
pub struct ReorderResponse {
    /// `false` when the gesture did not move anything
    pub applied: bool,
    pub written: Vec<String>,
    pub failed: Vec<ReorderFailure>,
    pub session: SessionSnapshot,
}

#[derive(Serialize, Clone, Debug)]
pub struct DeleteResponse {
    pub id: String,
    pub unreconciled_deletes: Vec<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct AppearanceResponse {
    pub changed: bool,
    pub session: SessionSnapshot,
}
