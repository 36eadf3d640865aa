//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use pantry_core::error::AppError;
use pantry_core::result::AppResult;
use pantry_database::repositories::membership::{MembershipEntityFilter, MembershipListFilter};
use pantry_database::repositories::share::ShareListFilter;
use pantry_entity::membership::MembershipStatus;
use pantry_entity::resource::ResourceKind;
use pantry_entity::shopping_list::NewShoppingListItem;

/// Create membership (invitation) request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMembershipRequest {
    /// Username of the user to invite.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
}

/// Membership status update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMembershipRequest {
    /// Membership to update.
    pub id: Uuid,
    /// Requested status. `pending` deserializes fine and is rejected by
    /// the transition check, not the parser.
    pub status: MembershipStatus,
}

/// Query parameters for membership listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MembershipListQuery {
    /// Only memberships targeting the requester.
    #[serde(default)]
    pub targeting_self: bool,
    /// Only memberships initiated by the requester.
    #[serde(default)]
    pub from_self: bool,
    /// Comma-separated status filter, e.g. `pending,accepted`.
    pub status: Option<String>,
    /// Resource kind for the entity filter (kebab-case path segment form).
    pub entity_type: Option<String>,
    /// Resource ID for the entity filter.
    pub entity_id: Option<Uuid>,
    /// `true` (default) keeps memberships that already carry a share of
    /// the entity, `false` keeps those that do not.
    pub entity_include: Option<bool>,
}

impl MembershipListQuery {
    /// Parses the raw query into a repository filter.
    pub fn into_filter(self) -> AppResult<MembershipListFilter> {
        let statuses = match self.status.as_deref() {
            None | Some("") => Vec::new(),
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .map(|s| {
                    MembershipStatus::parse(s)
                        .ok_or_else(|| AppError::validation(format!("Unknown status: {s}")))
                })
                .collect::<AppResult<Vec<_>>>()?,
        };

        let entity = match (self.entity_type.as_deref(), self.entity_id) {
            (None, None) => None,
            (Some(kind), Some(resource_id)) => {
                let kind = ResourceKind::from_path_segment(kind)
                    .ok_or_else(|| AppError::validation(format!("Unknown entity type: {kind}")))?;
                Some(MembershipEntityFilter {
                    kind,
                    resource_id,
                    include: self.entity_include.unwrap_or(true),
                })
            }
            _ => {
                return Err(AppError::validation(
                    "entity_type and entity_id must be provided together",
                ));
            }
        };

        Ok(MembershipListFilter {
            targeting_self: self.targeting_self,
            from_self: self.from_self,
            statuses,
            entity,
        })
    }
}

/// Create share request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareRequest {
    /// Resource to share.
    pub resource_id: Uuid,
    /// Membership to share it over.
    pub membership_id: Uuid,
}

/// Query parameters for share listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareListQuery {
    /// Only shares whose membership targets the requester.
    #[serde(default)]
    pub targeting_self: bool,
    /// Only shares whose membership was initiated by the requester.
    #[serde(default)]
    pub from_self: bool,
    /// Restrict to one membership.
    pub membership_id: Option<Uuid>,
}

impl ShareListQuery {
    /// Converts the raw query into a repository filter.
    pub fn into_filter(self) -> ShareListFilter {
        ShareListFilter {
            targeting_self: self.targeting_self,
            from_self: self.from_self,
            membership_id: self.membership_id,
        }
    }
}

/// One new item in an append request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewItemRequest {
    /// Item text.
    #[validate(length(min = 1, max = 500, message = "Content must be 1-500 characters"))]
    pub content: String,
    /// Optional free-form notes.
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl From<NewItemRequest> for NewShoppingListItem {
    fn from(req: NewItemRequest) -> Self {
        Self {
            content: req.content,
            notes: req.notes,
        }
    }
}

/// Append shopping list items request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppendItemsRequest {
    /// List to append to.
    pub shopping_list_id: Uuid,
    /// Items to append, in order.
    #[validate(length(min = 1, message = "Provide at least one item"), nested)]
    pub items: Vec<NewItemRequest>,
}

/// Update item content request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateItemContentRequest {
    /// New item text.
    #[validate(length(min = 1, max = 500, message = "Content must be 1-500 characters"))]
    pub content: String,
    /// New notes; `null` clears them.
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Set item completed request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetItemCompletedRequest {
    /// Target completion state.
    pub completed: bool,
}
