use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::models::{
    ButtonStyle, Link, LinkUpdate, NewClick, NewLink, NewProfile, Profile, ProfileUpdate,
};
use migration::entities::{click, link, profile};

pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        owner_id: model.owner_id,
        title: model.title,
        target_url: model.target_url,
        order: model.order,
        is_active: model.is_active,
        created_at: model.created_at,
    }
}

pub fn new_link_to_active_model(
    id: String,
    owner_id: &str,
    new_link: NewLink,
    now: DateTime<Utc>,
) -> link::ActiveModel {
    link::ActiveModel {
        id: Set(id),
        owner_id: Set(owner_id.to_string()),
        title: Set(new_link.title),
        target_url: Set(new_link.target_url),
        order: Set(new_link.order),
        is_active: Set(new_link.is_active),
        created_at: Set(now),
    }
}

/// Only the fields present in the update are `Set`
pub fn link_update_to_active_model(update: LinkUpdate) -> link::ActiveModel {
    link::ActiveModel {
        id: NotSet,
        owner_id: NotSet,
        title: update.title.map_or(NotSet, |v| Set(Some(v))),
        target_url: update.target_url.map_or(NotSet, |v| Set(Some(v))),
        order: update.order.map_or(NotSet, Set),
        is_active: update.is_active.map_or(NotSet, Set),
        created_at: NotSet,
    }
}

pub fn model_to_profile(model: profile::Model) -> Profile {
    Profile {
        id: model.id,
        username: model.username,
        display_name: model.display_name,
        bio: model.bio,
        avatar_url: model.avatar_url,
        background_color: model.background_color,
        accent_color: model.accent_color,
        // 未知样式按默认处理
        button_style: model
            .button_style
            .and_then(|s| s.parse::<ButtonStyle>().ok()),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn new_profile_to_active_model(new_profile: NewProfile, now: DateTime<Utc>) -> profile::ActiveModel {
    profile::ActiveModel {
        id: Set(new_profile.id),
        username: Set(new_profile.username),
        display_name: Set(new_profile.display_name),
        bio: Set(None),
        avatar_url: Set(None),
        background_color: Set(None),
        accent_color: Set(None),
        button_style: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

pub fn profile_update_to_active_model(
    update: ProfileUpdate,
    now: DateTime<Utc>,
) -> profile::ActiveModel {
    profile::ActiveModel {
        id: NotSet,
        username: update.username.map_or(NotSet, |v| Set(Some(v))),
        display_name: update.display_name.map_or(NotSet, |v| Set(Some(v))),
        bio: update.bio.map_or(NotSet, |v| Set(Some(v))),
        avatar_url: update.avatar_url.map_or(NotSet, |v| Set(Some(v))),
        background_color: update.background_color.map_or(NotSet, |v| Set(Some(v))),
        accent_color: update.accent_color.map_or(NotSet, |v| Set(Some(v))),
        button_style: update
            .button_style
            .map_or(NotSet, |v| Set(Some(v.as_ref().to_string()))),
        created_at: NotSet,
        updated_at: Set(now),
    }
}

pub fn new_click_to_active_model(click: NewClick, now: DateTime<Utc>) -> click::ActiveModel {
    click::ActiveModel {
        id: NotSet,
        link_id: Set(click.link_id),
        device_class: Set(click.device_class.as_ref().to_string()),
        created_at: Set(now),
    }
}
