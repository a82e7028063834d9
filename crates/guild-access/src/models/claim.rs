//! Bot permission claims recorded per guild role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named permission a guild member may hold.
///
/// Declaration order is the enumeration order used wherever claims are
/// listed (`BTreeSet<Claim>` iterates in this order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Claim {
    DashboardView,
    DashboardEdit,
    GuildSettingsView,
    GuildSettingsEdit,
    DesignatedChannelView,
    DesignatedChannelModify,
    CustomPrefixSet,
    CustomTagPrefixSet,
    WelcomeMessageView,
    WelcomeMessageModify,
    TagAdd,
    TagDelete,
    AssignableRolesAdd,
    AssignableRolesDelete,
    DeleteMessage,
    EmoteAdd,
    ClaimsView,
    ClaimsModify,
    ManageClassAdd,
    ModerationWarn,
    ModerationBan,
    ModerationMute,
    ModerationPurge,
    ModerationInfractionView,
    ModerationInfractionViewSelf,
    CommandRestrictionsEdit,
    BypassDisabledCommands,
}

impl Claim {
    /// Every claim, in enumeration order.
    pub const ALL: &'static [Self] = &[
        Self::DashboardView,
        Self::DashboardEdit,
        Self::GuildSettingsView,
        Self::GuildSettingsEdit,
        Self::DesignatedChannelView,
        Self::DesignatedChannelModify,
        Self::CustomPrefixSet,
        Self::CustomTagPrefixSet,
        Self::WelcomeMessageView,
        Self::WelcomeMessageModify,
        Self::TagAdd,
        Self::TagDelete,
        Self::AssignableRolesAdd,
        Self::AssignableRolesDelete,
        Self::DeleteMessage,
        Self::EmoteAdd,
        Self::ClaimsView,
        Self::ClaimsModify,
        Self::ManageClassAdd,
        Self::ModerationWarn,
        Self::ModerationBan,
        Self::ModerationMute,
        Self::ModerationPurge,
        Self::ModerationInfractionView,
        Self::ModerationInfractionViewSelf,
        Self::CommandRestrictionsEdit,
        Self::BypassDisabledCommands,
    ];

    /// Wire name of the claim.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DashboardView => "dashboard_view",
            Self::DashboardEdit => "dashboard_edit",
            Self::GuildSettingsView => "guild_settings_view",
            Self::GuildSettingsEdit => "guild_settings_edit",
            Self::DesignatedChannelView => "designated_channel_view",
            Self::DesignatedChannelModify => "designated_channel_modify",
            Self::CustomPrefixSet => "custom_prefix_set",
            Self::CustomTagPrefixSet => "custom_tag_prefix_set",
            Self::WelcomeMessageView => "welcome_message_view",
            Self::WelcomeMessageModify => "welcome_message_modify",
            Self::TagAdd => "tag_add",
            Self::TagDelete => "tag_delete",
            Self::AssignableRolesAdd => "assignable_roles_add",
            Self::AssignableRolesDelete => "assignable_roles_delete",
            Self::DeleteMessage => "delete_message",
            Self::EmoteAdd => "emote_add",
            Self::ClaimsView => "claims_view",
            Self::ClaimsModify => "claims_modify",
            Self::ManageClassAdd => "manage_class_add",
            Self::ModerationWarn => "moderation_warn",
            Self::ModerationBan => "moderation_ban",
            Self::ModerationMute => "moderation_mute",
            Self::ModerationPurge => "moderation_purge",
            Self::ModerationInfractionView => "moderation_infraction_view",
            Self::ModerationInfractionViewSelf => "moderation_infraction_view_self",
            Self::CommandRestrictionsEdit => "command_restrictions_edit",
            Self::BypassDisabledCommands => "bypass_disabled_commands",
        }
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized claim name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown claim: {0}")]
pub struct UnknownClaim(pub String);

impl FromStr for Claim {
    type Err = UnknownClaim;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|claim| claim.as_str() == s)
            .ok_or_else(|| UnknownClaim(s.to_string()))
    }
}
