//! Permission checks for trigger invocations.
//!
//! The blocklist is always evaluated first: a blocked sender is rejected
//! even when moderator, broadcaster or allowlisted.

use std::collections::HashSet;

use super::ChatMessage;
use crate::config::{AccessConfig, PermissionLevel};

/// Set of lower-cased usernames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserList {
    names: HashSet<String>,
}

impl UserList {
    /// Build a list from raw names. Usernames cannot contain whitespace,
    /// so all of it is stripped; blank entries are dropped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| {
                name.as_ref()
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect::<String>()
                    .to_lowercase()
            })
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, username: &str) -> bool {
        self.names.contains(&username.to_lowercase())
    }

    /// Number of names on the list.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Who may invoke the trigger.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    pub everyone: bool,
    pub mods: bool,
    pub allowlist: UserList,
    pub blocklist: UserList,
}

impl AccessPolicy {
    /// Build the policy from the `[access]` section.
    pub fn from_config(config: &AccessConfig) -> Self {
        Self {
            everyone: config.level == PermissionLevel::Everyone,
            mods: config.level == PermissionLevel::Mods,
            allowlist: UserList::from_names(&config.allowed_users),
            blocklist: UserList::from_names(&config.blocked_users),
        }
    }

    /// Whether the sender is on the blocklist.
    pub fn is_blocked<M: ChatMessage + ?Sized>(&self, msg: &M) -> bool {
        msg.username_on_list(&self.blocklist)
    }

    /// Whether the sender may invoke the trigger.
    pub fn allows<M: ChatMessage + ?Sized>(&self, msg: &M) -> bool {
        if self.is_blocked(msg) {
            return false;
        }
        self.everyone
            || (self.mods && msg.is_moderator())
            || msg.is_broadcaster()
            || msg.username_on_list(&self.allowlist)
    }
}
