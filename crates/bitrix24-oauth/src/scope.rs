//! Bitrix24 permission scopes.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// A Bitrix24 permission scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Company structure.
    Department,
    /// CRM entities.
    Crm,
    /// Calendar.
    Calendar,
    /// Users.
    User,
    /// Application data storage.
    Entity,
    /// Tasks.
    Task,
    /// Extended task operations.
    TasksExtended,
    /// Chat and notifications.
    Im,
    /// Activity stream.
    Log,
    /// Workgroups.
    SonetGroup,
}

impl Scope {
    /// Every scope, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Department,
        Self::Crm,
        Self::Calendar,
        Self::User,
        Self::Entity,
        Self::Task,
        Self::TasksExtended,
        Self::Im,
        Self::Log,
        Self::SonetGroup,
    ];

    /// Returns the identifier sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Crm => "crm",
            Self::Calendar => "calendar",
            Self::User => "user",
            Self::Entity => "entity",
            Self::Task => "task",
            Self::TasksExtended => "tasks_extended",
            Self::Im => "im",
            Self::Log => "log",
            Self::SonetGroup => "sonet_group",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| Error::InvalidConfig(format!("unknown scope: {s}")))
    }
}

/// Ordered sequence of requested scopes.
///
/// The order given by the caller is kept as-is; duplicates are not removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet(Vec<Scope>);

impl ScopeSet {
    /// Creates a scope set from the given scopes.
    #[must_use]
    pub fn new(scopes: impl IntoIterator<Item = Scope>) -> Self {
        Self(scopes.into_iter().collect())
    }

    /// Returns the scopes in request order.
    #[must_use]
    pub fn as_slice(&self) -> &[Scope] {
        &self.0
    }

    /// Returns true if no scope was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serializes the scopes as a single space-separated string.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        self.0
            .iter()
            .map(|scope| scope.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromIterator<Scope> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = Scope>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<Scope>> for ScopeSet {
    fn from(scopes: Vec<Scope>) -> Self {
        Self(scopes)
    }
}
