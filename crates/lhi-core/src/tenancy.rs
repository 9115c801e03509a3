//! School-based multi-tenancy primitives.
//!
//! The authenticated user is carried as an explicit snapshot in a
//! [`RequestContext`] that callers thread through every scoped operation.
//! Scope resolution only reads that snapshot and never loads anything, so
//! it cannot recurse into authentication while the user record is still
//! being materialized.
//!
//! Do NOT scope the `User` record itself; users carry the school
//! relationship but are looked up during authentication, before any
//! context exists.

/// Identifier of a school (the tenant unit).
pub type SchoolId = i64;

/// Snapshot of the authenticated user bound to the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
    pub school_id: Option<SchoolId>,
}

/// Per-request execution context.
///
/// Immutable for the duration of a request. A context without a user, or
/// with a user that has no school, is the global/admin mode; it is never
/// an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestContext {
    user: Option<CurrentUser>,
}

impl RequestContext {
    /// Context with no authenticated user (system actors, CLI flows).
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: CurrentUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    /// School id of the bound user, if any.
    pub fn school_id(&self) -> Option<SchoolId> {
        self.user.and_then(|u| u.school_id)
    }

    pub fn has_school_context(&self) -> bool {
        self.school_id().is_some()
    }
}

/// Filter the data-access layer applies to school-owned records.
///
/// Adapters must consult the scope on every default read, count, update,
/// and delete path; the filtering is visible at the call site instead of
/// being injected behind the query builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchoolScope {
    /// Restrict to a single school.
    School(SchoolId),
    /// No school filter. Contexts without a school resolve here;
    /// administrative flows may also request it explicitly.
    All,
}

impl SchoolScope {
    /// Scope derived from the ambient request context.
    pub fn from_context(ctx: &RequestContext) -> Self {
        match ctx.school_id() {
            Some(id) => Self::School(id),
            None => Self::All,
        }
    }

    /// Explicit override to an arbitrary school, regardless of context.
    pub fn for_school(id: SchoolId) -> Self {
        Self::School(id)
    }

    pub fn school_id(&self) -> Option<SchoolId> {
        match self {
            Self::School(id) => Some(*id),
            Self::All => None,
        }
    }

    /// Whether a record stamped with `school_id` is visible under this
    /// scope. Unstamped records are only visible without a filter.
    pub fn matches(&self, school_id: Option<SchoolId>) -> bool {
        match self {
            Self::School(id) => school_id == Some(*id),
            Self::All => true,
        }
    }
}

/// School id to stamp on a record at creation time.
///
/// An id set explicitly by the caller always wins; otherwise the ambient
/// school is used; with neither, the record stays unstamped and any
/// downstream constraint is the caller's concern.
pub fn assign_school_id(explicit: Option<SchoolId>, ctx: &RequestContext) -> Option<SchoolId> {
    explicit.or_else(|| ctx.school_id())
}

/// Capability of records that carry a school id.
pub trait SchoolScoped {
    fn school_id(&self) -> Option<SchoolId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school_user(school_id: SchoolId) -> RequestContext {
        RequestContext::authenticated(CurrentUser {
            user_id: 7,
            school_id: Some(school_id),
        })
    }

    fn admin_user() -> RequestContext {
        RequestContext::authenticated(CurrentUser {
            user_id: 1,
            school_id: None,
        })
    }

    #[test]
    fn test_school_id_resolution() {
        assert_eq!(RequestContext::anonymous().school_id(), None);
        assert_eq!(admin_user().school_id(), None);
        assert_eq!(school_user(3).school_id(), Some(3));
        assert!(school_user(3).has_school_context());
        assert!(!admin_user().has_school_context());
    }

    #[test]
    fn test_scope_from_context() {
        assert_eq!(
            SchoolScope::from_context(&school_user(3)),
            SchoolScope::School(3)
        );
        assert_eq!(SchoolScope::from_context(&admin_user()), SchoolScope::All);
        assert_eq!(
            SchoolScope::from_context(&RequestContext::anonymous()),
            SchoolScope::All
        );
    }

    #[test]
    fn test_scope_override_ignores_context() {
        // A t1-scoped caller can still ask for t2 or for everything.
        let scope = SchoolScope::for_school(2);
        assert_eq!(scope, SchoolScope::School(2));
        assert_eq!(scope.school_id(), Some(2));
        assert_eq!(SchoolScope::All.school_id(), None);
    }

    #[test]
    fn test_scope_matches() {
        let scoped = SchoolScope::School(1);
        assert!(scoped.matches(Some(1)));
        assert!(!scoped.matches(Some(2)));
        assert!(!scoped.matches(None));

        assert!(SchoolScope::All.matches(Some(1)));
        assert!(SchoolScope::All.matches(None));
    }

    #[test]
    fn test_assign_explicit_wins() {
        let ctx = school_user(1);
        assert_eq!(assign_school_id(Some(2), &ctx), Some(2));
    }

    #[test]
    fn test_assign_from_context() {
        let ctx = school_user(1);
        assert_eq!(assign_school_id(None, &ctx), Some(1));
    }

    #[test]
    fn test_assign_without_context_stays_unset() {
        assert_eq!(assign_school_id(None, &RequestContext::anonymous()), None);
        assert_eq!(assign_school_id(None, &admin_user()), None);
        // Explicit id still applies without any ambient school.
        assert_eq!(assign_school_id(Some(5), &admin_user()), Some(5));
    }
}
