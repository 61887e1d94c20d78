//! Role-based authorization engine
//!
//! One pure decision function, evaluated by every catalog handler before a
//! mutation. Rules are matched in precedence order:
//!
//! 1. unauthenticated → deny everything;
//! 2. reads → allow for any authenticated role;
//! 3. artist creation → publishers only (admins are deliberately excluded
//!    from this one write);
//! 4. remaining writes → admin or publisher.
//!
//! Unknown actions cannot exist: `Action` is a closed enum, so anything not
//! matched above is unrepresentable rather than silently allowed.
//!
//! Ownership is handled separately. [`may_mutate_owned`] gates a publisher's
//! mutations on actually owning the target, and [`is_owner`] answers the
//! informational ownership query without ever blocking a request.

use chord_core::types::{Role, UserId};

/// The catalog entity kinds the engine knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Artist,
    Album,
    Song,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Artist => "Artist",
            EntityKind::Album => "Album",
            EntityKind::Song => "Song",
        }
    }
}

/// A requested operation on the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// get / list / list-by-parent
    Read(EntityKind),
    Create(EntityKind),
    Edit(EntityKind),
    Delete(EntityKind),
    /// "my artists" listing
    ListOwned,
    /// ownership-check query
    CheckOwnership(EntityKind),
}

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Map (role, action) to a decision
///
/// `role` is `None` for an unauthenticated actor. Pure: the same input
/// always yields the same decision.
pub fn authorize(role: Option<Role>, action: Action) -> Decision {
    let Some(role) = role else {
        return Decision::Deny;
    };

    match action {
        Action::Read(_) => Decision::Allow,
        Action::Create(EntityKind::Artist) => match role {
            Role::Publisher => Decision::Allow,
            Role::Admin | Role::User => Decision::Deny,
        },
        Action::Create(_)
        | Action::Edit(_)
        | Action::Delete(_)
        | Action::ListOwned
        | Action::CheckOwnership(_) => match role {
            Role::Admin | Role::Publisher => Decision::Allow,
            Role::User => Decision::Deny,
        },
    }
}

/// May this actor mutate an entity with the given resolved owner?
///
/// Admins pass unconditionally. A publisher passes only when they are the
/// entity's effective owner, which also means nobody but an admin can
/// mutate an unowned song.
pub fn may_mutate_owned(role: Role, actor_id: UserId, owner: Option<UserId>) -> Decision {
    match role {
        Role::Admin => Decision::Allow,
        Role::Publisher if owner == Some(actor_id) => Decision::Allow,
        _ => Decision::Deny,
    }
}

/// Informational ownership query; never blocks a request
///
/// Non-publisher roles short-circuit to `false` regardless of actual
/// ownership; for publishers the resolved owner is compared to the actor.
pub fn is_owner(role: Role, actor_id: UserId, owner: Option<UserId>) -> bool {
    role == Role::Publisher && owner == Some(actor_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [EntityKind; 3] = [EntityKind::Artist, EntityKind::Album, EntityKind::Song];
    const ALL_ROLES: [Role; 3] = [Role::Admin, Role::Publisher, Role::User];

    fn all_actions() -> Vec<Action> {
        let mut actions = vec![Action::ListOwned];
        for kind in ALL_KINDS {
            actions.push(Action::Read(kind));
            actions.push(Action::Create(kind));
            actions.push(Action::Edit(kind));
            actions.push(Action::Delete(kind));
            actions.push(Action::CheckOwnership(kind));
        }
        actions
    }

    #[test]
    fn unauthenticated_actor_is_denied_everything() {
        for action in all_actions() {
            assert_eq!(authorize(None, action), Decision::Deny, "{action:?}");
        }
    }

    #[test]
    fn reads_are_allowed_for_every_authenticated_role() {
        for role in ALL_ROLES {
            for kind in ALL_KINDS {
                assert_eq!(
                    authorize(Some(role), Action::Read(kind)),
                    Decision::Allow,
                    "{role:?} reading {kind:?}"
                );
            }
        }
    }

    #[test]
    fn artist_creation_is_publisher_only() {
        assert_eq!(
            authorize(Some(Role::Publisher), Action::Create(EntityKind::Artist)),
            Decision::Allow
        );
        // The narrower rule overrides the generic admin/publisher write rule
        assert_eq!(
            authorize(Some(Role::Admin), Action::Create(EntityKind::Artist)),
            Decision::Deny
        );
        assert_eq!(
            authorize(Some(Role::User), Action::Create(EntityKind::Artist)),
            Decision::Deny
        );
    }

    #[test]
    fn writes_require_admin_or_publisher() {
        for kind in [EntityKind::Album, EntityKind::Song] {
            for action in [Action::Create(kind), Action::Edit(kind), Action::Delete(kind)] {
                assert_eq!(authorize(Some(Role::Admin), action), Decision::Allow);
                assert_eq!(authorize(Some(Role::Publisher), action), Decision::Allow);
                assert_eq!(authorize(Some(Role::User), action), Decision::Deny);
            }
        }
        for action in [Action::Edit(EntityKind::Artist), Action::Delete(EntityKind::Artist)] {
            assert_eq!(authorize(Some(Role::Admin), action), Decision::Allow);
            assert_eq!(authorize(Some(Role::Publisher), action), Decision::Allow);
            assert_eq!(authorize(Some(Role::User), action), Decision::Deny);
        }
    }

    #[test]
    fn listing_owned_artists_and_ownership_checks_deny_plain_users() {
        assert_eq!(authorize(Some(Role::User), Action::ListOwned), Decision::Deny);
        for kind in ALL_KINDS {
            assert_eq!(
                authorize(Some(Role::User), Action::CheckOwnership(kind)),
                Decision::Deny
            );
        }
    }

    #[test]
    fn authorize_is_pure() {
        for role in [None, Some(Role::Admin), Some(Role::Publisher), Some(Role::User)] {
            for action in all_actions() {
                assert_eq!(authorize(role, action), authorize(role, action));
            }
        }
    }

    #[test]
    fn ownership_gate_admits_admins_and_owning_publishers() {
        assert_eq!(may_mutate_owned(Role::Admin, 1, Some(2)), Decision::Allow);
        assert_eq!(may_mutate_owned(Role::Admin, 1, None), Decision::Allow);
        assert_eq!(may_mutate_owned(Role::Publisher, 1, Some(1)), Decision::Allow);
        assert_eq!(may_mutate_owned(Role::Publisher, 1, Some(2)), Decision::Deny);
        // Unowned entities are admin-only
        assert_eq!(may_mutate_owned(Role::Publisher, 1, None), Decision::Deny);
        assert_eq!(may_mutate_owned(Role::User, 1, Some(1)), Decision::Deny);
    }

    #[test]
    fn ownership_query_short_circuits_for_non_publishers() {
        // Even a "correct" owner comparison reports false for non-publishers
        assert!(!is_owner(Role::Admin, 1, Some(1)));
        assert!(!is_owner(Role::User, 1, Some(1)));

        assert!(is_owner(Role::Publisher, 1, Some(1)));
        assert!(!is_owner(Role::Publisher, 1, Some(2)));
        assert!(!is_owner(Role::Publisher, 1, None));
    }
}
