//! Page access gate.
//!
//! A page declares an ordered list of guards. They are evaluated as pure
//! functions over the actor session before the page's view is built; the
//! first guard that does not pass decides the outcome.

use contracts::system::app_config::AppConfig;
use contracts::system::auth::{Ability, AccessOperation, AccessRequirement, UserInfo};

/// Authenticated actor with the abilities its roles grant
#[derive(Debug, Clone, PartialEq)]
pub struct ActorSession {
    pub user: UserInfo,
    pub abilities: Vec<Ability>,
}

impl ActorSession {
    pub fn from_user(user: UserInfo, config: &AppConfig) -> Self {
        let abilities = config.abilities_for_roles(&user.roles);
        Self { user, abilities }
    }

    /// Admins hold every ability
    pub fn has_ability(&self, requirement: &AccessRequirement) -> bool {
        self.user.is_admin || self.abilities.iter().any(|a| a.grants(requirement))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// No session → redirect to the entry page
    RequireSession { redirect_to: &'static str },
    /// Missing session or missing ability → denied
    RequireAbility(AccessRequirement),
}

/// Proof that the gate allowed a page. Only `evaluate` can produce one.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessPermit {
    granted: Vec<AccessRequirement>,
}

impl AccessPermit {
    pub fn granted(&self) -> &[AccessRequirement] {
        &self.granted
    }

    /// Whether the permit includes creating records of `entity`
    pub fn allows_create(&self, entity: &str) -> bool {
        self.granted
            .iter()
            .any(|r| r.entity == entity && r.operation == AccessOperation::Create)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthDecision {
    Allowed(AccessPermit),
    RedirectUnauthenticated { to: &'static str },
    Denied(AccessRequirement),
}

/// Run `guards` in order against the session
pub fn evaluate(session: Option<&ActorSession>, guards: &[Guard]) -> AuthDecision {
    let mut granted = Vec::new();

    for guard in guards {
        match (guard, session) {
            (Guard::RequireSession { redirect_to }, None) => {
                log::info!("no session, redirecting to {}", redirect_to);
                return AuthDecision::RedirectUnauthenticated { to: redirect_to };
            }
            (Guard::RequireSession { .. }, Some(_)) => {}
            (Guard::RequireAbility(requirement), None) => {
                log::warn!(
                    "anonymous actor lacks {} on {}",
                    requirement.operation.as_str(),
                    requirement.entity
                );
                return AuthDecision::Denied(*requirement);
            }
            (Guard::RequireAbility(requirement), Some(actor)) => {
                if !actor.has_ability(requirement) {
                    log::warn!(
                        "{} lacks {} on {}",
                        actor.user.username,
                        requirement.operation.as_str(),
                        requirement.entity
                    );
                    return AuthDecision::Denied(*requirement);
                }
                granted.push(*requirement);
            }
        }
    }

    AuthDecision::Allowed(AccessPermit { granted })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use contracts::system::app_config::load_app_config;

    const CREATE_STORE: AccessRequirement =
        AccessRequirement::project("store", AccessOperation::Create);

    const GUARDS: &[Guard] = &[
        Guard::RequireSession { redirect_to: "/" },
        Guard::RequireAbility(CREATE_STORE),
    ];

    pub(crate) fn user(roles: &[&str], is_admin: bool) -> UserInfo {
        UserInfo {
            id: "u-1".into(),
            username: "dana".into(),
            full_name: None,
            email: None,
            is_admin,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub(crate) fn session(roles: &[&str]) -> ActorSession {
        ActorSession::from_user(user(roles, false), &load_app_config().unwrap())
    }

    /// Permit for creating stores, obtained through the gate
    pub(crate) fn store_create_permit() -> AccessPermit {
        match evaluate(Some(&session(&["Store Manager"])), GUARDS) {
            AuthDecision::Allowed(permit) => permit,
            other => panic!("store manager was not allowed: {:?}", other),
        }
    }

    #[test]
    fn test_no_session_redirects() {
        assert_eq!(
            evaluate(None, GUARDS),
            AuthDecision::RedirectUnauthenticated { to: "/" }
        );
    }

    #[test]
    fn test_ability_without_session_denied() {
        assert_eq!(
            evaluate(None, &[Guard::RequireAbility(CREATE_STORE)]),
            AuthDecision::Denied(CREATE_STORE)
        );
    }

    #[test]
    fn test_missing_ability_denied() {
        assert_eq!(
            evaluate(Some(&session(&["Customer"])), GUARDS),
            AuthDecision::Denied(CREATE_STORE)
        );
    }

    #[test]
    fn test_owner_role_allowed() {
        let permit = store_create_permit();
        assert!(permit.allows_create("store"));
        assert!(!permit.allows_create("supplier"));
    }

    #[test]
    fn test_admin_allowed_without_roles() {
        let admin = ActorSession::from_user(user(&[], true), &load_app_config().unwrap());
        assert!(matches!(evaluate(Some(&admin), GUARDS), AuthDecision::Allowed(_)));
    }

    #[test]
    fn test_guard_order_decides() {
        let reversed = [GUARDS[1], GUARDS[0]];
        assert_eq!(
            evaluate(Some(&session(&["Customer"])), &reversed),
            AuthDecision::Denied(CREATE_STORE)
        );
    }
}
