use serde::{Deserialize, Serialize};

/// Service an access requirement is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessService {
    Project,
    Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessOperation {
    Create,
    Read,
    Update,
    Delete,
}

impl AccessOperation {
    pub const ALL: [AccessOperation; 4] = [
        AccessOperation::Create,
        AccessOperation::Read,
        AccessOperation::Update,
        AccessOperation::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// What a page declares it needs: (service, entity, operation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessRequirement {
    pub service: AccessService,
    pub entity: &'static str,
    pub operation: AccessOperation,
}

impl AccessRequirement {
    pub const fn project(entity: &'static str, operation: AccessOperation) -> Self {
        Self {
            service: AccessService::Project,
            entity,
            operation,
        }
    }
}

/// A permission granted to a role, parsed from its configured phrase.
///
/// - `Manage <entity>` grants every operation on the entity
/// - `Read <entity> information` grants read access
///
/// Any other phrase is kept but grants nothing checkable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ability {
    pub phrase: String,
    pub entity: Option<String>,
    pub operations: Vec<AccessOperation>,
}

impl Ability {
    pub fn parse(phrase: &str) -> Self {
        let normalized = phrase.trim().to_lowercase();
        let words: Vec<&str> = normalized.split_whitespace().collect();

        let (entity, operations) = match words.as_slice() {
            ["manage", entity] => (Some(entity.to_string()), AccessOperation::ALL.to_vec()),
            ["read", entity, "information"] => {
                (Some(entity.to_string()), vec![AccessOperation::Read])
            }
            _ => (None, Vec::new()),
        };

        Self {
            phrase: phrase.trim().to_string(),
            entity,
            operations,
        }
    }

    /// Abilities are project-scoped; platform requirements are never granted by a phrase
    pub fn grants(&self, requirement: &AccessRequirement) -> bool {
        requirement.service == AccessService::Project
            && self.entity.as_deref() == Some(requirement.entity)
            && self.operations.contains(&requirement.operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATE_STORE: AccessRequirement =
        AccessRequirement::project("store", AccessOperation::Create);

    #[test]
    fn test_manage_grants_create() {
        assert!(Ability::parse("Manage store").grants(&CREATE_STORE));
        assert!(!Ability::parse("Manage supplier").grants(&CREATE_STORE));
    }

    #[test]
    fn test_read_information_is_read_only() {
        let ability = Ability::parse("Read store information");
        assert_eq!(ability.entity.as_deref(), Some("store"));
        assert!(!ability.grants(&CREATE_STORE));
        assert!(ability.grants(&AccessRequirement::project("store", AccessOperation::Read)));
    }

    #[test]
    fn test_unrecognized_phrase_grants_nothing() {
        let ability = Ability::parse("Manage personal information");
        assert_eq!(ability.entity, None);
        assert!(ability.operations.is_empty());
    }

    #[test]
    fn test_platform_service_not_granted() {
        let requirement = AccessRequirement {
            service: AccessService::Platform,
            entity: "store",
            operation: AccessOperation::Create,
        };
        assert!(!Ability::parse("Manage store").grants(&requirement));
    }
}
