//! Role registry: static mapping from role to display metadata and permissions.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stratboard_core::DomainError;

use crate::Permission;

/// Closed set of roles a principal can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    StrategyTeam,
    DepartmentUser,
    DataAnalyst,
    /// Head of department.
    Hod,
    Staff,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::StrategyTeam,
        Role::DepartmentUser,
        Role::DataAnalyst,
        Role::Hod,
        Role::Staff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::StrategyTeam => "strategy_team",
            Role::DepartmentUser => "department_user",
            Role::DataAnalyst => "data_analyst",
            Role::Hod => "hod",
            Role::Staff => "staff",
        }
    }

    pub fn definition(&self) -> &'static RoleDefinition {
        role_definition(*self)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown role '{s}'")))
    }
}

/// Display metadata and permission set of a role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub role: Role,
    pub display_name: &'static str,
    pub description: &'static str,
    /// Badge color used by the presentation layer.
    pub color: &'static str,
    pub permissions: &'static [Permission],
}

static REGISTRY: [RoleDefinition; 6] = [
    RoleDefinition {
        role: Role::Admin,
        display_name: "Administrator",
        description: "Full access to every dashboard, export and setting",
        color: "#dc2626",
        permissions: &[Permission::WILDCARD],
    },
    RoleDefinition {
        role: Role::StrategyTeam,
        display_name: "Strategy Team",
        description: "Monitors plan-wide progress, risks and predictions",
        color: "#2563eb",
        permissions: &[
            Permission::from_static("dashboard.view"),
            Permission::from_static("kpis.read"),
            Permission::from_static("milestones.read"),
            Permission::from_static("exports.download"),
            Permission::from_static("predictions.run"),
        ],
    },
    RoleDefinition {
        role: Role::DepartmentUser,
        display_name: "Department User",
        description: "Works on the KPIs and milestones of one department",
        color: "#16a34a",
        permissions: &[
            Permission::from_static("dashboard.view"),
            Permission::from_static("kpis.read"),
            Permission::from_static("reports.submit"),
        ],
    },
    RoleDefinition {
        role: Role::DataAnalyst,
        display_name: "Data Analyst",
        description: "Reviews KPI data and prediction results",
        color: "#9333ea",
        permissions: &[
            Permission::from_static("dashboard.view"),
            Permission::from_static("kpis.read"),
            Permission::from_static("predictions.read"),
            Permission::from_static("exports.download"),
        ],
    },
    RoleDefinition {
        role: Role::Hod,
        display_name: "Head of Department",
        description: "Oversees a department's KPIs and submitted reports",
        color: "#ea580c",
        permissions: &[
            Permission::from_static("dashboard.view"),
            Permission::from_static("kpis.read"),
            Permission::from_static("reports.read"),
            Permission::from_static("exports.download"),
        ],
    },
    RoleDefinition {
        role: Role::Staff,
        display_name: "Staff",
        description: "Read-only access to the summary dashboard",
        color: "#6b7280",
        permissions: &[Permission::from_static("dashboard.view")],
    },
];

/// Look up the registry entry of a role.
pub fn role_definition(role: Role) -> &'static RoleDefinition {
    match role {
        Role::Admin => &REGISTRY[0],
        Role::StrategyTeam => &REGISTRY[1],
        Role::DepartmentUser => &REGISTRY[2],
        Role::DataAnalyst => &REGISTRY[3],
        Role::Hod => &REGISTRY[4],
        Role::Staff => &REGISTRY[5],
    }
}

/// All registry entries, in declaration order.
pub fn role_registry() -> &'static [RoleDefinition] {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_resolves_to_its_own_definition() {
        for role in Role::ALL {
            assert_eq!(role_definition(role).role, role);
        }
        assert_eq!(role_registry().len(), Role::ALL.len());
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn only_admin_holds_the_wildcard() {
        for def in role_registry() {
            let wildcard = def.permissions.contains(&Permission::WILDCARD);
            assert_eq!(wildcard, def.role == Role::Admin, "{}", def.role.as_str());
        }
    }

    #[test]
    fn staff_lists_no_export_permission() {
        let perms = Role::Staff.definition().permissions;
        assert!(perms.contains(&Permission::from_static("dashboard.view")));
        assert!(!perms.contains(&Permission::from_static("exports.download")));
    }
}
