//! Role hierarchy with paired management roles.
//!
//! Roles form a forest per venue through their `parent` link. A role that
//! requires management gets an auxiliary management role ("<name> Manager")
//! that supervises it. The pair is one-to-one: the base role points at its
//! management role, the management role points back through `manages`, and
//! the management role sits under the same parent as its base role.
//!
//! Management roles follow their base role. They are created, renamed,
//! re-parented and removed only through the base role.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VenueError};
use crate::tenant::{ensure_same_class, TenantId};

const MANAGEMENT_SUFFIX: &str = " Manager";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleId(pub u64);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "role#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub venue: TenantId,
    pub parent: Option<RoleId>,
    pub requires_management: bool,
    /// Set on a base role that requires management.
    pub management_role: Option<RoleId>,
    /// Set on a management role; the base role it supervises.
    pub manages: Option<RoleId>,
}

impl Role {
    pub fn is_management(&self) -> bool {
        self.manages.is_some()
    }
}

/// Create role payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCreate {
    pub name: String,
    pub venue: TenantId,
    #[serde(default)]
    pub parent: Option<RoleId>,
    #[serde(default)]
    pub requires_management: bool,
}

/// Update role payload. `parent: Some(None)` detaches the role to the top level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleUpdate {
    pub name: Option<String>,
    pub parent: Option<Option<RoleId>>,
    pub requires_management: Option<bool>,
}

/// In-memory store of all roles, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct RoleHierarchy {
    roles: BTreeMap<RoleId, Role>,
    next_id: u64,
}

impl RoleHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn get(&self, id: RoleId) -> Option<&Role> {
        self.roles.get(&id)
    }

    /// Direct children of a role, management roles included.
    pub fn children(&self, id: RoleId) -> Vec<&Role> {
        self.roles
            .values()
            .filter(|r| r.parent == Some(id))
            .collect()
    }

    /// Parent chain from the direct parent up to the root.
    pub fn ancestors(&self, id: RoleId) -> Vec<&Role> {
        let mut chain = Vec::new();
        let mut seen = BTreeSet::from([id]);
        let mut cursor = self.roles.get(&id).and_then(|r| r.parent);
        while let Some(parent_id) = cursor {
            if !seen.insert(parent_id) {
                break;
            }
            let Some(parent) = self.roles.get(&parent_id) else {
                break;
            };
            chain.push(parent);
            cursor = parent.parent;
        }
        chain
    }

    pub fn roles_for_venue(&self, venue: &TenantId) -> Vec<&Role> {
        self.roles.values().filter(|r| &r.venue == venue).collect()
    }

    /// Create a role, plus its management role when `requires_management` is set.
    ///
    /// Returns the base role.
    pub fn create_role(&mut self, actor: &TenantId, req: RoleCreate) -> Result<Role> {
        ensure_same_class(actor, &req.venue)?;

        let name = validate_name(&req.name)?;
        if let Some(parent_id) = req.parent {
            self.check_parent(&req.venue, parent_id)?;
        }

        self.ensure_name_free(&req.venue, &name, &[])?;
        if req.requires_management {
            self.ensure_name_free(&req.venue, &management_name(&name), &[])?;
        }

        let id = self.allocate_id();
        self.roles.insert(
            id,
            Role {
                id,
                name,
                venue: req.venue,
                parent: req.parent,
                requires_management: req.requires_management,
                management_role: None,
                manages: None,
            },
        );

        if req.requires_management {
            self.attach_management_role(id)?;
        }

        self.fetch(id).cloned()
    }

    /// Apply an update to a base role and keep its management role in step.
    ///
    /// Every check runs before anything is written, so a failed update leaves
    /// the hierarchy untouched.
    pub fn update_role(&mut self, actor: &TenantId, id: RoleId, update: RoleUpdate) -> Result<Role> {
        let current = self.fetch_base(actor, id)?.clone();

        let name = match &update.name {
            Some(raw) => validate_name(raw)?,
            None => current.name.clone(),
        };
        let keeps_manager = update
            .requires_management
            .unwrap_or(current.management_role.is_some());

        let mut ignore = vec![id];
        ignore.extend(current.management_role);
        if update.name.is_some() {
            self.ensure_name_free(&current.venue, &name, &ignore)?;
        }
        if keeps_manager && (update.name.is_some() || current.management_role.is_none()) {
            self.ensure_name_free(&current.venue, &management_name(&name), &ignore)?;
        }

        if let Some(Some(parent_id)) = update.parent {
            self.check_reparent(&current, parent_id)?;
        }

        if let (false, Some(manager_id)) = (keeps_manager, current.management_role) {
            self.ensure_childless(manager_id)?;
        }

        let base = self.fetch_mut(id)?;
        base.name = name.clone();
        if let Some(new_parent) = update.parent {
            base.parent = new_parent;
        }

        match (keeps_manager, current.management_role) {
            (true, Some(manager_id)) => {
                let manager = self.fetch_mut(manager_id)?;
                manager.name = management_name(&name);
                if let Some(new_parent) = update.parent {
                    manager.parent = new_parent;
                }
            }
            (true, None) => {
                self.fetch_mut(id)?.requires_management = true;
                self.attach_management_role(id)?;
            }
            (false, Some(manager_id)) => {
                self.roles.remove(&manager_id);
                let base = self.fetch_mut(id)?;
                base.requires_management = false;
                base.management_role = None;
                tracing::debug!(base = %id, manager = %manager_id, "removed management role");
            }
            (false, None) => {}
        }

        self.fetch(id).cloned()
    }

    /// Delete a base role together with its management role.
    pub fn delete_role(&mut self, actor: &TenantId, id: RoleId) -> Result<Role> {
        let current = self.fetch_base(actor, id)?.clone();

        let blocking = self
            .children(id)
            .iter()
            .any(|child| Some(child.id) != current.management_role);
        if blocking {
            return Err(VenueError::Validation(format!(
                "{} still has child roles",
                id
            )));
        }
        if let Some(manager_id) = current.management_role {
            self.ensure_childless(manager_id)?;
            self.roles.remove(&manager_id);
        }

        self.roles
            .remove(&id)
            .ok_or_else(|| VenueError::NotFound(id.to_string()))
    }

    fn allocate_id(&mut self) -> RoleId {
        self.next_id += 1;
        RoleId(self.next_id)
    }

    fn fetch(&self, id: RoleId) -> Result<&Role> {
        self.roles
            .get(&id)
            .ok_or_else(|| VenueError::NotFound(id.to_string()))
    }

    fn fetch_mut(&mut self, id: RoleId) -> Result<&mut Role> {
        self.roles
            .get_mut(&id)
            .ok_or_else(|| VenueError::NotFound(id.to_string()))
    }

    /// Look up a role the actor may change directly.
    fn fetch_base(&self, actor: &TenantId, id: RoleId) -> Result<&Role> {
        let role = self.fetch(id)?;
        ensure_same_class(actor, &role.venue)?;
        if role.is_management() {
            return Err(VenueError::Validation(format!(
                "{} is a management role and follows its base role",
                id
            )));
        }
        Ok(role)
    }

    fn check_parent(&self, venue: &TenantId, parent_id: RoleId) -> Result<()> {
        let parent = self.fetch(parent_id)?;
        ensure_same_class(venue, &parent.venue)?;
        if &parent.venue != venue {
            return Err(VenueError::Validation(format!(
                "parent {} belongs to another venue",
                parent_id
            )));
        }
        Ok(())
    }

    /// A base role and its management role may not end up below either of them.
    fn check_reparent(&self, role: &Role, parent_id: RoleId) -> Result<()> {
        self.check_parent(&role.venue, parent_id)?;

        let mut moved = vec![role.id];
        moved.extend(role.management_role);
        if moved.contains(&parent_id) {
            return Err(VenueError::Validation(format!(
                "{} cannot be placed under itself",
                role.id
            )));
        }
        if self
            .ancestors(parent_id)
            .iter()
            .any(|r| moved.contains(&r.id))
        {
            return Err(VenueError::Validation(format!(
                "moving {} under {} would create a cycle",
                role.id, parent_id
            )));
        }
        Ok(())
    }

    fn ensure_name_free(&self, venue: &TenantId, name: &str, ignore: &[RoleId]) -> Result<()> {
        let taken = self
            .roles
            .values()
            .any(|r| &r.venue == venue && r.name == name && !ignore.contains(&r.id));
        if taken {
            return Err(VenueError::DuplicateKey(format!(
                "role '{}' already exists in {}",
                name, venue
            )));
        }
        Ok(())
    }

    fn ensure_childless(&self, id: RoleId) -> Result<()> {
        if !self.children(id).is_empty() {
            return Err(VenueError::Validation(format!(
                "{} still has child roles",
                id
            )));
        }
        Ok(())
    }

    fn attach_management_role(&mut self, base_id: RoleId) -> Result<RoleId> {
        let base = self.fetch(base_id)?.clone();
        let manager_id = self.allocate_id();
        self.roles.insert(
            manager_id,
            Role {
                id: manager_id,
                name: management_name(&base.name),
                venue: base.venue,
                parent: base.parent,
                requires_management: false,
                management_role: None,
                manages: Some(base_id),
            },
        );
        self.fetch_mut(base_id)?.management_role = Some(manager_id);
        tracing::debug!(base = %base_id, manager = %manager_id, "created management role");
        Ok(manager_id)
    }
}

fn validate_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(VenueError::Validation("role name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

fn management_name(base: &str) -> String {
    format!("{}{}", base, MANAGEMENT_SUFFIX)
}
