use crate::core::error::StoreError;
use crate::models::lead::{Lead, LikeStatus};
use crate::models::org::OrganizationState;
use crate::models::user::{User, UserRole};
use crate::persistence::snapshot::SnapshotStore;
use crate::stores::session::Session;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

struct Inner {
    state: OrganizationState,
    session: Session,
    revision: u64,
}

/// Owner of the organization aggregate and the login session.
///
/// Every operation runs under one lock, so each is atomic with respect to the
/// aggregate. Guards run before any field is touched; a rejected operation
/// leaves the state exactly as it was. Committed mutations bump the revision
/// and are written to the snapshot before the lock is released.
pub struct OrgStore {
    inner: Mutex<Inner>,
    snapshot: SnapshotStore,
}

impl OrgStore {
    /// Load the aggregate from the snapshot (seeding it when absent)
    pub fn open(snapshot: SnapshotStore) -> Self {
        let state = snapshot.load();
        Self::with_state(state, snapshot)
    }

    pub fn with_state(state: OrganizationState, snapshot: SnapshotStore) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state,
                session: Session::new(),
                revision: 0,
            }),
            snapshot,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn commit(&self, inner: &mut Inner) {
        inner.revision += 1;
        self.snapshot.save(&inner.state);
    }

    /// Write the current state to the snapshot
    pub fn flush(&self) {
        let inner = self.lock();
        self.snapshot.save(&inner.state);
    }

    // Session

    pub fn login(&self, username: &str) -> Result<User, StoreError> {
        let mut inner = self.lock();

        let Some(user) = inner
            .state
            .users
            .iter()
            .find(|u| u.name == username && u.is_active())
            .cloned()
        else {
            return Err(rejected("login", StoreError::UnknownUser(username.to_string())));
        };

        inner.session.start(&user.id);
        info!(user_id = %user.id, name = %user.name, "Logged in");
        Ok(user)
    }

    pub fn logout(&self) {
        let mut inner = self.lock();
        if let Some(user_id) = inner.session.current_user_id() {
            info!(user_id = %user_id, "Logged out");
        }
        inner.session.end();
    }

    pub fn current_user(&self) -> Option<User> {
        let inner = self.lock();
        let user_id = inner.session.current_user_id()?;
        inner.state.user(user_id).cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_authenticated()
    }

    // Leads

    /// Spend `credit_cost` credits to reveal a lead. Succeeds at most once
    /// per lead.
    pub fn unlock_lead(&self, lead_id: u32) -> Result<Lead, StoreError> {
        let mut inner = self.lock();
        let available = inner.state.credits;

        let lead = find_lead(&mut inner.state, lead_id).map_err(|e| rejected("unlock_lead", e))?;
        if lead.is_unlocked {
            return Err(rejected("unlock_lead", StoreError::AlreadyUnlocked(lead_id)));
        }
        if available < lead.credit_cost {
            return Err(rejected(
                "unlock_lead",
                StoreError::InsufficientCredits {
                    required: lead.credit_cost,
                    available,
                },
            ));
        }

        lead.is_unlocked = true;
        let unlocked = lead.clone();
        inner.state.credits = available - unlocked.credit_cost;
        self.commit(&mut inner);

        info!(
            lead_id,
            cost = unlocked.credit_cost,
            credits_left = inner.state.credits,
            "Lead unlocked"
        );
        Ok(unlocked)
    }

    /// Point a lead at an active user. The new assignee's
    /// `assigned_leads_count` goes up by one and the previous assignee's goes
    /// down by one; re-assigning to the same user changes no counts.
    pub fn assign_lead(&self, lead_id: u32, user_id: &str) -> Result<Lead, StoreError> {
        let mut inner = self.lock();
        let state = &mut inner.state;

        match state.user(user_id) {
            None => {
                return Err(rejected("assign_lead", StoreError::UserNotFound(user_id.to_string())));
            }
            Some(user) if !user.is_active() => {
                return Err(rejected("assign_lead", StoreError::UserRemoved(user_id.to_string())));
            }
            Some(_) => {}
        }

        let lead = find_lead(state, lead_id).map_err(|e| rejected("assign_lead", e))?;
        let previous = lead.assigned_to.replace(user_id.to_string());
        let assigned = lead.clone();

        if previous.as_deref() != Some(user_id) {
            if let Some(previous) = &previous {
                adjust_assigned_count(&mut state.users, previous, |n| n.saturating_sub(1));
            }
            adjust_assigned_count(&mut state.users, user_id, |n| n + 1);
        }
        self.commit(&mut inner);

        info!(lead_id, user_id, previous = ?previous, "Lead assigned");
        Ok(assigned)
    }

    pub fn like_lead(&self, lead_id: u32) -> Result<Lead, StoreError> {
        self.set_like_status(lead_id, LikeStatus::Liked)
    }

    pub fn dislike_lead(&self, lead_id: u32) -> Result<Lead, StoreError> {
        self.set_like_status(lead_id, LikeStatus::Disliked)
    }

    fn set_like_status(&self, lead_id: u32, status: LikeStatus) -> Result<Lead, StoreError> {
        let mut inner = self.lock();

        let lead = find_lead(&mut inner.state, lead_id).map_err(|e| rejected("like_status", e))?;
        lead.like_status = Some(status);
        let updated = lead.clone();
        self.commit(&mut inner);

        info!(lead_id, status = ?status, "Lead rated");
        Ok(updated)
    }

    /// Replace the lead with the same id, field for field. Unlock and
    /// assignment state are kept from the stored record; those only change
    /// through `unlock_lead`, `assign_lead` and the removal cascade.
    pub fn update_lead(&self, mut lead: Lead) -> Result<Lead, StoreError> {
        let mut inner = self.lock();

        let slot = find_lead(&mut inner.state, lead.id).map_err(|e| rejected("update_lead", e))?;
        if lead.is_unlocked != slot.is_unlocked || lead.assigned_to != slot.assigned_to {
            warn!(
                lead_id = lead.id,
                "Ignoring unlock/assignment changes in lead update"
            );
        }
        lead.is_unlocked = slot.is_unlocked;
        lead.assigned_to = slot.assigned_to.clone();
        *slot = lead.clone();
        self.commit(&mut inner);

        info!(lead_id = lead.id, "Lead updated");
        Ok(lead)
    }

    // Users

    /// Change another user's role. Removing a user unassigns every lead that
    /// pointed at them.
    pub fn update_user_role(&self, user_id: &str, new_role: UserRole) -> Result<User, StoreError> {
        let mut inner = self.lock();

        if inner.session.is(user_id) {
            return Err(rejected("update_user_role", StoreError::SelfRoleChange));
        }

        let state = &mut inner.state;
        let Some(index) = state.users.iter().position(|u| u.id == user_id) else {
            return Err(rejected(
                "update_user_role",
                StoreError::UserNotFound(user_id.to_string()),
            ));
        };

        let old_role = state.users[index].role;
        let mut unassigned = 0u32;
        if new_role == UserRole::Removed {
            for lead in state.leads.iter_mut() {
                if lead.assigned_to.as_deref() == Some(user_id) {
                    lead.assigned_to = None;
                    unassigned += 1;
                }
            }
        }

        let user = &mut state.users[index];
        user.role = new_role;
        if unassigned > 0 {
            user.assigned_leads_count = user.assigned_leads_count.map(|n| n.saturating_sub(unassigned));
        }
        let updated = user.clone();
        self.commit(&mut inner);

        info!(
            user_id,
            from = %old_role,
            to = %new_role,
            unassigned_leads = unassigned,
            "User role changed"
        );
        Ok(updated)
    }

    // Reads

    /// Run `f` against the current aggregate without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&OrganizationState) -> R) -> R {
        let inner = self.lock();
        f(&inner.state)
    }

    /// Like `read`, also passing the revision the state belongs to
    pub fn read_versioned<R>(&self, f: impl FnOnce(&OrganizationState, u64) -> R) -> R {
        let inner = self.lock();
        f(&inner.state, inner.revision)
    }

    pub fn snapshot(&self) -> OrganizationState {
        self.read(|state| state.clone())
    }

    pub fn org_name(&self) -> String {
        self.read(|state| state.org_name.clone())
    }

    pub fn credits(&self) -> u32 {
        self.read(|state| state.credits)
    }

    pub fn users(&self) -> Vec<User> {
        self.read(|state| state.users.clone())
    }

    pub fn active_users(&self) -> Vec<User> {
        self.read(|state| state.active_users().cloned().collect())
    }

    pub fn leads(&self) -> Vec<Lead> {
        self.read(|state| state.leads.clone())
    }

    pub fn lead(&self, lead_id: u32) -> Option<Lead> {
        self.read(|state| state.lead(lead_id).cloned())
    }

    pub fn user(&self, user_id: &str) -> Option<User> {
        self.read(|state| state.user(user_id).cloned())
    }

    /// Incremented on every committed mutation
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }
}

fn find_lead(state: &mut OrganizationState, lead_id: u32) -> Result<&mut Lead, StoreError> {
    state
        .leads
        .iter_mut()
        .find(|l| l.id == lead_id)
        .ok_or(StoreError::LeadNotFound(lead_id))
}

fn adjust_assigned_count(users: &mut [User], user_id: &str, f: impl FnOnce(u32) -> u32) {
    if let Some(user) = users.iter_mut().find(|u| u.id == user_id) {
        user.assigned_leads_count = Some(f(user.assigned_leads_count.unwrap_or(0)));
    }
}

fn rejected(operation: &'static str, err: StoreError) -> StoreError {
    warn!(operation, error = %err, "Operation rejected");
    err
}
