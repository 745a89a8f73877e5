//! User administration.

use std::sync::Arc;

use backoffice_query::{ListState, OwnedPage};
use chrono::Utc;

use super::validation::{validate_create_user, validate_update_user};
use super::{Latency, Operation, Result, ServiceError};
use crate::model::{seed_users, CreateUser, UpdateUser, User, UserStatus, NEXT_USER_ID};
use crate::store::{ResourceStore, Store, StoreError};

const KIND: &str = "User";
const EMAIL_TAKEN: &str = "User with this email already exists";

#[derive(Debug, Clone)]
pub struct UserService {
    store: Store<User>,
    latency: Latency,
}

impl Default for UserService {
    fn default() -> Self {
        UserService::seeded(Latency::default())
    }
}

impl UserService {
    pub fn new(store: Store<User>, latency: Latency) -> Self {
        UserService { store, latency }
    }

    /// Starts from the seeded accounts.
    pub fn seeded(latency: Latency) -> Self {
        UserService::new(Store::new(seed_users(), NEXT_USER_ID), latency)
    }

    /// The list state a fresh users screen starts with: newest first.
    pub fn default_list_state(page_size: usize) -> ListState {
        let mut state = ListState::new(page_size);
        state.set_sort(User::CREATED_AT, backoffice_query::Dir::Desc);
        state
    }

    pub fn snapshot(&self) -> Arc<Vec<User>> {
        self.store.snapshot()
    }

    fn email_taken(&self, email: &str, except: Option<&str>) -> bool {
        self.store
            .snapshot()
            .iter()
            .any(|u| u.email == email && Some(u.id.as_str()) != except)
    }

    fn not_found(err: StoreError) -> ServiceError {
        let StoreError::NotFound { id } = err;
        ServiceError::NotFound { kind: KIND, id }
    }
}

impl ResourceStore for UserService {
    type Item = User;
    type Id = String;
    type Draft = CreateUser;
    type Patch = UpdateUser;
    type Error = ServiceError;

    fn parse_id(&self, id_str: &str) -> Result<String> {
        let id = id_str.trim();
        if id.is_empty() {
            return Err(Self::not_found_error(&id.to_string()));
        }
        Ok(id.to_string())
    }

    fn get(&self, id: &String) -> Result<Option<User>> {
        self.latency.wait(Operation::Get);
        let user = self.store.get(id).cloned();
        tracing::debug!(%id, found = user.is_some(), "get user");
        Ok(user)
    }

    fn not_found_error(id: &String) -> ServiceError {
        ServiceError::NotFound {
            kind: KIND,
            id: id.clone(),
        }
    }

    fn list(&self, state: &ListState) -> Result<OwnedPage<User>> {
        self.latency.wait(Operation::List);
        let records = self.store.snapshot();
        let page = state.run(records.as_slice())?.into_owned();
        tracing::debug!(
            total = page.pagination.total,
            page = page.pagination.page,
            "list users"
        );
        Ok(page)
    }

    fn create(&mut self, draft: CreateUser) -> Result<User> {
        self.latency.wait(Operation::Create);
        if let Err(errors) = validate_create_user(&draft) {
            tracing::warn!(count = errors.len(), "user rejected by validation");
            return Err(ServiceError::Validation(errors));
        }
        if self.email_taken(&draft.email, None) {
            tracing::warn!(email = %draft.email, "duplicate user email");
            return Err(ServiceError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: self.store.allocate_id(),
            name: draft.name,
            email: draft.email,
            role: draft.role,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
            last_login: None,
            avatar: None,
        };
        self.store.insert(user.clone());
        tracing::debug!(id = %user.id, "created user");
        Ok(user)
    }

    fn update(&mut self, id: &String, patch: UpdateUser) -> Result<User> {
        self.latency.wait(Operation::Update);
        if self.store.get(id).is_none() {
            return Err(Self::not_found_error(id));
        }
        if let Err(errors) = validate_update_user(&patch) {
            tracing::warn!(%id, count = errors.len(), "user update rejected by validation");
            return Err(ServiceError::Validation(errors));
        }
        if let Some(email) = &patch.email {
            if self.email_taken(email, Some(id)) {
                tracing::warn!(%id, %email, "duplicate user email");
                return Err(ServiceError::Conflict(EMAIL_TAKEN.to_string()));
            }
        }

        let now = Utc::now();
        let records = self
            .store
            .replace(id, |user| patch.apply(user, now))
            .map_err(Self::not_found)?;
        let user = records
            .iter()
            .find(|u| &u.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found_error(id))?;
        tracing::debug!(%id, "updated user");
        Ok(user)
    }

    fn delete(&mut self, id: &String) -> Result<()> {
        self.latency.wait(Operation::Delete);
        self.store.remove(id).map_err(Self::not_found)?;
        tracing::debug!(%id, "deleted user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn service() -> UserService {
        UserService::seeded(Latency::none())
    }

    fn draft(email: &str) -> CreateUser {
        CreateUser {
            name: "Grace Hopper".into(),
            email: email.into(),
            role: Role::Moderator,
            password: "Cobol1959".into(),
        }
    }

    #[test]
    fn default_list_is_newest_first() {
        let users = service();
        let page = users.list(&UserService::default_list_state(10)).unwrap();
        let ids: Vec<_> = page.items.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["1", "4", "2", "5", "3"]);
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn list_filters_by_status_and_search() {
        let users = service();
        let mut state = UserService::default_list_state(10);
        state.select(User::STATUS, "active");
        state.set_search("s");
        let page = users.list(&state).unwrap();
        let names: Vec<_> = page.items.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Sarah Wilson", "Jane Smith"]);
    }

    #[test]
    fn bad_sort_field_is_a_query_error() {
        let users = service();
        let mut state = ListState::new(10);
        state.set_sort("role", backoffice_query::Dir::Asc);
        assert!(matches!(users.list(&state), Err(ServiceError::Query(_))));
    }

    #[test]
    fn create_assigns_next_id() {
        let mut users = service();
        let user = users.create(draft("grace@example.com")).unwrap();
        assert_eq!(user.id, "6");
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.last_login, None);
        assert_eq!(users.snapshot().len(), 6);
    }

    #[test]
    fn create_rejects_duplicate_email() {
        let mut users = service();
        let err = users.create(draft("jane.smith@example.com")).unwrap_err();
        assert_eq!(err, ServiceError::Conflict(EMAIL_TAKEN.into()));
    }

    #[test]
    fn update_allows_keeping_own_email() {
        let mut users = service();
        let patch = UpdateUser {
            email: Some("jane.smith@example.com".into()),
            role: Some(Role::Admin),
            ..UpdateUser::default()
        };
        let user = users.update(&"2".to_string(), patch).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert!(user.updated_at > user.created_at);

        let steal = UpdateUser {
            email: Some("john.doe@example.com".into()),
            ..UpdateUser::default()
        };
        assert!(matches!(
            users.update(&"2".to_string(), steal),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let mut users = service();
        let id = "42".to_string();
        assert_eq!(users.get(&id).unwrap(), None);
        assert_eq!(users.resolve(&id).unwrap_err().to_string(), "User not found");
        assert!(users.update(&id, UpdateUser::default()).is_err());
        assert!(users.delete(&id).is_err());
        assert!(users.parse_id("  ").is_err());
    }

    #[test]
    fn delete_removes_user() {
        let mut users = service();
        users.delete(&"3".to_string()).unwrap();
        assert_eq!(users.snapshot().len(), 4);
        assert!(users.get(&"3".to_string()).unwrap().is_none());
    }
}
