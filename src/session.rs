use crate::credentials::Credentials;
use crate::error::{Result, RuobrError};
use crate::models::User;
use crate::response;
use serde_json::Value;

/// Authentication state of an account.
///
/// There is no terminal state: once authenticated the child list is cached
/// for the account's lifetime, and re-authentication replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub enum Auth {
    Unauthenticated,
    Authenticated {
        children: Vec<User>,
        /// True for parent ("applicant") profiles managing several children
        applicant: bool,
    },
}

/// Account-lifecycle state shared by the blocking and async clients:
/// encoded credentials, authentication state, and the selected-child index.
///
/// Not thread-safe by itself; callers sharing an account across threads wrap
/// it in their own synchronization.
#[derive(Debug, Clone)]
pub struct Account {
    credentials: Credentials,
    auth: Auth,
    selected: usize,
}

impl Account {
    /// Create an unauthenticated account from raw credentials
    pub fn new(username: &str, password: &str) -> Self {
        Account {
            credentials: Credentials::new(username, password),
            auth: Auth::Unauthenticated,
            selected: 0,
        }
    }

    /// Encoded header values for the wire
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth, Auth::Authenticated { .. })
    }

    /// Whether this is a parent profile; `None` before authentication
    pub fn is_applicant(&self) -> Option<bool> {
        match &self.auth {
            Auth::Unauthenticated => None,
            Auth::Authenticated { applicant, .. } => Some(*applicant),
        }
    }

    /// Whether the account has zero children; `None` before authentication
    pub fn is_empty(&self) -> Option<bool> {
        self.children().map(|c| c.is_empty())
    }

    /// All children fetched by the last authentication, if any
    pub fn children(&self) -> Option<&[User]> {
        match &self.auth {
            Auth::Unauthenticated => None,
            Auth::Authenticated { children, .. } => Some(children),
        }
    }

    /// Record which child subsequent child-scoped calls refer to.
    ///
    /// Selection alone never triggers a network call; an index outside the
    /// fetched list makes later lookups fail the same way an empty account
    /// does.
    pub fn select_child(&mut self, index: usize) {
        self.selected = index;
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The currently selected child. Callers authenticate first; an empty
    /// account (or an out-of-range selection) yields `NoChildren`.
    pub fn selected_user(&self) -> Result<&User> {
        self.children()
            .and_then(|children| children.get(self.selected))
            .ok_or(RuobrError::NoChildren)
    }

    /// Drop the cached child list so the next call re-authenticates
    pub fn reset(&mut self) {
        self.auth = Auth::Unauthenticated;
    }

    /// Absorb the `user/` payload, transitioning to `Authenticated`.
    ///
    /// Applicant payloads carry the children in a nested `childs` list whose
    /// entries lack the `status` and `gps_tracker` fields; those are
    /// inherited from the parent object before mapping. Any other payload
    /// describes a single student and becomes a one-entry list.
    pub fn absorb_user_payload(&mut self, payload: Value) -> Result<()> {
        let is_applicant = payload.get("status").and_then(Value::as_str) == Some("applicant");

        let (children, applicant) = if is_applicant {
            let gps_tracker = payload
                .get("gps_tracker")
                .cloned()
                .unwrap_or(Value::Bool(false));
            let childs = match payload.get("childs") {
                Some(Value::Array(list)) => list.clone(),
                _ => {
                    return Err(RuobrError::Schema(serde::de::Error::custom(
                        "applicant payload without a childs list",
                    )))
                }
            };
            let children = childs
                .into_iter()
                .map(|mut child| {
                    if let Some(map) = child.as_object_mut() {
                        map.insert("status".to_string(), Value::from("applicant"));
                        map.insert("gps_tracker".to_string(), gps_tracker.clone());
                    }
                    response::convert::<User>(child)
                })
                .collect::<Result<Vec<User>>>()?;
            (children, true)
        } else {
            (vec![response::convert::<User>(payload)?], false)
        };

        self.auth = Auth::Authenticated {
            children,
            applicant,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn student_payload() -> Value {
        json!({
            "status": "child",
            "id": 9999999,
            "first_name": "Михаил",
            "last_name": "Зубенко",
            "middle_name": "Петрович",
            "school": "МБОУ \"СОШ №69\"",
            "school_is_tourniquet": false,
            "readonly": false,
            "school_is_food": true,
            "group": "11А",
            "gps_tracker": false
        })
    }

    fn applicant_payload(children: usize) -> Value {
        let childs: Vec<Value> = (0..children)
            .map(|i| {
                json!({
                    "id": 1000000 + i as i64,
                    "first_name": "Имя",
                    "last_name": "Фамилия",
                    "middle_name": "Отчество",
                    "school": "школа",
                    "school_is_tourniquet": false,
                    "readonly": false,
                    "school_is_food": true,
                    "group": format!("{}Б", i + 1)
                })
            })
            .collect();
        json!({"status": "applicant", "gps_tracker": true, "childs": childs})
    }

    #[test]
    fn test_student_account_single_child() {
        let mut account = Account::new("user", "pass");
        assert!(!account.is_authenticated());
        assert_eq!(account.is_applicant(), None);

        account.absorb_user_payload(student_payload()).unwrap();
        assert!(account.is_authenticated());
        assert_eq!(account.is_applicant(), Some(false));
        assert_eq!(account.is_empty(), Some(false));
        assert_eq!(account.selected_user().unwrap().id, 9999999);
    }

    #[test]
    fn test_applicant_children_inherit_parent_fields() {
        let mut account = Account::new("user", "pass");
        account.absorb_user_payload(applicant_payload(2)).unwrap();

        assert_eq!(account.is_applicant(), Some(true));
        let children = account.children().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].status, "applicant");
        assert!(children[0].gps_tracker);

        account.select_child(1);
        assert_eq!(account.selected_user().unwrap().id, 1000001);
    }

    #[test]
    fn test_empty_applicant_account() {
        let mut account = Account::new("user", "pass");
        account.absorb_user_payload(applicant_payload(0)).unwrap();

        assert_eq!(account.is_empty(), Some(true));
        assert!(matches!(
            account.selected_user(),
            Err(RuobrError::NoChildren)
        ));
    }

    #[test]
    fn test_out_of_range_selection() {
        let mut account = Account::new("user", "pass");
        account.absorb_user_payload(student_payload()).unwrap();
        account.select_child(5);
        assert!(matches!(
            account.selected_user(),
            Err(RuobrError::NoChildren)
        ));
    }

    #[test]
    fn test_reset_drops_cached_children() {
        let mut account = Account::new("user", "pass");
        account.absorb_user_payload(student_payload()).unwrap();
        account.reset();
        assert!(!account.is_authenticated());
        assert!(account.children().is_none());
    }

    #[test]
    fn test_applicant_without_childs_list_is_schema_error() {
        let mut account = Account::new("user", "pass");
        let result = account.absorb_user_payload(json!({"status": "applicant"}));
        assert!(matches!(result, Err(RuobrError::Schema(_))));
        assert!(!account.is_authenticated());
    }
}
