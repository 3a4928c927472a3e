// 🔗 Merger - enrich child tables with user attributes via left joins
//
// Both joins are rooted at `users`: every user appears at least once in each
// output, and a user with several matching child rows fans out to one row per match.

use crate::records::{Delivery, Transaction, User};
use crate::schema::{join_columns, Column, Row, Value};
use std::collections::HashMap;

pub const JOIN_KEY: &str = "user_id";

/// A table that can be left-joined onto users by `user_id`
pub trait ChildRecord: Row {
    /// Appended to child columns whose name collides with a user column
    const JOIN_SUFFIX: &'static str;

    fn user_id(&self) -> &str;
}

impl ChildRecord for Transaction {
    const JOIN_SUFFIX: &'static str = "_txn";

    fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl ChildRecord for Delivery {
    const JOIN_SUFFIX: &'static str = "_dlv";

    fn user_id(&self) -> &str {
        &self.user_id
    }
}

// ============================================================================
// JOINED ROW
// ============================================================================

/// One row of `left ⟕ right`; `right` is None for a user with no match
#[derive(Debug, Clone, PartialEq)]
pub struct Joined<L, R> {
    pub left: L,
    pub right: Option<R>,
}

pub type UserTransaction = Joined<User, Transaction>;
pub type UserDelivery = Joined<User, Delivery>;

impl<R: ChildRecord> Row for Joined<User, R> {
    fn columns() -> Vec<Column> {
        join_columns(&User::columns(), &R::columns(), JOIN_KEY, R::JOIN_SUFFIX)
    }

    fn values(&self) -> Vec<Value<'_>> {
        let mut values = self.left.values();

        match &self.right {
            Some(child) => {
                let child_values = child.values();
                for (col, value) in R::columns().iter().zip(child_values) {
                    if col.name != JOIN_KEY {
                        values.push(value);
                    }
                }
            }
            None => {
                let width = R::columns().iter().filter(|c| c.name != JOIN_KEY).count();
                values.extend(std::iter::repeat(Value::Null).take(width));
            }
        }

        values
    }
}

// ============================================================================
// JOINS
// ============================================================================

/// `users ⟕ children` on user_id
///
/// Output follows user order; matches for one user keep the children's order.
pub fn left_join<R: ChildRecord + Clone>(users: &[User], children: &[R]) -> Vec<Joined<User, R>> {
    let mut by_user: HashMap<&str, Vec<&R>> = HashMap::new();
    for child in children {
        by_user.entry(child.user_id()).or_default().push(child);
    }

    let mut joined = Vec::with_capacity(users.len().max(children.len()));
    for user in users {
        match by_user.get(user.user_id.as_str()) {
            Some(matches) => {
                for child in matches {
                    joined.push(Joined {
                        left: user.clone(),
                        right: Some((*child).clone()),
                    });
                }
            }
            None => joined.push(Joined {
                left: user.clone(),
                right: None,
            }),
        }
    }

    joined
}

/// Two independent left joins rooted at users
pub fn merge_data(
    users: &[User],
    transactions: &[Transaction],
    deliveries: &[Delivery],
) -> (Vec<UserTransaction>, Vec<UserDelivery>) {
    (left_join(users, transactions), left_join(users, deliveries))
}

// ============================================================================
// TESTS
// ============================================================================
