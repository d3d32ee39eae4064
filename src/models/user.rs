use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(Debug, Queryable, Selectable, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
}

impl User {
    /// Descriptive columns of this user, used to overwrite a stored row.
    pub fn changes(&self) -> UserChanges {
        UserChanges {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// NewUser model for inserting new records; the store assigns the id
#[derive(Debug, Insertable, Deserialize, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
}

impl NewUser {
    /// Attaches a store-assigned id, producing the persisted shape.
    pub fn with_id(self, id: i32) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

/// Full overwrite of the descriptive columns.
/// `None` clears `last_name` instead of leaving it untouched.
#[derive(Debug, AsChangeset, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(treat_none_as_null = true)]
pub struct UserChanges {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
}
