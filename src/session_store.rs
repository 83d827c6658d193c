use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::debug;
use std::fs;
use std::path;

use crate::errors::*;
use crate::models::*;
use crate::schema;
use crate::utilities::*;

embed_migrations!("migrations");

/// Single-row SQLite store holding the bearer token and account details of
/// the logged-in user. Saving a new session replaces whatever was there.
pub struct SessionStore {
    connection: SqliteConnection,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserAccount,
    pub saved_at: NaiveDateTime,
}

impl SessionStore {
    pub fn establish(session_file: &str) -> Result<SessionStore> {
        let parent = path::Path::new(session_file).parent().chain_err(|| {
            format!(
                "Failed to determine parent directory of session file path: {}",
                session_file
            )
        })?;
        fs::create_dir_all(parent)
            .chain_err(|| format!("Failed to create session directory: {}", parent.display()))?;
        debug!("Using session file: {}", session_file);
        let connection = SqliteConnection::establish(session_file)
            .chain_err(|| "Failed to establish SQLite session store connection")?;
        embedded_migrations::run(&connection)
            .chain_err(|| "Failed to perform session store schema migrations")?;
        Ok(SessionStore { connection })
    }

    pub fn load(&self) -> Result<Option<Session>> {
        use schema::sessions::dsl::*;
        schema::sessions::table
            .select((token, user_id, full_name, email, account_created_at, saved_at))
            .first::<(String, i64, String, String, Option<String>, String)>(&self.connection)
            .optional()
            .chain_err(|| "Failed to load session from session store")?
            .map(
                |(token_, user_id_, full_name_, email_, account_created_at_, saved_at_)| {
                    Ok(Session {
                        token: token_,
                        user: UserAccount {
                            id: user_id_,
                            full_name: full_name_,
                            email: email_,
                            created_at: account_created_at_,
                        },
                        saved_at: parse_iso_timestamp(&saved_at_)?,
                    })
                },
            )
            .transpose()
    }

    pub fn save(&self, token_: &str, user: &UserAccount, saved_at_: NaiveDateTime) -> Result<()> {
        use schema::sessions::dsl::*;
        diesel::delete(schema::sessions::table)
            .execute(&self.connection)
            .chain_err(|| "Failed to clear previous session from session store")?;
        diesel::insert_into(schema::sessions::table)
            .values((
                token.eq(token_),
                user_id.eq(user.id),
                full_name.eq(&user.full_name),
                email.eq(&user.email),
                account_created_at.eq(user.created_at.as_ref()),
                saved_at.eq(format_iso_timestamp(saved_at_)),
            ))
            .execute(&self.connection)
            .chain_err(|| "Failed to save session to session store")?;
        Ok(())
    }

    /// Removes the stored session, reporting whether one existed.
    pub fn clear(&self) -> Result<bool> {
        diesel::delete(schema::sessions::table)
            .execute(&self.connection)
            .map(|count| count > 0)
            .chain_err(|| "Failed to clear session from session store")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user() -> UserAccount {
        UserAccount {
            id: 7,
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            created_at: Some("2025-05-18T09:32:14.123456".to_string()),
        }
    }

    fn saved_at() -> NaiveDateTime {
        NaiveDate::from_ymd(2025, 5, 18).and_hms(9, 45, 0)
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let store = SessionStore::establish(":memory:").unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.save("token-1", &user(), saved_at()).unwrap();
        let session = store.load().unwrap().unwrap();
        assert_eq!(session.token, "token-1");
        assert_eq!(session.user, user());
        assert_eq!(session.saved_at, saved_at());
    }

    #[test]
    fn test_save_replaces_previous_session() {
        let store = SessionStore::establish(":memory:").unwrap();
        store.save("token-1", &user(), saved_at()).unwrap();
        let other = UserAccount {
            id: 8,
            full_name: "Vikram Shah".to_string(),
            email: "vikram@example.com".to_string(),
            created_at: None,
        };
        store.save("token-2", &other, saved_at()).unwrap();
        let session = store.load().unwrap().unwrap();
        assert_eq!(session.token, "token-2");
        assert_eq!(session.user, other);
    }

    #[test]
    fn test_clear() {
        let store = SessionStore::establish(":memory:").unwrap();
        assert!(!store.clear().unwrap());
        store.save("token-1", &user(), saved_at()).unwrap();
        assert!(store.clear().unwrap());
        assert_eq!(store.load().unwrap(), None);
    }
}
