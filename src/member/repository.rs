//! Member repository.
//!
//! CRUD operations for the `members` table.

use sqlx::{QueryBuilder, SqlitePool};

use super::model::{Member, MemberUpdate, NewMember};
use crate::{BbsError, Result};

const MEMBER_COLUMNS: &str = "id, name, pass, email, mobile, zipcode, address1, address2, \
                              phone, email_get, reg_date";

/// Repository for member CRUD operations.
pub struct MemberRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MemberRepository<'a> {
    /// Create a new MemberRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a member and return the stored record.
    pub async fn create(&self, new_member: &NewMember) -> Result<Member> {
        sqlx::query(
            "INSERT INTO members (id, name, pass, email, mobile, zipcode, address1, address2, phone, email_get)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_member.id)
        .bind(&new_member.name)
        .bind(&new_member.pass)
        .bind(&new_member.email)
        .bind(&new_member.mobile)
        .bind(&new_member.zipcode)
        .bind(&new_member.address1)
        .bind(&new_member.address2)
        .bind(&new_member.phone)
        .bind(new_member.email_get)
        .execute(self.pool)
        .await
        .map_err(|e| BbsError::Database(e.to_string()))?;

        self.get_by_id(&new_member.id)
            .await?
            .ok_or_else(|| BbsError::NotFound("member".to_string()))
    }

    /// Get a member by id.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Member>> {
        let query = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE id = ?");
        let member = sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| BbsError::Database(e.to_string()))?;

        Ok(member)
    }

    /// Check whether a member id is already registered.
    pub async fn exists(&self, id: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE id = ?)")
            .bind(id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| BbsError::Database(e.to_string()))?;

        Ok(exists)
    }

    /// Get only the stored password hash of a member.
    pub async fn pass_of(&self, id: &str) -> Result<Option<String>> {
        let pass: Option<String> = sqlx::query_scalar("SELECT pass FROM members WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| BbsError::Database(e.to_string()))?;

        Ok(pass)
    }

    /// Update a member by id.
    ///
    /// Only fields that are set in the update are modified.
    /// Returns the updated member, or None if not found.
    pub async fn update(&self, id: &str, update: &MemberUpdate) -> Result<Option<Member>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE members SET ");
        let mut separated = query.separated(", ");

        if let Some(ref name) = update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name);
        }
        if let Some(ref pass) = update.pass {
            separated.push("pass = ");
            separated.push_bind_unseparated(pass);
        }
        if let Some(ref email) = update.email {
            separated.push("email = ");
            separated.push_bind_unseparated(email);
        }
        if let Some(ref mobile) = update.mobile {
            separated.push("mobile = ");
            separated.push_bind_unseparated(mobile);
        }
        if let Some(ref zipcode) = update.zipcode {
            separated.push("zipcode = ");
            separated.push_bind_unseparated(zipcode);
        }
        if let Some(ref address1) = update.address1 {
            separated.push("address1 = ");
            separated.push_bind_unseparated(address1);
        }
        if let Some(ref address2) = update.address2 {
            separated.push("address2 = ");
            separated.push_bind_unseparated(address2);
        }
        if let Some(ref phone) = update.phone {
            separated.push("phone = ");
            separated.push_bind_unseparated(phone);
        }
        if let Some(email_get) = update.email_get {
            separated.push("email_get = ");
            separated.push_bind_unseparated(email_get);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| BbsError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Count all members.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(self.pool)
            .await
            .map_err(|e| BbsError::Database(e.to_string()))?;

        Ok(count)
    }
}
