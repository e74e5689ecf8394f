//! Member model and registration form composition.

/// A registered member as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Member {
    /// Login id chosen at registration.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Argon2 PHC hash of the password.
    pub pass: String,
    /// Full e-mail address (`local@domain`).
    pub email: String,
    /// Mobile number, segments joined with `-`.
    pub mobile: String,
    pub zipcode: String,
    pub address1: String,
    pub address2: String,
    /// Landline number, or empty when not given.
    pub phone: String,
    /// Whether the member opted in to e-mail.
    pub email_get: bool,
    /// Registration timestamp (`YYYY-MM-DD HH:MM:SS`, UTC).
    pub reg_date: String,
}

/// Data for inserting a member. `pass` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub id: String,
    pub name: String,
    pub pass: String,
    pub email: String,
    pub mobile: String,
    pub zipcode: String,
    pub address1: String,
    pub address2: String,
    pub phone: String,
    pub email_get: bool,
}

impl NewMember {
    /// Create a new member with empty contact fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>, pass_hash: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pass: pass_hash.into(),
            email: String::new(),
            mobile: String::new(),
            zipcode: String::new(),
            address1: String::new(),
            address2: String::new(),
            phone: String::new(),
            email_get: false,
        }
    }

    /// Set the e-mail address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the mobile number.
    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = mobile.into();
        self
    }

    /// Set the landline number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Set the postal address.
    pub fn with_address(
        mut self,
        zipcode: impl Into<String>,
        address1: impl Into<String>,
        address2: impl Into<String>,
    ) -> Self {
        self.zipcode = zipcode.into();
        self.address1 = address1.into();
        self.address2 = address2.into();
        self
    }

    /// Set the e-mail opt-in flag.
    pub fn with_email_get(mut self, email_get: bool) -> Self {
        self.email_get = email_get;
        self
    }
}

/// Partial member update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct MemberUpdate {
    pub name: Option<String>,
    /// New password hash.
    pub pass: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub zipcode: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub phone: Option<String>,
    pub email_get: Option<bool>,
}

impl MemberUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.pass.is_none()
            && self.email.is_none()
            && self.mobile.is_none()
            && self.zipcode.is_none()
            && self.address1.is_none()
            && self.address2.is_none()
            && self.phone.is_none()
            && self.email_get.is_none()
    }

    /// Set the new password hash.
    pub fn pass(mut self, pass_hash: impl Into<String>) -> Self {
        self.pass = Some(pass_hash.into());
        self
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Registration or profile form as the member entered it.
///
/// Contact numbers arrive in three segments and the e-mail address in two
/// parts; [`MemberForm::email`], [`MemberForm::mobile`] and
/// [`MemberForm::phone`] join them into the stored representation.
#[derive(Debug, Clone, Default)]
pub struct MemberForm {
    pub id: String,
    pub name: String,
    /// Plaintext password, hashed before it is stored.
    pub pass: String,
    pub email_id: String,
    pub email_domain: String,
    pub mobile1: String,
    pub mobile2: String,
    pub mobile3: String,
    pub phone1: String,
    pub phone2: String,
    pub phone3: String,
    pub zipcode: String,
    pub address1: String,
    pub address2: String,
    pub email_get: bool,
}

/// Separator between phone number segments.
pub const PHONE_SEPARATOR: &str = "-";

impl MemberForm {
    /// `email_id@email_domain`.
    pub fn email(&self) -> String {
        format!("{}@{}", self.email_id, self.email_domain)
    }

    /// Mobile segments joined with `-`.
    pub fn mobile(&self) -> String {
        [
            self.mobile1.as_str(),
            self.mobile2.as_str(),
            self.mobile3.as_str(),
        ]
        .join(PHONE_SEPARATOR)
    }

    /// Landline segments joined with `-`, or empty when the second or third
    /// segment is missing.
    pub fn phone(&self) -> String {
        if self.phone2.is_empty() || self.phone3.is_empty() {
            return String::new();
        }
        [
            self.phone1.as_str(),
            self.phone2.as_str(),
            self.phone3.as_str(),
        ]
        .join(PHONE_SEPARATOR)
    }

    /// Build the insert record using an already hashed password.
    pub fn to_new_member(&self, pass_hash: impl Into<String>) -> NewMember {
        NewMember::new(&self.id, &self.name, pass_hash)
            .with_email(self.email())
            .with_mobile(self.mobile())
            .with_phone(self.phone())
            .with_address(&self.zipcode, &self.address1, &self.address2)
            .with_email_get(self.email_get)
    }

    /// Build a full profile update using an already hashed password.
    pub fn to_update(&self, pass_hash: impl Into<String>) -> MemberUpdate {
        MemberUpdate {
            name: Some(self.name.clone()),
            pass: Some(pass_hash.into()),
            email: Some(self.email()),
            mobile: Some(self.mobile()),
            zipcode: Some(self.zipcode.clone()),
            address1: Some(self.address1.clone()),
            address2: Some(self.address2.clone()),
            phone: Some(self.phone()),
            email_get: Some(self.email_get),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> MemberForm {
        MemberForm {
            id: "u1".to_string(),
            name: "Hong".to_string(),
            pass: "1234".to_string(),
            email_id: "hong".to_string(),
            email_domain: "example.com".to_string(),
            mobile1: "010".to_string(),
            mobile2: "1234".to_string(),
            mobile3: "5678".to_string(),
            phone1: "02".to_string(),
            phone2: "555".to_string(),
            phone3: "0101".to_string(),
            zipcode: "12345".to_string(),
            address1: "Seoul".to_string(),
            address2: "Apt 1".to_string(),
            email_get: true,
        }
    }

    #[test]
    fn test_email_composition() {
        assert_eq!(sample_form().email(), "hong@example.com");
    }

    #[test]
    fn test_mobile_composition() {
        assert_eq!(sample_form().mobile(), "010-1234-5678");
    }

    #[test]
    fn test_phone_composition() {
        assert_eq!(sample_form().phone(), "02-555-0101");
    }

    #[test]
    fn test_phone_empty_when_segment_missing() {
        let mut form = sample_form();
        form.phone2.clear();
        assert_eq!(form.phone(), "");

        let mut form = sample_form();
        form.phone3.clear();
        assert_eq!(form.phone(), "");
    }

    #[test]
    fn test_to_new_member() {
        let member = sample_form().to_new_member("hashed");

        assert_eq!(member.id, "u1");
        assert_eq!(member.pass, "hashed");
        assert_eq!(member.email, "hong@example.com");
        assert_eq!(member.mobile, "010-1234-5678");
        assert_eq!(member.phone, "02-555-0101");
        assert_eq!(member.zipcode, "12345");
        assert!(member.email_get);
    }

    #[test]
    fn test_to_update_sets_every_field() {
        let update = sample_form().to_update("rehashed");

        assert!(!update.is_empty());
        assert_eq!(update.pass.as_deref(), Some("rehashed"));
        assert_eq!(update.email.as_deref(), Some("hong@example.com"));
        assert_eq!(update.email_get, Some(true));
    }

    #[test]
    fn test_member_update_builder() {
        assert!(MemberUpdate::new().is_empty());

        let update = MemberUpdate::new().name("New").pass("h");
        assert_eq!(update.name.as_deref(), Some("New"));
        assert_eq!(update.pass.as_deref(), Some("h"));
        assert!(update.email.is_none());
    }
}
