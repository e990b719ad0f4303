use chrono::{DateTime, FixedOffset};

use crate::wire::wire_model;

wire_model! {
    /// Account as returned by the profile and auth endpoints
    #[derive(Debug, Clone, PartialEq)]
    pub struct User {
        pub id: i64 => "id",
        pub username: String => "username",
        pub email: String => "email",
        pub first_name: Option<String> => "first_name",
        pub last_name: Option<String> => "last_name",
        pub user_type: String => "user_type",
        pub phone_number: Option<String> => "phone_number",
        pub profile_image: Option<String> => "profile_image",
        pub is_verified: bool => "is_verified",
        pub subscription_plan: String => "subscription_plan",
        pub created_at: DateTime<FixedOffset> => "created_at",
        pub updated_at: Option<DateTime<FixedOffset>> => "updated_at",
    }
}

impl User {
    /// "First Last", trimmed; empty when neither name is set
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    /// Name to show in headers: full name, falling back to the username
    pub fn display_name(&self) -> String {
        let full_name = self.full_name();
        if full_name.is_empty() {
            self.username.clone()
        } else {
            full_name
        }
    }

    pub fn user_kind(&self) -> Option<UserKind> {
        UserKind::from_wire(&self.user_type)
    }
}

/// Account categories the backend offers at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserKind {
    Farmer,
    Company,
    Government,
    Researcher,
}

impl UserKind {
    pub const ALL: [UserKind; 4] = [
        UserKind::Farmer,
        UserKind::Company,
        UserKind::Government,
        UserKind::Researcher,
    ];

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "farmer" => Some(UserKind::Farmer),
            "company" => Some(UserKind::Company),
            "government" => Some(UserKind::Government),
            "researcher" => Some(UserKind::Researcher),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserKind::Farmer => "farmer",
            UserKind::Company => "company",
            UserKind::Government => "government",
            UserKind::Researcher => "researcher",
        }
    }

    pub fn label_ar(&self) -> &'static str {
        match self {
            UserKind::Farmer => "مزارع",
            UserKind::Company => "شركة زراعية",
            UserKind::Government => "جهة حكومية",
            UserKind::Researcher => "باحث",
        }
    }
}
