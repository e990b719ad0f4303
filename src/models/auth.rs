use crate::validators::{
    validate_email, validate_not_blank, validate_password_pair, validate_username,
    ValidationError,
};
use crate::wire::wire_model;

wire_model! {
    /// Credentials posted to the token endpoint
    #[derive(Debug, Clone, PartialEq)]
    pub struct LoginRequest {
        pub username: String => "username",
        pub password: String => "password",
    }
}

wire_model! {
    /// Access/refresh token pair issued on login
    #[derive(Debug, Clone, PartialEq)]
    pub struct LoginResponse {
        pub access: String => "access",
        pub refresh: String => "refresh",
    }
}

wire_model! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct TokenRefreshRequest {
        pub refresh: String => "refresh",
    }
}

wire_model! {
    /// Sign-up form payload.
    ///
    /// `password_confirm` is collected on the client and sent with the
    /// request; the server never echoes it back.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RegisterRequest {
        pub username: String => "username",
        pub email: String => "email",
        pub password: String => "password",
        pub password_confirm: String => "password_confirm",
        pub first_name: Option<String> => "first_name",
        pub last_name: Option<String> => "last_name",
        pub user_type: String => "user_type",
        pub phone_number: Option<String> => "phone_number",
    }
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_not_blank("username", &self.username)?;
        validate_not_blank("password", &self.password)
    }
}

impl LoginResponse {
    /// Value for the Authorization header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access)
    }

    /// Request that exchanges this refresh token for a new access token
    pub fn refresh_request(&self) -> TokenRefreshRequest {
        TokenRefreshRequest {
            refresh: self.refresh.clone(),
        }
    }
}

impl RegisterRequest {
    /// Check the form before it is sent; stops at the first bad field
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_username(&self.username)?;
        validate_email(&self.email)?;
        validate_password_pair(&self.password, &self.password_confirm)?;
        validate_not_blank("user_type", &self.user_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::WireModel;
    use serde_json::json;

    fn register() -> RegisterRequest {
        RegisterRequest {
            username: "ali".to_string(),
            email: "ali@example.com".to_string(),
            password: "secret123".to_string(),
            password_confirm: "secret123".to_string(),
            first_name: Some("Ali".to_string()),
            last_name: None,
            user_type: "farmer".to_string(),
            phone_number: None,
        }
    }

    #[test]
    fn test_register_request_wire_keys() {
        let value = register().to_value();
        assert_eq!(value["password_confirm"], "secret123");
        assert_eq!(value["first_name"], "Ali");
        assert_eq!(value["last_name"], serde_json::Value::Null);
        assert_eq!(RegisterRequest::wire_name("password_confirm"), Some("password_confirm"));
    }

    #[test]
    fn test_register_request_validate() {
        assert!(register().validate().is_ok());

        let mut request = register();
        request.password_confirm = "different1".to_string();
        assert_eq!(request.validate().unwrap_err().field, "password_confirm");

        let mut request = register();
        request.email = "nope".to_string();
        assert_eq!(request.validate().unwrap_err().field, "email");
    }

    #[test]
    fn test_login_request_validate() {
        assert!(LoginRequest::new("ali", "pw").validate().is_ok());
        assert_eq!(
            LoginRequest::new("ali", "").validate().unwrap_err().field,
            "password"
        );
    }

    #[test]
    fn test_login_response_decode() {
        let response =
            LoginResponse::from_value(&json!({"access": "aaa", "refresh": "rrr"})).unwrap();
        assert_eq!(response.bearer(), "Bearer aaa");
        assert_eq!(response.refresh_request().to_value(), json!({"refresh": "rrr"}));
    }

    #[test]
    fn test_login_response_missing_refresh() {
        let err = LoginResponse::from_value(&json!({"access": "aaa"})).unwrap_err();
        let decode = err.decode_error().unwrap();
        assert_eq!(decode.entity, "LoginResponse");
        assert_eq!(decode.field, "refresh");
    }
}
