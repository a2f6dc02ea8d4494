#[cfg(test)]
mod tests {
    use crate::routes::user::schemas::{
        CreateUserAccount, SellerProfile, UpdateHomeAddressRequest, UpdateProfileRequest,
    };
    use crate::routes::user::utils::{build_seller_profile, validate_profile_update};
    use crate::routes::user::views::get_profile_view_state;
    use crate::tests::tests::get_dummy_user_account;
    use crate::utils::validation_errors_message;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;
    use secrecy::SecretString;
    use validator::Validate;

    fn profile_request(password: Option<&str>, confirm_password: Option<&str>) -> UpdateProfileRequest {
        UpdateProfileRequest {
            name: Name().fake(),
            email: SafeEmail().fake(),
            password: password.map(|p| SecretString::from(p.to_string())),
            confirm_password: confirm_password.map(|p| SecretString::from(p.to_string())),
            seller_name: None,
            seller_logo: None,
            seller_description: None,
        }
    }

    #[test]
    fn test_profile_password_mismatch_is_rejected() {
        let body = profile_request(Some("secret1"), Some("secret2"));
        let result = validate_profile_update(&body);
        assert!(result.is_err());
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("Password and Confirm Password Are Not Matched".to_string())
        );

        let body = profile_request(Some("secret1"), None);
        assert!(validate_profile_update(&body).is_err());
    }

    #[test]
    fn test_profile_matching_or_absent_password_is_accepted() {
        let body = profile_request(Some("secret1"), Some("secret1"));
        assert!(validate_profile_update(&body).is_ok());
        assert!(body.new_password().is_some());

        let body = profile_request(None, None);
        assert!(validate_profile_update(&body).is_ok());
        assert!(body.new_password().is_none());

        // An empty password keeps the stored one.
        let body = profile_request(Some(""), Some(""));
        assert!(validate_profile_update(&body).is_ok());
        assert!(body.new_password().is_none());
    }

    #[test]
    fn test_profile_password_length_matches_registration() {
        let body = profile_request(Some("123"), Some("123"));
        let errors = body.validate().expect_err("Short password should be invalid");
        assert!(validation_errors_message(&errors).contains("password must be at least 6 characters"));

        assert!(profile_request(Some("secret1"), Some("secret1")).validate().is_ok());
        assert!(profile_request(Some(""), Some("")).validate().is_ok());
        assert!(profile_request(None, None).validate().is_ok());
    }

    #[test]
    fn test_profile_view_state_per_account_type() {
        let buyer = get_dummy_user_account(false, false, false);
        let view = get_profile_view_state(&buyer);
        assert!(!view.show_seller_section);
        assert!(view.show_home_address_section);

        let seller = get_dummy_user_account(false, true, false);
        let view = get_profile_view_state(&seller);
        assert!(view.show_seller_section);
        assert!(!view.show_home_address_section);

        let admin = get_dummy_user_account(true, false, false);
        let view = get_profile_view_state(&admin);
        assert!(!view.show_seller_section);
        assert!(!view.show_home_address_section);

        let shipper = get_dummy_user_account(false, false, true);
        let view = get_profile_view_state(&shipper);
        assert!(!view.show_seller_section);
        assert!(!view.show_home_address_section);
    }

    #[test]
    fn test_seller_fields_only_apply_to_sellers() {
        let mut body = profile_request(None, None);
        body.seller_name = Some("Corner Shop".to_string());

        let buyer = get_dummy_user_account(false, false, false);
        assert_eq!(build_seller_profile(&buyer, &body), None);

        let mut seller = get_dummy_user_account(false, true, false);
        seller.seller = Some(SellerProfile {
            name: "Old Shop".to_string(),
            logo: "/logo.png".to_string(),
            description: "Hand made goods".to_string(),
        });
        assert_eq!(
            build_seller_profile(&seller, &body),
            Some(SellerProfile {
                name: "Corner Shop".to_string(),
                logo: "/logo.png".to_string(),
                description: "Hand made goods".to_string(),
            })
        );
    }

    #[test]
    fn test_registration_validation() {
        let body: CreateUserAccount = serde_json::from_value(serde_json::json!({
            "name": "",
            "email": "not-an-email",
            "password": "123"
        }))
        .expect("Failed to parse registration body");
        let errors = body.validate().expect_err("Registration should be invalid");
        let message = validation_errors_message(&errors);
        assert!(message.contains("name is required"));
        assert!(message.contains("email is not a valid email"));
        assert!(message.contains("password must be at least 6 characters"));

        let body: CreateUserAccount = serde_json::from_value(serde_json::json!({
            "name": "Jane Buyer",
            "email": "jane@example.com",
            "password": "123456",
            "isSeller": true,
            "seller": {"name": "Jane's", "logo": "", "description": ""}
        }))
        .expect("Failed to parse registration body");
        assert!(body.validate().is_ok());
        assert!(body.is_seller);
        assert!(!body.is_admin);
    }

    #[test]
    fn test_home_address_requires_every_field() {
        let body: UpdateHomeAddressRequest = serde_json::from_value(serde_json::json!({
            "address": "1 Main St",
            "city": "",
            "postalCode": "12345",
            "country": "NZ"
        }))
        .expect("Failed to parse address body");
        assert!(body.validate().is_err());

        let body: UpdateHomeAddressRequest = serde_json::from_value(serde_json::json!({
            "address": "1 Main St",
            "city": "Wellington",
            "postalCode": "12345",
            "country": "NZ"
        }))
        .expect("Failed to parse address body");
        assert!(body.validate().is_ok());
    }
}
