use super::schemas::{ProfileViewState, UserAccount};

/// Which profile form sections the account gets to see.
pub fn get_profile_view_state(user: &UserAccount) -> ProfileViewState {
    ProfileViewState {
        show_seller_section: user.is_seller,
        show_home_address_section: !user.is_seller && !user.is_admin && !user.is_shipper,
        warnings: user.warnings.clone(),
    }
}
