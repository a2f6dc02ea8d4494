use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::schemas::{HomeAddress, SellerProfile, UserAccount, UserWarning};

#[allow(dead_code)]
#[derive(Debug, FromRow)]
pub struct UserAccountModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
    pub is_seller: bool,
    pub is_shipper: bool,
    pub seller: Option<Json<SellerProfile>>,
    pub home_address: Option<Json<HomeAddress>>,
    pub warnings: Json<Vec<UserWarning>>,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
}

impl UserAccountModel {
    pub fn into_schema(self) -> UserAccount {
        UserAccount {
            id: self.id,
            name: self.name,
            email: self.email,
            is_admin: self.is_admin,
            is_seller: self.is_seller,
            is_shipper: self.is_shipper,
            seller: self.seller.map(|seller| seller.0),
            home_address: self.home_address.map(|address| address.0),
            warnings: self.warnings.0,
            created_on: self.created_on,
        }
    }
}
