use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Admin,
}

/// A stored account. `password` holds an argon2 PHC string, never the
/// plain text; use [`UserView`] for anything sent to a client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub role: Role,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(rename = "yearOfBirth", default, skip_serializing_if = "Option::is_none")]
    pub year_of_birth: Option<String>,
    pub address: String,
    pub city: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    #[serde(rename = "cardNumber", default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(rename = "cardExpDate", default, skip_serializing_if = "Option::is_none")]
    pub card_exp_date: Option<String>,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "myList", default, skip_serializing_if = "Vec::is_empty")]
    pub my_list: Vec<String>,
}

/// Account fields supplied at registration and on profile updates.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub year_of_birth: Option<String>,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub card_number: Option<String>,
    pub card_exp_date: Option<String>,
    pub password_hash: String,
}

impl UserProfile {
    pub fn into_user(self, id: String, role: Role) -> User {
        User {
            id,
            role,
            name: self.name,
            surname: self.surname,
            email: self.email,
            year_of_birth: self.year_of_birth,
            address: self.address,
            city: self.city,
            postal_code: self.postal_code,
            card_number: self.card_number,
            card_exp_date: self.card_exp_date,
            password: self.password_hash,
            image: None,
            my_list: Vec::new(),
        }
    }

    /// Overwrites the profile fields of `user`. Id, role, image and
    /// watchlist are kept. Client-only fields are kept when not supplied.
    pub fn apply(self, user: &mut User) {
        user.name = self.name;
        user.surname = self.surname;
        user.email = self.email;
        user.address = self.address;
        user.city = self.city;
        user.postal_code = self.postal_code;
        user.password = self.password_hash;
        if self.year_of_birth.is_some() {
            user.year_of_birth = self.year_of_birth;
        }
        if self.card_number.is_some() {
            user.card_number = self.card_number;
        }
        if self.card_exp_date.is_some() {
            user.card_exp_date = self.card_exp_date;
        }
    }
}

/// The public shape of a user, without the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: String,
    pub role: Role,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(rename = "yearOfBirth", skip_serializing_if = "Option::is_none")]
    pub year_of_birth: Option<String>,
    pub address: String,
    pub city: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    #[serde(rename = "cardNumber", skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(rename = "cardExpDate", skip_serializing_if = "Option::is_none")]
    pub card_exp_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "myList")]
    pub my_list: Vec<String>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            name: user.name,
            surname: user.surname,
            email: user.email,
            year_of_birth: user.year_of_birth,
            address: user.address,
            city: user.city,
            postal_code: user.postal_code,
            card_number: user.card_number,
            card_exp_date: user.card_exp_date,
            image: user.image,
            my_list: user.my_list,
        }
    }
}
