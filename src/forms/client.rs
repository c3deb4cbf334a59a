use serde::Deserialize;
use validator::Validate;

use crate::domain::client::NewClient;
use crate::domain::types::{
    ClientEmail, ClientName, ClientPhone, ClientSurname, ItemId, Notes, OrderId,
};
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for adding a client.
pub struct AddClientForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub surname: String,
    #[validate(length(min = 1))]
    pub phone: String,
    /// Optional; blank means no email.
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub notes: String,
}

/// Item the user was assigning when they chose to create a new client.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PendingAssignment {
    pub order_id: OrderId,
    pub item_id: ItemId,
}

impl TryFrom<AddClientForm> for NewClient {
    type Error = FormError;

    fn try_from(form: AddClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = ClientName::new(form.name).map_err(|_| FormError::InvalidName)?;
        let surname = ClientSurname::new(form.surname).map_err(|_| FormError::InvalidName)?;
        let phone = ClientPhone::new(form.phone).map_err(|_| FormError::InvalidPhoneNumber)?;
        let email = match form.email.trim() {
            "" => None,
            raw => Some(ClientEmail::new(raw).map_err(|_| FormError::InvalidEmail)?),
        };

        Ok(NewClient::new(
            name,
            surname,
            phone,
            email,
            Notes::new(form.notes),
        ))
    }
}
